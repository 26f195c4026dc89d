// KVBench - KeyValue Parser Benchmark Harness
//
// Copyright (c) 2025 KVBench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Criterion comparison of the two KeyValue parsers.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kvbench_parsers::{fastkv, treekv};
use std::collections::HashSet;

/// Generates a nested weapon-config style document with `entries` blocks.
fn generate_document(entries: usize) -> String {
    let mut doc = String::from("// generated benchmark fixture\n");
    for i in 0..entries {
        doc.push_str(&format!(
            concat!(
                "\"weapon_{i}\"\n",
                "{{\n",
                "    \"name\" \"weapon number {i}\"\n",
                "    \"damage\" \"{dmg}\"\n",
                "    \"model\" \"models\\\\w_{i}.mdl\"\n",
                "    \"platform\" \"sdl\" [$LINUX]\n",
                "    \"ammo\"\n",
                "    {{\n",
                "        \"clip\" \"{clip}\"\n",
                "    }}\n",
                "}}\n",
            ),
            i = i,
            dmg = (i * 7) % 100,
            clip = (i % 30) + 1,
        ));
    }
    doc
}

fn parser_benchmarks(c: &mut Criterion) {
    let doc = generate_document(1_000);
    let bytes = doc.as_bytes();
    let defines: HashSet<String> = ["X64", "X86_64", "LINUX"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("treekv", |b| {
        b.iter(|| treekv::parse(black_box(bytes)).unwrap())
    });

    // fastkv consumes its buffer, so the copy is part of each iteration —
    // the same cost the benchmark driver pays per trial.
    group.bench_function("fastkv", |b| {
        b.iter(|| fastkv::parse_in_place(black_box(bytes.to_vec()), &defines).unwrap())
    });

    group.finish();
}

criterion_group!(benches, parser_benchmarks);
criterion_main!(benches);
