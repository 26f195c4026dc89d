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

//! KVBench command-line interface.
//!
//! Loads one KeyValue file, runs every registered parser adapter through
//! repeated parse/free trials, and prints the comparative timing report.

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use kvbench_core::reporters::{console, json};
use kvbench_core::{BenchmarkDriver, DriverConfig, FailurePolicy, InputBuffer, ParserAdapter};
use kvbench_parsers::{FastKvAdapter, TreeKvAdapter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Symbols defined by default for define-aware parsers.
const DEFAULT_DEFINES: &[&str] = &["X64", "X86_64", "LINUX"];

/// KVBench - KeyValue parser benchmark harness
///
/// Measures and compares the parse and free performance of the registered
/// KeyValue parser implementations against a single input file.
#[derive(Parser)]
#[command(name = "kvbench")]
#[command(author, version, about = "KVBench - KeyValue parser benchmark harness", long_about = None)]
struct Cli {
    /// Path to the KeyValue file to benchmark.
    file: PathBuf,

    /// Number of parse/free trials per adapter.
    #[arg(long, default_value_t = kvbench_core::DEFAULT_TRIALS)]
    trials: u64,

    /// Keep running when an adapter fails to parse; failed trials are
    /// counted per adapter instead of aborting the run.
    #[arg(long)]
    skip_failures: bool,

    /// Disable best/worst time tracking; only averages are reported.
    #[arg(long)]
    no_extrema: bool,

    /// Define a symbol for define-aware parsers. Repeatable.
    /// Defaults to X64, X86_64, LINUX when omitted.
    #[arg(long = "define", value_name = "SYMBOL")]
    defines: Vec<String>,

    /// Emit the report as pretty-printed JSON instead of the text table.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Usage problems exit with code 1 rather than clap's default 2;
    // --help and --version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = err.print();
            return code;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> kvbench_core::Result<()> {
    let input = InputBuffer::from_file(&cli.file)?;

    let defines: Vec<String> = if cli.defines.is_empty() {
        DEFAULT_DEFINES.iter().map(|s| s.to_string()).collect()
    } else {
        cli.defines.clone()
    };

    // Registration order is report order.
    let adapters: Vec<Box<dyn ParserAdapter>> = vec![
        Box::new(FastKvAdapter::with_defines(defines)),
        Box::new(TreeKvAdapter::new()),
    ];

    let config = DriverConfig::new()
        .with_trials(cli.trials)
        .with_failure_policy(if cli.skip_failures {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        })
        .with_extrema(!cli.no_extrema);

    if !cli.json {
        println!(
            "{} {} ({} bytes), {} trials per adapter",
            "Benchmarking".green().bold(),
            input.name(),
            input.len(),
            config.trials
        );
    }

    let driver = BenchmarkDriver::new(config)?;
    let report = driver.run(&input, adapters)?;

    if cli.json {
        println!("{}", json::to_json_pretty(&report)?);
    } else {
        console::print_report(&report);
    }

    Ok(())
}
