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

//! Candidate KeyValue parser implementations.
//!
//! Two interchangeable parsers for the same KeyValue format, exposed to the
//! benchmark driver through `kvbench_core::ParserAdapter`:
//!
//! - [`treekv`]: recursive-descent, builds an owned node tree, read-only
//!   input
//! - [`fastkv`]: single-pass, unescapes in place and returns spans into its
//!   own buffer, requires a private mutable copy per trial, evaluates
//!   `[$SYM]` conditional tags against a define set
//!
//! The format: `"key" "value"` pairs and `"key" { ... }` blocks, quoted and
//! unquoted tokens, `\n \t \" \\` escapes, `//` line comments.

pub mod error;
pub mod fastkv;
pub mod treekv;

pub use error::{KvError, KvErrorKind};
pub use fastkv::{FastDocument, FastKvAdapter, Item, Span};
pub use treekv::{KvNode, KvValue, TreeKvAdapter};
