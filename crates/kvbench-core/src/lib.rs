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

//! KVBench core: statistics engine and benchmark driver.
//!
//! Measures interchangeable parser implementations against the same input by
//! timing repeated parse/free trials into per-adapter running statistics and
//! rendering a comparative report.
//!
//! ## Components
//!
//! - [`stats`]: the running-statistics collector (count, total, optional
//!   extrema)
//! - [`timing`]: the timed-operation wrapper feeding the collectors
//! - [`adapter`]: the parse/free capability each candidate implements
//! - [`driver`]: the sequential iterate-and-measure control loop
//! - [`report`] / [`reporters`]: finished aggregates and their renderers
//!
//! ## Usage
//!
//! ```no_run
//! use kvbench_core::{BenchmarkDriver, DriverConfig, InputBuffer};
//! use kvbench_core::reporters::console;
//!
//! # fn adapters() -> Vec<Box<dyn kvbench_core::ParserAdapter>> { Vec::new() }
//! # fn main() -> kvbench_core::Result<()> {
//! let input = InputBuffer::from_file("weapons.kv")?;
//! let driver = BenchmarkDriver::new(DriverConfig::new())?;
//! let report = driver.run(&input, adapters())?;
//! console::print_report(&report);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod report;
pub mod reporters;
pub mod stats;
pub mod timing;

pub use adapter::{AdapterError, InputMode, ParseOutput, ParserAdapter, TrialInput};
pub use config::{DriverConfig, FailurePolicy, DEFAULT_TRIALS};
pub use driver::BenchmarkDriver;
pub use error::{BenchError, Result};
pub use input::InputBuffer;
pub use report::{duration_ms, AdapterReport, OperationReport, RunReport};
pub use stats::RunningStats;
pub use timing::{timed, try_timed};
