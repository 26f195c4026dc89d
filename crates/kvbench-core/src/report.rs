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

//! Report value types.
//!
//! The driver reduces its collectors into these plain, serializable types
//! once the run completes; renderers only ever see finished aggregates in
//! milliseconds.

use crate::stats::RunningStats;
use std::time::Duration;

/// Converts a duration to milliseconds for display.
pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Final aggregates for one (adapter, operation) pair.
///
/// `None` fields mean "no data": either no samples were recorded or extrema
/// tracking was disabled.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationReport {
    /// Number of successful samples.
    pub samples: u64,
    /// Average time in milliseconds.
    pub avg_ms: Option<f64>,
    /// Best (minimum) time in milliseconds.
    pub best_ms: Option<f64>,
    /// Worst (maximum) time in milliseconds.
    pub worst_ms: Option<f64>,
}

impl OperationReport {
    /// Reduces a collector to its final aggregates.
    pub fn from_stats(stats: &RunningStats) -> Self {
        Self {
            samples: stats.sample_count(),
            avg_ms: stats.average().map(duration_ms),
            best_ms: stats.min().map(duration_ms),
            worst_ms: stats.max().map(duration_ms),
        }
    }

    /// Returns true when at least one sample was recorded.
    pub fn has_data(&self) -> bool {
        self.samples > 0
    }
}

/// Per-adapter section of the report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdapterReport {
    /// Adapter display name.
    pub name: String,
    /// Parse timing aggregates.
    pub parse: OperationReport,
    /// Free timing aggregates.
    pub free: OperationReport,
    /// Trials that failed to parse (only non-zero under the skip policy).
    pub failed_trials: u64,
}

/// The complete result of one benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    /// Display name of the input file.
    pub input_name: String,
    /// Input length in bytes.
    pub input_bytes: usize,
    /// Configured trial count.
    pub trials: u64,
    /// RFC 3339 timestamp of the run.
    pub timestamp: String,
    /// Per-adapter results, in registration order.
    pub adapters: Vec<AdapterReport>,
}
