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

//! The iterate-and-measure control loop.
//!
//! Runs N parse/free trials across all registered adapters, sequentially on
//! one thread — concurrent parsing would contaminate the timings, and the
//! whole point of the harness is isolated per-operation measurement. Within
//! every trial the adapters run in registration order, each against a
//! logically identical input; an adapter's free always completes before its
//! next parse begins.
//!
//! There is no cancellation or timeout: an operation that never returns
//! stalls the run indefinitely. Accepted limitation.

use crate::adapter::{InputMode, ParserAdapter, TrialInput};
use crate::config::{DriverConfig, FailurePolicy};
use crate::error::{BenchError, Result};
use crate::input::InputBuffer;
use crate::report::{AdapterReport, OperationReport, RunReport};
use crate::stats::RunningStats;
use crate::timing::{timed, try_timed};

/// Per-adapter collector pair plus the failed-trial count.
struct Lane {
    parse: RunningStats,
    free: RunningStats,
    failed_trials: u64,
}

impl Lane {
    fn new(track_extrema: bool) -> Self {
        let fresh = || {
            if track_extrema {
                RunningStats::new()
            } else {
                RunningStats::without_extrema()
            }
        };
        Self {
            parse: fresh(),
            free: fresh(),
            failed_trials: 0,
        }
    }
}

/// Orchestrates repeated trials over a fixed set of adapters.
#[derive(Debug)]
pub struct BenchmarkDriver {
    config: DriverConfig,
}

impl BenchmarkDriver {
    /// Creates a driver, validating the configuration.
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs all trials and returns the finished report.
    ///
    /// Takes exclusive ownership of the adapters for the duration of the
    /// run. Each trial, for each adapter in order:
    ///
    /// 1. prepare a private copy of the input if the adapter mutates it
    ///    (the copy happens outside the timed section);
    /// 2. time the parse into the adapter's parse collector;
    /// 3. time the free (drop of the opaque result) into the free collector.
    ///
    /// A parse failure skips that trial's free step — there is nothing to
    /// free — and either aborts the run or is counted per adapter, depending
    /// on the configured policy.
    pub fn run(
        &self,
        input: &InputBuffer,
        adapters: Vec<Box<dyn ParserAdapter>>,
    ) -> Result<RunReport> {
        let mut lanes: Vec<Lane> = adapters
            .iter()
            .map(|_| Lane::new(self.config.track_extrema))
            .collect();

        for trial in 0..self.config.trials {
            for (adapter, lane) in adapters.iter().zip(lanes.iter_mut()) {
                let trial_input = match adapter.input_mode() {
                    InputMode::Shared => TrialInput::Shared(input.bytes()),
                    InputMode::Mutable => TrialInput::Owned(input.bytes().to_vec()),
                };

                let parsed = match try_timed(&mut lane.parse, || adapter.parse(trial_input)) {
                    Ok(parsed) => parsed,
                    Err(source) => match self.config.failure_policy {
                        FailurePolicy::Abort => {
                            return Err(BenchError::Parse {
                                adapter: adapter.name().to_string(),
                                trial,
                                message: source.to_string(),
                            });
                        }
                        FailurePolicy::Skip => {
                            lane.failed_trials += 1;
                            continue;
                        }
                    },
                };

                timed(&mut lane.free, move || drop(parsed));
            }
        }

        Ok(RunReport {
            input_name: input.name().to_string(),
            input_bytes: input.len(),
            trials: self.config.trials,
            timestamp: chrono::Utc::now().to_rfc3339(),
            adapters: adapters
                .iter()
                .zip(lanes.iter())
                .map(|(adapter, lane)| AdapterReport {
                    name: adapter.name().to_string(),
                    parse: OperationReport::from_stats(&lane.parse),
                    free: OperationReport::from_stats(&lane.free),
                    failed_trials: lane.failed_trials,
                })
                .collect(),
        })
    }
}
