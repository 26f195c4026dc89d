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

//! Driver configuration.

use crate::error::{BenchError, Result};

/// Default number of parse/free trials per adapter.
pub const DEFAULT_TRIALS: u64 = 100;

/// What the driver does when an adapter fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run. A non-parsing trial invalidates the comparison,
    /// so this is the default.
    Abort,
    /// Count the failed trial for that adapter and continue. Failed counts
    /// appear in the report.
    Skip,
}

/// Configuration for one benchmark run.
///
/// # Example
///
/// ```
/// use kvbench_core::config::{DriverConfig, FailurePolicy};
///
/// let config = DriverConfig::new()
///     .with_trials(10)
///     .with_failure_policy(FailurePolicy::Skip);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Number of trials per adapter. Must be positive.
    pub trials: u64,
    /// Abort or skip on parse failure.
    pub failure_policy: FailurePolicy,
    /// Whether collectors track best/worst times.
    pub track_extrema: bool,
}

impl DriverConfig {
    /// Creates the default configuration: 100 trials, abort on failure,
    /// extrema tracked.
    pub fn new() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            failure_policy: FailurePolicy::Abort,
            track_extrema: true,
        }
    }

    /// Sets the trial count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Enables or disables extrema tracking in the collectors.
    pub fn with_extrema(mut self, track: bool) -> Self {
        self.track_extrema = track;
        self
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(BenchError::invalid_config("trials", "must be positive"));
        }
        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
