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

//! Running statistics for timing samples.
//!
//! [`RunningStats`] accumulates duration samples for one operation and
//! answers aggregate queries (average, min, max) without keeping the
//! individual samples. Extrema tracking is a construction-time choice, so a
//! collector without min/max is the same type with the tracking disabled
//! rather than a separate implementation.

use std::time::Duration;

/// Accumulated timing observations for one operation.
///
/// Aggregate accessors return `None` while the collector is empty; callers
/// render that as "no data" instead of dividing by zero. `Duration` is
/// unsigned, so a negative sample cannot be constructed — the timing layer
/// clamps clock anomalies to zero before `record` is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningStats {
    samples: u64,
    total: Duration,
    min: Option<Duration>,
    max: Option<Duration>,
    track_extrema: bool,
}

impl RunningStats {
    /// Creates an empty collector that tracks min/max extrema.
    pub fn new() -> Self {
        Self {
            samples: 0,
            total: Duration::ZERO,
            min: None,
            max: None,
            track_extrema: true,
        }
    }

    /// Creates an empty collector without extrema tracking.
    ///
    /// `min()` and `max()` always return `None` for such a collector.
    pub fn without_extrema() -> Self {
        Self {
            track_extrema: false,
            ..Self::new()
        }
    }

    /// Records one duration sample.
    pub fn record(&mut self, sample: Duration) {
        self.samples += 1;
        self.total += sample;
        if self.track_extrema {
            self.min = Some(self.min.map_or(sample, |m| m.min(sample)));
            self.max = Some(self.max.map_or(sample, |m| m.max(sample)));
        }
    }

    /// Number of recorded samples.
    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Sum of all recorded samples.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Returns true if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Whether this collector tracks extrema.
    pub fn tracks_extrema(&self) -> bool {
        self.track_extrema
    }

    /// Arithmetic mean of the recorded samples, or `None` when empty.
    pub fn average(&self) -> Option<Duration> {
        if self.samples == 0 {
            return None;
        }
        let nanos = self.total.as_nanos() / u128::from(self.samples);
        Some(Duration::from_nanos(nanos as u64))
    }

    /// Smallest recorded sample, or `None` when empty or untracked.
    pub fn min(&self) -> Option<Duration> {
        self.min
    }

    /// Largest recorded sample, or `None` when empty or untracked.
    pub fn max(&self) -> Option<Duration> {
        self.max
    }

    /// Restores the initial empty state, keeping the extrema setting.
    pub fn reset(&mut self) {
        self.samples = 0;
        self.total = Duration::ZERO;
        self.min = None;
        self.max = None;
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}
