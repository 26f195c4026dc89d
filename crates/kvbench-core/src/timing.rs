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

//! Timed execution of benchmark operations.
//!
//! Wraps a single invocation of an operation between two monotonic
//! timestamps and feeds the elapsed duration into a [`RunningStats`]
//! collector. The operation's return value passes through unchanged, and a
//! failing operation records no sample.

use crate::stats::RunningStats;
use std::time::Instant;

/// Runs `op` exactly once, records the elapsed time, and returns the
/// operation's value unchanged.
///
/// Timestamps come from the monotonic clock; the subtraction saturates to
/// zero, so a clock anomaly can never push a negative value into the
/// collector.
pub fn timed<T, F>(stats: &mut RunningStats, op: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = op();
    let elapsed = Instant::now().saturating_duration_since(start);
    stats.record(elapsed);
    value
}

/// Runs a fallible `op` exactly once, recording a sample only on success.
///
/// An `Err` propagates to the caller untouched and leaves the collector
/// unchanged, so failed trials never skew the aggregates.
pub fn try_timed<T, E, F>(stats: &mut RunningStats, op: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    let result = op();
    let elapsed = Instant::now().saturating_duration_since(start);
    match result {
        Ok(value) => {
            stats.record(elapsed);
            Ok(value)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timed_passes_value_through() {
        let mut stats = RunningStats::new();
        let value = timed(&mut stats, || 42);
        assert_eq!(value, 42);
        assert_eq!(stats.sample_count(), 1);
    }

    #[test]
    fn test_timed_records_one_sample_per_call() {
        let mut stats = RunningStats::new();
        for _ in 0..10 {
            timed(&mut stats, || ());
        }
        assert_eq!(stats.sample_count(), 10);
    }

    #[test]
    fn test_timed_measures_elapsed_time() {
        let mut stats = RunningStats::new();
        timed(&mut stats, || {
            std::thread::sleep(Duration::from_millis(5));
        });
        assert!(stats.total() >= Duration::from_millis(5));
    }

    #[test]
    fn test_try_timed_records_on_success() {
        let mut stats = RunningStats::new();
        let result: Result<i32, String> = try_timed(&mut stats, || Ok(7));
        assert_eq!(result.unwrap(), 7);
        assert_eq!(stats.sample_count(), 1);
    }

    #[test]
    fn test_try_timed_skips_sample_on_failure() {
        let mut stats = RunningStats::new();
        let result: Result<(), String> = try_timed(&mut stats, || Err("boom".to_string()));
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(stats.sample_count(), 0);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_try_timed_invokes_exactly_once() {
        let mut stats = RunningStats::new();
        let mut calls = 0;
        let _: Result<(), String> = try_timed(&mut stats, || {
            calls += 1;
            Ok(())
        });
        assert_eq!(calls, 1);
    }
}
