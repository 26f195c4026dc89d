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

//! Console reporter.
//!
//! Renders per-adapter parse/free aggregates in milliseconds. Collectors
//! without samples render as "no data" — the renderer never divides.

use crate::report::{OperationReport, RunReport};

/// Renders the full report as plain text.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!(
        "times taken on {} ({} bytes) for {} parses\n",
        report.input_name, report.input_bytes, report.trials
    ));
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("Timestamp: {}\n", report.timestamp));

    for adapter in &report.adapters {
        out.push_str(&format!("\n==={}===\n", adapter.name));
        render_operation(&mut out, "Parsing", &adapter.parse);
        out.push('\n');
        render_operation(&mut out, "Deleting", &adapter.free);
        if adapter.failed_trials > 0 {
            out.push_str(&format!(
                "Failed trials: {} of {}\n",
                adapter.failed_trials, report.trials
            ));
        }
        out.push_str(&format!("==={}===\n", adapter.name));
    }

    out.push_str(&format!("{}\n", "=".repeat(60)));
    out
}

/// Prints the report to standard output.
pub fn print_report(report: &RunReport) {
    print!("{}", render_report(report));
}

fn render_operation(out: &mut String, label: &str, op: &OperationReport) {
    out.push_str(&format!("{}:\n", label));
    if !op.has_data() {
        out.push_str("\tno data\n");
        return;
    }
    if let Some(best) = op.best_ms {
        out.push_str(&format!("\tBest Time: {:.4} ms\n", best));
    }
    if let Some(worst) = op.worst_ms {
        out.push_str(&format!("\tWorst Time: {:.4} ms\n", worst));
    }
    if let Some(avg) = op.avg_ms {
        out.push_str(&format!("\tAverage Time: {:.4} ms\n", avg));
    }
    out.push_str(&format!("\tSamples: {}\n", op.samples));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::AdapterReport;

    fn sample_report() -> RunReport {
        RunReport {
            input_name: "weapons.kv".to_string(),
            input_bytes: 2048,
            trials: 100,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            adapters: vec![
                AdapterReport {
                    name: "fastkv".to_string(),
                    parse: OperationReport {
                        samples: 100,
                        avg_ms: Some(0.015),
                        best_ms: Some(0.012),
                        worst_ms: Some(0.034),
                    },
                    free: OperationReport {
                        samples: 100,
                        avg_ms: Some(0.003),
                        best_ms: Some(0.002),
                        worst_ms: Some(0.008),
                    },
                    failed_trials: 0,
                },
                AdapterReport {
                    name: "treekv".to_string(),
                    parse: OperationReport {
                        samples: 0,
                        avg_ms: None,
                        best_ms: None,
                        worst_ms: None,
                    },
                    free: OperationReport {
                        samples: 0,
                        avg_ms: None,
                        best_ms: None,
                        worst_ms: None,
                    },
                    failed_trials: 100,
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_adapter_sections() {
        let text = render_report(&sample_report());
        assert!(text.contains("===fastkv==="));
        assert!(text.contains("===treekv==="));
        assert!(text.contains("Parsing:"));
        assert!(text.contains("Deleting:"));
        assert!(text.contains("Best Time: 0.0120 ms"));
        assert!(text.contains("Average Time: 0.0150 ms"));
    }

    #[test]
    fn test_render_banner() {
        let text = render_report(&sample_report());
        assert!(text.contains("times taken on weapons.kv (2048 bytes) for 100 parses"));
    }

    #[test]
    fn test_empty_collector_renders_no_data() {
        let text = render_report(&sample_report());
        assert!(text.contains("no data"));
        assert!(text.contains("Failed trials: 100 of 100"));
    }

    #[test]
    fn test_untracked_extrema_render_average_only() {
        let mut report = sample_report();
        report.adapters.truncate(1);
        report.adapters[0].parse.best_ms = None;
        report.adapters[0].parse.worst_ms = None;

        let text = render_report(&report);
        assert!(text.contains("Average Time"));
        let parsing_section: String = text
            .lines()
            .skip_while(|l| *l != "Parsing:")
            .take_while(|l| !l.is_empty())
            .collect();
        assert!(!parsing_section.contains("Best Time"));
    }
}
