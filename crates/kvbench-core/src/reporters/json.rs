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

//! JSON reporter for machine consumption.

use crate::error::Result;
use crate::report::RunReport;

/// Serializes the report as compact JSON.
pub fn to_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

/// Serializes the report as pretty-printed JSON.
pub fn to_json_pretty(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
