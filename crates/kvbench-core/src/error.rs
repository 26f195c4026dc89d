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

//! Error types for benchmark runs.
//!
//! All driver and reporting operations return `Result<T, BenchError>` so
//! failures carry enough context (adapter, trial, path) for a useful message
//! at the CLI boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while loading input, running trials, or rendering
/// the report.
#[derive(Error, Debug, Clone)]
pub enum BenchError {
    /// I/O operation failed (reading the input file).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// An adapter failed to parse the input.
    ///
    /// Under the abort policy this ends the run; the trial index identifies
    /// how far the run got.
    #[error("adapter '{adapter}' failed to parse on trial {trial}: {message}")]
    Parse {
        /// Display name of the failing adapter
        adapter: String,
        /// Zero-based trial index at which the failure occurred
        trial: u64,
        /// The adapter's error message
        message: String,
    },

    /// Invalid driver configuration.
    #[error("invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// JSON report serialization failed.
    #[error("JSON report error: {0}")]
    Json(String),
}

impl BenchError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = BenchError::io_error(
            "input.kv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("input.kv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = BenchError::Parse {
            adapter: "fastkv".to_string(),
            trial: 42,
            message: "unterminated string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fastkv"));
        assert!(msg.contains("trial 42"));
        assert!(msg.contains("unterminated string"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = BenchError::invalid_config("trials", "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("trials"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_error_cloning() {
        let err = BenchError::io_error(
            "input.kv",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
