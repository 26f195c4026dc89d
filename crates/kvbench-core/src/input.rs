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

//! Input buffer loading.

use crate::error::{BenchError, Result};
use std::fs;
use std::path::Path;

/// Raw byte content of the file under test.
///
/// Loaded once and shared read-only by all adapters for the whole run.
/// Adapters that mutate their input get per-trial private copies from the
/// driver, never this buffer.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    data: Vec<u8>,
    name: String,
}

impl InputBuffer {
    /// Reads the whole file into memory.
    ///
    /// The display name is the file name without its directory, matching the
    /// report banner.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| BenchError::io_error(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { data, name })
    }

    /// Wraps in-memory bytes, mainly for tests.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            data,
            name: name.into(),
        }
    }

    /// The input bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-byte input.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Display name for the report.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let buf = InputBuffer::from_bytes("sample.kv", b"\"a\" \"1\"".to_vec());
        assert_eq!(buf.name(), "sample.kv");
        assert_eq!(buf.len(), 7);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_empty_buffer() {
        let buf = InputBuffer::from_bytes("empty.kv", Vec::new());
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InputBuffer::from_file("/nonexistent/path/to/input.kv").unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
        assert!(err.to_string().contains("input.kv"));
    }

    #[test]
    fn test_from_file_uses_short_name() {
        let dir = std::env::temp_dir().join("kvbench-input-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("weapons.kv");
        fs::write(&path, b"\"a\" \"1\"").unwrap();

        let buf = InputBuffer::from_file(&path).unwrap();
        assert_eq!(buf.name(), "weapons.kv");
        assert_eq!(buf.bytes(), b"\"a\" \"1\"");

        fs::remove_file(&path).ok();
    }
}
