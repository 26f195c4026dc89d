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

//! Error types for KeyValue parsing.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvErrorKind {
    /// Lexical or structural violation.
    Syntax,
    /// Input ended inside a string, block, or conditional tag.
    UnexpectedEof,
    /// Unknown escape sequence in a quoted string.
    Escape,
    /// Security limit exceeded (nesting depth).
    Limit,
}

impl fmt::Display for KvErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::UnexpectedEof => write!(f, "UnexpectedEofError"),
            Self::Escape => write!(f, "EscapeError"),
            Self::Limit => write!(f, "LimitError"),
        }
    }
}

/// An error that occurred during KeyValue parsing.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct KvError {
    /// The kind of error.
    pub kind: KvErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based).
    pub line: usize,
}

impl KvError {
    /// Creates a new parse error.
    pub fn new(kind: KvErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_line() {
        let err = KvError::new(KvErrorKind::Syntax, "unmatched '}'", 12);
        let msg = err.to_string();
        assert!(msg.contains("SyntaxError"));
        assert!(msg.contains("line 12"));
        assert!(msg.contains("unmatched '}'"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(KvErrorKind::UnexpectedEof.to_string(), "UnexpectedEofError");
        assert_eq!(KvErrorKind::Limit.to_string(), "LimitError");
    }
}
