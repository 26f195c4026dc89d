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

//! Tree-building KeyValue parser.
//!
//! Recursive-descent parser that reads a KeyValue document into an owned
//! node tree. Input is read-only; every string is copied out (and unescaped)
//! into the tree. Conditional tags like `[$X64]` are skipped syntactically,
//! not evaluated.

use crate::error::{KvError, KvErrorKind};
use kvbench_core::{AdapterError, ParseOutput, ParserAdapter, TrialInput};

/// Maximum block nesting depth.
const MAX_DEPTH: usize = 128;

/// The value of a node: a leaf string or a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvValue {
    /// `"key" "value"` pair.
    Leaf(String),
    /// `"key" { ... }` block.
    Block(Vec<KvNode>),
}

/// One key/value node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvNode {
    /// The node's key, unescaped.
    pub key: String,
    /// Leaf string or child nodes.
    pub value: KvValue,
}

/// Parses a KeyValue document into an owned tree.
///
/// An empty input parses to an empty tree.
pub fn parse(input: &[u8]) -> Result<Vec<KvNode>, KvError> {
    let mut parser = Parser {
        input,
        pos: 0,
        line: 1,
    };
    parser.parse_nodes(0)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl Parser<'_> {
    fn err(&self, kind: KvErrorKind, message: &str) -> KvError {
        KvError::new(kind, message, self.line)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.input.get(self.pos + 1) == Some(&b'/') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn skip_conditional(&mut self) -> Result<(), KvError> {
        // positioned at '['
        self.pos += 1;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b']' => return Ok(()),
                b'\n' => self.line += 1,
                _ => {}
            }
        }
        Err(self.err(KvErrorKind::UnexpectedEof, "unterminated conditional tag"))
    }

    fn token(&mut self) -> Result<String, KvError> {
        match self.peek() {
            Some(b'"') => self.quoted(),
            Some(_) => self.unquoted(),
            None => Err(self.err(KvErrorKind::UnexpectedEof, "expected token")),
        }
    }

    fn quoted(&mut self) -> Result<String, KvError> {
        self.pos += 1; // opening quote
        let mut out = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated string"));
            };
            self.pos += 1;
            match b {
                b'"' => break,
                b'\\' => {
                    let Some(esc) = self.peek() else {
                        return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated escape"));
                    };
                    self.pos += 1;
                    out.push(match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'"' => b'"',
                        b'\\' => b'\\',
                        _ => return Err(self.err(KvErrorKind::Escape, "unknown escape sequence")),
                    });
                }
                _ => {
                    if b == b'\n' {
                        self.line += 1;
                    }
                    out.push(b);
                }
            }
        }
        String::from_utf8(out)
            .map_err(|_| self.err(KvErrorKind::Syntax, "invalid UTF-8 in string"))
    }

    fn unquoted(&mut self) -> Result<String, KvError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'"' | b'[' | b']') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err(KvErrorKind::Syntax, "expected token"));
        }
        String::from_utf8(self.input[start..self.pos].to_vec())
            .map_err(|_| self.err(KvErrorKind::Syntax, "invalid UTF-8 in token"))
    }

    fn parse_nodes(&mut self, depth: usize) -> Result<Vec<KvNode>, KvError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    return if depth == 0 {
                        Ok(nodes)
                    } else {
                        Err(self.err(KvErrorKind::UnexpectedEof, "unterminated block"))
                    };
                }
                Some(b'}') => {
                    if depth == 0 {
                        return Err(self.err(KvErrorKind::Syntax, "unmatched '}'"));
                    }
                    self.pos += 1;
                    return Ok(nodes);
                }
                Some(b'{') => {
                    return Err(self.err(KvErrorKind::Syntax, "block without a key"));
                }
                Some(b'[') => {
                    // trailing conditional tag, not evaluated here
                    self.skip_conditional()?;
                    continue;
                }
                Some(_) => {}
            }

            let key = self.token()?;
            self.skip_trivia();
            if self.peek() == Some(b'[') {
                self.skip_conditional()?;
                self.skip_trivia();
            }

            match self.peek() {
                Some(b'{') => {
                    if depth + 1 > MAX_DEPTH {
                        return Err(self.err(KvErrorKind::Limit, "nesting too deep"));
                    }
                    self.pos += 1;
                    let children = self.parse_nodes(depth + 1)?;
                    nodes.push(KvNode {
                        key,
                        value: KvValue::Block(children),
                    });
                }
                None => {
                    return Err(self.err(KvErrorKind::UnexpectedEof, "key without a value"));
                }
                Some(_) => {
                    let value = self.token()?;
                    nodes.push(KvNode {
                        key,
                        value: KvValue::Leaf(value),
                    });
                }
            }
        }
    }
}

/// Benchmark adapter for the tree-building parser. Read-only input.
#[derive(Debug, Default)]
pub struct TreeKvAdapter;

impl TreeKvAdapter {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl ParserAdapter for TreeKvAdapter {
    fn name(&self) -> &str {
        "treekv"
    }

    fn parse(&self, input: TrialInput<'_>) -> Result<ParseOutput, AdapterError> {
        let nodes = parse(input.bytes())?;
        Ok(Box::new(nodes))
    }
}
