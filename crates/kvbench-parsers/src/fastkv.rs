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

//! In-place KeyValue parser.
//!
//! Single-pass parser that takes ownership of its buffer, unescapes quoted
//! strings by rewriting bytes in place, and produces a flat, depth-tagged
//! list of spans into that buffer. Because the buffer is rewritten, this
//! parser must always receive a private copy of the input — the adapter
//! declares [`InputMode::Mutable`].
//!
//! Conditional tags are evaluated against a set of defined symbols:
//! `[$SYM]` keeps the entry when `SYM` is defined, `[!$SYM]` when it is not.
//! An excluded block is skipped wholesale.

use crate::error::{KvError, KvErrorKind};
use kvbench_core::{AdapterError, InputMode, ParseOutput, ParserAdapter, TrialInput};
use std::collections::HashSet;

/// Maximum block nesting depth.
const MAX_DEPTH: u32 = 128;

/// A byte range into the document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset, inclusive.
    pub start: usize,
    /// End offset, exclusive.
    pub end: usize,
}

/// One parsed entry.
///
/// A `value` of `None` opens a block; its children carry `depth + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Key span.
    pub key: Span,
    /// Value span, or `None` for a block open.
    pub value: Option<Span>,
    /// Nesting depth, 0 at top level.
    pub depth: u32,
}

/// A parsed document: the rewritten buffer plus the item list whose spans
/// index into it.
#[derive(Debug)]
pub struct FastDocument {
    buf: Vec<u8>,
    items: Vec<Item>,
}

impl FastDocument {
    /// The parsed entries in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Raw bytes for a span.
    pub fn bytes(&self, span: Span) -> &[u8] {
        &self.buf[span.start..span.end]
    }

    /// Span content as UTF-8 text, if valid.
    pub fn text(&self, span: Span) -> Option<&str> {
        std::str::from_utf8(self.bytes(span)).ok()
    }
}

/// Parses a KeyValue document in place.
///
/// Takes ownership of `buf`; the returned document keeps it alive for the
/// item spans. An empty input parses to an empty document.
pub fn parse_in_place(buf: Vec<u8>, defines: &HashSet<String>) -> Result<FastDocument, KvError> {
    let parser = InPlaceParser {
        buf,
        pos: 0,
        line: 1,
        defines,
        items: Vec::new(),
    };
    parser.parse()
}

fn count_newlines(bytes: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', bytes).count()
}

struct InPlaceParser<'d> {
    buf: Vec<u8>,
    pos: usize,
    line: usize,
    defines: &'d HashSet<String>,
    items: Vec<Item>,
}

impl InPlaceParser<'_> {
    fn err(&self, kind: KvErrorKind, message: &str) -> KvError {
        KvError::new(kind, message, self.line)
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn parse(mut self) -> Result<FastDocument, KvError> {
        let mut depth: u32 = 0;
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    if depth != 0 {
                        return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated block"));
                    }
                    break;
                }
                Some(b'}') => {
                    if depth == 0 {
                        return Err(self.err(KvErrorKind::Syntax, "unmatched '}'"));
                    }
                    depth -= 1;
                    self.pos += 1;
                    continue;
                }
                Some(b'{') => {
                    return Err(self.err(KvErrorKind::Syntax, "block without a key"));
                }
                Some(b'[') => {
                    // stray conditional tag, nothing to guard
                    self.conditional()?;
                    continue;
                }
                Some(_) => {}
            }

            let key = self.scan_token()?;
            self.skip_trivia();

            let mut included = true;
            if self.peek() == Some(b'[') {
                included = self.conditional()?;
                self.skip_trivia();
            }

            match self.peek() {
                Some(b'{') => {
                    if depth + 1 > MAX_DEPTH {
                        return Err(self.err(KvErrorKind::Limit, "nesting too deep"));
                    }
                    self.pos += 1;
                    if included {
                        self.items.push(Item {
                            key,
                            value: None,
                            depth,
                        });
                        depth += 1;
                    } else {
                        self.skip_block()?;
                    }
                }
                None => {
                    return Err(self.err(KvErrorKind::UnexpectedEof, "key without a value"));
                }
                Some(_) => {
                    let value = self.scan_token()?;
                    self.skip_trivia();
                    if self.peek() == Some(b'[') {
                        included = self.conditional()? && included;
                    }
                    if included {
                        self.items.push(Item {
                            key,
                            value: Some(value),
                            depth,
                        });
                    }
                }
            }
        }
        Ok(FastDocument {
            buf: self.buf,
            items: self.items,
        })
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.buf.get(self.pos + 1) == Some(&b'/') => {
                    match memchr::memchr(b'\n', &self.buf[self.pos..]) {
                        Some(off) => self.pos += off,
                        None => self.pos = self.buf.len(),
                    }
                }
                _ => break,
            }
        }
    }

    /// Parses a `[$SYM]` / `[!$SYM]` tag and answers whether the guarded
    /// entry is included under the current defines.
    fn conditional(&mut self) -> Result<bool, KvError> {
        self.pos += 1; // '['
        let negated = if self.peek() == Some(b'!') {
            self.pos += 1;
            true
        } else {
            false
        };
        if self.peek() == Some(b'$') {
            self.pos += 1;
        }
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(
                        self.err(KvErrorKind::UnexpectedEof, "unterminated conditional tag")
                    );
                }
                Some(b']') => break,
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        let defined = std::str::from_utf8(&self.buf[start..self.pos])
            .map(|sym| self.defines.contains(sym.trim()))
            .unwrap_or(false);
        self.pos += 1; // ']'
        Ok(negated != defined)
    }

    fn scan_token(&mut self) -> Result<Span, KvError> {
        match self.peek() {
            Some(b'"') => self.scan_quoted(),
            Some(_) => self.scan_unquoted(),
            None => Err(self.err(KvErrorKind::UnexpectedEof, "expected token")),
        }
    }

    fn scan_unquoted(&mut self) -> Result<Span, KvError> {
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
        Ok(Span {
            start,
            end: self.pos,
        })
    }

    /// Scans a quoted string, unescaping in place.
    ///
    /// While no escape has been seen the read and write cursors coincide and
    /// the scan jumps between special bytes with `memchr`; after the first
    /// escape the remaining content is copied down byte by byte. The bytes
    /// between the returned span's end and the closing quote become stale
    /// and are never referenced again.
    fn scan_quoted(&mut self) -> Result<Span, KvError> {
        self.pos += 1; // opening quote
        let start = self.pos;
        let mut write = self.pos;
        loop {
            if write == self.pos {
                let off = match memchr::memchr2(b'"', b'\\', &self.buf[self.pos..]) {
                    Some(off) => off,
                    None => {
                        return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated string"));
                    }
                };
                self.line += count_newlines(&self.buf[self.pos..self.pos + off]);
                self.pos += off;
                write = self.pos;
            }
            let b = match self.buf.get(self.pos) {
                Some(&b) => b,
                None => {
                    return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated string"));
                }
            };
            match b {
                b'"' => {
                    self.pos += 1;
                    return Ok(Span { start, end: write });
                }
                b'\\' => {
                    let esc = match self.buf.get(self.pos + 1) {
                        Some(&esc) => esc,
                        None => {
                            return Err(
                                self.err(KvErrorKind::UnexpectedEof, "unterminated escape")
                            );
                        }
                    };
                    let byte = match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'"' => b'"',
                        b'\\' => b'\\',
                        _ => {
                            return Err(self.err(KvErrorKind::Escape, "unknown escape sequence"));
                        }
                    };
                    self.buf[write] = byte;
                    write += 1;
                    self.pos += 2;
                }
                _ => {
                    if b == b'\n' {
                        self.line += 1;
                    }
                    self.buf[write] = b;
                    write += 1;
                    self.pos += 1;
                }
            }
        }
    }

    /// Skips an excluded block, matching braces without recording items.
    fn skip_block(&mut self) -> Result<(), KvError> {
        let mut depth = 1u32;
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated block"));
                }
                Some(b'{') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b'}') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(b'"') => self.skip_quoted()?,
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skips a quoted string without unescaping it.
    fn skip_quoted(&mut self) -> Result<(), KvError> {
        self.pos += 1; // opening quote
        loop {
            let off = match memchr::memchr2(b'"', b'\\', &self.buf[self.pos..]) {
                Some(off) => off,
                None => {
                    return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated string"));
                }
            };
            self.line += count_newlines(&self.buf[self.pos..self.pos + off]);
            self.pos += off;
            if self.buf[self.pos] == b'"' {
                self.pos += 1;
                return Ok(());
            }
            // escape: skip the backslash and the escaped byte
            if self.pos + 1 >= self.buf.len() {
                return Err(self.err(KvErrorKind::UnexpectedEof, "unterminated escape"));
            }
            self.pos += 2;
        }
    }
}

/// Benchmark adapter for the in-place parser.
///
/// Declares [`InputMode::Mutable`]: the driver hands it a private copy of
/// the input every trial, which the parse result then owns.
#[derive(Debug, Default)]
pub struct FastKvAdapter {
    defines: HashSet<String>,
}

impl FastKvAdapter {
    /// Creates the adapter with no defined symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the adapter with the given defined symbols.
    pub fn with_defines<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            defines: symbols.into_iter().map(Into::into).collect(),
        }
    }
}

impl ParserAdapter for FastKvAdapter {
    fn name(&self) -> &str {
        "fastkv"
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Mutable
    }

    fn parse(&self, input: TrialInput<'_>) -> Result<ParseOutput, AdapterError> {
        let doc = parse_in_place(input.into_owned(), &self.defines)?;
        Ok(Box::new(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_defines() -> HashSet<String> {
        HashSet::new()
    }

    fn defines(symbols: &[&str]) -> HashSet<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn parse_str(input: &str, defines: &HashSet<String>) -> FastDocument {
        parse_in_place(input.as_bytes().to_vec(), defines).unwrap()
    }

    fn leaf_texts(doc: &FastDocument) -> Vec<(String, String)> {
        doc.items()
            .iter()
            .filter_map(|item| {
                item.value.map(|v| {
                    (
                        doc.text(item.key).unwrap().to_string(),
                        doc.text(v).unwrap().to_string(),
                    )
                })
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_str("", &no_defines());
        assert!(doc.items().is_empty());

        let doc = parse_str("  // comment only\n", &no_defines());
        assert!(doc.items().is_empty());
    }

    #[test]
    fn test_simple_pairs() {
        let doc = parse_str("\"name\" \"scout\"\n\"speed\" \"400\"\n", &no_defines());
        assert_eq!(
            leaf_texts(&doc),
            vec![
                ("name".to_string(), "scout".to_string()),
                ("speed".to_string(), "400".to_string()),
            ]
        );
    }

    #[test]
    fn test_unquoted_tokens() {
        let doc = parse_str("name scout\n", &no_defines());
        assert_eq!(leaf_texts(&doc), vec![("name".to_string(), "scout".to_string())]);
    }

    #[test]
    fn test_in_place_unescaping() {
        let doc = parse_str(r#""path" "C:\\cfg\nnext""#, &no_defines());
        assert_eq!(
            leaf_texts(&doc),
            vec![("path".to_string(), "C:\\cfg\nnext".to_string())]
        );
    }

    #[test]
    fn test_block_depths() {
        let doc = parse_str(
            "\"weapon\" { \"damage\" \"42\" \"ammo\" { \"clip\" \"30\" } }",
            &no_defines(),
        );
        let items = doc.items();
        assert_eq!(items.len(), 4);

        assert_eq!(doc.text(items[0].key).unwrap(), "weapon");
        assert_eq!(items[0].value, None);
        assert_eq!(items[0].depth, 0);

        assert_eq!(doc.text(items[1].key).unwrap(), "damage");
        assert_eq!(items[1].depth, 1);

        assert_eq!(doc.text(items[2].key).unwrap(), "ammo");
        assert_eq!(items[2].value, None);
        assert_eq!(items[2].depth, 1);

        assert_eq!(doc.text(items[3].key).unwrap(), "clip");
        assert_eq!(items[3].depth, 2);
    }

    #[test]
    fn test_conditional_keeps_defined_symbol() {
        let defs = defines(&["X64"]);
        let doc = parse_str("\"a\" \"1\" [$X64]\n\"b\" \"2\" [$WIN32]\n", &defs);
        assert_eq!(leaf_texts(&doc), vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_negated_conditional() {
        let defs = defines(&["LINUX"]);
        let doc = parse_str("\"a\" \"1\" [!$WIN32]\n\"b\" \"2\" [!$LINUX]\n", &defs);
        assert_eq!(leaf_texts(&doc), vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_excluded_block_is_skipped_wholesale() {
        let defs = defines(&["LINUX"]);
        let input = "\"win\" [$WIN32] { \"dll\" \"x.dll\" { \"deep\" \"1\" } }\n\"after\" \"ok\"\n";
        let doc = parse_str(input, &defs);
        assert_eq!(leaf_texts(&doc), vec![("after".to_string(), "ok".to_string())]);
    }

    #[test]
    fn test_included_block_under_conditional() {
        let defs = defines(&["LINUX"]);
        let doc = parse_str("\"nix\" [$LINUX] { \"so\" \"x.so\" }", &defs);
        let items = doc.items();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text(items[0].key).unwrap(), "nix");
        assert_eq!(items[0].value, None);
        assert_eq!(doc.text(items[1].key).unwrap(), "so");
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_in_place(b"\"a\" \"never".to_vec(), &no_defines()).unwrap_err();
        assert_eq!(err.kind, KvErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_unknown_escape_rejected() {
        let err = parse_in_place(br#""a" "\q""#.to_vec(), &no_defines()).unwrap_err();
        assert_eq!(err.kind, KvErrorKind::Escape);
    }

    #[test]
    fn test_unmatched_closing_brace() {
        let err = parse_in_place(b"}".to_vec(), &no_defines()).unwrap_err();
        assert_eq!(err.kind, KvErrorKind::Syntax);
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_in_place(b"\"a\" {".to_vec(), &no_defines()).unwrap_err();
        assert_eq!(err.kind, KvErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_depth_limit() {
        let mut input = Vec::new();
        for _ in 0..200 {
            input.extend_from_slice(b"\"k\" { ");
        }
        let err = parse_in_place(input, &no_defines()).unwrap_err();
        assert_eq!(err.kind, KvErrorKind::Limit);
    }

    #[test]
    fn test_comment_containing_braces() {
        let doc = parse_str("\"a\" \"1\"\n// { not a block }\n\"b\" \"2\"\n", &no_defines());
        assert_eq!(doc.items().len(), 2);
    }

    #[test]
    fn test_adapter_declares_mutable_input() {
        let adapter = FastKvAdapter::with_defines(["X64", "LINUX"]);
        assert_eq!(adapter.input_mode(), InputMode::Mutable);
        assert_eq!(adapter.name(), "fastkv");
    }

    #[test]
    fn test_adapter_parses_via_trait() {
        let adapter = FastKvAdapter::new();
        let output = adapter
            .parse(TrialInput::Owned(b"\"a\" \"1\"".to_vec()))
            .unwrap();
        let doc = output.downcast::<FastDocument>().unwrap();
        assert_eq!(doc.items().len(), 1);
    }
}
