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

//! The parse/free capability exposed by candidate implementations.
//!
//! Each parser under test plugs into the driver through [`ParserAdapter`]:
//! a display name, a declaration of whether it needs an exclusively owned
//! input buffer, and a `parse` that returns an opaque result. Freeing the
//! result is dropping the box — the driver times that drop as the "free"
//! operation, so every result is freed exactly once.

use std::any::Any;

/// Error type adapters report parse failures with.
///
/// Adapters keep their own concrete error types; the driver only needs the
/// message.
pub type AdapterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque parse result, freed by dropping.
pub type ParseOutput = Box<dyn Any>;

/// How an adapter consumes the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The adapter only reads the buffer; it may share the original.
    Shared,
    /// The adapter mutates the buffer in place and must receive a private
    /// copy for every trial, never the shared original.
    Mutable,
}

/// The input handed to one parse trial.
///
/// Read-only adapters borrow the shared buffer; mutating adapters receive an
/// exclusively owned copy they are free to rewrite. The owned variant is
/// released when the parse result that absorbed it is dropped, on every exit
/// path.
pub enum TrialInput<'a> {
    /// Shared borrow of the original input.
    Shared(&'a [u8]),
    /// Exclusively owned private copy.
    Owned(Vec<u8>),
}

impl TrialInput<'_> {
    /// The input bytes, regardless of ownership.
    pub fn bytes(&self) -> &[u8] {
        match self {
            TrialInput::Shared(bytes) => bytes,
            TrialInput::Owned(vec) => vec,
        }
    }

    /// Takes ownership of the bytes, copying the shared variant.
    ///
    /// Adapters that declared [`InputMode::Mutable`] always receive the
    /// owned variant, so the copy here is only a fallback.
    pub fn into_owned(self) -> Vec<u8> {
        match self {
            TrialInput::Shared(bytes) => bytes.to_vec(),
            TrialInput::Owned(vec) => vec,
        }
    }

    /// Length of the input in bytes.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Returns true for a zero-length input.
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

/// One candidate parser implementation under test.
pub trait ParserAdapter {
    /// Display name used in the report.
    fn name(&self) -> &str;

    /// Whether this adapter needs a private mutable copy of the input.
    fn input_mode(&self) -> InputMode {
        InputMode::Shared
    }

    /// Parses the input, returning an opaque result.
    ///
    /// The driver times this call and, separately, the drop of the returned
    /// box. A failing parse must not leak partial state.
    fn parse(&self, input: TrialInput<'_>) -> Result<ParseOutput, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NopAdapter;

    impl ParserAdapter for NopAdapter {
        fn name(&self) -> &str {
            "nop"
        }

        fn parse(&self, input: TrialInput<'_>) -> Result<ParseOutput, AdapterError> {
            Ok(Box::new(input.len()))
        }
    }

    #[test]
    fn test_default_input_mode_is_shared() {
        assert_eq!(NopAdapter.input_mode(), InputMode::Shared);
    }

    #[test]
    fn test_trial_input_bytes() {
        let data = b"\"key\" \"value\"".to_vec();
        let shared = TrialInput::Shared(&data);
        assert_eq!(shared.bytes(), data.as_slice());
        assert_eq!(shared.len(), data.len());

        let owned = TrialInput::Owned(data.clone());
        assert_eq!(owned.bytes(), data.as_slice());
        assert!(!owned.is_empty());
    }

    #[test]
    fn test_trial_input_into_owned() {
        let data = b"abc".to_vec();
        let owned = TrialInput::Owned(data.clone()).into_owned();
        assert_eq!(owned, data);

        let copied = TrialInput::Shared(&data).into_owned();
        assert_eq!(copied, data);
    }

    #[test]
    fn test_opaque_result_downcasts() {
        let result = NopAdapter.parse(TrialInput::Shared(b"1234")).unwrap();
        assert_eq!(*result.downcast::<usize>().unwrap(), 4);
    }
}
