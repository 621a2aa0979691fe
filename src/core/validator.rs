/// Incremental UTF-8 validator. Handles code points split across chunk boundaries
/// without buffering: the only carried state is one automaton state byte.

use crate::core::table::{DFA, UTF8_ACCEPT, UTF8_REJECT};

/// Closed view of the automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything consumed so far ends on a code point boundary.
    Accept,
    /// Valid so far, but a multi-byte sequence is still open.
    Incomplete,
    /// A malformed sequence was found. Sticky until `reset`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Validator {
    state: u8,
    current_index: usize,
    total_index: usize,
    is_valid: bool,
    ends_on_codepoint: bool,
}

impl Utf8Validator {
    pub fn new() -> Self {
        Self {
            state: UTF8_ACCEPT,
            current_index: 0,
            total_index: 0,
            is_valid: true,
            ends_on_codepoint: true,
        }
    }

    /// Return to the initial state, e.g. before reusing the instance for another stream.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed `length` bytes of `data` starting at `offset`.
    ///
    /// Panics if `offset + length` runs past the end of `data`.
    pub fn validate(&mut self, data: &[u8], offset: usize, length: usize) {
        self.feed(&data[offset..offset + length]);
    }

    /// Feed the next chunk of the stream. Stops at the first byte that makes
    /// the stream malformed; the rest of the chunk is not looked at.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.state == UTF8_REJECT {
            self.current_index = 0;
            return;
        }

        let mut state = self.state;
        for (i, &byte) in chunk.iter().enumerate() {
            state = DFA.step(state, byte);
            if state == UTF8_REJECT {
                self.state = UTF8_REJECT;
                self.current_index = i;
                self.total_index += i;
                self.is_valid = false;
                self.ends_on_codepoint = false;
                return;
            }
        }

        self.state = state;
        self.current_index = chunk.len();
        self.total_index += chunk.len();
        self.is_valid = true;
        self.ends_on_codepoint = state == UTF8_ACCEPT;
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn ends_on_codepoint(&self) -> bool {
        self.ends_on_codepoint
    }

    /// Bytes consumed by the most recent `feed`/`validate` call.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Bytes consumed across all chunks. After a rejection this is the offset
    /// of the offending byte.
    pub fn total_index(&self) -> usize {
        self.total_index
    }

    /// Raw automaton state: `UTF8_ACCEPT`, `UTF8_REJECT`, or an intermediate state.
    pub fn state(&self) -> u8 {
        self.state
    }

    pub fn status(&self) -> Status {
        match self.state {
            UTF8_ACCEPT => Status::Accept,
            UTF8_REJECT => Status::Reject,
            _ => Status::Incomplete,
        }
    }
}

impl Default for Utf8Validator {
    fn default() -> Self { Self::new() }
}

/// One-shot check of a buffer fed as a single chunk. Like `is_valid`, a
/// buffer that stops in the middle of a multi-byte sequence still passes.
pub fn validate_whole(data: &[u8]) -> bool {
    let mut v = Utf8Validator::new();
    v.feed(data);
    v.is_valid()
}

/// Stricter `validate_whole`: the buffer must also end on a code point boundary.
pub fn validate_complete(data: &[u8]) -> bool {
    let mut v = Utf8Validator::new();
    v.feed(data);
    v.is_valid() && v.ends_on_codepoint()
}
