//! Buffering layer between the tokenizer and the grammar drivers.

use crate::error::NtError;
use crate::token::{Token, TokenKind};
use crate::tokenizer::NTriplesTokenizer;
use std::collections::VecDeque;
use std::io::BufRead;
use tripod_api::profile::TokenQueueMode;

/// FIFO token queue over a tokenizer.
///
/// In [`Buffered`](../../tripod_api/profile/enum.TokenQueueMode.html) mode
/// [`initialise`](#method.initialise) pulls every token up to `Eof` into
/// memory before the parser starts consuming. In `Streaming` mode tokens are
/// pulled on demand and at most one look-ahead token is cached for
/// [`peek`](#method.peek). Both modes preserve production order, and
/// dequeuing past `Eof` keeps yielding `Eof` tokens.
pub struct TokenQueue<R: BufRead> {
    tokenizer: NTriplesTokenizer<R>,
    mode: TokenQueueMode,
    buffer: VecDeque<Token>,
}

impl<R: BufRead> TokenQueue<R> {
    pub fn new(tokenizer: NTriplesTokenizer<R>, mode: TokenQueueMode) -> Self {
        Self {
            tokenizer,
            mode,
            buffer: VecDeque::default(),
        }
    }

    /// In buffered mode, eagerly drains the tokenizer. A lexical error
    /// surfaces here instead of mid-parse.
    pub fn initialise(&mut self) -> Result<(), NtError> {
        if self.mode == TokenQueueMode::Buffered {
            loop {
                let token = self.tokenizer.next_token()?;
                let done = token.kind == TokenKind::Eof;
                self.buffer.push_back(token);
                if done {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Removes and returns the head token.
    pub fn dequeue(&mut self) -> Result<Token, NtError> {
        match self.buffer.pop_front() {
            Some(token) => Ok(token),
            // The tokenizer keeps yielding Eof past the end, which also
            // covers a drained buffered queue.
            None => self.tokenizer.next_token(),
        }
    }

    /// Returns the head token without removing it.
    pub fn peek(&mut self) -> Result<&Token, NtError> {
        if self.buffer.is_empty() {
            let token = self.tokenizer.next_token()?;
            self.buffer.push_back(token);
        }
        Ok(&self.buffer[0])
    }

    /// Forwards the tokenizer's pending non-fatal anomalies.
    pub fn take_warnings(&mut self) -> Vec<String> {
        self.tokenizer.take_warnings()
    }
}
