use crate::error::{NtError, NtErrorKind};
use std::io::BufRead;
use std::u8;
use tripod_api::parser::TextPosition;

pub const EOF: u8 = u8::MAX;

/// Reads the input line by line in a streaming way, exposing the current
/// byte, one byte of look-ahead and the line/column of the current byte.
pub struct LookAheadByteReader<R: BufRead> {
    inner: R,
    line: Vec<u8>,
    current: u8,
    line_number: usize,
    byte_number: usize,
    utf8_bom: bool,
    utf16_bom: bool,
}

impl<R: BufRead> LookAheadByteReader<R> {
    pub fn new(inner: R) -> Result<Self, NtError> {
        let mut this = Self {
            inner,
            line: Vec::default(),
            current: EOF,
            line_number: 0,
            byte_number: 0,
            utf8_bom: false,
            utf16_bom: false,
        };
        this.fill_line()?;
        if this.line.starts_with(&[0xEF, 0xBB, 0xBF]) {
            this.utf8_bom = true;
            this.byte_number = 3;
        } else if this.line.starts_with(&[0xFF, 0xFE]) || this.line.starts_with(&[0xFE, 0xFF]) {
            this.utf16_bom = true;
            this.byte_number = 2;
        }
        this.current = this.line.get(this.byte_number).cloned().unwrap_or(EOF);
        Ok(this)
    }

    /// Returns the current byte or EOF if the input is finished.
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Returns the next byte if available. Does not work across line
    /// boundaries.
    pub fn next(&self) -> Option<u8> {
        self.line.get(self.byte_number + 1).cloned()
    }

    /// Consumes the current byte and moves to the next one.
    pub fn consume(&mut self) -> Result<(), NtError> {
        self.byte_number += 1;
        if self.byte_number >= self.line.len() {
            self.fill_line()?;
        }
        self.current = self.line.get(self.byte_number).cloned().unwrap_or(EOF);
        Ok(())
    }

    fn fill_line(&mut self) -> Result<(), NtError> {
        self.line.clear();
        self.byte_number = 0;
        if self.inner.read_until(b'\n', &mut self.line)? > 0 {
            self.line_number += 1;
        }
        Ok(())
    }

    /// Line of the current byte, starting at 1.
    pub fn line_number(&self) -> usize {
        self.line_number.max(1)
    }

    /// Column of the current byte in its line, starting at 1.
    pub fn column(&self) -> usize {
        self.byte_number + 1
    }

    pub fn position(&self) -> TextPosition {
        TextPosition::new(self.line_number(), self.column())
    }

    /// The input started with a UTF-8 byte order mark (skipped).
    pub fn utf8_bom(&self) -> bool {
        self.utf8_bom
    }

    /// The input started with a UTF-16 byte order mark (skipped).
    pub fn utf16_bom(&self) -> bool {
        self.utf16_bom
    }

    pub fn unexpected_char_error<T>(&self) -> Result<T, NtError> {
        Err(self.parse_error(if self.current == EOF {
            NtErrorKind::PrematureEof
        } else {
            NtErrorKind::UnexpectedByte(self.current)
        }))
    }

    pub fn check_is_current(&self, expected: u8) -> Result<(), NtError> {
        if self.current == expected {
            Ok(())
        } else {
            self.unexpected_char_error()
        }
    }

    pub fn parse_error(&self, kind: NtErrorKind) -> NtError {
        NtError::new(kind, Some(self.position()))
    }
}

pub trait PushChar {
    fn push_char(&mut self, c: char);
}

impl PushChar for Vec<u8> {
    fn push_char(&mut self, c: char) {
        match c.len_utf8() {
            1 => self.push(c as u8),
            _ => self.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }
}
