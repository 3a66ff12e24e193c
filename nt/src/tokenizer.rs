//! Lazy token producer for the N-Triples and N-Quads grammars.

use crate::error::{NtError, NtErrorKind};
use crate::read::{LookAheadByteReader, PushChar, EOF};
use crate::token::{Token, TokenKind};
use std::char;
use std::io::BufRead;
use std::str;

/// Turns a byte stream into the token stream of the N-Triples token family.
///
/// The first token is always [`Bof`](enum.TokenKind.html), the terminal one
/// [`Eof`](enum.TokenKind.html); once `Eof` has been produced every further
/// call keeps returning it. Comments are preserved as tokens so the grammar
/// layer decides to discard them. A lexical error is fatal to the run, the
/// tokenizer never recovers from one.
pub struct NTriplesTokenizer<R: BufRead> {
    read: LookAheadByteReader<R>,
    expect_ascii: bool,
    trace: bool,
    emitted_bof: bool,
    eof_token: Option<Token>,
    warnings: Vec<String>,
    warned_encoding: bool,
    buffer: Vec<u8>,
}

impl<R: BufRead> NTriplesTokenizer<R> {
    /// `expect_ascii` selects the legacy encoding expectation: when set, the
    /// first non-ASCII observation produces one non-fatal warning.
    pub fn new(reader: R, expect_ascii: bool, trace: bool) -> Result<Self, NtError> {
        let read = LookAheadByteReader::new(reader)?;
        let mut warnings = Vec::new();
        if read.utf16_bom() {
            warnings.push(
                "input begins with a UTF-16 byte order mark, UTF-8 input was expected, continuing anyway"
                    .to_owned(),
            );
        }
        let mut this = Self {
            read,
            expect_ascii,
            trace,
            emitted_bof: false,
            eof_token: None,
            warnings,
            warned_encoding: false,
            buffer: Vec::default(),
        };
        if this.expect_ascii && this.read.utf8_bom() {
            this.note_encoding_mismatch("a UTF-8 byte order mark");
        }
        Ok(this)
    }

    /// Returns the next token of the input.
    pub fn next_token(&mut self) -> Result<Token, NtError> {
        if !self.emitted_bof {
            self.emitted_bof = true;
            return self.make_token(TokenKind::Bof, self.read.line_number(), self.read.column());
        }
        if let Some(token) = &self.eof_token {
            return Ok(token.clone());
        }

        loop {
            match self.read.current() {
                b' ' | b'\t' | b'\r' | b'\n' => self.read.consume()?,
                _ => break,
            }
        }

        let start_line = self.read.line_number();
        let start_column = self.read.column();
        let kind = match self.read.current() {
            EOF => {
                let token = self.make_token(TokenKind::Eof, start_line, start_column)?;
                self.eof_token = Some(token.clone());
                return Ok(token);
            }
            b'#' => {
                self.scan_comment()?;
                TokenKind::Comment
            }
            b'.' => {
                self.read.consume()?;
                TokenKind::Dot
            }
            b'<' => {
                self.scan_uri()?;
                TokenKind::Uri
            }
            b'"' => {
                self.scan_literal()?;
                TokenKind::Literal
            }
            b'@' => {
                self.scan_langtag()?;
                TokenKind::LangSpec
            }
            b'^' => {
                self.read.consume()?;
                self.read.check_is_current(b'^')?;
                self.read.consume()?;
                self.read.check_is_current(b'<')?;
                self.scan_uri()?;
                TokenKind::Datatype
            }
            b'_' => self.scan_blank_node()?,
            _ => self.read.unexpected_char_error()?,
        };
        self.make_token(kind, start_line, start_column)
    }

    /// Drains the non-fatal anomalies noticed since the last call.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn make_token(
        &mut self,
        kind: TokenKind,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, NtError> {
        let text = str::from_utf8(&self.buffer)
            .map_err(|_| self.read.parse_error(NtErrorKind::InvalidUtf8))?
            .to_owned();
        self.buffer.clear();
        let token = Token {
            kind,
            text,
            start_line,
            start_column,
            end_line: self.read.line_number(),
            end_column: self.read.column(),
        };
        if self.trace {
            log::trace!("token: {}", token);
        }
        Ok(token)
    }

    fn scan_comment(&mut self) -> Result<(), NtError> {
        self.read.check_is_current(b'#')?;
        loop {
            self.read.consume()?;
            match self.read.current() {
                b'\r' | b'\n' | EOF => return Ok(()),
                c => self.push_byte(c),
            }
        }
    }

    fn scan_uri(&mut self) -> Result<(), NtError> {
        // [8] IRIREF ::= '<' ([^#x00-#x20<>"{}|^`\] | UCHAR)* '>'
        self.read.check_is_current(b'<')?;
        loop {
            self.read.consume()?;
            match self.read.current() {
                b'>' => {
                    self.read.consume()?;
                    return Ok(());
                }
                EOF => self.read.unexpected_char_error()?,
                b'\0'..=b' ' | b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`' => {
                    self.read.unexpected_char_error()?
                }
                b'\\' => {
                    self.read.consume()?;
                    let c = match self.read.current() {
                        b'u' => self.read_hexa_char(4)?,
                        b'U' => self.read_hexa_char(8)?,
                        _ => self.read.unexpected_char_error()?,
                    };
                    match c {
                        '\0'..=' ' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' => {
                            self.read.unexpected_char_error()?
                        }
                        c => self.push_char(c),
                    }
                }
                c => self.push_byte(c),
            }
        }
    }

    fn scan_literal(&mut self) -> Result<(), NtError> {
        // [9] STRING_LITERAL_QUOTE ::= '"' ([^#x22#x5C#xA#xD] | ECHAR | UCHAR)* '"'
        self.read.check_is_current(b'"')?;
        loop {
            self.read.consume()?;
            match self.read.current() {
                b'"' => {
                    self.read.consume()?;
                    return Ok(());
                }
                b'\\' => self.scan_escape()?,
                b'\n' | b'\r' | EOF => self.read.unexpected_char_error()?,
                c => self.push_byte(c),
            }
        }
    }

    fn scan_escape(&mut self) -> Result<(), NtError> {
        self.read.check_is_current(b'\\')?;
        self.read.consume()?;
        match self.read.current() {
            b't' => self.push_byte(b'\t'),
            b'b' => self.push_byte(0x8),
            b'n' => self.push_byte(b'\n'),
            b'r' => self.push_byte(b'\r'),
            b'f' => self.push_byte(0xC),
            b'"' => self.push_byte(b'"'),
            b'\'' => self.push_byte(b'\''),
            b'\\' => self.push_byte(b'\\'),
            b'u' => {
                let c = self.read_hexa_char(4)?;
                self.push_char(c)
            }
            b'U' => {
                let c = self.read_hexa_char(8)?;
                self.push_char(c)
            }
            _ => self.read.unexpected_char_error()?,
        }
        Ok(())
    }

    fn scan_langtag(&mut self) -> Result<(), NtError> {
        // [144s] LANGTAG ::= '@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
        self.read.check_is_current(b'@')?;
        self.read.consume()?;
        match self.read.current() {
            c @ b'a'..=b'z' | c @ b'A'..=b'Z' => self.push_byte(c),
            _ => self.read.unexpected_char_error()?,
        }
        loop {
            self.read.consume()?;
            match self.read.current() {
                c @ b'a'..=b'z' | c @ b'A'..=b'Z' | c @ b'0'..=b'9' => self.push_byte(c),
                b'-' => match self.read.next() {
                    Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'0'..=b'9') => {
                        self.push_byte(b'-')
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn scan_blank_node(&mut self) -> Result<TokenKind, NtError> {
        // [141s] BLANK_NODE_LABEL ::= '_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
        self.read.check_is_current(b'_')?;
        self.read.consume()?;
        self.read.check_is_current(b':')?;
        self.read.consume()?;
        self.buffer.extend_from_slice(b"_:");

        match self.read.current() {
            c if is_possible_pn_chars_u(c) || (b'0'..=b'9').contains(&c) => self.push_byte(c),
            _ => return Ok(TokenKind::BlankNode),
        }

        loop {
            self.read.consume()?;
            match self.read.current() {
                b'.' => match self.read.next() {
                    Some(c) if is_possible_pn_chars(c) => self.push_byte(b'.'),
                    _ => return Ok(TokenKind::BlankNodeWithId),
                },
                c if is_possible_pn_chars(c) => self.push_byte(c),
                _ => return Ok(TokenKind::BlankNodeWithId),
            }
        }
    }

    fn read_hexa_char(&mut self, len: usize) -> Result<char, NtError> {
        let mut value = 0;
        for _ in 0..len {
            self.read.consume()?;
            if let Some(d) = convert_hexa_byte(self.read.current()) {
                value = value * 16 + u32::from(d);
            } else {
                self.read.unexpected_char_error()?;
            }
        }
        char::from_u32(value)
            .ok_or_else(|| self.read.parse_error(NtErrorKind::InvalidUnicodeCodePoint(value)))
    }

    fn push_byte(&mut self, c: u8) {
        if c >= 0x80 {
            self.note_encoding_mismatch("a non-ASCII character");
        }
        self.buffer.push(c);
    }

    fn push_char(&mut self, c: char) {
        if !c.is_ascii() {
            self.note_encoding_mismatch("a non-ASCII character");
        }
        self.buffer.push_char(c);
    }

    fn note_encoding_mismatch(&mut self, what: &str) {
        if self.expect_ascii && !self.warned_encoding {
            self.warned_encoding = true;
            self.warnings.push(format!(
                "{} was encountered at {} while the selected syntax expects ASCII input, continuing anyway",
                what,
                self.read.position()
            ));
        }
    }
}

fn convert_hexa_byte(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// [157s] PN_CHARS_BASE ::= [A-Z] | [a-z] | [#x00C0-#x00D6] | ...
fn is_possible_pn_chars_base(c: u8) -> bool {
    match c {
        EOF => false,
        b'A'..=b'Z' | b'a'..=b'z' | 0x80..=0xBF | 0xC2..=0xDF | 0xE0..=0xEF | 0xF0..=0xF4 => true,
        _ => false,
    }
}

// [158s] PN_CHARS_U ::= PN_CHARS_BASE | '_' | ':'
fn is_possible_pn_chars_u(c: u8) -> bool {
    match c {
        c if is_possible_pn_chars_base(c) => true,
        b'_' => true,
        _ => false,
    }
}

// [160s] PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
fn is_possible_pn_chars(c: u8) -> bool {
    match c {
        c if is_possible_pn_chars_u(c) => true,
        b'-' | b'0'..=b'9' => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tokens(data: &str) -> Vec<Token> {
        let mut tokenizer = NTriplesTokenizer::new(Cursor::new(data), false, false).unwrap();
        let mut result = Vec::new();
        loop {
            let token = tokenizer.next_token().unwrap();
            let done = token.kind == TokenKind::Eof;
            result.push(token);
            if done {
                return result;
            }
        }
    }

    #[test]
    fn simple_statement_token_stream() {
        let kinds: Vec<_> = tokens("<http://a> <http://b> \"c\" .")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            vec![
                TokenKind::Bof,
                TokenKind::Uri,
                TokenKind::Uri,
                TokenKind::Literal,
                TokenKind::Dot,
                TokenKind::Eof
            ],
            kinds
        );
    }

    #[test]
    fn comments_are_preserved() {
        let produced = tokens("# a remark\n<http://a> <http://b> <http://c> .");
        assert_eq!(TokenKind::Comment, produced[1].kind);
        assert_eq!(" a remark", produced[1].text);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut tokenizer = NTriplesTokenizer::new(Cursor::new(""), false, false).unwrap();
        assert_eq!(TokenKind::Bof, tokenizer.next_token().unwrap().kind);
        for _ in 0..5 {
            assert_eq!(TokenKind::Eof, tokenizer.next_token().unwrap().kind);
        }
    }

    #[test]
    fn escapes_are_decoded() {
        let produced = tokens("\"a\\tb\\u00E9\\U0001F600\"");
        assert_eq!("a\tb\u{e9}\u{1F600}", produced[1].text);
    }

    #[test]
    fn unterminated_literal_is_fatal() {
        let mut tokenizer =
            NTriplesTokenizer::new(Cursor::new("\"open\n"), false, false).unwrap();
        tokenizer.next_token().unwrap();
        assert!(tokenizer.next_token().is_err());
    }

    #[test]
    fn bad_escape_has_position() {
        let mut tokenizer = NTriplesTokenizer::new(Cursor::new("\"\\q\""), false, false).unwrap();
        tokenizer.next_token().unwrap();
        let error = tokenizer.next_token().unwrap_err();
        assert!(error.to_string().contains("line 1"));
    }

    #[test]
    fn forbidden_uri_characters_are_rejected() {
        let mut tokenizer =
            NTriplesTokenizer::new(Cursor::new("<http://a b>"), false, false).unwrap();
        tokenizer.next_token().unwrap();
        assert!(tokenizer.next_token().is_err());
    }

    #[test]
    fn blank_node_keeps_sigil() {
        let produced = tokens("_:node1 _:");
        assert_eq!(TokenKind::BlankNodeWithId, produced[1].kind);
        assert_eq!("_:node1", produced[1].text);
        assert_eq!(TokenKind::BlankNode, produced[2].kind);
    }

    #[test]
    fn ascii_expectation_warns_once() {
        let mut tokenizer =
            NTriplesTokenizer::new(Cursor::new("\"caf\u{e9} caf\u{e9}\""), true, false).unwrap();
        tokenizer.next_token().unwrap();
        tokenizer.next_token().unwrap();
        assert_eq!(1, tokenizer.take_warnings().len());
        assert!(tokenizer.take_warnings().is_empty());
    }

    #[test]
    fn positions_cover_the_token() {
        let produced = tokens("<http://a> .");
        let uri = &produced[1];
        assert_eq!((1, 1), (uri.start_line, uri.start_column));
        assert_eq!((1, 11), (uri.end_line, uri.end_column));
    }
}
