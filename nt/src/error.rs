use crate::token::TokenKind;
use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use std::char;
use std::error::Error;
use std::fmt;
use std::io;
use tripod_api::parser::{ParseError, TextPosition};

/// Error that might be returned during parsing.
///
/// It might wrap an IO error or be a lexical, grammar or semantic error.
#[derive(Debug)]
pub struct NtError {
    pub(crate) kind: NtErrorKind,
    pub(crate) position: Option<TextPosition>,
}

#[derive(Debug)]
pub(crate) enum NtErrorKind {
    Io(io::Error),
    PrematureEof,
    UnexpectedByte(u8),
    InvalidUnicodeCodePoint(u32),
    InvalidUtf8,
    InvalidIri {
        iri: String,
        error: IriParseError,
    },
    InvalidLanguageTag {
        tag: String,
        error: LanguageTagParseError,
    },
    UnexpectedToken {
        found: TokenKind,
        expected: &'static str,
    },
    LiteralInPosition(&'static str),
    LanguageAndDatatype,
    LiteralGraphName,
}

impl NtError {
    pub(crate) fn new(kind: NtErrorKind, position: Option<TextPosition>) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for NtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NtErrorKind::Io(error) => return error.fmt(f),
            NtErrorKind::PrematureEof => write!(f, "premature end of file"),
            NtErrorKind::UnexpectedByte(c) => match char::from_u32(u32::from(*c)) {
                Some(c) => write!(f, "unexpected character '{}'", c.escape_debug()),
                None => write!(f, "unexpected byte {}", c),
            },
            NtErrorKind::InvalidUnicodeCodePoint(point) => {
                write!(f, "invalid unicode code point '{}'", point)
            }
            NtErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            NtErrorKind::InvalidIri { iri, error } => {
                write!(f, "error while parsing IRI '{}': {}", iri, error)
            }
            NtErrorKind::InvalidLanguageTag { tag, error } => {
                write!(f, "error while parsing language tag '{}': {}", tag, error)
            }
            NtErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "unexpected {} token, expected {}", found, expected)
            }
            NtErrorKind::LiteralInPosition(position) => {
                write!(f, "the {} of a statement cannot be a literal", position)
            }
            NtErrorKind::LanguageAndDatatype => write!(
                f,
                "a literal cannot carry both a language tag and a datatype"
            ),
            NtErrorKind::LiteralGraphName => write!(
                f,
                "a literal graph name is not allowed in the RDF 1.1 N-Quads syntax"
            ),
        }?;
        if let Some(position) = self.position {
            write!(f, " at {}", position)?;
        }
        Ok(())
    }
}

impl Error for NtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            NtErrorKind::Io(error) => Some(error),
            NtErrorKind::InvalidIri { error, .. } => Some(error),
            NtErrorKind::InvalidLanguageTag { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl ParseError for NtError {
    fn textual_position(&self) -> Option<TextPosition> {
        self.position
    }
}

impl From<io::Error> for NtError {
    fn from(error: io::Error) -> Self {
        Self {
            kind: NtErrorKind::Io(error),
            position: None,
        }
    }
}

impl From<NtError> for io::Error {
    fn from(error: NtError) -> Self {
        match error.kind {
            NtErrorKind::Io(error) => error,
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}
