use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use std::error::Error;
use std::fmt;
use std::io;
use tripod_api::parser::{ParseError, TextPosition};

/// Error that might be returned during parsing.
///
/// It might wrap an IO error, an XML well-formedness error or a TriX
/// structure error.
#[derive(Debug)]
pub struct TriXError {
    pub(crate) kind: TriXErrorKind,
    pub(crate) byte_position: Option<usize>,
}

#[derive(Debug)]
pub(crate) enum TriXErrorKind {
    Xml(quick_xml::Error),
    InvalidIri { iri: String, error: IriParseError },
    InvalidLanguageTag {
        tag: String,
        error: LanguageTagParseError,
    },
    Structure(String),
}

impl TriXError {
    pub(crate) fn structure(message: impl Into<String>, byte_position: usize) -> Self {
        Self {
            kind: TriXErrorKind::Structure(message.into()),
            byte_position: Some(byte_position),
        }
    }

    pub(crate) fn at(kind: TriXErrorKind, byte_position: usize) -> Self {
        Self {
            kind,
            byte_position: Some(byte_position),
        }
    }

    /// The byte offset in the input at which the error was detected.
    pub fn byte_position(&self) -> Option<usize> {
        self.byte_position
    }
}

impl fmt::Display for TriXError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TriXErrorKind::Xml(error) => return error.fmt(f),
            TriXErrorKind::InvalidIri { iri, error } => {
                write!(f, "error while parsing IRI '{}': {}", iri, error)
            }
            TriXErrorKind::InvalidLanguageTag { tag, error } => {
                write!(f, "error while parsing language tag '{}': {}", tag, error)
            }
            TriXErrorKind::Structure(message) => f.write_str(message),
        }?;
        if let Some(byte_position) = self.byte_position {
            write!(f, " at byte {}", byte_position)?;
        }
        Ok(())
    }
}

impl Error for TriXError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            TriXErrorKind::Xml(quick_xml::Error::Io(error)) => Some(error),
            TriXErrorKind::Xml(quick_xml::Error::Utf8(error)) => Some(error),
            TriXErrorKind::InvalidIri { error, .. } => Some(error),
            TriXErrorKind::InvalidLanguageTag { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl ParseError for TriXError {
    fn textual_position(&self) -> Option<TextPosition> {
        None
    }
}

impl From<quick_xml::Error> for TriXError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: TriXErrorKind::Xml(error),
            byte_position: None,
        }
    }
}

impl From<io::Error> for TriXError {
    fn from(error: io::Error) -> Self {
        Self {
            kind: TriXErrorKind::Xml(quick_xml::Error::Io(error)),
            byte_position: None,
        }
    }
}
