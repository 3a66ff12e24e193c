//! Heuristic format detection for in-memory RDF data.

use std::error::Error;
use std::fmt;
use tripod_api::handler::RdfHandler;
use tripod_api::parser::RdfParser;
use tripod_nt::{NQuadsParser, NQuadsSyntax, NTriplesParser, NTriplesSyntax, NtError};
use tripod_trix::{TriXError, TriXParser};

/// A concrete RDF serialization, as guessed from the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    NTriples,
    NQuads,
    Turtle,
    Notation3,
    RdfXml,
    TriX,
}

impl RdfFormat {
    /// The preferred media type of the format.
    pub fn media_type(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::NQuads => "application/n-quads",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::Notation3 => "text/n3",
            RdfFormat::RdfXml => "application/rdf+xml",
            RdfFormat::TriX => "application/trix",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfFormat::NTriples => "N-Triples",
            RdfFormat::NQuads => "N-Quads",
            RdfFormat::Turtle => "Turtle",
            RdfFormat::Notation3 => "Notation3",
            RdfFormat::RdfXml => "RDF/XML",
            RdfFormat::TriX => "TriX",
        })
    }
}

/// Guesses the serialization of a chunk of RDF data.
///
/// The heuristics look for unambiguous markers first: an XML preamble or
/// `rdf:RDF` element, a `TriX` element, Turtle directives and their
/// Notation3 extensions. Anything else is assumed to be in the N-Triples
/// family, with N-Quads selected when the first statement carries a fourth
/// term.
pub fn guess_format(data: &str) -> RdfFormat {
    if data.contains("<TriX") {
        return RdfFormat::TriX;
    }
    if data.contains("<rdf:RDF") || data.trim_start().starts_with("<?xml") {
        return RdfFormat::RdfXml;
    }
    if data.contains("@keywords") || data.contains("@forAll") || data.contains("@forSome") {
        return RdfFormat::Notation3;
    }
    if data.contains("@prefix") || data.contains("@base") {
        return RdfFormat::Turtle;
    }
    if first_statement_has_four_terms(data) {
        RdfFormat::NQuads
    } else {
        RdfFormat::NTriples
    }
}

/// Counts the terms of the first statement-looking line.
fn first_statement_has_four_terms(data: &str) -> bool {
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        return count_terms(line) >= 4;
    }
    false
}

fn count_terms(line: &str) -> usize {
    let mut terms = 0;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => (),
            '.' => break,
            '<' => {
                terms += 1;
                for c in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                }
            }
            '"' => {
                terms += 1;
                let mut escaped = false;
                for c in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break;
                    }
                }
                // skip a language tag or datatype suffix
                while let Some(c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    chars.next();
                }
            }
            '_' => {
                terms += 1;
                while let Some(c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    chars.next();
                }
            }
            _ => {
                terms += 1;
                while let Some(c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    chars.next();
                }
            }
        }
    }
    terms
}

/// Error returned by [`parse_string`].
#[derive(Debug)]
pub enum StringParseError {
    /// The data was recognized but parsing it failed.
    NTriplesFamily(RdfFormat, NtError),
    TriX(TriXError),
    /// The data looks like a format with no parser in this crate.
    UnsupportedFormat(RdfFormat),
}

impl fmt::Display for StringParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringParseError::NTriplesFamily(format, error) => {
                write!(f, "error while parsing {} data: {}", format, error)
            }
            StringParseError::TriX(error) => {
                write!(f, "error while parsing TriX data: {}", error)
            }
            StringParseError::UnsupportedFormat(format) => {
                write!(f, "no parser is available for {} data", format)
            }
        }
    }
}

impl Error for StringParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StringParseError::NTriplesFamily(_, error) => Some(error),
            StringParseError::TriX(error) => Some(error),
            StringParseError::UnsupportedFormat(_) => None,
        }
    }
}

/// Guesses the serialization of `data` and parses it into `handler`.
///
/// Returns the format that was detected and used. Formats without a parser
/// in this crate are reported as [`StringParseError::UnsupportedFormat`].
///
/// ```
/// use tripod::detect::{parse_string, RdfFormat};
/// use tripod::handler::StatementCollector;
///
/// let mut collector = StatementCollector::new();
/// let format = parse_string(
///     &mut collector,
///     "<http://example.com/s> <http://example.com/p> <http://example.com/o> .",
/// )?;
/// assert_eq!(RdfFormat::NTriples, format);
/// assert_eq!(1, collector.triples.len());
/// # Result::<_, tripod::detect::StringParseError>::Ok(())
/// ```
pub fn parse_string<H: RdfHandler>(
    handler: &mut H,
    data: &str,
) -> Result<RdfFormat, StringParseError> {
    parse_string_as(handler, data, guess_format(data))
}

/// Parses in-memory data with an explicitly chosen format, bypassing the
/// detection heuristics.
pub fn parse_string_as<H: RdfHandler>(
    handler: &mut H,
    data: &str,
    format: RdfFormat,
) -> Result<RdfFormat, StringParseError> {
    match format {
        RdfFormat::NTriples => NTriplesParser::new(NTriplesSyntax::Rdf11)
            .load(handler, data.as_bytes())
            .map_err(|error| StringParseError::NTriplesFamily(format, error))?,
        RdfFormat::NQuads => NQuadsParser::new(NQuadsSyntax::Rdf11)
            .load(handler, data.as_bytes())
            .map_err(|error| StringParseError::NTriplesFamily(format, error))?,
        RdfFormat::TriX => TriXParser::new()
            .load(handler, data.as_bytes())
            .map_err(StringParseError::TriX)?,
        RdfFormat::Turtle | RdfFormat::Notation3 | RdfFormat::RdfXml => {
            return Err(StringParseError::UnsupportedFormat(format));
        }
    }
    Ok(format)
}
