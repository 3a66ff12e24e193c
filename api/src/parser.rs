//! Interfaces for RDF parsers.

use crate::handler::{Continuation, RdfHandler};
use crate::profile::ParserProfile;
use std::error::Error;
use std::fmt;
use std::io;
use std::io::BufRead;

/// A line/column position in a textual input, both starting at 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct TextPosition {
    line: usize,
    column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Error returned during parsing, able to point at the offending input.
pub trait ParseError: Error {
    /// Position of the error, when the syntax is line oriented.
    fn textual_position(&self) -> Option<TextPosition>;
}

/// Outcome of a grammar production: keep going or stop cleanly because the
/// handler asked to.
///
/// This replaces exception-based unwinding for the handler-requested stop
/// path: `Stop` travels up through return values and `load` still finishes
/// with `Ok(())` and `end_rdf(true)`.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Control {
    Continue,
    Stop,
}

impl From<Continuation> for Control {
    fn from(continuation: Continuation) -> Self {
        match continuation {
            Continuation::Continue => Control::Continue,
            Continuation::Stop => Control::Stop,
        }
    }
}

/// A streaming RDF parser feeding an [`RdfHandler`](../handler/trait.RdfHandler.html).
///
/// Each `load` call drives a complete, single-threaded, pull-based pipeline
/// over its own input and profile. Parsers hold no per-run state, so one
/// parser value can serve concurrent `load` calls from multiple threads as
/// long as each call gets its own handler and input.
pub trait RdfParser {
    type Error: Error + From<io::Error>;

    /// Parses the complete input, delivering statements to `handler`.
    ///
    /// Guarantees exactly one `start_rdf`/`end_rdf` pair on every outcome:
    /// `end_rdf(true)` on success or handler-requested stop,
    /// `end_rdf(false)` right before a fatal error propagates.
    fn load_with_profile<H: RdfHandler, R: BufRead>(
        &self,
        handler: &mut H,
        input: R,
        profile: ParserProfile<'_>,
    ) -> Result<(), Self::Error>;

    /// Like [`load_with_profile`](#tymethod.load_with_profile) with a default
    /// profile: no base IRI, no namespaces, a fresh blank node generator.
    fn load<H: RdfHandler, R: BufRead>(
        &self,
        handler: &mut H,
        input: R,
    ) -> Result<(), Self::Error> {
        self.load_with_profile(handler, input, ParserProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_from_continuation() {
        assert_eq!(Control::Continue, Continuation::Continue.into());
        assert_eq!(Control::Stop, Continuation::Stop.into());
    }

    #[test]
    fn position_display() {
        assert_eq!("line 3 column 7", TextPosition::new(3, 7).to_string());
    }
}
