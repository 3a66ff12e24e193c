//! Streaming [N-Triples](https://www.w3.org/TR/n-triples/) parser.

use crate::error::NtError;
use crate::queue::TokenQueue;
use crate::shared::*;
use crate::token::TokenKind;
use crate::tokenizer::NTriplesTokenizer;
use std::io::BufRead;
use tripod_api::handler::RdfHandler;
use tripod_api::model::Triple;
use tripod_api::parser::{Control, RdfParser};
use tripod_api::profile::{ParserProfile, TokenQueueMode};

/// Which revision of the N-Triples grammar to accept.
///
/// The original W3C working draft restricted documents to US-ASCII, the
/// RDF 1.1 recommendation is UTF-8 throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NTriplesSyntax {
    /// The 2004 working draft grammar. Non-ASCII bytes raise a warning.
    Original,
    /// The RDF 1.1 recommendation grammar.
    Rdf11,
}

impl Default for NTriplesSyntax {
    fn default() -> Self {
        NTriplesSyntax::Rdf11
    }
}

/// A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser.
///
/// It implements the [`RdfParser`](tripod_api::parser::RdfParser) trait.
///
/// Count the number of people using the `foaf:name` property:
/// ```
/// use tripod_nt::{NTriplesParser, NTriplesSyntax};
/// use tripod_api::handler::StatementCollector;
/// use tripod_api::parser::RdfParser;
///
/// let file = b"<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/foo> <http://schema.org/name> \"Foo\" .
/// <http://example.com/bar> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
///
/// let mut collector = StatementCollector::new();
/// NTriplesParser::new(NTriplesSyntax::Rdf11).load(&mut collector, file.as_ref())?;
/// assert_eq!(4, collector.triples.len());
/// # Result::<_, tripod_nt::NtError>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NTriplesParser {
    syntax: NTriplesSyntax,
    queue_mode: TokenQueueMode,
}

impl NTriplesParser {
    pub fn new(syntax: NTriplesSyntax) -> Self {
        Self {
            syntax,
            queue_mode: TokenQueueMode::default(),
        }
    }

    /// Selects between buffered and streaming token consumption.
    pub fn with_queue_mode(mut self, mode: TokenQueueMode) -> Self {
        self.queue_mode = mode;
        self
    }

    pub fn syntax(&self) -> NTriplesSyntax {
        self.syntax
    }
}

impl RdfParser for NTriplesParser {
    type Error = NtError;

    fn load_with_profile<H: RdfHandler, R: BufRead>(
        &self,
        handler: &mut H,
        input: R,
        mut profile: ParserProfile<'_>,
    ) -> Result<(), NtError> {
        handler.start_rdf();
        match parse_document(self, handler, input, &mut profile) {
            Ok(_) => {
                handler.end_rdf(true);
                Ok(())
            }
            Err(error) => {
                handler.end_rdf(false);
                Err(error)
            }
        }
    }
}

fn parse_document<H: RdfHandler, R: BufRead>(
    parser: &NTriplesParser,
    handler: &mut H,
    input: R,
    profile: &mut ParserProfile<'_>,
) -> Result<Control, NtError> {
    let tokenizer = NTriplesTokenizer::new(
        input,
        parser.syntax == NTriplesSyntax::Original,
        profile.trace_tokenizer(),
    )?;
    let mut queue = TokenQueue::new(tokenizer, parser.queue_mode);
    let result = parse_statements(handler, &mut queue, profile);
    // anomalies noticed while scanning the failing statement still reach
    // the sink
    drain_warnings(&mut queue, profile);
    result
}

fn parse_statements<H: RdfHandler, R: BufRead>(
    handler: &mut H,
    queue: &mut TokenQueue<R>,
    profile: &mut ParserProfile<'_>,
) -> Result<Control, NtError> {
    queue.initialise()?;
    expect_bof(queue)?;
    loop {
        drain_warnings(queue, profile);
        let token = next_significant(queue)?;
        if token.kind == TokenKind::Eof {
            return Ok(Control::Continue);
        }
        let subject = subject_node(handler, profile, &token)?;
        let predicate_token = next_significant(queue)?;
        let predicate = predicate_node(handler, &predicate_token)?;
        let object_token = next_significant(queue)?;
        let object = object_node(handler, profile, queue, &object_token)?;
        expect_dot(queue)?;
        if profile.trace_parsing() {
            log::trace!("triple parsed at {}", token.start());
        }
        let continuation = handler.handle_triple(Triple {
            subject,
            predicate,
            object,
        });
        if Control::from(continuation) == Control::Stop {
            return Ok(Control::Stop);
        }
    }
}
