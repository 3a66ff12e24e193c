//! Streaming [N-Quads](https://www.w3.org/TR/n-quads/) parser.

use crate::error::{NtError, NtErrorKind};
use crate::queue::TokenQueue;
use crate::shared::*;
use crate::token::TokenKind;
use crate::tokenizer::NTriplesTokenizer;
use std::io::BufRead;
use tripod_api::handler::RdfHandler;
use tripod_api::model::Quad;
use tripod_api::parser::{Control, RdfParser};
use tripod_api::profile::{ParserProfile, TokenQueueMode};

/// Which revision of the N-Quads grammar to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NQuadsSyntax {
    /// The pre-recommendation grammar, which permits literal graph names.
    Original,
    /// The RDF 1.1 recommendation grammar.
    Rdf11,
}

impl Default for NQuadsSyntax {
    fn default() -> Self {
        NQuadsSyntax::Rdf11
    }
}

/// A [N-Quads](https://www.w3.org/TR/n-quads/) streaming parser.
///
/// A statement without a fourth term belongs to the default graph, which is
/// reported as a `None` graph name.
///
/// ```
/// use tripod_nt::{NQuadsParser, NQuadsSyntax};
/// use tripod_api::handler::StatementCollector;
/// use tripod_api::parser::RdfParser;
///
/// let file = b"<http://example.com/s> <http://example.com/p> \"o\" <http://example.com/g> .
/// <http://example.com/s> <http://example.com/p> \"o\" .";
///
/// let mut collector = StatementCollector::new();
/// NQuadsParser::new(NQuadsSyntax::Rdf11).load(&mut collector, file.as_ref())?;
/// assert!(collector.quads[0].graph_name.is_some());
/// assert!(collector.quads[1].graph_name.is_none());
/// # Result::<_, tripod_nt::NtError>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NQuadsParser {
    syntax: NQuadsSyntax,
    queue_mode: TokenQueueMode,
}

impl NQuadsParser {
    pub fn new(syntax: NQuadsSyntax) -> Self {
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

    pub fn syntax(&self) -> NQuadsSyntax {
        self.syntax
    }
}

impl RdfParser for NQuadsParser {
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
    parser: &NQuadsParser,
    handler: &mut H,
    input: R,
    profile: &mut ParserProfile<'_>,
) -> Result<Control, NtError> {
    let tokenizer = NTriplesTokenizer::new(
        input,
        parser.syntax == NQuadsSyntax::Original,
        profile.trace_tokenizer(),
    )?;
    let mut queue = TokenQueue::new(tokenizer, parser.queue_mode);
    let result = parse_statements(parser.syntax, handler, &mut queue, profile);
    // anomalies noticed while scanning the failing statement still reach
    // the sink
    drain_warnings(&mut queue, profile);
    result
}

fn parse_statements<H: RdfHandler, R: BufRead>(
    syntax: NQuadsSyntax,
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
        let graph_name = graph_name(syntax, handler, profile, queue)?;
        if profile.trace_parsing() {
            log::trace!("quad parsed at {}", token.start());
        }
        let continuation = handler.handle_quad(Quad {
            subject,
            predicate,
            object,
            graph_name,
        });
        if Control::from(continuation) == Control::Stop {
            return Ok(Control::Stop);
        }
    }
}

/// Parses the optional fourth term and the statement terminator.
fn graph_name<H: RdfHandler, R: BufRead>(
    syntax: NQuadsSyntax,
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    queue: &mut TokenQueue<R>,
) -> Result<Option<H::Node>, NtError> {
    let token = next_significant(queue)?;
    let graph_name = match token.kind {
        TokenKind::Dot => return Ok(None),
        TokenKind::Uri => {
            check_absolute_iri(&token)?;
            handler.create_uri_node(&token.text)
        }
        TokenKind::BlankNodeWithId => labeled_blank_node(handler, profile, &token),
        TokenKind::Literal => {
            if syntax == NQuadsSyntax::Original {
                handler.create_literal(&token.text)
            } else {
                return Err(NtError::new(
                    NtErrorKind::LiteralGraphName,
                    Some(token.start()),
                ));
            }
        }
        _ => return Err(unexpected(&token, "a graph name or '.'")),
    };
    expect_dot(queue)?;
    Ok(Some(graph_name))
}
