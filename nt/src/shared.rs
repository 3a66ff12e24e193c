//! Grammar helpers shared by the N-Triples and N-Quads drivers.

use crate::error::{NtError, NtErrorKind};
use crate::queue::TokenQueue;
use crate::token::{Token, TokenKind};
use oxilangtag::LanguageTag;
use oxiri::Iri;
use std::io::BufRead;
use tripod_api::handler::RdfHandler;
use tripod_api::profile::ParserProfile;

pub(crate) fn unexpected(token: &Token, expected: &'static str) -> NtError {
    NtError::new(
        NtErrorKind::UnexpectedToken {
            found: token.kind,
            expected,
        },
        Some(token.start()),
    )
}

pub(crate) fn literal_in_position(token: &Token, position: &'static str) -> NtError {
    NtError::new(
        NtErrorKind::LiteralInPosition(position),
        Some(token.start()),
    )
}

/// Forwards tokenizer anomalies to the profile's warning sink.
pub(crate) fn drain_warnings<R: BufRead>(
    queue: &mut TokenQueue<R>,
    profile: &mut ParserProfile<'_>,
) {
    for warning in queue.take_warnings() {
        profile.warn(warning);
    }
}

/// Dequeues the next non-comment token.
pub(crate) fn next_significant<R: BufRead>(queue: &mut TokenQueue<R>) -> Result<Token, NtError> {
    loop {
        let token = queue.dequeue()?;
        if token.kind != TokenKind::Comment {
            return Ok(token);
        }
    }
}

/// The N-Triples family only permits absolute IRIs.
pub(crate) fn check_absolute_iri(token: &Token) -> Result<(), NtError> {
    match Iri::parse(token.text.as_str()) {
        Ok(_) => Ok(()),
        Err(error) => Err(NtError::new(
            NtErrorKind::InvalidIri {
                iri: token.text.clone(),
                error,
            },
            Some(token.start()),
        )),
    }
}

pub(crate) fn check_language_tag(token: &Token) -> Result<(), NtError> {
    match LanguageTag::parse(token.text.as_str()) {
        Ok(_) => Ok(()),
        Err(error) => Err(NtError::new(
            NtErrorKind::InvalidLanguageTag {
                tag: token.text.clone(),
                error,
            },
            Some(token.start()),
        )),
    }
}

/// Resolves `_:label` through the run-scoped generator, stripping the sigil.
pub(crate) fn labeled_blank_node<H: RdfHandler>(
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    token: &Token,
) -> H::Node {
    let id = profile.blank_nodes().get_or_create(&token.text[2..]).to_owned();
    handler.create_labeled_blank_node(&id)
}

pub(crate) fn subject_node<H: RdfHandler>(
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    token: &Token,
) -> Result<H::Node, NtError> {
    match token.kind {
        TokenKind::Uri => {
            check_absolute_iri(token)?;
            Ok(handler.create_uri_node(&token.text))
        }
        TokenKind::BlankNodeWithId => Ok(labeled_blank_node(handler, profile, token)),
        TokenKind::BlankNode => Ok(handler.create_blank_node()),
        TokenKind::Literal | TokenKind::LangSpec | TokenKind::Datatype => {
            Err(literal_in_position(token, "subject"))
        }
        _ => Err(unexpected(token, "a URI or blank node")),
    }
}

pub(crate) fn predicate_node<H: RdfHandler>(
    handler: &mut H,
    token: &Token,
) -> Result<H::Node, NtError> {
    match token.kind {
        TokenKind::Uri => {
            check_absolute_iri(token)?;
            Ok(handler.create_uri_node(&token.text))
        }
        TokenKind::Literal | TokenKind::LangSpec | TokenKind::Datatype => {
            Err(literal_in_position(token, "predicate"))
        }
        _ => Err(unexpected(token, "a URI")),
    }
}

pub(crate) fn object_node<H: RdfHandler, R: BufRead>(
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    queue: &mut TokenQueue<R>,
    token: &Token,
) -> Result<H::Node, NtError> {
    match token.kind {
        TokenKind::Uri => {
            check_absolute_iri(token)?;
            Ok(handler.create_uri_node(&token.text))
        }
        TokenKind::BlankNodeWithId => Ok(labeled_blank_node(handler, profile, token)),
        TokenKind::BlankNode => Ok(handler.create_blank_node()),
        TokenKind::Literal => {
            // The annotation must follow the literal immediately, comments
            // are not skipped here.
            match queue.peek()?.kind {
                TokenKind::LangSpec => {
                    let lang = queue.dequeue()?;
                    check_language_tag(&lang)?;
                    ensure_single_annotation(queue)?;
                    Ok(handler.create_language_literal(&token.text, &lang.text))
                }
                TokenKind::Datatype => {
                    let datatype = queue.dequeue()?;
                    check_absolute_iri(&datatype)?;
                    ensure_single_annotation(queue)?;
                    Ok(handler.create_typed_literal(&token.text, &datatype.text))
                }
                _ => Ok(handler.create_literal(&token.text)),
            }
        }
        _ => Err(unexpected(token, "a URI, blank node or literal")),
    }
}

/// A literal has at most one of a language tag or a datatype.
fn ensure_single_annotation<R: BufRead>(queue: &mut TokenQueue<R>) -> Result<(), NtError> {
    let next = queue.peek()?;
    if let TokenKind::LangSpec | TokenKind::Datatype = next.kind {
        return Err(NtError::new(
            NtErrorKind::LanguageAndDatatype,
            Some(next.start()),
        ));
    }
    Ok(())
}

pub(crate) fn expect_bof<R: BufRead>(queue: &mut TokenQueue<R>) -> Result<(), NtError> {
    let token = queue.dequeue()?;
    if token.kind == TokenKind::Bof {
        Ok(())
    } else {
        Err(unexpected(&token, "the beginning of the input"))
    }
}

pub(crate) fn expect_dot<R: BufRead>(queue: &mut TokenQueue<R>) -> Result<(), NtError> {
    let token = next_significant(queue)?;
    if token.kind == TokenKind::Dot {
        Ok(())
    } else {
        Err(unexpected(&token, "'.' to terminate the statement"))
    }
}
