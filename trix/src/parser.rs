use crate::error::{TriXError, TriXErrorKind};
use oxilangtag::LanguageTag;
use oxiri::Iri;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use tripod_api::handler::RdfHandler;
use tripod_api::model::Quad;
use tripod_api::parser::{Control, RdfParser};
use tripod_api::profile::ParserProfile;

/// The namespace every TriX document must declare on its root element.
pub const TRIX_NAMESPACE: &str = "http://www.w3.org/2004/03/trix/trix-1/";

/// A [TriX](https://www.hpl.hp.com/techreports/2004/HPL-2004-56.html) streaming parser.
///
/// It implements the [`RdfParser`](tripod_api::parser::RdfParser) trait.
/// It reads the file in streaming and does not keep data in memory except the
/// current graph name and the terms of the triple being decoded.
///
/// ```
/// use tripod_trix::TriXParser;
/// use tripod_api::handler::StatementCollector;
/// use tripod_api::parser::RdfParser;
///
/// let file = b"<?xml version=\"1.0\"?>
/// <TriX xmlns=\"http://www.w3.org/2004/03/trix/trix-1/\">
///  <graph>
///   <uri>http://example.com/g</uri>
///   <triple>
///    <uri>http://example.com/s</uri>
///    <uri>http://example.com/p</uri>
///    <plainLiteral xml:lang=\"en\">o</plainLiteral>
///   </triple>
///  </graph>
/// </TriX>";
///
/// let mut collector = StatementCollector::new();
/// TriXParser::new().load(&mut collector, file.as_ref())?;
/// assert_eq!(1, collector.quads.len());
/// # Result::<_, tripod_trix::TriXError>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TriXParser;

impl TriXParser {
    pub fn new() -> Self {
        Self
    }
}

impl RdfParser for TriXParser {
    type Error = TriXError;

    fn load_with_profile<H: RdfHandler, R: BufRead>(
        &self,
        handler: &mut H,
        input: R,
        mut profile: ParserProfile<'_>,
    ) -> Result<(), TriXError> {
        let mut reader = Reader::from_reader(input);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        handler.start_rdf();
        match parse_document(handler, &mut profile, reader) {
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

/// What the parser is currently inside of.
enum State {
    BeforeRoot,
    Root,
    Graph,
    GraphName { is_id: bool, text: String },
    Triple,
    Term { kind: TermKind, text: String },
    AfterRoot,
}

enum TermKind {
    Uri,
    Id,
    PlainLiteral { language: Option<String> },
    TypedLiteral { datatype: String },
}

fn parse_document<H: RdfHandler, R: BufRead>(
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    mut reader: Reader<R>,
) -> Result<Control, TriXError> {
    let mut buffer = Vec::new();
    let mut skip_buffer = Vec::new();
    let mut state = State::BeforeRoot;
    let mut graph_name: Option<H::Node> = None;
    let mut graph_named = false;
    let mut graph_has_triples = false;
    let mut terms: Vec<H::Node> = Vec::new();
    loop {
        buffer.clear();
        let event = reader
            .read_event(&mut buffer)
            .map_err(|error| TriXError::at(TriXErrorKind::Xml(error), reader.buffer_position()))?;
        match event {
            Event::Decl(decl) => {
                if let Some(encoding) = decl.encoding() {
                    let encoding = encoding.map_err(TriXError::from)?;
                    if !encoding.eq_ignore_ascii_case(b"utf-8") {
                        profile.warn(format!(
                            "the declared encoding '{}' is not UTF-8, the input is decoded as UTF-8 anyway",
                            String::from_utf8_lossy(&encoding)
                        ));
                    }
                }
            }
            Event::PI(text) => {
                if text.starts_with(b"xml-stylesheet") {
                    profile.warn("ignoring an xml-stylesheet processing instruction".to_owned());
                }
            }
            Event::Comment(_) => (),
            Event::Start(start) => match state {
                State::BeforeRoot => {
                    if local_name(start.name()) != b"TriX" {
                        return Err(TriXError::structure(
                            format!(
                                "the root element of a TriX document must be 'TriX', found '{}'",
                                String::from_utf8_lossy(start.name())
                            ),
                            reader.buffer_position(),
                        ));
                    }
                    check_trix_namespace(&reader, &start)?;
                    state = State::Root;
                }
                State::Root => {
                    if local_name(start.name()) != b"graph" {
                        return Err(TriXError::structure(
                            format!(
                                "only 'graph' elements are allowed under the TriX root, found '{}'",
                                String::from_utf8_lossy(start.name())
                            ),
                            reader.buffer_position(),
                        ));
                    }
                    if is_unasserted(&reader, &start)? {
                        let name = start.name().to_vec();
                        skip_buffer.clear();
                        reader
                            .read_to_end(name, &mut skip_buffer)
                            .map_err(TriXError::from)?;
                        profile.warn("ignoring a graph marked as not asserted".to_owned());
                    } else {
                        graph_name = None;
                        graph_named = false;
                        graph_has_triples = false;
                        state = State::Graph;
                    }
                }
                State::Graph => match local_name(start.name()) {
                    b"uri" | b"id" => {
                        if graph_has_triples {
                            return Err(TriXError::structure(
                                "the name of a graph must come before its triples",
                                reader.buffer_position(),
                            ));
                        }
                        if graph_named {
                            return Err(TriXError::structure(
                                "a graph can be named at most once",
                                reader.buffer_position(),
                            ));
                        }
                        state = State::GraphName {
                            is_id: local_name(start.name()) == b"id",
                            text: String::new(),
                        };
                    }
                    b"triple" => {
                        graph_has_triples = true;
                        terms.clear();
                        state = State::Triple;
                    }
                    name => {
                        return Err(TriXError::structure(
                            format!(
                                "unexpected element '{}' inside a graph",
                                String::from_utf8_lossy(name)
                            ),
                            reader.buffer_position(),
                        ));
                    }
                },
                State::Triple => {
                    if terms.len() == 3 {
                        return Err(TriXError::structure(
                            "a triple element must contain exactly three terms",
                            reader.buffer_position(),
                        ));
                    }
                    let kind = match local_name(start.name()) {
                        b"uri" => TermKind::Uri,
                        b"id" => TermKind::Id,
                        b"plainLiteral" => TermKind::PlainLiteral {
                            language: language_attribute(&reader, &start)?,
                        },
                        b"typedLiteral" => TermKind::TypedLiteral {
                            datatype: datatype_attribute(&reader, &start)?,
                        },
                        name => {
                            return Err(TriXError::structure(
                                format!(
                                    "unexpected term element '{}' inside a triple",
                                    String::from_utf8_lossy(name)
                                ),
                                reader.buffer_position(),
                            ));
                        }
                    };
                    state = State::Term {
                        kind,
                        text: String::new(),
                    };
                }
                State::GraphName { .. } | State::Term { .. } => {
                    return Err(TriXError::structure(
                        format!(
                            "unexpected child element '{}' inside a term",
                            String::from_utf8_lossy(start.name())
                        ),
                        reader.buffer_position(),
                    ));
                }
                State::AfterRoot => {
                    return Err(TriXError::structure(
                        "content is not allowed after the TriX root element",
                        reader.buffer_position(),
                    ));
                }
            },
            Event::Text(text) => {
                let decoded = text
                    .unescape_and_decode(&reader)
                    .map_err(TriXError::from)?;
                match &mut state {
                    State::GraphName { text, .. } | State::Term { text, .. } => {
                        text.push_str(&decoded);
                    }
                    _ => {
                        return Err(TriXError::structure(
                            "unexpected text content",
                            reader.buffer_position(),
                        ));
                    }
                }
            }
            Event::CData(text) => {
                let decoded = reader.decode(&text).map_err(TriXError::from)?;
                match &mut state {
                    State::GraphName { text, .. } | State::Term { text, .. } => {
                        text.push_str(decoded);
                    }
                    _ => {
                        return Err(TriXError::structure(
                            "unexpected CDATA content",
                            reader.buffer_position(),
                        ));
                    }
                }
            }
            Event::End(_) => match state {
                State::GraphName { is_id, ref text } => {
                    graph_name = Some(if is_id {
                        let id = profile.blank_nodes().get_or_create(text).to_owned();
                        handler.create_labeled_blank_node(&id)
                    } else {
                        check_absolute_iri(text, &reader)?;
                        handler.create_uri_node(text)
                    });
                    graph_named = true;
                    state = State::Graph;
                }
                State::Term { ref kind, ref text } => {
                    let term = build_term(handler, profile, &reader, kind, text, terms.len())?;
                    terms.push(term);
                    state = State::Triple;
                }
                State::Triple => {
                    if terms.len() != 3 {
                        return Err(TriXError::structure(
                            format!(
                                "a triple element must contain exactly three terms, found {}",
                                terms.len()
                            ),
                            reader.buffer_position(),
                        ));
                    }
                    let object = terms.pop();
                    let predicate = terms.pop();
                    let subject = terms.pop();
                    if let (Some(subject), Some(predicate), Some(object)) =
                        (subject, predicate, object)
                    {
                        if profile.trace_parsing() {
                            log::trace!("quad parsed at byte {}", reader.buffer_position());
                        }
                        let continuation = handler.handle_quad(Quad {
                            subject,
                            predicate,
                            object,
                            graph_name: graph_name.clone(),
                        });
                        if Control::from(continuation) == Control::Stop {
                            return Ok(Control::Stop);
                        }
                    }
                    state = State::Graph;
                }
                State::Graph => {
                    graph_name = None;
                    state = State::Root;
                }
                State::Root => {
                    state = State::AfterRoot;
                }
                State::BeforeRoot | State::AfterRoot => {
                    return Err(TriXError::structure(
                        "unexpected closing tag",
                        reader.buffer_position(),
                    ));
                }
            },
            Event::Eof => {
                return match state {
                    State::AfterRoot => Ok(Control::Continue),
                    State::BeforeRoot => Err(TriXError::structure(
                        "the document contains no TriX root element",
                        reader.buffer_position(),
                    )),
                    _ => Err(TriXError::structure(
                        "premature end of file",
                        reader.buffer_position(),
                    )),
                };
            }
            _ => (),
        }
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|b| *b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// The root element must carry exactly one default `xmlns` declaration and
/// it must be the TriX namespace. A declaration bound to a prefix does not
/// count.
fn check_trix_namespace<R: BufRead>(
    reader: &Reader<R>,
    start: &BytesStart<'_>,
) -> Result<(), TriXError> {
    let mut declared = false;
    for attribute in start.attributes() {
        let attribute = attribute.map_err(TriXError::from)?;
        if attribute.key == b"xmlns" {
            if declared {
                return Err(TriXError::structure(
                    "the TriX root element declares the default namespace more than once",
                    reader.buffer_position(),
                ));
            }
            let value = attribute
                .unescape_and_decode_value(reader)
                .map_err(TriXError::from)?;
            if value != TRIX_NAMESPACE {
                return Err(TriXError::structure(
                    format!(
                        "the default namespace of a TriX document must be '{}', found '{}'",
                        TRIX_NAMESPACE, value
                    ),
                    reader.buffer_position(),
                ));
            }
            declared = true;
        }
    }
    if declared {
        Ok(())
    } else {
        Err(TriXError::structure(
            format!(
                "the TriX root element must declare the namespace '{}'",
                TRIX_NAMESPACE
            ),
            reader.buffer_position(),
        ))
    }
}

fn is_unasserted<R: BufRead>(
    reader: &Reader<R>,
    start: &BytesStart<'_>,
) -> Result<bool, TriXError> {
    if let Some(attribute) = find_attribute(start, b"asserted")? {
        let value = attribute
            .unescape_and_decode_value(reader)
            .map_err(TriXError::from)?;
        Ok(value.eq_ignore_ascii_case("false"))
    } else {
        Ok(false)
    }
}

fn language_attribute<R: BufRead>(
    reader: &Reader<R>,
    start: &BytesStart<'_>,
) -> Result<Option<String>, TriXError> {
    if let Some(attribute) = find_attribute(start, b"xml:lang")? {
        let tag = attribute
            .unescape_and_decode_value(reader)
            .map_err(TriXError::from)?;
        if let Err(error) = LanguageTag::parse(tag.as_str()) {
            return Err(TriXError::at(
                TriXErrorKind::InvalidLanguageTag { tag, error },
                reader.buffer_position(),
            ));
        }
        Ok(Some(tag))
    } else {
        Ok(None)
    }
}

fn datatype_attribute<R: BufRead>(
    reader: &Reader<R>,
    start: &BytesStart<'_>,
) -> Result<String, TriXError> {
    match find_attribute(start, b"datatype")? {
        Some(attribute) => {
            let datatype = attribute
                .unescape_and_decode_value(reader)
                .map_err(TriXError::from)?;
            check_absolute_iri(&datatype, reader)?;
            Ok(datatype)
        }
        None => Err(TriXError::structure(
            "a typedLiteral element must carry a datatype attribute",
            reader.buffer_position(),
        )),
    }
}

fn find_attribute<'a>(
    start: &'a BytesStart<'_>,
    key: &[u8],
) -> Result<Option<Attribute<'a>>, TriXError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(TriXError::from)?;
        if attribute.key == key {
            return Ok(Some(attribute));
        }
    }
    Ok(None)
}

fn check_absolute_iri<R: BufRead>(iri: &str, reader: &Reader<R>) -> Result<(), TriXError> {
    match Iri::parse(iri) {
        Ok(_) => Ok(()),
        Err(error) => Err(TriXError::at(
            TriXErrorKind::InvalidIri {
                iri: iri.to_owned(),
                error,
            },
            reader.buffer_position(),
        )),
    }
}

/// Turns a completed term element into a handler node, enforcing the
/// per-position constraints of the triple.
fn build_term<H: RdfHandler, R: BufRead>(
    handler: &mut H,
    profile: &mut ParserProfile<'_>,
    reader: &Reader<R>,
    kind: &TermKind,
    text: &str,
    position: usize,
) -> Result<H::Node, TriXError> {
    match kind {
        TermKind::Uri => {
            check_absolute_iri(text, reader)?;
            Ok(handler.create_uri_node(text))
        }
        TermKind::Id => {
            if position == 1 {
                return Err(TriXError::structure(
                    "the predicate of a triple must be a URI",
                    reader.buffer_position(),
                ));
            }
            let id = profile.blank_nodes().get_or_create(text).to_owned();
            Ok(handler.create_labeled_blank_node(&id))
        }
        TermKind::PlainLiteral { language } => {
            if position != 2 {
                return Err(TriXError::structure(
                    "a literal is only allowed in the object position",
                    reader.buffer_position(),
                ));
            }
            Ok(match language {
                Some(language) => handler.create_language_literal(text, language),
                None => handler.create_literal(text),
            })
        }
        TermKind::TypedLiteral { datatype } => {
            if position != 2 {
                return Err(TriXError::structure(
                    "a literal is only allowed in the object position",
                    reader.buffer_position(),
                ));
            }
            Ok(handler.create_typed_literal(text, datatype))
        }
    }
}
