//! Per-run parser configuration.

use crate::blank_node::BlankNodeGenerator;
use oxiri::{Iri, IriParseError};
use std::collections::HashMap;

/// Buffering strategy of the token queue sitting between a tokenizer and a
/// grammar driver.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TokenQueueMode {
    /// Pull every token eagerly into memory before parsing starts.
    /// Faster iteration, holds the full token list in memory.
    Buffered,
    /// Pull one token at a time, caching at most one look-ahead token.
    /// Required for very large or slow inputs.
    Streaming,
}

impl Default for TokenQueueMode {
    fn default() -> Self {
        TokenQueueMode::Buffered
    }
}

/// Per-run parser configuration: initial namespaces, base IRI, the blank
/// node generator, tracing flags and the warning sink.
///
/// A profile is consumed by a single `load` call. This is what guarantees
/// run isolation of blank node identities: reusing blank node state across
/// inputs would require deliberately building a profile around a shared
/// generator, which this type does not offer.
///
/// ```
/// use tripod_api::profile::ParserProfile;
///
/// let mut warnings = Vec::new();
/// let mut sink = |message: String| warnings.push(message);
/// let profile = ParserProfile::new()
///     .with_base_iri("http://example.com/base/")
///     .unwrap()
///     .with_namespace("ex", "http://example.com/ns#")
///     .with_warning_sink(&mut sink);
/// assert_eq!(
///     Some("http://example.com/base/"),
///     profile.base_iri().map(|iri| iri.as_str())
/// );
/// ```
pub struct ParserProfile<'a> {
    base_iri: Option<Iri<String>>,
    namespaces: HashMap<String, String>,
    blank_nodes: BlankNodeGenerator,
    warning_sink: Option<&'a mut dyn FnMut(String)>,
    trace_tokenizer: bool,
    trace_parsing: bool,
}

impl<'a> ParserProfile<'a> {
    pub fn new() -> Self {
        Self {
            base_iri: None,
            namespaces: HashMap::new(),
            blank_nodes: BlankNodeGenerator::default(),
            warning_sink: None,
            trace_tokenizer: false,
            trace_parsing: false,
        }
    }

    /// Sets the initial base IRI. It must be an absolute IRI.
    pub fn with_base_iri(mut self, base_iri: &str) -> Result<Self, IriParseError> {
        self.base_iri = Some(Iri::parse(base_iri.to_owned())?);
        Ok(self)
    }

    /// Registers an initial namespace binding.
    pub fn with_namespace(mut self, prefix: &str, iri: &str) -> Self {
        self.namespaces.insert(prefix.to_owned(), iri.to_owned());
        self
    }

    /// Installs the sink that receives non-fatal warnings (encoding
    /// mismatches, skipped unasserted TriX graphs...). Without a sink the
    /// warnings are still emitted on the `log` facade.
    pub fn with_warning_sink(mut self, sink: &'a mut dyn FnMut(String)) -> Self {
        self.warning_sink = Some(sink);
        self
    }

    /// Emits a `log::trace!` event for every token produced.
    pub fn with_tokenizer_trace(mut self, enabled: bool) -> Self {
        self.trace_tokenizer = enabled;
        self
    }

    /// Emits a `log::trace!` event for every statement parsed.
    pub fn with_parser_trace(mut self, enabled: bool) -> Self {
        self.trace_parsing = enabled;
        self
    }

    pub fn base_iri(&self) -> Option<&Iri<String>> {
        self.base_iri.as_ref()
    }

    pub fn namespaces(&self) -> &HashMap<String, String> {
        &self.namespaces
    }

    pub fn blank_nodes(&mut self) -> &mut BlankNodeGenerator {
        &mut self.blank_nodes
    }

    pub fn trace_tokenizer(&self) -> bool {
        self.trace_tokenizer
    }

    pub fn trace_parsing(&self) -> bool {
        self.trace_parsing
    }

    /// Reports a non-fatal anomaly. Warnings never abort parsing.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        if let Some(sink) = self.warning_sink.as_mut() {
            sink(message);
        }
    }
}

impl<'a> Default for ParserProfile<'a> {
    fn default() -> Self {
        Self::new()
    }
}
