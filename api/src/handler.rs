//! The sink interface receiving parsed statements and building RDF terms.

use crate::model::{Literal, Quad, Term, Triple};

/// Return value of [`RdfHandler::handle_triple`](trait.RdfHandler.html#tymethod.handle_triple)
/// and [`RdfHandler::handle_quad`](trait.RdfHandler.html#tymethod.handle_quad).
///
/// `Stop` asks the parser to end the run after the current statement.
/// It is cooperative cancellation, not an error: the parser finishes with
/// `end_rdf(true)` and `load` returns `Ok(())`.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Continuation {
    Continue,
    Stop,
}

/// The external collaborator that receives parsed statements.
///
/// Parsers never build node values themselves: every term goes through the
/// `create_*` factory methods, so interning or wrapping policies stay a
/// handler concern. A parser calls `start_rdf` exactly once, then a sequence
/// of `handle_triple`/`handle_quad`, then `end_rdf` exactly once with
/// `success = false` if and only if the run failed with a parse error.
pub trait RdfHandler {
    /// The handler's node representation.
    type Node: Clone;

    /// Called once before any statement is delivered.
    fn start_rdf(&mut self) {}

    /// Called once at the end of the run, on every outcome.
    fn end_rdf(&mut self, _success: bool) {}

    /// Builds an anonymous blank node.
    ///
    /// The returned node must not collide with any node built from
    /// `create_labeled_blank_node`.
    fn create_blank_node(&mut self) -> Self::Node;

    /// Builds a blank node for an identifier already made run-unique by a
    /// [`BlankNodeGenerator`](../blank_node/struct.BlankNodeGenerator.html).
    fn create_labeled_blank_node(&mut self, id: &str) -> Self::Node;

    fn create_uri_node(&mut self, iri: &str) -> Self::Node;

    fn create_literal(&mut self, value: &str) -> Self::Node;

    fn create_language_literal(&mut self, value: &str, language: &str) -> Self::Node;

    fn create_typed_literal(&mut self, value: &str, datatype: &str) -> Self::Node;

    /// Receives one parsed triple.
    fn handle_triple(&mut self, triple: Triple<Self::Node>) -> Continuation;

    /// Receives one parsed quad. `graph_name` is `None` for the default graph.
    fn handle_quad(&mut self, quad: Quad<Self::Node>) -> Continuation;
}

/// A ready-made handler collecting statements into vectors of owned
/// [`Term`](../model/enum.Term.html)s.
///
/// ```
/// use tripod_api::handler::{RdfHandler, StatementCollector};
///
/// let mut collector = StatementCollector::new();
/// collector.start_rdf();
/// let s = collector.create_uri_node("http://example.com/s");
/// let p = collector.create_uri_node("http://example.com/p");
/// let o = collector.create_literal("o");
/// collector.handle_triple(tripod_api::model::Triple { subject: s, predicate: p, object: o });
/// collector.end_rdf(true);
/// assert_eq!(1, collector.triples.len());
/// ```
#[derive(Debug, Default)]
pub struct StatementCollector {
    pub triples: Vec<Triple<Term>>,
    pub quads: Vec<Quad<Term>>,
    anonymous_counter: usize,
    started: usize,
    ended: usize,
    last_success: Option<bool>,
}

impl StatementCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(success)` once `end_rdf` has been called.
    pub fn outcome(&self) -> Option<bool> {
        self.last_success
    }

    /// Number of `start_rdf`/`end_rdf` calls seen, for lifecycle assertions.
    pub fn lifecycle_calls(&self) -> (usize, usize) {
        (self.started, self.ended)
    }
}

impl RdfHandler for StatementCollector {
    type Node = Term;

    fn start_rdf(&mut self) {
        self.started += 1;
    }

    fn end_rdf(&mut self, success: bool) {
        self.ended += 1;
        self.last_success = Some(success);
    }

    fn create_blank_node(&mut self) -> Term {
        self.anonymous_counter += 1;
        Term::BlankNode {
            id: format!("anon{}", self.anonymous_counter),
        }
    }

    fn create_labeled_blank_node(&mut self, id: &str) -> Term {
        Term::BlankNode { id: id.to_owned() }
    }

    fn create_uri_node(&mut self, iri: &str) -> Term {
        Term::NamedNode {
            iri: iri.to_owned(),
        }
    }

    fn create_literal(&mut self, value: &str) -> Term {
        Term::Literal(Literal::Simple {
            value: value.to_owned(),
        })
    }

    fn create_language_literal(&mut self, value: &str, language: &str) -> Term {
        Term::Literal(Literal::LanguageTaggedString {
            value: value.to_owned(),
            language: language.to_owned(),
        })
    }

    fn create_typed_literal(&mut self, value: &str, datatype: &str) -> Term {
        Term::Literal(Literal::Typed {
            value: value.to_owned(),
            datatype: datatype.to_owned(),
        })
    }

    fn handle_triple(&mut self, triple: Triple<Term>) -> Continuation {
        self.triples.push(triple);
        Continuation::Continue
    }

    fn handle_quad(&mut self, quad: Quad<Term>) -> Continuation {
        self.quads.push(quad);
        Continuation::Continue
    }
}
