//! Tripod is a toolkit of streaming RDF parsers.
//!
//! It gathers the parsers of the `tripod_nt` and `tripod_trix` crates behind
//! a single entry point, adds transparent gzip decompression and heuristic
//! format detection for in-memory data.
//!
//! Parse a small N-Triples file:
//! ```
//! use tripod::{NTriplesParser, NTriplesSyntax};
//! use tripod::handler::StatementCollector;
//! use tripod::parser::RdfParser;
//!
//! let file = b"<http://example.com/foo> <http://schema.org/name> \"Foo\" .
//! <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
//!
//! let mut collector = StatementCollector::new();
//! NTriplesParser::new(NTriplesSyntax::Rdf11).load(&mut collector, file.as_ref())?;
//! assert_eq!(2, collector.triples.len());
//! # Result::<_, tripod::NtError>::Ok(())
//! ```

#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

pub mod detect;
mod gzip;

pub use crate::gzip::{GZipNQuadsParser, GZipNTriplesParser, GZipParser, GZipTriXParser};
pub use tripod_api::{blank_node, handler, model, parser, profile};
pub use tripod_nt::{
    NQuadsParser, NQuadsSyntax, NTriplesParser, NTriplesSyntax, NtError,
};
pub use tripod_trix::{TriXError, TriXParser, TRIX_NAMESPACE};
