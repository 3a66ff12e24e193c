//! Implementation of N-Triples and N-Quads streaming parsers.
//!
//! The parsers work on any [`BufRead`](std::io::BufRead) input and push the
//! statements they decode into an [`RdfHandler`](tripod_api::handler::RdfHandler).
//!
//! The entry points are [`NTriplesParser`] and [`NQuadsParser`].

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

mod error;
mod nquads;
mod ntriples;
mod queue;
mod read;
mod shared;
mod token;
mod tokenizer;

pub use crate::error::NtError;
pub use crate::nquads::{NQuadsParser, NQuadsSyntax};
pub use crate::ntriples::{NTriplesParser, NTriplesSyntax};
pub use crate::queue::TokenQueue;
pub use crate::token::{Token, TokenKind};
pub use crate::tokenizer::NTriplesTokenizer;
