//! Implementation of a TriX streaming parser.
//!
//! TriX serializes named graphs as XML. The parser works on any
//! [`BufRead`](std::io::BufRead) input and pushes the quads it decodes into
//! an [`RdfHandler`](tripod_api::handler::RdfHandler).
//!
//! The entry point is [`TriXParser`].

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
mod parser;

pub use crate::error::TriXError;
pub use crate::parser::{TriXParser, TRIX_NAMESPACE};
