//! This crate provides basic interfaces and data structures for building streaming RDF parsers.
//!
//! It is currently used by the [`tripod_nt`](https://docs.rs/tripod_nt/) and [`tripod_trix`](https://docs.rs/tripod_trix/) crates.
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
#![doc(test(attr(deny(warnings))))]

pub mod blank_node;
pub mod handler;
pub mod model;
pub mod parser;
pub mod profile;
