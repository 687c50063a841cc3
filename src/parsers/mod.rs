//! # Parsers
//!
//! The Tree Provider side of the crate: html5ever parses bytes into an
//! `RcDom`, the sanitizer mutates it, and the serializer writes it back out.

pub mod html;

pub use html::{html_to_dom, serialize_document};
