//! # wordclean
//!
//! Cleans the HTML that Microsoft Word produces on "Save as Web Page" down to
//! plain, portable markup: no inline styles, no `Mso` classes, no Office-only
//! tags, no comments, no empty wrappers.
//!
//! ## Modules
//!
//! - `core` - entry point, errors and charset handling
//! - `parsers` - parsing, traversal and serialization of the DOM
//! - `sanitizer` - the cleaning passes and the pipeline that runs them
//! - `env` - typed environment variables
//! - `logging` - tracing setup for the binaries
//! - `web` - HTTP upload endpoint (optional)
//!
//! ```no_run
//! use wordclean::{clean_word_html, CleanOptions};
//!
//! let input = std::fs::read("report.htm").unwrap();
//! let output = clean_word_html(&input, &CleanOptions::default()).unwrap();
//! std::fs::write("report.clean.html", output).unwrap();
//! ```

pub mod core;
pub mod env;
#[cfg(any(feature = "cli", feature = "web"))]
pub mod logging;
pub mod parsers;
pub mod sanitizer;
#[cfg(feature = "web")]
pub mod web;

pub use self::core::*;
pub use parsers::*;
pub use sanitizer::{sanitize, Pass, Sanitizer};
