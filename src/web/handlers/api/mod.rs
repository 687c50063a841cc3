//! API handlers

pub mod clean;

pub use clean::*;
