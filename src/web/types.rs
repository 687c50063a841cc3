//! Shared state and response bodies

use serde::Serialize;

use crate::core::CleanOptions;

#[derive(Clone)]
pub struct AppState {
    pub clean_options: CleanOptions,
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
        }
    }
}
