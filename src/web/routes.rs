use std::sync::Arc;

use axum::{routing::post, Router};

use crate::web::{handlers::*, types::AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/WordToHtml/clean-word-html", post(clean_word_html_upload))
}
