//! # Web server
//!
//! An HTTP front end for the cleaner: upload a Word-exported HTML file, get the
//! cleaned document back.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::io;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::CleanOptions;

pub struct WebServer {
    config: WebConfig,
    clean_options: CleanOptions,
}

impl WebServer {
    pub fn new(config: WebConfig, clean_options: CleanOptions) -> Self {
        Self {
            config,
            clean_options,
        }
    }

    pub async fn start(&self) -> io::Result<()> {
        let app_state = Arc::new(AppState {
            clean_options: self.clean_options.clone(),
        });

        let app = create_router(app_state, &self.config);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address()).await?;

        tracing::info!("Web server starting at http://{}", self.config.listen_address());

        axum::serve(listener, app).await
    }
}

/// Builds the application router with its middleware stack
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
