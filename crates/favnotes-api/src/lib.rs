//! favnotes-api - HTTP API for enriched favorite notes
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/notes` - every note, enriched
//! - `GET /api/notes/:id` - one enriched note
//! - `GET /api/topics` - ranked topic frequency tables

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use favnotes_core::defaults::CORS_MAX_AGE_SECS;
use favnotes_enrich::{DatasetSource, NoteCatalog};

pub use config::ServerConfig;
pub use error::ApiError;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
///
/// Holds only the dataset source; every request loads its own catalog.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn DatasetSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Load a fresh catalog off the async runtime and run `f` on it.
    pub async fn with_catalog<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(NoteCatalog) -> T + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let result =
            tokio::task::spawn_blocking(move || f(NoteCatalog::load(source.as_ref()))).await?;
        Ok(result)
    }
}

/// Parse configured CORS origins, dropping invalid ones.
fn parse_allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

/// Build the application router with its middleware stack.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let allowed_origins = parse_allowed_origins(&config.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/notes", get(handlers::notes::list_notes))
        .route("/api/notes/:id", get(handlers::notes::get_note))
        .route("/api/topics", get(handlers::topics::get_topics))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(CORS_MAX_AGE_SECS)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_drops_invalid() {
        let origins = parse_allowed_origins(&[
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]);
        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:3000")]);
    }
}
