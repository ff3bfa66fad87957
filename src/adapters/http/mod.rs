pub mod error;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::adapters::http::state::HttpState;

/// Margen para los delimitadores y cabeceras multipart, además de la imagen.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(state: HttpState) -> Router {
    let limit = body_limit(state.detection.max_upload_bytes());

    Router::new()
        .route("/detect", post(routes::detect))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_adds_multipart_overhead() {
        assert_eq!(body_limit(1024), 1024 + MULTIPART_OVERHEAD);
    }

    #[test]
    fn body_limit_saturates_instead_of_overflowing() {
        assert_eq!(body_limit(usize::MAX), usize::MAX);
        assert_eq!(body_limit(usize::MAX - 1), usize::MAX);
    }
}
