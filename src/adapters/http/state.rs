use std::sync::Arc;
use crate::application::services::DetectionService;

/// Estado compartido por los handlers de Axum.
#[derive(Clone)]
pub struct HttpState {
    pub detection: Arc<DetectionService>,
}
