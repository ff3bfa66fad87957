use async_trait::async_trait;
use image::RgbImage;
use std::sync::Arc;

use crate::domain::{detection::Prediction, errors::DomainResult, model::ModelId};

#[async_trait]
pub trait DetectorPort: Send + Sync {
    /// Predicciones de todas las clases del modelo, tras NMS, de mayor a menor score.
    async fn detect(&self, image: Arc<RgbImage>) -> DomainResult<Vec<Prediction>>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()>;
}
