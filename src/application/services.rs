use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::{
    application::{
        dto::DetectResponse,
        image_input::{decode_upload, DecodedImage},
        ports::DetectorPort,
    },
    domain::{
        detection::{summarize, Detection},
        errors::{DomainError, DomainResult},
        labels::{LabelFilter, TargetClass},
    },
};

/// Caso de uso detrás de `POST /detect`: decodificar, inferir, quedarse con gatos y perros.
#[derive(Clone)]
pub struct DetectionService {
    detector: Arc<dyn DetectorPort>,
    max_upload_bytes: usize,
}

impl DetectionService {
    pub fn new(detector: Arc<dyn DetectorPort>, max_upload_bytes: usize) -> Self {
        Self {
            detector,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn detect(
        &self,
        bytes: Vec<u8>,
        filter: LabelFilter,
    ) -> DomainResult<DetectResponse> {
        let decoded = self.decode(bytes).await?;
        let (width, height) = (decoded.width(), decoded.height());
        let (format, size_bytes) = (decoded.format, decoded.size_bytes);

        let started = Instant::now();
        let predictions = self.detector.detect(Arc::new(decoded.rgb)).await?;
        let infer_ms = started.elapsed().as_secs_f32() * 1000.0;

        let detections: Vec<Detection> = predictions
            .iter()
            .filter(|p| TargetClass::from_label(&p.label).is_some_and(|c| filter.allows(c)))
            .map(|p| Detection::from_prediction(p, width, height))
            .collect();

        let summary = if detections.is_empty() {
            "ningún gato ni perro".to_string()
        } else {
            summarize(&detections)
        };
        info!(
            width,
            height,
            ?format,
            size_bytes,
            candidates = predictions.len(),
            detections = detections.len(),
            infer_ms,
            "detectado: {summary}"
        );

        Ok(DetectResponse { detections })
    }

    /// Decodificar un JPEG o PNG grande es trabajo de CPU: va al pool bloqueante.
    async fn decode(&self, bytes: Vec<u8>) -> DomainResult<DecodedImage> {
        let max_bytes = self.max_upload_bytes;
        tokio::task::spawn_blocking(move || decode_upload(&bytes, max_bytes))
            .await
            .map_err(|e| DomainError::OperationFailed(format!("decode task failed: {e}")))?
    }
}
