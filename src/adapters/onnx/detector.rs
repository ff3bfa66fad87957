use async_trait::async_trait;
use image::RgbImage;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

use crate::adapters::onnx::yolo_engine::OnnxYoloEngine;
use crate::application::ports::DetectorPort;
use crate::domain::{
    detection::Prediction,
    errors::{DomainError, DomainResult},
    model::{ModelId, YoloParams},
};

/// `DetectorPort` sobre una única sesión ONNX, ejecutada en el pool bloqueante.
pub struct OnnxDetector {
    engine: Arc<Mutex<OnnxYoloEngine>>,
    params: YoloParams,
}

impl OnnxDetector {
    pub fn load(model: &ModelId, params: YoloParams, intra_threads: usize) -> anyhow::Result<Self> {
        let engine = OnnxYoloEngine::load(&model.onnx_path, intra_threads)?;
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            params,
        })
    }
}

/// La sesión no guarda estado entre llamadas: un pánico previo no la deja inservible.
fn lock_session<T>(session: &Mutex<T>) -> MutexGuard<'_, T> {
    session.lock().unwrap_or_else(|poisoned| {
        warn!("sesión de inferencia envenenada por un pánico anterior; se reutiliza");
        session.clear_poison();
        poisoned.into_inner()
    })
}

#[async_trait]
impl DetectorPort for OnnxDetector {
    async fn detect(&self, image: Arc<RgbImage>) -> DomainResult<Vec<Prediction>> {
        let engine = self.engine.clone();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            lock_session(&engine)
                .infer(&image, &params)
                .map_err(|e| DomainError::OperationFailed(format!("inference failed: {e:#}")))
        })
        .await
        .map_err(|e| DomainError::OperationFailed(format!("inference task failed: {e}")))?
    }
}
