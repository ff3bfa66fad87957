use anyhow::{Context, Result};
use image::RgbImage;
use ndarray::{ArrayViewD, Axis, Ix2, IxDyn};
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use super::postprocess::{decode_output, non_max_suppression};
use super::preprocess::letterbox;
use crate::domain::detection::Prediction;
use crate::domain::model::YoloParams;

pub struct OnnxYoloEngine {
    session: Session,
}

impl OnnxYoloEngine {
    pub fn load(path: &str, intra_threads: usize) -> Result<Self> {
        #[allow(unused_mut)]
        let mut builder = Session::builder()?.with_intra_threads(intra_threads)?;

        // CUDA es opcional: si está disponible se registra, si no seguimos en CPU.
        #[cfg(feature = "cuda")]
        {
            let cuda = ort::execution_providers::CUDAExecutionProvider::default().build();
            if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
                builder = builder_with_cuda;
            }
        }

        let session = builder
            .commit_from_file(path)
            .with_context(|| format!("failed to load ONNX model from {path}"))?;

        info!(
            path,
            inputs = session.inputs.len(),
            outputs = session.outputs.len(),
            "Modelo YOLO cargado"
        );
        Ok(Self { session })
    }

    pub fn infer(&mut self, rgb: &RgbImage, params: &YoloParams) -> Result<Vec<Prediction>> {
        let imgsz = params.input_size as i64;
        let (input, lb) = letterbox(rgb, params.input_size);

        let (data, _offset) = input.into_raw_vec_and_offset();
        let input_tensor = Tensor::from_array((vec![1, 3, imgsz, imgsz], data))?;

        let outputs = self.session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        // [1, 4 + num_classes, num_candidates]
        let dims: Vec<usize> = shape_out.iter().map(|&d| d as usize).collect();
        anyhow::ensure!(dims.len() == 3 && dims[0] == 1, "unexpected output shape {dims:?}");

        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)?;
        let view = array_view.index_axis(Axis(0), 0).into_dimensionality::<Ix2>()?;

        let candidates = decode_output(view, params, &lb, rgb.width(), rgb.height())?;
        Ok(non_max_suppression(candidates, params.iou_threshold, params.max_detections))
    }
}
