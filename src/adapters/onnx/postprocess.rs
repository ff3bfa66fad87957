use ndarray::ArrayView2;

use super::preprocess::Letterbox;
use crate::domain::{detection::Prediction, labels::class_name, model::YoloParams};

/// Decodifica la salida YOLOv8 con forma `[4 + num_classes, num_candidates]`.
///
/// Las filas 0..4 son `cx, cy, w, h` en píxeles de entrada del modelo, el resto
/// son scores por clase. Las cajas vuelven en píxeles de la imagen original.
pub fn decode_output(
    view: ArrayView2<f32>,
    params: &YoloParams,
    letterbox: &Letterbox,
    orig_width: u32,
    orig_height: u32,
) -> anyhow::Result<Vec<Prediction>> {
    let rows = view.shape()[0];
    anyhow::ensure!(rows > 4, "unexpected YOLO output with {rows} rows");

    let (w_max, h_max) = (orig_width as f32, orig_height as f32);
    let mut predictions = Vec::new();

    for (i, column) in view.columns().into_iter().enumerate() {
        let (class_id, score) = column
            .iter()
            .skip(4)
            .enumerate()
            .fold((0usize, f32::MIN), |best, (c, &s)| if s > best.1 { (c, s) } else { best });

        // descarta también scores NaN
        if !(score > params.conf_threshold) {
            continue;
        }

        let (cx, cy, w, h) = (view[[0, i]], view[[1, i]], view[[2, i]], view[[3, i]]);
        let (x1, y1) = letterbox.to_source(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = letterbox.to_source(cx + w / 2.0, cy + h / 2.0);

        predictions.push(Prediction {
            x1: x1.clamp(0.0, w_max),
            y1: y1.clamp(0.0, h_max),
            x2: x2.clamp(0.0, w_max),
            y2: y2.clamp(0.0, h_max),
            score: score.min(1.0),
            class_id,
            label: class_name(class_id).to_string(),
        });
    }

    Ok(predictions)
}

pub fn iou(a: &Prediction, b: &Prediction) -> f32 {
    let ix = (a.x2.min(b.x2) - a.x1.max(b.x1)).max(0.0);
    let iy = (a.y2.min(b.y2) - a.y1.max(b.y1)).max(0.0);
    let inter = ix * iy;
    let union = a.area() + b.area() - inter;
    if union <= 0.0 {
        0.0
    } else {
        inter / union
    }
}

/// NMS voraz por clase. La salida queda ordenada por score descendente.
pub fn non_max_suppression(
    mut predictions: Vec<Prediction>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<Prediction> {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<Prediction> = Vec::new();
    for candidate in predictions {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept
            .iter()
            .any(|k| k.class_id == candidate.class_id && iou(k, &candidate) > iou_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}
