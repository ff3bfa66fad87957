use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Salida cruda del modelo en píxeles de la imagen original, sin filtrar.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: usize,
    pub label: String,
}

impl Prediction {
    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }
}

/// Una caja tal como sale en la respuesta de `/detect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Detection {
    /// Recorta la caja a la imagen y trunca las esquinas a píxeles enteros.
    pub fn from_prediction(pred: &Prediction, width: u32, height: u32) -> Self {
        let (w_max, h_max) = (width as f32, height as f32);
        let x1 = clamp(pred.x1, w_max) as i32;
        let y1 = clamp(pred.y1, h_max) as i32;
        let x2 = clamp(pred.x2, w_max) as i32;
        let y2 = clamp(pred.y2, h_max) as i32;

        Self {
            label: pred.label.clone(),
            confidence: if pred.score.is_finite() { pred.score.clamp(0.0, 1.0) } else { 0.0 },
            x: x1,
            y: y1,
            w: (x2 - x1).max(0),
            h: (y2 - y1).max(0),
        }
    }
}

fn clamp(v: f32, max: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, max)
}

/// "2 cat, 1 dog"
pub fn summarize(detections: &[Detection]) -> String {
    let mut counts = BTreeMap::new();
    for det in detections {
        *counts.entry(det.label.as_str()).or_insert(0usize) += 1;
    }
    counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect::<Vec<_>>()
        .join(", ")
}
