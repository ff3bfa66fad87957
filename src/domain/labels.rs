use std::str::FromStr;

use super::errors::DomainError;

/// Clases COCO en el orden de índices de los modelos YOLOv8 exportados.
pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];

/// Etiqueta para índices fuera de la tabla COCO.
pub const UNKNOWN_LABEL: &str = "object";

pub fn class_name(class_id: usize) -> &'static str {
    COCO_CLASSES.get(class_id).copied().unwrap_or(UNKNOWN_LABEL)
}

/// Las únicas clases que reporta el servicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetClass {
    Cat,
    Dog,
}

impl TargetClass {
    pub const ALL: [TargetClass; 2] = [TargetClass::Cat, TargetClass::Dog];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetClass::Cat => "cat",
            TargetClass::Dog => "dog",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// Deja solo una de las clases en la respuesta, o ambas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFilter {
    #[default]
    Both,
    Cat,
    Dog,
}

impl LabelFilter {
    pub fn allows(&self, class: TargetClass) -> bool {
        match self {
            LabelFilter::Both => true,
            LabelFilter::Cat => class == TargetClass::Cat,
            LabelFilter::Dog => class == TargetClass::Dog,
        }
    }
}

impl FromStr for LabelFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "both" => Ok(LabelFilter::Both),
            "cat" => Ok(LabelFilter::Cat),
            "dog" => Ok(LabelFilter::Dog),
            other => Err(DomainError::InvalidInput(format!(
                "label must be one of cat, dog, both (got {other:?})"
            ))),
        }
    }
}
