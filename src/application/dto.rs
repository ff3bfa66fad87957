use serde::{Deserialize, Serialize};

use crate::domain::{detection::Detection, errors::DomainResult, labels::LabelFilter};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectQuery {
    pub label: Option<String>,
}

impl DetectQuery {
    pub fn filter(&self) -> DomainResult<LabelFilter> {
        match &self.label {
            Some(label) => label.parse(),
            None => Ok(LabelFilter::Both),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub detections: Vec<Detection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
