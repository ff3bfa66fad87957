//! Servicio HTTP que encuentra gatos y perros en imágenes subidas usando
//! un modelo YOLOv8 preentrenado exportado a ONNX.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
