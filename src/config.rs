use anyhow::{bail, Context};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::domain::model::{ModelId, YoloParams};

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub model: ModelId,
    pub params: YoloParams,
    pub intra_threads: usize,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Lee la configuración de variables de entorno, con valores por defecto.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("ENVIRONMENT"));
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8000u16)?;
        let model_path = lookup("MODEL_PATH").unwrap_or_else(|| "models/yolov8n.onnx".to_string());

        let defaults = YoloParams::default();
        let params = YoloParams {
            input_size: parse_or(&lookup, "INPUT_SIZE", defaults.input_size)?,
            conf_threshold: parse_or(&lookup, "CONFIDENCE_THRESHOLD", defaults.conf_threshold)?,
            iou_threshold: parse_or(&lookup, "IOU_THRESHOLD", defaults.iou_threshold)?,
            max_detections: parse_or(&lookup, "MAX_DETECTIONS", defaults.max_detections)?,
        };

        let intra_threads = parse_or(&lookup, "INTRA_THREADS", 4usize)?;
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?;

        let config = Self {
            environment,
            host,
            port,
            model: ModelId::from_path(model_path),
            params,
            intra_threads,
            max_upload_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let p = &self.params;
        if p.input_size == 0 || p.input_size % 32 != 0 {
            bail!("INPUT_SIZE must be a positive multiple of 32, got {}", p.input_size);
        }
        let thresholds = [
            ("CONFIDENCE_THRESHOLD", p.conf_threshold),
            ("IOU_THRESHOLD", p.iou_threshold),
        ];
        for (name, v) in thresholds {
            if !(0.0..=1.0).contains(&v) {
                bail!("{name} must be within [0, 1], got {v}");
            }
        }
        if p.max_detections == 0 {
            bail!("MAX_DETECTIONS must be at least 1");
        }
        if self.intra_threads == 0 {
            bail!("INTRA_THREADS must be at least 1");
        }
        if self.max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be at least 1");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Configuración por defecto para tests.
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            host: "127.0.0.1".to_string(),
            port: 8000,
            model: ModelId::from_path("/models/yolov8n.onnx"),
            params: YoloParams::default(),
            intra_threads: 1,
            max_upload_bytes: 1024 * 1024,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {key} ({raw:?}): {e}")),
        None => Ok(default),
    }
}
