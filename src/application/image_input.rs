//! Decodificación de los bytes subidos.

use image::{ImageFormat, RgbImage};

use crate::domain::errors::{DomainError, DomainResult};

/// Imagen subida ya en RGB8, sin alfa ni paleta.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub rgb: RgbImage,
    pub format: ImageFormat,
    pub size_bytes: usize,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }
}

pub fn decode_upload(bytes: &[u8], max_bytes: usize) -> DomainResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(DomainError::InvalidInput("uploaded file is empty".into()));
    }
    if bytes.len() > max_bytes {
        return Err(DomainError::PayloadTooLarge(bytes.len(), max_bytes));
    }

    // Formato por los bytes mágicos, no por el content-type del cliente.
    let format = image::guess_format(bytes)
        .map_err(|_| DomainError::UnsupportedImage("unrecognized image format".into()))?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DomainError::UnsupportedImage(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DomainError::UnsupportedImage("image has no pixels".into()));
    }

    Ok(DecodedImage {
        rgb: img.to_rgb8(),
        format,
        size_bytes: bytes.len(),
    })
}
