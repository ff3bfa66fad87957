use image::{imageops::FilterType, Rgb, RgbImage};
use ndarray::Array4;

/// Gris de relleno que usan los modelos YOLOv8.
const PAD_VALUE: u8 = 114;

/// Cómo se proyectó la imagen original sobre la entrada cuadrada del modelo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// De coordenadas de entrada del modelo a píxeles de la imagen original.
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Redimensiona sin deformar sobre un lienzo gris `size`x`size`, en NCHW f32 [0,1].
pub fn letterbox(rgb: &RgbImage, size: u32) -> (Array4<f32>, Letterbox) {
    let (w, h) = rgb.dimensions();
    let scale = (size as f32 / w as f32).min(size as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as u32).clamp(1, size);
    let new_h = ((h as f32 * scale).round() as u32).clamp(1, size);
    let pad_x = (size - new_w) / 2;
    let pad_y = (size - new_h) / 2;

    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE; 3]));
    if (new_w, new_h) == (w, h) {
        image::imageops::overlay(&mut canvas, rgb, pad_x as i64, pad_y as i64);
    } else {
        let resized = image::imageops::resize(rgb, new_w, new_h, FilterType::Triangle);
        image::imageops::overlay(&mut canvas, &resized, pad_x as i64, pad_y as i64);
    }

    let side = size as usize;
    let mut input = Array4::<f32>::zeros((1, 3, side, side));
    for (x, y, pixel) in canvas.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        input[[0, 0, y, x]] = pixel[0] as f32 / 255.0;
        input[[0, 1, y, x]] = pixel[1] as f32 / 255.0;
        input[[0, 2, y, x]] = pixel[2] as f32 / 255.0;
    }

    (
        input,
        Letterbox {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    )
}
