use crate::{Effect, blend};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, RgbImage};

const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct SepiaConfig;

impl SepiaConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for SepiaConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut result = image.clone();
        for pixel in result.pixels_mut() {
            let [r, g, b] = pixel.0.map(|c| c as f32);
            for (c, row) in pixel.0.iter_mut().zip(SEPIA_MATRIX) {
                *c = (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 255.0) as u8;
            }
        }

        result
    }
}

/// Radial darkening toward the corners.
///
/// The mask intensity at distance `d` from the centre, normalized by half the
/// longer side, is `255 * (1 - min(d * falloff, 1)^2)`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VignetteConfig {
    #[derivative(Default(value = "1.5"))]
    falloff: f32,
}

impl VignetteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mask(&self, width: u32, height: u32) -> GrayImage {
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let half_extent = (width.max(height) as f32 / 2.0).max(f32::EPSILON);

        GrayImage::from_fn(width, height, |x, y| {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let distance = (dx * dx + dy * dy).sqrt() / half_extent;
            let falloff = (distance * self.falloff).min(1.0);
            Luma([(255.0 * (1.0 - falloff * falloff)) as u8])
        })
    }
}

impl Effect for VignetteConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mask = self.mask(image.width(), image.height());
        blend::composite_over_black(image, &mask)
    }
}
