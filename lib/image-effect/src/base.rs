use crate::{Effect, blend, kernel};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, RgbImage};

/// ITU-R 601 luma in 16-bit fixed point, rounded to nearest.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Convert to a single-channel luminance image.
pub fn grayscale(image: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(image.width(), image.height());
    for (out, pixel) in gray.pixels_mut().zip(image.pixels()) {
        *out = Luma([luma(pixel[0], pixel[1], pixel[2])]);
    }

    gray
}

/// Mean luma of the image, rounded to nearest.
pub fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }

    let sum: u64 = image
        .pixels()
        .map(|p| luma(p[0], p[1], p[2]) as u64)
        .sum();

    ((sum as f64 / count as f64) + 0.5) as u8
}

#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct GrayscaleConfig;

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for GrayscaleConfig {
    type Output = GrayImage;

    fn apply(&self, image: &RgbImage) -> GrayImage {
        grayscale(image)
    }
}

/// Per-channel negative: `255 - value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Effect for Invert {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut result = image.clone();
        image::imageops::invert(&mut result);
        result
    }
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BrightnessConfig {
    #[derivative(Default(value = "1.5"))]
    factor: f32,
}

impl BrightnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BrightnessConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut result = image.clone();
        for c in result.iter_mut() {
            *c = blend::blend_channel(0, *c, self.factor);
        }

        result
    }
}

/// Scales every channel away from (factor > 1) or toward (factor < 1) the
/// image's mean gray level.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.5"))]
    factor: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ContrastConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mean = mean_luma(image);
        let mut result = image.clone();
        for c in result.iter_mut() {
            *c = blend::blend_channel(mean, *c, self.factor);
        }

        result
    }
}

/// Pushes the image away from its smoothed version.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpnessConfig {
    #[derivative(Default(value = "2.0"))]
    factor: f32,
}

impl SharpnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SharpnessConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let smoothed = kernel::SMOOTH.filter(image);
        blend::blend(&smoothed, image, self.factor)
    }
}
