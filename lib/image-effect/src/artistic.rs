//! Multi-stage effects built from the simpler ones.

use crate::{
    Effect,
    base::{self, ContrastConfig, SharpnessConfig},
    blend,
    blur::GaussianBlurConfig,
    filter::{SepiaConfig, VignetteConfig},
    stylized::{KernelFilter, PosterizeConfig},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, RgbImage};

const DODGE_EPSILON: f32 = 1e-6;

/// Color-dodge `back` with `front`: `back * 255 / (255 - front + eps)`,
/// saturating to 255 wherever `front` is already 255.
pub fn dodge(front: u8, back: u8) -> u8 {
    if front == 255 {
        return 255;
    }

    let value = back as f32 * 255.0 / (255.0 - front as f32 + DODGE_EPSILON);
    value.clamp(0.0, 255.0) as u8
}

/// Pencil sketch: dodge the grayscale image with its blurred negative.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SketchConfig {
    #[derivative(Default(value = "10.0"))]
    blur_radius: f32,
}

impl SketchConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SketchConfig {
    type Output = GrayImage;

    fn apply(&self, image: &RgbImage) -> GrayImage {
        let gray = base::grayscale(image);

        let mut inverted = gray.clone();
        image::imageops::invert(&mut inverted);

        let blurred = GaussianBlurConfig::new()
            .with_radius(self.blur_radius)
            .blur(&inverted);

        let mut result = gray.clone();
        for (out, (g, b)) in result.pixels_mut().zip(gray.pixels().zip(blurred.pixels())) {
            *out = Luma([dodge(b[0], g[0])]);
        }

        result
    }
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct OilPaintingConfig {
    #[derivative(Default(value = "2.0"))]
    sharpness: f32,

    #[derivative(Default(value = "32"))]
    posterize_step: u8,
}

impl OilPaintingConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for OilPaintingConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let smoothed = KernelFilter::SmoothMore.apply(image);
        let enhanced = SharpnessConfig::new()
            .with_factor(self.sharpness)
            .apply(&smoothed);

        PosterizeConfig::new()
            .with_step(self.posterize_step)
            .apply(&enhanced)
    }
}

/// Flat posterized colors with dark outlines.
///
/// `alpha` is the weight of the posterized image; the inverted edge map
/// gets `1 - alpha`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CartoonConfig {
    #[derivative(Default(value = "0.7"))]
    alpha: f32,

    #[derivative(Default(value = "32"))]
    posterize_step: u8,
}

impl CartoonConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for CartoonConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut edges = KernelFilter::FindEdges.apply(image);
        image::imageops::invert(&mut edges);

        let posterized = PosterizeConfig::new()
            .with_step(self.posterize_step)
            .apply(image);
        let colors = KernelFilter::SmoothMore.apply(&posterized);

        blend::blend(&edges, &colors, self.alpha.clamp(0.0, 1.0))
    }
}

/// Sepia, softened contrast and a radial vignette.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VintageConfig {
    #[derivative(Default(value = "0.8"))]
    contrast: f32,

    #[derivative(Default(value = "1.5"))]
    vignette_falloff: f32,
}

impl VintageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image before the vignette is applied.
    pub fn toned(&self, image: &RgbImage) -> RgbImage {
        let sepia = SepiaConfig::new().apply(image);
        ContrastConfig::new()
            .with_factor(self.contrast)
            .apply(&sepia)
    }
}

impl Effect for VintageConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        VignetteConfig::new()
            .with_falloff(self.vignette_falloff)
            .apply(&self.toned(image))
    }
}
