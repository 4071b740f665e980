use crate::{
    Effect, ImageEffectError,
    artistic::{CartoonConfig, OilPaintingConfig, SketchConfig, VintageConfig},
    base::{BrightnessConfig, ContrastConfig, GrayscaleConfig, Invert},
    blur::GaussianBlurConfig,
    filter::SepiaConfig,
    stylized::KernelFilter,
};
use image::{DynamicImage, RgbImage};
use std::{fmt, str::FromStr};
use strum::VariantArray as _;
use strum_macros::VariantArray;

/// The closed catalog of effects that can be requested by name.
#[derive(VariantArray, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTag {
    Grayscale,
    Sepia,
    Blur,
    Contour,
    EdgeEnhance,
    Emboss,
    Sharpen,
    Brightness,
    Contrast,
    Negative,
    Sketch,
    OilPainting,
    Cartoon,
    Vintage,
}

impl EffectTag {
    pub fn all() -> &'static [EffectTag] {
        EffectTag::VARIANTS
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectTag::Grayscale => "grayscale",
            EffectTag::Sepia => "sepia",
            EffectTag::Blur => "blur",
            EffectTag::Contour => "contour",
            EffectTag::EdgeEnhance => "edge_enhance",
            EffectTag::Emboss => "emboss",
            EffectTag::Sharpen => "sharpen",
            EffectTag::Brightness => "brightness",
            EffectTag::Contrast => "contrast",
            EffectTag::Negative => "negative",
            EffectTag::Sketch => "sketch",
            EffectTag::OilPainting => "oil_painting",
            EffectTag::Cartoon => "cartoon",
            EffectTag::Vintage => "vintage",
        }
    }

    pub fn try_from_name(name: &str) -> Option<Self> {
        match name {
            "grayscale" => Some(EffectTag::Grayscale),
            "sepia" => Some(EffectTag::Sepia),
            "blur" => Some(EffectTag::Blur),
            "contour" => Some(EffectTag::Contour),
            "edge_enhance" => Some(EffectTag::EdgeEnhance),
            "emboss" => Some(EffectTag::Emboss),
            "sharpen" => Some(EffectTag::Sharpen),
            "brightness" => Some(EffectTag::Brightness),
            "contrast" => Some(EffectTag::Contrast),
            "negative" => Some(EffectTag::Negative),
            "sketch" => Some(EffectTag::Sketch),
            "oil_painting" => Some(EffectTag::OilPainting),
            "cartoon" => Some(EffectTag::Cartoon),
            "vintage" => Some(EffectTag::Vintage),
            _ => None,
        }
    }

    /// Run the effect with its fixed parameters.
    ///
    /// Grayscale and sketch return a single-channel image; everything else
    /// returns RGB.
    pub fn apply(&self, image: &RgbImage) -> DynamicImage {
        match self {
            EffectTag::Grayscale => GrayscaleConfig::new().apply(image).into(),
            EffectTag::Sepia => SepiaConfig::new().apply(image).into(),
            EffectTag::Blur => GaussianBlurConfig::new().apply(image).into(),
            EffectTag::Contour => KernelFilter::Contour.apply(image).into(),
            EffectTag::EdgeEnhance => KernelFilter::EdgeEnhance.apply(image).into(),
            EffectTag::Emboss => KernelFilter::Emboss.apply(image).into(),
            EffectTag::Sharpen => KernelFilter::Sharpen.apply(image).into(),
            EffectTag::Brightness => BrightnessConfig::new().apply(image).into(),
            EffectTag::Contrast => ContrastConfig::new().apply(image).into(),
            EffectTag::Negative => Invert.apply(image).into(),
            EffectTag::Sketch => SketchConfig::new().apply(image).into(),
            EffectTag::OilPainting => OilPaintingConfig::new().apply(image).into(),
            EffectTag::Cartoon => CartoonConfig::new().apply(image).into(),
            EffectTag::Vintage => VintageConfig::new().apply(image).into(),
        }
    }
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for EffectTag {
    type Err = ImageEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_name(s).ok_or_else(|| ImageEffectError::UnknownEffect(s.to_string()))
    }
}
