use crate::Effect;
use derivative::Derivative;
use derive_setters::Setters;
use image::{ImageBuffer, Pixel, RgbImage};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "2.0"))]
    radius: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blur any 8-bit image; a non-positive radius returns a copy.
    pub fn blur<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
    where
        P: Pixel<Subpixel = u8>,
    {
        if self.radius <= 0.0 || image.width() == 0 || image.height() == 0 {
            return image.clone();
        }

        imageproc::filter::gaussian_blur_f32(image, self.radius)
    }
}

impl Effect for GaussianBlurConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        self.blur(image)
    }
}
