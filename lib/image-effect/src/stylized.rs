use crate::{Effect, blend, kernel};
use derivative::Derivative;
use derive_setters::Setters;
use image::{ImageBuffer, Pixel, RgbImage};

/// Single-pass convolution effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelFilter {
    Contour,
    EdgeEnhance,
    Emboss,
    Sharpen,
    Smooth,
    SmoothMore,
    FindEdges,
}

impl KernelFilter {
    pub fn filter<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
    where
        P: Pixel<Subpixel = u8>,
    {
        match self {
            KernelFilter::Contour => kernel::CONTOUR.filter(image),
            KernelFilter::EdgeEnhance => kernel::EDGE_ENHANCE_MORE.filter(image),
            KernelFilter::Emboss => kernel::EMBOSS.filter(image),
            KernelFilter::Sharpen => kernel::SHARPEN.filter(image),
            KernelFilter::Smooth => kernel::SMOOTH.filter(image),
            KernelFilter::SmoothMore => kernel::SMOOTH_MORE.filter(image),
            KernelFilter::FindEdges => kernel::FIND_EDGES.filter(image),
        }
    }
}

impl Effect for KernelFilter {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        self.filter(image)
    }
}

/// Quantizes every channel down to a multiple of `step`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PosterizeConfig {
    #[derivative(Default(value = "32"))]
    step: u8,
}

impl PosterizeConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for PosterizeConfig {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut result = image.clone();
        for c in result.iter_mut() {
            *c = blend::posterize_channel(*c, self.step);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checkerboard(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_contour_marks_edges_dark() {
        let mut image = RgbImage::from_pixel(5, 5, Rgb([0, 0, 0]));
        image.put_pixel(2, 2, Rgb([255, 255, 255]));

        let out = KernelFilter::Contour.apply(&image);
        assert_eq!(out.get_pixel(2, 2), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(1, 2), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_emboss_offset() {
        let mut image = RgbImage::from_pixel(3, 3, Rgb([50, 50, 50]));
        image.put_pixel(0, 0, Rgb([20, 20, 20]));

        let out = KernelFilter::Emboss.apply(&image);
        assert_eq!(out.get_pixel(1, 1), &Rgb([158, 158, 158]));
    }

    #[test]
    fn test_sharpen_clamps() {
        let image = checkerboard(6);
        let out = KernelFilter::Sharpen.apply(&image);
        assert_eq!(out.get_pixel(2, 2), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(2, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_edge_enhance_dimensions() {
        let image = checkerboard(9);
        assert_eq!(KernelFilter::EdgeEnhance.apply(&image).dimensions(), (9, 9));
    }

    #[test]
    fn test_posterize_steps() {
        let image = RgbImage::from_pixel(1, 1, Rgb([31, 100, 255]));
        let out = PosterizeConfig::new().apply(&image);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 96, 224]));
    }
}
