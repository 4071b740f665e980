//! Per-pixel helpers shared by the effects.

use image::{GrayImage, ImageBuffer, Pixel};

/// Linear interpolation from `a` toward `b`: `a + alpha * (b - a)`.
///
/// `alpha` may leave `[0, 1]` to extrapolate, which is how the enhance
/// effects push an image away from its degenerate version.
pub fn blend_channel(a: u8, b: u8, alpha: f32) -> u8 {
    let value = a as f32 + alpha * (b as f32 - a as f32);
    value.clamp(0.0, 255.0) as u8
}

/// Blend two same-sized images channel by channel.
pub fn blend<P>(
    a: &ImageBuffer<P, Vec<u8>>,
    b: &ImageBuffer<P, Vec<u8>>,
    alpha: f32,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let mut result = a.clone();
    for (out, (pa, pb)) in result.pixels_mut().zip(a.pixels().zip(b.pixels())) {
        for ((o, &ca), &cb) in out
            .channels_mut()
            .iter_mut()
            .zip(pa.channels())
            .zip(pb.channels())
        {
            *o = blend_channel(ca, cb, alpha);
        }
    }

    result
}

/// Composite `fg` over `bg` using `mask` as alpha: 255 keeps `fg`, 0 keeps `bg`.
pub fn composite_channel(fg: u8, bg: u8, mask: u8) -> u8 {
    let m = mask as u32;
    ((fg as u32 * m + bg as u32 * (255 - m) + 127) / 255) as u8
}

/// Composite `fg` over a solid black background through `mask`.
pub fn composite_over_black<P>(fg: &ImageBuffer<P, Vec<u8>>, mask: &GrayImage) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    debug_assert_eq!(fg.dimensions(), mask.dimensions());

    let mut result = fg.clone();
    for (pixel, m) in result.pixels_mut().zip(mask.pixels()) {
        for c in pixel.channels_mut() {
            *c = composite_channel(*c, 0, m[0]);
        }
    }

    result
}

/// Quantize a channel down to a multiple of `step`: `floor(value / step) * step`.
pub fn posterize_channel(value: u8, step: u8) -> u8 {
    let step = step.max(1) as u32;
    ((value as u32 / step) * step).min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_blend_channel_interpolates() {
        assert_eq!(blend_channel(0, 200, 0.0), 0);
        assert_eq!(blend_channel(0, 200, 1.0), 200);
        assert_eq!(blend_channel(100, 200, 0.5), 150);
    }

    #[test]
    fn test_blend_channel_extrapolation_clamps() {
        assert_eq!(blend_channel(0, 200, 1.5), 255);
        assert_eq!(blend_channel(200, 0, 2.0), 0);
    }

    #[test]
    fn test_blend_images() {
        let a = RgbImage::from_pixel(2, 2, Rgb([0, 100, 200]));
        let b = RgbImage::from_pixel(2, 2, Rgb([100, 100, 0]));
        let out = blend(&a, &b, 0.25);
        assert_eq!(out.get_pixel(1, 1), &Rgb([25, 100, 150]));
    }

    #[test]
    fn test_composite_extremes() {
        assert_eq!(composite_channel(180, 0, 255), 180);
        assert_eq!(composite_channel(180, 0, 0), 0);
        assert_eq!(composite_channel(255, 0, 128), 128);
    }

    #[test]
    fn test_posterize_channel() {
        assert_eq!(posterize_channel(0, 32), 0);
        assert_eq!(posterize_channel(31, 32), 0);
        assert_eq!(posterize_channel(32, 32), 32);
        assert_eq!(posterize_channel(255, 32), 224);
    }
}
