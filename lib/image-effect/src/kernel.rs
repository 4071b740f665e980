//! Fixed convolution kernels.
//!
//! Each output channel is `sum(k * p) / scale + offset`, rounded to nearest
//! and clamped to `[0, 255]`. Pixels closer to the border than the kernel
//! radius are copied from the input unchanged.

use image::{ImageBuffer, Pixel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel<const N: usize> {
    weights: [[i32; N]; N],
    scale: i32,
    offset: i32,
}

pub type Kernel3 = Kernel<3>;
pub type Kernel5 = Kernel<5>;

pub const CONTOUR: Kernel3 = Kernel::new([[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]], 1, 255);

pub const EDGE_ENHANCE_MORE: Kernel3 =
    Kernel::new([[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]], 1, 0);

pub const EMBOSS: Kernel3 = Kernel::new([[-1, 0, 0], [0, 1, 0], [0, 0, 0]], 1, 128);

pub const SHARPEN: Kernel3 = Kernel::new([[-2, -2, -2], [-2, 32, -2], [-2, -2, -2]], 16, 0);

pub const SMOOTH: Kernel3 = Kernel::new([[1, 1, 1], [1, 5, 1], [1, 1, 1]], 13, 0);

pub const FIND_EDGES: Kernel3 = Kernel::new([[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]], 1, 0);

pub const SMOOTH_MORE: Kernel5 = Kernel::new(
    [
        [1, 1, 1, 1, 1],
        [1, 5, 5, 5, 1],
        [1, 5, 44, 5, 1],
        [1, 5, 5, 5, 1],
        [1, 1, 1, 1, 1],
    ],
    100,
    0,
);

impl<const N: usize> Kernel<N> {
    pub const fn new(weights: [[i32; N]; N], scale: i32, offset: i32) -> Self {
        Self {
            weights,
            scale,
            offset,
        }
    }

    pub fn radius(&self) -> u32 {
        (N / 2) as u32
    }

    /// Convolve every channel of `image` with this kernel.
    pub fn filter<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        let radius = self.radius();
        let mut result = image.clone();

        if width <= 2 * radius || height <= 2 * radius {
            return result;
        }

        let channels = P::CHANNEL_COUNT as usize;
        let scale = self.scale.max(1) as f32;
        let mut sums = vec![0i32; channels];

        for y in radius..height - radius {
            for x in radius..width - radius {
                sums.iter_mut().for_each(|s| *s = 0);

                for (ky, row) in self.weights.iter().enumerate() {
                    for (kx, &weight) in row.iter().enumerate() {
                        if weight == 0 {
                            continue;
                        }

                        let px = x + kx as u32 - radius;
                        let py = y + ky as u32 - radius;
                        let pixel = image.get_pixel(px, py);
                        for (sum, &c) in sums.iter_mut().zip(pixel.channels()) {
                            *sum += weight * c as i32;
                        }
                    }
                }

                let out = result.get_pixel_mut(x, y);
                for (c, &sum) in out.channels_mut().iter_mut().zip(&sums) {
                    let value = sum as f32 / scale + self.offset as f32;
                    *c = value.round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_flat_image_responses() {
        let flat = RgbImage::from_pixel(5, 5, Rgb([100, 100, 100]));

        // Kernels summing to zero respond with their offset on a flat area.
        assert_eq!(CONTOUR.filter(&flat).get_pixel(2, 2), &Rgb([255, 255, 255]));
        assert_eq!(FIND_EDGES.filter(&flat).get_pixel(2, 2), &Rgb([0, 0, 0]));
        assert_eq!(EMBOSS.filter(&flat).get_pixel(2, 2), &Rgb([128, 128, 128]));

        // Normalized kernels keep a flat area intact.
        assert_eq!(SHARPEN.filter(&flat).get_pixel(2, 2), &Rgb([100, 100, 100]));
        assert_eq!(SMOOTH.filter(&flat).get_pixel(2, 2), &Rgb([100, 100, 100]));
        assert_eq!(SMOOTH_MORE.filter(&flat).get_pixel(2, 2), &Rgb([100, 100, 100]));
        assert_eq!(
            EDGE_ENHANCE_MORE.filter(&flat).get_pixel(2, 2),
            &Rgb([100, 100, 100])
        );
    }

    #[test]
    fn test_border_pixels_are_copied() {
        let mut image = GrayImage::from_pixel(4, 4, Luma([10]));
        image.put_pixel(1, 1, Luma([200]));

        let out = FIND_EDGES.filter(&image);
        for (x, y, pixel) in out.enumerate_pixels() {
            if x == 0 || y == 0 || x == 3 || y == 3 {
                assert_eq!(pixel, image.get_pixel(x, y));
            }
        }
        assert_eq!(out.get_pixel(1, 1), &Luma([255]));
    }

    #[test]
    fn test_image_smaller_than_kernel_passes_through() {
        let image = RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]));
        assert_eq!(SMOOTH_MORE.filter(&image), image);

        let tiny = RgbImage::from_pixel(1, 1, Rgb([9, 9, 9]));
        assert_eq!(SHARPEN.filter(&tiny), tiny);
    }
}
