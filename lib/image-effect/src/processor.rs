//! File-to-file effect dispatch.
//!
//! [`try_process`] decodes the input, normalizes it to 8-bit RGB, applies the
//! named effect, normalizes the result again and encodes it. The encoded bytes
//! go to a temporary file next to the output, which is renamed into place only
//! once encoding has succeeded, so a failed call never leaves a file at the
//! output path.

use crate::{EffectTag, ImageEffectError, ImageEffectResult};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use log::{debug, error, info};
use std::{
    any::Any,
    io::{BufWriter, Write},
    panic::{self, AssertUnwindSafe},
    path::Path,
};

/// Apply `effect` to the image at `input` and write the result to `output`.
///
/// Returns `false` on any failure after logging the reason.
pub fn process(input: impl AsRef<Path>, output: impl AsRef<Path>, effect: &str) -> bool {
    let (input, output) = (input.as_ref(), output.as_ref());

    match try_process(input, output, effect) {
        Ok(()) => {
            info!(
                "Image processed with {effect} effect and saved to {}",
                output.display()
            );
            true
        }
        Err(e) => {
            error!("Error processing image {}: {e}", input.display());
            false
        }
    }
}

pub fn try_process(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    effect: &str,
) -> ImageEffectResult<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let image = decode(input)?;
    let tag: EffectTag = effect.parse()?;
    let processed = process_image(&image, tag)?;
    encode(&processed, output)
}

/// The in-memory part of the pipeline: normalize, transform, normalize.
pub fn process_image(image: &DynamicImage, tag: EffectTag) -> ImageEffectResult<RgbImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ImageEffectError::EmptyImage { width, height });
    }

    let rgb = match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        other => {
            debug!("converting {:?} input to rgb8", other.color());
            other.to_rgb8()
        }
    };

    let output = panic::catch_unwind(AssertUnwindSafe(|| tag.apply(&rgb))).map_err(|payload| {
        ImageEffectError::Transform {
            effect: tag,
            reason: panic_message(payload.as_ref()),
        }
    })?;

    Ok(match output {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.into_rgb8(),
    })
}

fn decode(path: &Path) -> ImageEffectResult<DynamicImage> {
    let decode_err = |source| ImageEffectError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

fn encode(image: &RgbImage, path: &Path) -> ImageEffectResult<()> {
    let encode_err = |source| ImageEffectError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(encode_err)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".image-effect-")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, format).map_err(encode_err)?;
        writer.flush()?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    debug!("encoded {} as {format:?}", path.display());

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbaImage};

    #[test]
    fn test_process_image_normalizes_gray_input() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 3, Luma([77])));
        let out = process_image(&gray, EffectTag::Negative).unwrap();
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(out.get_pixel(0, 0), &Rgb([178, 178, 178]));
    }

    #[test]
    fn test_process_image_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 0])));
        let out = process_image(&rgba, EffectTag::Negative).unwrap();
        assert_eq!(out.get_pixel(1, 1), &Rgb([254, 253, 252]));
    }

    #[test]
    fn test_process_image_gray_output_becomes_rgb() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([255, 0, 0])));
        let out = process_image(&image, EffectTag::Grayscale).unwrap();
        assert_eq!(out.get_pixel(1, 1), &Rgb([76, 76, 76]));
    }

    #[test]
    fn test_process_image_rejects_empty() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 5));
        assert!(matches!(
            process_image(&empty, EffectTag::Sepia),
            Err(ImageEffectError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(7u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
