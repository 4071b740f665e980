//! Pixel-level image effects and the dispatcher that applies them by name.
//!
//! Every effect takes an 8-bit RGB bitmap by reference and produces a fresh
//! bitmap, so effects can run concurrently without any locking. The
//! [`processor`] module owns all fallible work: decoding, tag lookup and
//! encoding.

pub mod artistic;
pub mod base;
pub mod blend;
pub mod blur;
pub mod filter;
pub mod kernel;
pub mod processor;
pub mod stylized;
pub mod tag;

pub use processor::{process, process_image, try_process};
pub use tag::EffectTag;

use image::{DynamicImage, RgbImage};
use std::path::PathBuf;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unknown effect: {0}")]
    UnknownEffect(String),
    #[error("image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("effect {effect} failed: {reason}")]
    Transform { effect: EffectTag, reason: String },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A pure image-to-image transformation.
///
/// Implementors read the input and return a newly allocated bitmap. Channel
/// values are clamped to `[0, 255]` before narrowing.
pub trait Effect {
    type Output: Into<DynamicImage>;

    fn apply(&self, image: &RgbImage) -> Self::Output;
}
