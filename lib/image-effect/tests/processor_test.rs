// cargo test -p image-effect --test processor_test

use anyhow::Result;
use image::{GrayImage, ImageReader, Luma, Rgb, RgbImage};
use image_effect::{EffectTag, ImageEffectError, process, try_process};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x * 13 + y * 29) % 256) as u8,
        ])
    })
}

fn save_sample(dir: &Path, name: &str, image: &RgbImage) -> Result<PathBuf> {
    let path = dir.join(name);
    image.save(&path)?;
    Ok(path)
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

#[test]
fn test_every_effect_produces_same_sized_color_output() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(dir.path(), "input.png", &sample(37, 23))?;

    for tag in EffectTag::all() {
        let output = dir.path().join(format!("{}.png", tag.name()));
        assert!(process(&input, &output, tag.name()), "effect {tag} failed");

        let decoded = ImageReader::open(&output)?.decode()?;
        assert_eq!((decoded.width(), decoded.height()), (37, 23));
        assert!(decoded.as_rgb8().is_some(), "effect {tag} is not rgb8");
    }

    Ok(())
}

#[test]
fn test_jpeg_input_and_output() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(dir.path(), "input.jpg", &sample(40, 30))?;
    let output = dir.path().join("out.jpeg");

    assert!(process(&input, &output, "sepia"));
    let decoded = load_rgb(&output)?;
    assert_eq!(decoded.dimensions(), (40, 30));

    Ok(())
}

#[test]
fn test_grayscale_png_input_is_accepted() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = dir.path().join("gray.png");
    GrayImage::from_pixel(10, 6, Luma([90])).save(&input)?;

    let output = dir.path().join("out.png");
    assert!(process(&input, &output, "contrast"));

    let decoded = ImageReader::open(&output)?.decode()?;
    assert!(decoded.as_rgb8().is_some());

    Ok(())
}

#[test]
fn test_negative_twice_restores_original() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let original = sample(31, 17);
    let input = save_sample(dir.path(), "input.png", &original)?;
    let once = dir.path().join("once.png");
    let twice = dir.path().join("twice.png");

    assert!(process(&input, &once, "negative"));
    assert!(process(&once, &twice, "negative"));
    assert_eq!(load_rgb(&twice)?, original);

    Ok(())
}

#[test]
fn test_unknown_effect_writes_nothing() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(dir.path(), "input.png", &sample(8, 8))?;
    let output = dir.path().join("out.png");

    assert!(!process(&input, &output, "not_a_real_effect"));
    assert!(!output.exists());

    assert!(matches!(
        try_process(&input, &output, "not_a_real_effect"),
        Err(ImageEffectError::UnknownEffect(name)) if name == "not_a_real_effect"
    ));

    // Only the input remains; no temporary file is left behind either.
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);

    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = dir.path().join("missing.png");
    let output = dir.path().join("out.png");

    assert!(!process(&input, &output, "blur"));
    assert!(!output.exists());
    assert!(matches!(
        try_process(&input, &output, "blur"),
        Err(ImageEffectError::Decode { .. })
    ));

    Ok(())
}

#[test]
fn test_corrupt_input_fails() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = dir.path().join("corrupt.png");
    std::fs::write(&input, b"definitely not a png")?;
    let output = dir.path().join("out.png");

    assert!(matches!(
        try_process(&input, &output, "emboss"),
        Err(ImageEffectError::Decode { .. })
    ));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn test_unwritable_output_fails() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(dir.path(), "input.png", &sample(8, 8))?;

    let no_dir = dir.path().join("no-such-dir").join("out.png");
    assert!(!process(&input, &no_dir, "sharpen"));
    assert!(!no_dir.exists());

    let no_format = dir.path().join("out.unknown");
    assert!(matches!(
        try_process(&input, &no_format, "sharpen"),
        Err(ImageEffectError::Encode { .. })
    ));
    assert!(!no_format.exists());

    Ok(())
}

#[test]
fn test_vintage_vignette_direction() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(
        dir.path(),
        "input.png",
        &RgbImage::from_pixel(64, 48, Rgb([200, 160, 120])),
    )?;
    let output = dir.path().join("vintage.png");

    assert!(process(&input, &output, "vintage"));
    let out = load_rgb(&output)?;
    let center = out.get_pixel(32, 24);
    let corner = out.get_pixel(0, 0);
    assert!(center.0.iter().zip(corner.0.iter()).all(|(c, k)| c > k));

    Ok(())
}

#[test]
fn test_sketch_white_input_stays_white() -> Result<()> {
    init_logger();
    let dir = TempDir::new()?;
    let input = save_sample(
        dir.path(),
        "white.png",
        &RgbImage::from_pixel(30, 20, Rgb([255, 255, 255])),
    )?;
    let output = dir.path().join("sketch.png");

    assert!(process(&input, &output, "sketch"));
    let out = load_rgb(&output)?;
    assert!(out.iter().all(|&c| c >= 254));

    Ok(())
}
