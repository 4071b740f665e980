use image::ImageReader;
use image_effect::{Effect, artistic::CartoonConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgb8();

    for alpha in [0.3, 0.7, 1.0] {
        let effect = CartoonConfig::new().with_alpha(alpha).with_posterize_step(64);
        let path = output_dir.join(format!("cartoon_{alpha}.png"));
        effect.apply(&img).save(&path)?;
        println!("✓ cartoon alpha={alpha} -> {}", path.display());
    }

    Ok(())
}
