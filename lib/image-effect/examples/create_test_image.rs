use image::{Rgb, RgbImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("data")?;

    // 800x600 gradient with a bright disc, enough structure for edge filters
    let img = RgbImage::from_fn(800, 600, |x, y| {
        let (dx, dy) = (x as i32 - 400, y as i32 - 300);
        if dx * dx + dy * dy < 120 * 120 {
            return Rgb([240, 220, 60]);
        }

        Rgb([
            (x * 255 / 800) as u8,
            (y * 255 / 600) as u8,
            ((x + y) * 255 / 1400) as u8,
        ])
    });

    img.save("data/test.png")?;
    println!("Created data/test.png");

    Ok(())
}
