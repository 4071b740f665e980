use image_effect::EffectTag;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let input = Path::new("data/test.png");
    if !input.exists() {
        return Err("data/test.png is missing, run the create_test_image demo first".into());
    }

    for tag in EffectTag::all() {
        let output = output_dir.join(format!("{tag}.png"));
        let ok = image_effect::process(input, &output, tag.name());
        println!("{} {tag:<14} {}", if ok { "✓" } else { "✗" }, output.display());
    }

    Ok(())
}
