use image::ImageReader;
use rectscan::{Detector, SizeRange};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <image.png> <min_size> <max_size> [out.json]", args[0]);
        std::process::exit(2);
    }

    let image = ImageReader::open(&args[1])?.decode()?.to_rgb8();
    let min_size: u32 = args[2].parse()?;
    let max_size: u32 = args[3].parse()?;

    let detector = Detector::new(SizeRange::new(min_size, max_size, min_size, max_size));
    let result = detector.detect(&image)?;

    println!(
        "Detected {} boxes in {:.1} ms.",
        result.bounding_boxes.len(),
        result.processing_time_ms
    );
    for bbox in &result.bounding_boxes {
        println!(
            "  ({}, {}) {}x{}  ratio {:.3}",
            bbox.x, bbox.y, bbox.w, bbox.h, bbox.validation_ratio
        );
    }

    if let Some(out_path) = args.get(4) {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
