use image::ImageReader;
use rectscan::{DetectConfig, Detector, EdgeMethod, SizeRange};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image.png>", args[0]);
        std::process::exit(2);
    }

    let image = ImageReader::open(&args[1])?.decode()?.to_rgb8();

    let mut cfg = DetectConfig::default();
    cfg.size_range = SizeRange::new(10, 500, 10, 500);
    cfg.delta_e_threshold = 4.0;
    cfg.edge_method = EdgeMethod::Sobel;
    cfg.extract_dominant_color = true;

    let detector = Detector::with_config(cfg);
    let result = detector.detect(&image)?;

    println!("Detected {} boxes.", result.bounding_boxes.len());
    for bbox in &result.bounding_boxes {
        println!(
            "  ({}, {}) {}x{}  ratio {:.3}  color {}",
            bbox.x,
            bbox.y,
            bbox.w,
            bbox.h,
            bbox.validation_ratio,
            bbox.dominant_color.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
