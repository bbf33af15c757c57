//! Synthetic sample scenes for demos, tests, and benchmarks.
//!
//! Generates a uniform background with non-overlapping flat-colored shapes
//! and reports the placements as ground truth, so detection output can be
//! compared against what was actually drawn. Generation is fully
//! deterministic for a given config (seeded RNG).

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Minimum summed per-channel difference between a random feature color and
/// the background. Guarantees enough contrast for the feature's edges to
/// register.
const MIN_COLOR_CONTRAST: u32 = 150;

/// Separation margin (pixels) kept between placed features and around the
/// image border.
const PLACEMENT_MARGIN: i32 = 2;

/// Shape selector for generated features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleShape {
    Rectangle,
    Ellipse,
    /// Per-feature random choice between rectangle and ellipse.
    Mixed,
}

/// Concrete shape of a placed feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacedShape {
    Rectangle,
    Ellipse,
}

/// Configuration for sample generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Image width (pixels).
    pub width: u32,
    /// Image height (pixels).
    pub height: u32,
    /// Number of features to place. Crowded configurations may place
    /// fewer: attempts are capped at 20 per requested feature.
    pub num_features: usize,
    /// Minimum feature size (pixels, both dimensions).
    pub min_size: u32,
    /// Maximum feature size (pixels, both dimensions).
    pub max_size: u32,
    /// Background color.
    pub bg_color: [u8; 3],
    /// Draw each feature in a random color contrasting with the
    /// background; otherwise `feature_color` is used throughout.
    pub random_colors: bool,
    /// Fixed feature color (used when `random_colors` is false).
    pub feature_color: [u8; 3],
    /// Shape selector.
    pub shape: SampleShape,
    /// RNG seed. Identical config and seed produce identical output.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            num_features: 10,
            min_size: 10,
            max_size: 40,
            bg_color: [0xe8, 0xe8, 0xe8],
            random_colors: true,
            feature_color: [0xff, 0x00, 0x00],
            shape: SampleShape::Mixed,
            seed: 7,
        }
    }
}

/// A placed feature, reported as ground truth.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedFeature {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    /// Fill color as `#rrggbb`.
    pub color: String,
    pub shape: PlacedShape,
}

fn hex_of(color: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

fn contrast(c1: [u8; 3], c2: [u8; 3]) -> u32 {
    c1.iter()
        .zip(c2.iter())
        .map(|(&a, &b)| a.abs_diff(b) as u32)
        .sum()
}

fn touches_with_margin(f: &PlacedFeature, x: i32, y: i32, w: u32, h: u32) -> bool {
    x < f.x + f.w as i32 + PLACEMENT_MARGIN
        && x + w as i32 + PLACEMENT_MARGIN > f.x
        && y < f.y + f.h as i32 + PLACEMENT_MARGIN
        && y + h as i32 + PLACEMENT_MARGIN > f.y
}

/// Generate a synthetic scene and its ground-truth placements.
pub fn generate_sample(config: &SampleConfig) -> (RgbImage, Vec<PlacedFeature>) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut image = RgbImage::from_pixel(config.width, config.height, Rgb(config.bg_color));
    let mut features: Vec<PlacedFeature> = Vec::new();

    let max_attempts = config.num_features * 20;
    let mut attempts = 0;
    while features.len() < config.num_features && attempts < max_attempts {
        attempts += 1;

        let w = rng.gen_range(config.min_size..=config.max_size);
        let h = rng.gen_range(config.min_size..=config.max_size);
        if w >= config.width.saturating_sub(4) || h >= config.height.saturating_sub(4) {
            continue;
        }
        let x = rng.gen_range(2..=config.width - w - 2) as i32;
        let y = rng.gen_range(2..=config.height - h - 2) as i32;

        if features.iter().any(|f| touches_with_margin(f, x, y, w, h)) {
            continue;
        }

        let color = if config.random_colors {
            loop {
                let c = [rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()];
                if contrast(c, config.bg_color) > MIN_COLOR_CONTRAST {
                    break c;
                }
            }
        } else {
            config.feature_color
        };

        let shape = match config.shape {
            SampleShape::Rectangle => PlacedShape::Rectangle,
            SampleShape::Ellipse => PlacedShape::Ellipse,
            SampleShape::Mixed => {
                if rng.gen_bool(0.5) {
                    PlacedShape::Rectangle
                } else {
                    PlacedShape::Ellipse
                }
            }
        };

        match shape {
            PlacedShape::Rectangle => {
                draw_filled_rect_mut(&mut image, Rect::at(x, y).of_size(w, h), Rgb(color));
            }
            PlacedShape::Ellipse => {
                let center = (x + w as i32 / 2, y + h as i32 / 2);
                draw_filled_ellipse_mut(
                    &mut image,
                    center,
                    (w / 2) as i32,
                    (h / 2) as i32,
                    Rgb(color),
                );
            }
        }

        features.push(PlacedFeature {
            x,
            y,
            w,
            h,
            color: hex_of(color),
            shape,
        });
    }

    (image, features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let config = SampleConfig {
            num_features: 8,
            seed: 42,
            ..SampleConfig::default()
        };
        let (img_a, feats_a) = generate_sample(&config);
        let (img_b, feats_b) = generate_sample(&config);
        assert_eq!(img_a.as_raw(), img_b.as_raw());
        assert_eq!(feats_a, feats_b);
    }

    #[test]
    fn different_seeds_differ() {
        let base = SampleConfig {
            num_features: 8,
            ..SampleConfig::default()
        };
        let other = SampleConfig { seed: 8, ..base.clone() };
        let (img_a, _) = generate_sample(&base);
        let (img_b, _) = generate_sample(&other);
        assert_ne!(img_a.as_raw(), img_b.as_raw());
    }

    #[test]
    fn placements_stay_inside_with_margin() {
        let config = SampleConfig {
            width: 300,
            height: 200,
            num_features: 12,
            ..SampleConfig::default()
        };
        let (_, features) = generate_sample(&config);
        assert!(!features.is_empty());
        assert!(features.len() <= 12);
        for f in &features {
            assert!(f.x >= 2 && f.y >= 2);
            assert!(f.x + (f.w as i32) <= 298);
            assert!(f.y + (f.h as i32) <= 198);
            assert!(f.w >= config.min_size && f.w <= config.max_size);
            assert!(f.h >= config.min_size && f.h <= config.max_size);
        }
    }

    #[test]
    fn placements_do_not_touch() {
        let config = SampleConfig {
            num_features: 15,
            ..SampleConfig::default()
        };
        let (_, features) = generate_sample(&config);
        for (i, a) in features.iter().enumerate() {
            for b in &features[i + 1..] {
                assert!(
                    !touches_with_margin(a, b.x, b.y, b.w, b.h),
                    "{a:?} touches {b:?}"
                );
            }
        }
    }

    #[test]
    fn fixed_color_mode_uses_the_configured_color() {
        let config = SampleConfig {
            num_features: 5,
            random_colors: false,
            feature_color: [0x12, 0x34, 0x56],
            shape: SampleShape::Rectangle,
            ..SampleConfig::default()
        };
        let (image, features) = generate_sample(&config);
        for f in &features {
            assert_eq!(f.color, "#123456");
            assert_eq!(f.shape, PlacedShape::Rectangle);
            assert_eq!(*image.get_pixel(f.x as u32, f.y as u32), Rgb([0x12, 0x34, 0x56]));
        }
    }

    #[test]
    fn random_colors_contrast_with_background() {
        let config = SampleConfig {
            num_features: 10,
            ..SampleConfig::default()
        };
        let (_, features) = generate_sample(&config);
        for f in &features {
            let c = [
                u8::from_str_radix(&f.color[1..3], 16).unwrap(),
                u8::from_str_radix(&f.color[3..5], 16).unwrap(),
                u8::from_str_radix(&f.color[5..7], 16).unwrap(),
            ];
            assert!(contrast(c, config.bg_color) > MIN_COLOR_CONTRAST);
        }
    }
}
