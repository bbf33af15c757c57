//! Device color to CIE Lab conversion and perceptual distance.
//!
//! Thresholds throughout the crate are expressed in standard Lab units so
//! common CIE76 conventions carry over (a just-noticeable difference is
//! around 2.3). Conversion goes sRGB → linear RGB → XYZ (D65) → Lab, then
//! through the byte-scaled Lab encoding (`L * 255/100`, `a + 128`,
//! `b + 128`, quantized to 8 bits) and back to standard units:
//! `L = L_enc * 100/255`, `a = a_enc - 128`, `b = b_enc - 128`.
//! The 8-bit intermediate is the Lab plane the acceptance thresholds were
//! tuned against; skipping the quantization shifts scores near the cutoff.

use image::RgbImage;

/// A color in standard CIE Lab units: L in [0, 100], a and b in [-128, 127].
pub type LabColor = [f32; 3];

// D65 reference white in XYZ, Y normalized to 1.
const WHITE_X: f32 = 0.950_47;
const WHITE_Z: f32 = 1.088_83;

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn encode_channel(v: f32) -> f32 {
    v.round().clamp(0.0, 255.0)
}

/// Convert one sRGB pixel to standard-unit Lab through the byte-scaled
/// encoding.
pub fn rgb_to_lab(rgb: [u8; 3]) -> LabColor {
    let r = srgb_to_linear(rgb[0]);
    let g = srgb_to_linear(rgb[1]);
    let b = srgb_to_linear(rgb[2]);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y);
    let fz = lab_f(z / WHITE_Z);

    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);

    // Byte-scaled encoding, then back to standard units.
    let l_enc = encode_channel(l * 255.0 / 100.0);
    let a_enc = encode_channel(a + 128.0);
    let b_enc = encode_channel(b + 128.0);

    [l_enc * 100.0 / 255.0, a_enc - 128.0, b_enc - 128.0]
}

/// CIE76 Delta-E: Euclidean distance in standard Lab units.
pub fn delta_e_cie76(c1: LabColor, c2: LabColor) -> f32 {
    delta_e_cie76_sq(c1, c2).sqrt()
}

/// Squared CIE76 distance. Hot loops compare this against a squared
/// threshold to skip the square root.
pub(crate) fn delta_e_cie76_sq(c1: LabColor, c2: LabColor) -> f32 {
    let dl = c1[0] - c2[0];
    let da = c1[1] - c2[1];
    let db = c1[2] - c2[2];
    dl * dl + da * da + db * db
}

/// Whole-image Lab plane.
///
/// Allocated once per detection call (the dominant memory cost) and shared
/// read-only by all validation work. Never cached across calls.
#[derive(Debug, Clone)]
pub struct LabBuffer {
    width: u32,
    height: u32,
    data: Vec<LabColor>,
}

impl LabBuffer {
    /// Convert a full RGB image.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for pixel in image.pixels() {
            data.push(rgb_to_lab(pixel.0));
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width (pixels).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height (pixels).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when `(x, y)` lies inside the image.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Lab color at `(x, y)`. Panics when out of bounds; gate with
    /// [`contains`](Self::contains) for signed coordinates.
    pub fn get(&self, x: u32, y: u32) -> LabColor {
        assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn lab_channels_stay_in_standard_ranges() {
        for r in (0u16..=255).step_by(51) {
            for g in (0u16..=255).step_by(51) {
                for b in (0u16..=255).step_by(51) {
                    let lab = rgb_to_lab([r as u8, g as u8, b as u8]);
                    assert!((0.0..=100.0).contains(&lab[0]), "L out of range: {lab:?}");
                    assert!((-128.0..=127.0).contains(&lab[1]), "a out of range: {lab:?}");
                    assert!((-128.0..=127.0).contains(&lab[2]), "b out of range: {lab:?}");
                }
            }
        }
    }

    #[test]
    fn black_white_and_gray_are_neutral() {
        assert_eq!(rgb_to_lab([0, 0, 0]), [0.0, 0.0, 0.0]);

        let white = rgb_to_lab([255, 255, 255]);
        assert_eq!(white, [100.0, 0.0, 0.0]);

        // Equal channels give equal XYZ ratios, so a = b = 0 exactly.
        let gray = rgb_to_lab([128, 128, 128]);
        assert_eq!(gray[1], 0.0);
        assert_eq!(gray[2], 0.0);
        assert!(gray[0] > 45.0 && gray[0] < 60.0, "mid gray L = {}", gray[0]);
    }

    #[test]
    fn green_matches_reference_lab() {
        // sRGB primary green is (87.73, -86.18, 83.18) in standard Lab;
        // the byte-scaled quantization moves each channel by < 1 unit.
        let lab = rgb_to_lab([0, 255, 0]);
        assert!((lab[0] - 87.73).abs() < 1.5, "L = {}", lab[0]);
        assert!((lab[1] + 86.18).abs() < 1.5, "a = {}", lab[1]);
        assert!((lab[2] - 83.18).abs() < 1.5, "b = {}", lab[2]);
    }

    #[test]
    fn delta_e_identity_and_symmetry() {
        let c1 = [50.0, 10.0, -20.0];
        let c2 = [60.0, -5.0, 30.0];
        assert_eq!(delta_e_cie76(c1, c1), 0.0);
        assert_eq!(delta_e_cie76(c2, c2), 0.0);
        assert_eq!(delta_e_cie76(c1, c2), delta_e_cie76(c2, c1));
    }

    #[test]
    fn delta_e_known_distance() {
        let c1 = [50.0, 0.0, 0.0];
        let c2 = [60.0, 0.0, 0.0];
        assert!((delta_e_cie76(c1, c2) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn lab_buffer_indexing_matches_pixels() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([0, 0, 0]));
        img.put_pixel(2, 1, Rgb([255, 255, 255]));

        let lab = LabBuffer::from_rgb(&img);
        assert_eq!(lab.width(), 4);
        assert_eq!(lab.height(), 3);
        assert_eq!(lab.get(2, 1), [100.0, 0.0, 0.0]);
        assert_eq!(lab.get(0, 0), [0.0, 0.0, 0.0]);

        assert!(lab.contains(0, 0));
        assert!(lab.contains(3, 2));
        assert!(!lab.contains(-1, 0));
        assert!(!lab.contains(4, 0));
        assert!(!lab.contains(0, 3));
    }
}
