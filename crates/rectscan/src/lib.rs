//! rectscan — detector for rectangular flat-colored features in raster images.
//!
//! Candidate boxes are proposed from edge contours; each candidate's
//! bounding-box outline is then scored for perceptual color coherence in Lab
//! space, and the surviving boxes compete for image area so no two accepted
//! detections overlap. The pipeline stages are:
//!
//! 1. **Color** – whole-image conversion to a standard-unit CIE Lab buffer.
//! 2. **Proposal** – edge map (Canny or Sobel) → contours → axis-aligned
//!    bounding boxes, size-filtered and deduplicated.
//! 3. **Coherence** – outline walk scoring: the fraction of perimeter pixels
//!    with a perceptually close match within a small walk-index window.
//! 4. **Exclusivity** – greedy non-overlap selection on an occupancy mask,
//!    highest validation ratio first.
//! 5. **Dominant color** – optional reduction of each accepted region to a
//!    single representative hex color.
//!
//! # Public API
//! The stable surface is intentionally small:
//! - [`Detector`] and [`DetectConfig`] as primary entry points
//! - [`SizeRange`] and [`EdgeMethod`] for the caller-supplied knobs
//! - [`DetectionResult`] and [`BoundingBox`] as result structures
//!
//! [`overlay`] and [`sample`] carry the display/demo helpers around the
//! kernel; neither is required for detection itself.

pub mod color;
mod detector;
pub mod geometry;
pub mod overlay;
pub mod sample;

#[cfg(test)]
pub(crate) mod test_utils;

pub use detector::{
    DetectConfig, DetectError, Detector, EdgeMethod, SizeRange, CANNY_HIGH_THRESHOLD,
    CANNY_LOW_THRESHOLD, DEFAULT_DELTA_E_THRESHOLD, NEIGHBOR_WINDOW, SOBEL_MAGNITUDE_THRESHOLD,
    VALIDATION_CUTOFF,
};

/// An accepted detection: an axis-aligned box whose outline validated as
/// color-coherent. Immutable once produced by validation; `score` is never
/// recomputed afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge (pixels).
    pub x: i32,
    /// Top edge (pixels).
    pub y: i32,
    /// Width (pixels, >= 1).
    pub w: u32,
    /// Height (pixels, >= 1).
    pub h: u32,
    /// Selection score in [0, 1]. Equal to `validation_ratio`.
    pub score: f32,
    /// Fraction of visible outline pixels with a close perceptual match.
    pub validation_ratio: f32,
    /// Representative region color as `#rrggbb`, when extraction is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<String>,
}

impl BoundingBox {
    /// Geometry key for this box.
    pub fn key(&self) -> BoundingBoxKey {
        BoundingBoxKey {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// Geometry-only box identity, used as the dedup set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBoxKey {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Full detection result for a single image.
///
/// Constructed once per detection call and owned entirely by the caller;
/// the kernel performs no further mutation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetectionResult {
    /// Accepted boxes in acceptance order: descending score, ties broken by
    /// discovery order.
    pub bounding_boxes: Vec<BoundingBox>,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Identifying name of the color-distance method used.
    pub delta_e_method: String,
    /// The Delta-E threshold applied during validation.
    pub delta_e_threshold: f32,
    /// Wall-clock time from pipeline entry to result emission. Cosmetic;
    /// excluded from determinism comparisons.
    pub processing_time_ms: f64,
}
