//! High-level detection API and pipeline wiring.
//!
//! [`Detector`] is the primary entry point. A call runs the linear stage
//! chain: Lab conversion → candidate generation → per-candidate outline
//! validation (parallel, order-preserving) → stable score sort → exclusive
//! selection → optional dominant colors → timed result. The kernel holds no
//! cross-call state; the Lab buffer and occupancy mask live for one call.

mod coherence;
mod config;
mod dominant;
mod exclusivity;
mod proposal;

pub use config::{
    DetectConfig, EdgeMethod, SizeRange, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD,
    DEFAULT_DELTA_E_THRESHOLD, NEIGHBOR_WINDOW, SOBEL_MAGNITUDE_THRESHOLD, VALIDATION_CUTOFF,
};

use std::path::Path;
use std::time::Instant;

use image::RgbImage;
use rayon::prelude::*;

use crate::color::LabBuffer;
use crate::{BoundingBox, DetectionResult};

/// Method name reported in [`DetectionResult::delta_e_method`].
const DELTA_E_METHOD: &str = "CIE76 (Euclidean on Standard Lab)";

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors surfaced by a detection call. All failures are fatal to the call;
/// the kernel never retries and never partially completes.
#[derive(Debug)]
pub enum DetectError {
    /// The raster could not be decoded or opened.
    Load(image::ImageError),
    /// The configured size range has `min > max` for a dimension.
    InvalidSizeRange(SizeRange),
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(e) => write!(f, "could not load image: {}", e),
            Self::InvalidSizeRange(range) => write!(
                f,
                "invalid size range: width {}..={}, height {}..={} (min must not exceed max)",
                range.min_w, range.max_w, range.min_h, range.max_h
            ),
        }
    }
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::InvalidSizeRange(_) => None,
        }
    }
}

impl From<image::ImageError> for DetectError {
    fn from(e: image::ImageError) -> Self {
        Self::Load(e)
    }
}

// ── Detector ───────────────────────────────────────────────────────────────

/// Primary detection interface.
///
/// Encapsulates the detection configuration. Create once, detect on many
/// images; calls are independent and share nothing but the config.
///
/// # Examples
///
/// ```no_run
/// use rectscan::{Detector, SizeRange};
/// use image::RgbImage;
///
/// let detector = Detector::new(SizeRange::new(10, 500, 10, 500));
/// let image = RgbImage::new(640, 480);
/// let result = detector.detect(&image).unwrap();
/// println!("Found {} boxes", result.bounding_boxes.len());
/// ```
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Create a detector with the given size bounds and default settings.
    pub fn new(size_range: SizeRange) -> Self {
        Self {
            config: DetectConfig {
                size_range,
                ..DetectConfig::default()
            },
        }
    }

    /// Create with full config control.
    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectConfig {
        &mut self.config
    }

    /// Run detection on an in-memory raster.
    ///
    /// An empty `bounding_boxes` list is a successful outcome, not an
    /// error.
    pub fn detect(&self, image: &RgbImage) -> Result<DetectionResult, DetectError> {
        let started = Instant::now();
        let config = &self.config;
        if config.size_range.is_inverted() {
            return Err(DetectError::InvalidSizeRange(config.size_range));
        }

        let (width, height) = image.dimensions();
        let lab = LabBuffer::from_rgb(image);

        let candidates = proposal::find_candidates(image, config);
        tracing::info!("{} candidate boxes after size filter and dedup", candidates.len());

        // Each candidate reads only the shared Lab buffer; collection
        // preserves input order, so discovery-order tie-breaks survive the
        // parallel fan-out.
        let threshold = config.delta_e_threshold;
        let validated: Vec<BoundingBox> = candidates
            .par_iter()
            .filter_map(|c| {
                coherence::validate_outline(c, &lab, threshold).map(|v| BoundingBox {
                    x: c.x,
                    y: c.y,
                    w: c.w,
                    h: c.h,
                    score: v.ratio,
                    validation_ratio: v.ratio,
                    dominant_color: None,
                })
            })
            .collect();
        tracing::info!("{} candidates validated color-coherent", validated.len());

        let mut accepted = exclusivity::select_exclusive(validated, width, height);
        if config.extract_dominant_color {
            for bbox in &mut accepted {
                bbox.dominant_color = dominant::dominant_color(image, bbox.x, bbox.y, bbox.w, bbox.h);
            }
        }
        tracing::info!("{} boxes accepted after exclusivity selection", accepted.len());

        Ok(DetectionResult {
            bounding_boxes: accepted,
            image_size: [width, height],
            delta_e_method: DELTA_E_METHOD.to_string(),
            delta_e_threshold: threshold,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Load an image from disk and run detection on it.
    ///
    /// A decode failure surfaces as [`DetectError::Load`] before any
    /// pipeline stage runs.
    pub fn detect_path(&self, path: &Path) -> Result<DetectionResult, DetectError> {
        let image = image::open(path)?.to_rgb8();
        self.detect(&image)
    }
}
