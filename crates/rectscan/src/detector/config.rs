//! Detection configuration and the fixed algorithm constants.

// ── Fixed constants ────────────────────────────────────────────────────────
//
// These values are part of the detection behavior, not tuning suggestions;
// changing any of them changes which boxes are found and accepted.

/// Canny hysteresis low threshold for the edge map.
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;

/// Canny hysteresis high threshold. The 50/150 pair is a standard wide
/// range that behaves well on general natural images.
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Binarization threshold applied to the Sobel gradient magnitude after
/// normalization to [0, 255].
pub const SOBEL_MAGNITUDE_THRESHOLD: f32 = 100.0;

/// Minimum validation ratio for a candidate to survive coherence
/// validation. Not caller-configurable.
pub const VALIDATION_CUTOFF: f32 = 0.80;

/// Walk-index neighbor window for outline matching: each outline pixel
/// looks up to this many steps forward and backward along the walk,
/// wrapping cyclically.
pub const NEIGHBOR_WINDOW: usize = 10;

/// Default CIE76 acceptance threshold: the conventional just-noticeable
/// difference in standard Lab units.
pub const DEFAULT_DELTA_E_THRESHOLD: f32 = 2.3;

// ── Caller-supplied knobs ──────────────────────────────────────────────────

/// Edge-detection strategy for candidate generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMethod {
    /// Two-threshold Canny edge map.
    #[default]
    Canny,
    /// Thresholded Sobel gradient magnitude.
    Sobel,
}

impl EdgeMethod {
    /// Parse a method name. Unrecognized names fall back to Canny: callers
    /// passing arbitrary strings get the default behavior, not an error.
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "sobel" => Self::Sobel,
            _ => Self::Canny,
        }
    }
}

/// Inclusive bounds on candidate box width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SizeRange {
    /// Minimum width (pixels).
    pub min_w: u32,
    /// Maximum width (pixels).
    pub max_w: u32,
    /// Minimum height (pixels).
    pub min_h: u32,
    /// Maximum height (pixels).
    pub max_h: u32,
}

impl SizeRange {
    pub fn new(min_w: u32, max_w: u32, min_h: u32, max_h: u32) -> Self {
        Self {
            min_w,
            max_w,
            min_h,
            max_h,
        }
    }

    /// True when both dimensions fall inside the inclusive bounds.
    pub fn contains(&self, w: u32, h: u32) -> bool {
        self.min_w <= w && w <= self.max_w && self.min_h <= h && h <= self.max_h
    }

    /// A reversed bound can never match; the detector treats it as caller
    /// error and fails fast instead of silently finding nothing.
    pub(crate) fn is_inverted(&self) -> bool {
        self.min_w > self.max_w || self.min_h > self.max_h
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min_w: 0,
            max_w: 10_000,
            min_h: 0,
            max_h: 10_000,
        }
    }
}

/// Configuration for one detection call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Inclusive candidate size bounds.
    pub size_range: SizeRange,
    /// CIE76 Delta-E threshold for outline neighbor matches.
    pub delta_e_threshold: f32,
    /// Edge-detection strategy for candidate generation.
    pub edge_method: EdgeMethod,
    /// Reduce each accepted region to a representative hex color.
    pub extract_dominant_color: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            size_range: SizeRange::default(),
            delta_e_threshold: DEFAULT_DELTA_E_THRESHOLD,
            edge_method: EdgeMethod::default(),
            extract_dominant_color: false,
        }
    }
}
