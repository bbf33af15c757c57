//! Candidate generation: edge map → contours → size-filtered, deduplicated
//! bounding boxes.
//!
//! Candidates carry no score yet; downstream stages treat the output as a
//! set. Discovery order follows the contour scan and is deterministic;
//! selection tie-breaks depend on it.

use std::collections::HashSet;

use image::{GrayImage, RgbImage};

use super::config::{
    DetectConfig, EdgeMethod, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD,
    SOBEL_MAGNITUDE_THRESHOLD,
};
use crate::BoundingBoxKey;

/// A proposed box prior to coherence validation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Propose candidate boxes from edge contours.
pub(crate) fn find_candidates(image: &RgbImage, config: &DetectConfig) -> Vec<Candidate> {
    let gray = image::imageops::grayscale(image);
    let edges = match config.edge_method {
        EdgeMethod::Canny => canny_edge_map(&gray),
        EdgeMethod::Sobel => sobel_edge_map(&gray),
    };

    let contours = imageproc::contours::find_contours::<i32>(&edges);

    let mut seen: HashSet<BoundingBoxKey> = HashSet::new();
    let mut candidates = Vec::new();
    for contour in &contours {
        let Some(candidate) = bounding_rect(&contour.points) else {
            continue;
        };
        if !config.size_range.contains(candidate.w, candidate.h) {
            continue;
        }
        let key = BoundingBoxKey {
            x: candidate.x,
            y: candidate.y,
            w: candidate.w,
            h: candidate.h,
        };
        if !seen.insert(key) {
            continue;
        }
        candidates.push(candidate);
    }
    candidates
}

fn canny_edge_map(gray: &GrayImage) -> GrayImage {
    imageproc::edges::canny(gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD)
}

/// Sobel gradient magnitude normalized to [0, 255] over the whole image,
/// binarized at the fixed threshold. A flat image has zero maximum
/// magnitude and yields an empty edge map.
fn sobel_edge_map(gray: &GrayImage) -> GrayImage {
    let gx = imageproc::gradients::horizontal_sobel(gray);
    let gy = imageproc::gradients::vertical_sobel(gray);
    let (w, h) = gray.dimensions();

    let mut magnitudes = vec![0.0f32; (w as usize) * (h as usize)];
    let mut max_magnitude = 0.0f32;
    for (out, (&dx, &dy)) in magnitudes
        .iter_mut()
        .zip(gx.as_raw().iter().zip(gy.as_raw().iter()))
    {
        let dx = dx as i32;
        let dy = dy as i32;
        let mag = ((dx * dx + dy * dy) as f32).sqrt();
        *out = mag;
        if mag > max_magnitude {
            max_magnitude = mag;
        }
    }

    let mut binary = vec![0u8; magnitudes.len()];
    if max_magnitude > 0.0 {
        let scale = 255.0 / max_magnitude;
        for (out, &mag) in binary.iter_mut().zip(magnitudes.iter()) {
            if mag * scale > SOBEL_MAGNITUDE_THRESHOLD {
                *out = 255;
            }
        }
    }
    GrayImage::from_raw(w, h, binary).expect("edge map dimensions match")
}

/// Axis-aligned bounding rectangle of a contour's points.
fn bounding_rect(points: &[imageproc::point::Point<i32>]) -> Option<Candidate> {
    let first = points.first()?;
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(Candidate {
        x: min_x,
        y: min_y,
        w: (max_x - min_x + 1) as u32,
        h: (max_y - min_y + 1) as u32,
    })
}
