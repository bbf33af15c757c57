//! Outline color-coherence validation.
//!
//! A candidate survives when at least [`VALIDATION_CUTOFF`] of its visible
//! outline pixels have a perceptually close match within
//! [`NEIGHBOR_WINDOW`] steps along the walk, in either direction, wrapping
//! cyclically at the ends. Walk-index distance is deliberate: it models
//! "nearby on the outline" as a closed loop, not spatial adjacency, and
//! the results depend on that exact semantic.

use super::config::{NEIGHBOR_WINDOW, VALIDATION_CUTOFF};
use super::proposal::Candidate;
use crate::color::{delta_e_cie76_sq, LabBuffer, LabColor};
use crate::geometry::outline_coordinates;

/// Validation outcome for one accepted candidate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Validation {
    /// Fraction of visible outline indices with at least one close match.
    pub ratio: f32,
}

/// Score a candidate's outline against the Lab buffer. Returns `None` when
/// the candidate is rejected: ratio below the cutoff, or no outline pixel
/// visible inside the image.
pub(crate) fn validate_outline(
    candidate: &Candidate,
    lab: &LabBuffer,
    threshold: f32,
) -> Option<Validation> {
    let colors: Vec<LabColor> = outline_coordinates(candidate.x, candidate.y, candidate.w, candidate.h)
        .into_iter()
        .filter(|&(px, py)| lab.contains(px, py))
        .map(|(px, py)| lab.get(px as u32, py as u32))
        .collect();
    if colors.is_empty() {
        return None;
    }

    let ratio = matched_fraction(&colors, threshold);
    (ratio >= VALIDATION_CUTOFF).then_some(Validation { ratio })
}

/// Fraction of outline indices with at least one neighbor within the
/// cyclic walk-index window at Delta-E <= `threshold`.
///
/// One forward pass per offset marks both endpoints of each close pair,
/// which covers the backward direction too (the distance is symmetric).
/// Comparisons run on squared distances over the gathered outline array,
/// one offset at a time, rather than pixel-by-pixel-by-offset.
pub(crate) fn matched_fraction(colors: &[LabColor], threshold: f32) -> f32 {
    let n = colors.len();
    let threshold_sq = threshold * threshold;
    let mut matched = vec![false; n];
    let mut unmatched = n;

    for k in 1..=NEIGHBOR_WINDOW {
        for i in 0..n {
            let j = (i + k) % n;
            if matched[i] && matched[j] {
                continue;
            }
            if delta_e_cie76_sq(colors[i], colors[j]) <= threshold_sq {
                if !matched[i] {
                    matched[i] = true;
                    unmatched -= 1;
                }
                if !matched[j] {
                    matched[j] = true;
                    unmatched -= 1;
                }
            }
        }
        if unmatched == 0 {
            break;
        }
    }

    (n - unmatched) as f32 / n as f32
}
