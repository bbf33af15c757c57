//! Greedy non-overlap selection on an occupancy mask.
//!
//! Winner-take-all non-maximum suppression: higher validation ratios claim
//! image area first; any later box that touches claimed area is dropped
//! permanently, regardless of its own merit.

use crate::geometry::OccupancyMask;
use crate::BoundingBox;

/// Select a non-overlapping subset of the validated candidates.
///
/// Candidates are sorted by score descending; `Vec::sort_by` is stable, so
/// equal scores keep their discovery order, which fixes the tie-break and
/// makes the output deterministic. Accepted boxes mark their full
/// rectangular region occupied, not just the outline.
pub(crate) fn select_exclusive(
    mut candidates: Vec<BoundingBox>,
    width: u32,
    height: u32,
) -> Vec<BoundingBox> {
    // Scores are validation ratios in [0, 1], never NaN.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

    let mut mask = OccupancyMask::new(width, height);
    let mut accepted = Vec::new();
    for bbox in candidates {
        if mask.overlaps(bbox.x, bbox.y, bbox.w, bbox.h) {
            continue;
        }
        mask.mark(bbox.x, bbox.y, bbox.w, bbox.h);
        accepted.push(bbox);
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x: i32, y: i32, w: u32, h: u32, score: f32) -> BoundingBox {
        BoundingBox {
            x,
            y,
            w,
            h,
            score,
            validation_ratio: score,
            dominant_color: None,
        }
    }

    fn regions_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.x < b.x + b.w as i32
            && b.x < a.x + a.w as i32
            && a.y < b.y + b.h as i32
            && b.y < a.y + a.h as i32
    }

    #[test]
    fn higher_score_wins_overlap() {
        let selected = select_exclusive(
            vec![bbox(10, 10, 20, 20, 0.85), bbox(15, 15, 20, 20, 0.95)],
            100,
            100,
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].score, 0.95);
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        // Two overlapping candidates with identical scores: the one
        // discovered first survives.
        let first = bbox(10, 10, 20, 20, 0.9);
        let second = bbox(15, 15, 20, 20, 0.9);
        let selected = select_exclusive(vec![first.clone(), second], 100, 100);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0], first);
    }

    #[test]
    fn disjoint_boxes_all_survive_in_score_order() {
        let selected = select_exclusive(
            vec![
                bbox(0, 0, 10, 10, 0.85),
                bbox(50, 50, 10, 10, 0.99),
                bbox(30, 0, 10, 10, 0.90),
            ],
            100,
            100,
        );
        let scores: Vec<f32> = selected.iter().map(|b| b.score).collect();
        assert_eq!(scores, vec![0.99, 0.90, 0.85]);
    }

    #[test]
    fn rejection_is_permanent() {
        // The middle box conflicts with the winner; the last box conflicts
        // only with the middle one and must therefore survive.
        let selected = select_exclusive(
            vec![
                bbox(0, 0, 20, 20, 1.0),
                bbox(10, 10, 20, 20, 0.95),
                bbox(25, 25, 10, 10, 0.90),
            ],
            100,
            100,
        );
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].score, 1.0);
        assert_eq!(selected[1].score, 0.90);
    }

    #[test]
    fn selected_regions_never_overlap() {
        let mut candidates = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                candidates.push(bbox(i * 7, j * 7, 10, 10, 0.8 + (i + j) as f32 * 0.01));
            }
        }
        let selected = select_exclusive(candidates, 100, 100);
        assert!(!selected.is_empty());
        for (i, a) in selected.iter().enumerate() {
            for b in &selected[i + 1..] {
                assert!(!regions_overlap(a, b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn fully_off_image_box_is_accepted_trivially() {
        let selected = select_exclusive(
            vec![bbox(200, 200, 10, 10, 0.9), bbox(10, 10, 10, 10, 0.8)],
            100,
            100,
        );
        assert_eq!(selected.len(), 2);
    }
}
