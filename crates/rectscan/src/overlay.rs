//! Overlay rendering for accepted detections.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::BoundingBox;

/// Outline color for accepted boxes.
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw the accepted boxes on a copy of the original image.
///
/// The input is untouched; the returned overlay has each box's outline
/// drawn in green.
pub fn render_overlay(image: &RgbImage, boxes: &[BoundingBox]) -> RgbImage {
    let mut overlay = image.clone();
    for bbox in boxes {
        let rect = Rect::at(bbox.x, bbox.y).of_size(bbox.w, bbox.h);
        draw_hollow_rect_mut(&mut overlay, rect, BOX_COLOR);
    }
    overlay
}
