//! Shared test utilities for image-based unit tests.

use image::{Rgb, RgbImage};

/// Render a flat background with one solid axis-aligned rectangle.
///
/// `rect` is `(x, y, w, h)`; pixels outside the image are skipped, so the
/// rectangle may hang off the edges.
pub(crate) fn draw_rect_image(
    w: u32,
    h: u32,
    rect: (i32, i32, u32, u32),
    fill: Rgb<u8>,
    bg: Rgb<u8>,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, bg);
    let (rx, ry, rw, rh) = rect;
    for y in ry..ry + rh as i32 {
        for x in rx..rx + rw as i32 {
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                img.put_pixel(x as u32, y as u32, fill);
            }
        }
    }
    img
}
