//! Representative region color.

use image::RgbImage;

/// Mean device color of the box region (the centroid of a single-cluster
/// reduction), formatted as `#rrggbb` in display channel order.
///
/// Returns `None` when the region contains no pixels inside the image;
/// upstream size filtering makes that unreachable in the normal pipeline.
pub(crate) fn dominant_color(image: &RgbImage, x: i32, y: i32, w: u32, h: u32) -> Option<String> {
    let (img_w, img_h) = image.dimensions();
    let x1 = x.max(0) as u32;
    let y1 = y.max(0) as u32;
    let x2 = (x.saturating_add(w as i32)).clamp(0, img_w as i32) as u32;
    let y2 = (y.saturating_add(h as i32)).clamp(0, img_h as i32) as u32;
    if x1 >= x2 || y1 >= y2 {
        return None;
    }

    let mut sums = [0u64; 3];
    for py in y1..y2 {
        for px in x1..x2 {
            let pixel = image.get_pixel(px, py);
            sums[0] += pixel[0] as u64;
            sums[1] += pixel[1] as u64;
            sums[2] += pixel[2] as u64;
        }
    }
    let count = ((x2 - x1) as u64) * ((y2 - y1) as u64);
    let mean = |sum: u64| (sum as f64 / count as f64).round() as u8;
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        mean(sums[0]),
        mean(sums[1]),
        mean(sums[2])
    ))
}
