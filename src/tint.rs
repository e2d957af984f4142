//! Procedural tinting of template sprites
//!
//! Templates are authored white/grayscale on transparent. Every near-white
//! pixel is body material and takes the creature's color; outlines, shading
//! and transparent pixels pass through. One template per species therefore
//! yields every palette variant.

use image::{Rgb, Rgba, RgbaImage};

/// Each of r, g and b must exceed this for a pixel to count as body material
pub const NEAR_WHITE_THRESHOLD: u8 = 200;

/// True for opaque-or-partial pixels whose r, g and b all exceed the threshold.
///
/// Fully transparent pixels are never near-white, whatever their color bytes.
pub fn is_near_white(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    a != 0 && r > NEAR_WHITE_THRESHOLD && g > NEAR_WHITE_THRESHOLD && b > NEAR_WHITE_THRESHOLD
}

/// Recolor every near-white pixel of `frame` in place. Alpha is preserved.
///
/// Returns the number of pixels recolored.
///
/// # Examples
///
/// ```
/// use image::{Rgb, Rgba, RgbaImage};
/// use pixel_incubator::tint::tint_near_white;
///
/// let mut frame = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 128]));
/// frame.put_pixel(1, 0, Rgba([20, 20, 20, 255]));
///
/// assert_eq!(tint_near_white(&mut frame, Rgb([255, 0, 77])), 1);
/// assert_eq!(frame.get_pixel(0, 0), &Rgba([255, 0, 77, 128]));
/// assert_eq!(frame.get_pixel(1, 0), &Rgba([20, 20, 20, 255]));
/// ```
pub fn tint_near_white(frame: &mut RgbaImage, target: Rgb<u8>) -> usize {
    let [r, g, b] = target.0;
    let mut recolored = 0;

    for pixel in frame.pixels_mut() {
        if is_near_white(pixel) {
            pixel.0[0] = r;
            pixel.0[1] = g;
            pixel.0[2] = b;
            recolored += 1;
        }
    }

    recolored
}

/// Operates directly on a packed RGBA byte buffer, as handed over by a
/// browser canvas. A trailing partial pixel is left alone.
pub fn tint_rgba_bytes(data: &mut [u8], target: Rgb<u8>) -> usize {
    let [r, g, b] = target.0;
    let mut recolored = 0;

    for px in data.chunks_exact_mut(4) {
        if is_near_white(&Rgba([px[0], px[1], px[2], px[3]])) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            recolored += 1;
        }
    }

    recolored
}
