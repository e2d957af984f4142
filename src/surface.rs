//! Pixel drawing surface used by the compositor
//!
//! The compositor is the only writer. Anything that can clear, draw an image
//! at the origin, and hand out its pixel buffer can host a creature: a
//! browser canvas, an offscreen buffer, a test double.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::models::Background;

/// Logical edge length of every sprite and surface, in pixels
pub const SPRITE_SIZE: u32 = 32;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Operations the compositor needs from a display.
pub trait DisplaySurface {
    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Draw `image` at the origin, scaled to the fixed square size.
    fn draw_image(&mut self, image: &RgbaImage);

    /// Copy of the current pixel buffer.
    fn read_pixels(&self) -> RgbaImage;

    /// Replace the pixel buffer.
    fn write_pixels(&mut self, pixels: &RgbaImage);

    /// Select the scene shown behind the pixel layer. This is a separate
    /// visual layer and never touches the pixel buffer.
    fn set_background(&mut self, background: Background);
}

/// In-memory square canvas with source-over drawing and nearest-neighbour
/// scaling, matching a browser canvas with image smoothing disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    pixels: RgbaImage,
    background: Option<Background>,
}

impl PixelCanvas {
    pub fn new() -> Self {
        Self::with_size(SPRITE_SIZE)
    }

    pub fn with_size(size: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size, size, TRANSPARENT),
            background: None,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for PixelCanvas {
    fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        let (w, h) = self.pixels.dimensions();
        if image.dimensions() == (w, h) {
            blit_over(&mut self.pixels, image);
        } else {
            let scaled = imageops::resize(image, w, h, FilterType::Nearest);
            blit_over(&mut self.pixels, &scaled);
        }
    }

    fn read_pixels(&self) -> RgbaImage {
        self.pixels.clone()
    }

    fn write_pixels(&mut self, pixels: &RgbaImage) {
        self.pixels = pixels.clone();
    }

    fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }
}

/// Composite `src` over `canvas` at the origin using porter-duff source-over.
pub(crate) fn blit_over(canvas: &mut RgbaImage, src: &RgbaImage) {
    let (cw, ch) = canvas.dimensions();

    for (x, y, pixel) in src.enumerate_pixels() {
        if x >= cw || y >= ch {
            continue;
        }
        // Fully transparent source, skip
        if pixel[3] == 0 {
            continue;
        }
        let dst = canvas.get_pixel(x, y);
        let blended = source_over(pixel, dst);
        canvas.put_pixel(x, y, blended);
    }
}

fn source_over(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return *src;
    }

    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return TRANSPARENT;
    }

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}
