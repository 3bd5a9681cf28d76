// Compositing: photo x mask -> cutout, and cutout -> window pixels.
// Visual expectation: erased areas turn into the checkerboard, the rest is the photo.

use image::{Rgba, RgbaImage};
use kurbo::Point;

use crate::gamma::GammaLut;
use crate::mask::Mask;
use crate::types::{DirtyRect, FrameBuffer, WorkingImage};
use crate::viewport::Viewport;

/// Checker square size in screen pixels.
pub const CHECKER_SIZE: usize = 10;
const CHECKER_LIGHT: [u8; 3] = [0x2a, 0x2a, 0x2a];
const CHECKER_DARK: [u8; 3] = [0x14, 0x14, 0x14];
/// Canvas colour around the image.
pub const BACKGROUND: u32 = 0x00_11_11_11;

/// Photo alpha scaled by mask alpha (destination-in). Colour is copied untouched.
#[inline]
fn masked(px: Rgba<u8>, mask_alpha: f32) -> Rgba<u8> {
    let a = (px[3] as f32 * mask_alpha).round().clamp(0.0, 255.0) as u8;
    Rgba([px[0], px[1], px[2], a])
}

/// Full composite into a new buffer.
pub fn render(image: &WorkingImage, mask: &Mask) -> RgbaImage {
    let mut out = RgbaImage::new(image.width(), image.height());
    render_rect(image, mask, DirtyRect::full(image.width(), image.height()), &mut out);
    out
}

/// Recomposite only `rect` into `out`, in place.
/// `out`, `mask` and `image` must share dimensions; the rect is clipped to them.
pub fn render_rect(image: &WorkingImage, mask: &Mask, rect: DirtyRect, out: &mut RgbaImage) {
    debug_assert_eq!(mask.dimensions(), (image.width(), image.height()));
    debug_assert_eq!(out.dimensions(), (image.width(), image.height()));

    let src = image.pixels();
    let x1 = rect.x1.min(image.width());
    let y1 = rect.y1.min(image.height());
    for y in rect.y0..y1 {
        for x in rect.x0..x1 {
            out.put_pixel(x, y, masked(*src.get_pixel(x, y), mask.alpha(x, y)));
        }
    }
}

#[inline]
fn checker(sx: usize, sy: usize) -> [u8; 3] {
    if ((sx / CHECKER_SIZE) + (sy / CHECKER_SIZE)) % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK }
}

#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Draw the composite into the window through the viewport.
///
/// Nearest-neighbour sampling; partially transparent pixels are mixed over the
/// checkerboard in linear light so soft brush edges don't go dark.
pub fn present(display: &RgbaImage, viewport: &Viewport, screen: &mut FrameBuffer, lut: &GammaLut) {
    let (w, h) = (display.width() as f64, display.height() as f64);

    for sy in 0..screen.height {
        let row = sy * screen.width;
        for sx in 0..screen.width {
            // Sample at the screen pixel centre.
            let p = viewport.to_image_space(Point::new(sx as f64 + 0.5, sy as f64 + 0.5));
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h {
                screen.pixels[row + sx] = BACKGROUND; // visual: empty canvas
                continue;
            }

            let px = display.get_pixel(p.x as u32, p.y as u32);
            let bg = checker(sx, sy);
            let a = px[3];
            screen.pixels[row + sx] = match a {
                255 => pack(px[0], px[1], px[2]),
                0 => pack(bg[0], bg[1], bg[2]),
                _ => {
                    let a = a as f32 / 255.0;
                    let inv = 1.0 - a;
                    let mut rgb = [0u8; 3];
                    for c in 0..3 {
                        let fg = lut.srgb_u8_to_linear(px[c]);
                        let back = lut.srgb_u8_to_linear(bg[c]);
                        rgb[c] = lut.linear_to_srgb_u8(a * fg + inv * back);
                    }
                    pack(rgb[0], rgb[1], rgb[2])
                }
            };
        }
    }
}
