// Core types shared by the mask, compositor and editor.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Screen pixels for the window.
/// Visual: exactly what minifb shows, one u32 per pixel.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width in pixels
    pub height: usize,     // window height in pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// The photo being cut out. Decoded once, never written to.
#[derive(Debug, Clone)]
pub struct WorkingImage {
    pixels: RgbaImage,
}

impl WorkingImage {
    /// Wrap an already-decoded RGBA image. Zero-sized images are rejected.
    pub fn new(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        Ok(Self { pixels })
    }

    /// Decode PNG/JPEG/... bytes (e.g. the output of the background-removal service).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(Error::Decode)?;
        Self::new(decoded.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// What a brush stroke does to the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    /// Lower alpha toward 0 (hide background).
    Erase,
    /// Raise alpha toward 1 (bring the photo back).
    Restore,
}

/// Active tool in the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Erase,
    Restore,
    Pan,
}

impl Tool {
    /// Brush mode for painting tools, `None` for pan.
    pub fn brush_mode(self) -> Option<BrushMode> {
        match self {
            Tool::Erase => Some(BrushMode::Erase),
            Tool::Restore => Some(BrushMode::Restore),
            Tool::Pan => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Erase => "ERASE",
            Tool::Restore => "RESTORE",
            Tool::Pan => "PAN",
        }
    }
}

/// Brush size (diameter, px) and edge hardness in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub size: f64,
    pub hardness: f64,
}

impl BrushSettings {
    pub fn radius(&self) -> f64 {
        self.size * 0.5
    }
}

/// Pixel bounds touched by a paint call: `[x0, x1) x [y0, y1)`, already clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl DirtyRect {
    pub fn empty() -> Self {
        Self { x0: 0, y0: 0, x1: 0, y1: 0 }
    }

    pub fn full(width: u32, height: u32) -> Self {
        Self { x0: 0, y0: 0, x1: width, y1: height }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn union(&self, other: &DirtyRect) -> DirtyRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        DirtyRect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_image_is_rejected() {
        let err = WorkingImage::new(RgbaImage::new(0, 4)).unwrap_err();
        assert!(matches!(err, Error::EmptyImage { width: 0, height: 4 }));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = WorkingImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn union_ignores_empty_side() {
        let a = DirtyRect { x0: 2, y0: 3, x1: 5, y1: 9 };
        assert_eq!(a.union(&DirtyRect::empty()), a);
        assert_eq!(DirtyRect::empty().union(&a), a);

        let b = DirtyRect { x0: 0, y0: 4, x1: 3, y1: 12 };
        assert_eq!(a.union(&b), DirtyRect { x0: 0, y0: 3, x1: 5, y1: 12 });
    }

    #[test]
    fn pan_tool_has_no_brush_mode() {
        assert_eq!(Tool::Pan.brush_mode(), None);
        assert_eq!(Tool::Restore.brush_mode(), Some(BrushMode::Restore));
    }
}
