// The alpha mask the user paints on.
// Visual expectation: 1.0 shows the photo pixel, 0.0 makes it transparent,
// anything in between is a soft edge.

use kurbo::Point;

use crate::types::{BrushMode, DirtyRect};

/// Alpha mask in [0,1] per pixel, same size as the working image.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    alpha: Vec<f32>, // length = width * height, row-major
}

impl Mask {
    /// Fully opaque mask (nothing erased yet).
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, alpha: vec![1.0; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Alpha at (x, y). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> f32 {
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    pub fn samples(&self) -> &[f32] {
        &self.alpha
    }

    /// Make everything visible again ("reset mask").
    pub fn reset(&mut self) {
        self.fill(1.0);
    }

    pub fn fill(&mut self, value: f32) {
        let v = value.clamp(0.0, 1.0);
        for a in &mut self.alpha {
            *a = v;
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha.iter().all(|&a| a >= 1.0)
    }

    /// Overwrite this mask with `other` without reallocating. Sizes must match.
    pub fn copy_from(&mut self, other: &Mask) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.alpha.copy_from_slice(&other.alpha);
    }

    /// Dab one round brush at `center` (image pixels).
    ///
    /// Weight is 1.0 inside `radius * hardness` and fades linearly to 0.0 at
    /// `radius`; `hardness = 1` is a hard disc. Erase keeps `min(a, 1 - w)`,
    /// restore keeps `max(a, w)`, so repeated dabs never overshoot.
    /// Anything that falls off the image is skipped.
    pub fn paint(&mut self, center: Point, radius: f64, hardness: f64, mode: BrushMode) -> DirtyRect {
        if !(radius >= 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return DirtyRect::empty();
        }
        let hardness = hardness.clamp(0.0, 1.0);

        // Bounding box of the disc, clipped to the image.
        let left = ((center.x - radius).ceil().max(0.0)) as i64;
        let top = ((center.y - radius).ceil().max(0.0)) as i64;
        let right = ((center.x + radius).floor() as i64).min(self.width as i64 - 1);
        let bottom = ((center.y + radius).floor() as i64).min(self.height as i64 - 1);
        if left > right || top > bottom {
            return DirtyRect::empty();
        }

        let r2 = radius * radius;
        let inner = radius * hardness;
        let fade = radius - inner;
        let w = self.width as usize;

        for py in top..=bottom {
            let dy = py as f64 - center.y;
            let row = py as usize * w;
            for px in left..=right {
                let dx = px as f64 - center.x;
                let d2 = dx * dx + dy * dy;
                if d2 > r2 {
                    continue;
                }

                let weight: f32 = if hardness >= 1.0 {
                    1.0
                } else {
                    let dist = d2.sqrt();
                    if dist <= inner { 1.0 } else { (1.0 - (dist - inner) / fade) as f32 }
                };

                let a = &mut self.alpha[row + px as usize];
                *a = match mode {
                    BrushMode::Erase => a.min(1.0 - weight),
                    BrushMode::Restore => a.max(weight),
                };
            }
        }

        DirtyRect {
            x0: left as u32,
            y0: top as u32,
            x1: right as u32 + 1,
            y1: bottom as u32 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(x: u32, y: u32, c: Point) -> f64 {
        ((x as f64 - c.x).powi(2) + (y as f64 - c.y).powi(2)).sqrt()
    }

    #[test]
    fn new_mask_is_opaque() {
        let m = Mask::new(7, 3);
        assert_eq!(m.samples().len(), 21);
        assert!(m.is_opaque());
    }

    #[test]
    fn hard_erase_hits_exactly_the_disc() {
        let mut m = Mask::new(40, 30);
        let c = Point::new(17.0, 12.0);
        m.paint(c, 6.0, 1.0, BrushMode::Erase);
        for y in 0..30 {
            for x in 0..40 {
                let expected = if dist(x, y, c) <= 6.0 { 0.0 } else { 1.0 };
                assert_eq!(m.alpha(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn hard_restore_hits_exactly_the_disc() {
        let mut m = Mask::new(32, 32);
        m.fill(0.0);
        let c = Point::new(10.5, 20.25);
        m.paint(c, 4.5, 1.0, BrushMode::Restore);
        for y in 0..32 {
            for x in 0..32 {
                let expected = if dist(x, y, c) <= 4.5 { 1.0 } else { 0.0 };
                assert_eq!(m.alpha(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn soft_brush_fades_toward_the_edge() {
        let mut m = Mask::new(41, 41);
        m.paint(Point::new(20.0, 20.0), 10.0, 0.0, BrushMode::Erase);
        assert_eq!(m.alpha(20, 20), 0.0);
        let mid = m.alpha(25, 20);
        assert!((mid - 0.5).abs() < 1e-6, "half way alpha was {mid}");
        assert_eq!(m.alpha(30, 20), 1.0);
        assert!(m.alpha(22, 20) < m.alpha(27, 20));
    }

    #[test]
    fn hardness_widens_the_solid_core() {
        let mut m = Mask::new(41, 41);
        m.paint(Point::new(20.0, 20.0), 10.0, 0.5, BrushMode::Erase);
        assert_eq!(m.alpha(25, 20), 0.0);
        let outer = m.alpha(28, 20);
        assert!(outer > 0.0 && outer < 1.0);
    }

    #[test]
    fn erase_never_raises_and_restore_never_lowers() {
        let mut m = Mask::new(21, 21);
        m.fill(0.3);
        m.paint(Point::new(10.0, 10.0), 8.0, 0.0, BrushMode::Erase);
        assert!(m.samples().iter().all(|&a| a <= 0.3));

        m.fill(0.7);
        m.paint(Point::new(10.0, 10.0), 8.0, 0.0, BrushMode::Restore);
        assert!(m.samples().iter().all(|&a| a >= 0.7));
    }

    #[test]
    fn painting_off_the_edge_is_clipped() {
        let mut m = Mask::new(10, 10);
        let rect = m.paint(Point::new(-3.0, 9.0), 5.0, 1.0, BrushMode::Erase);
        assert_eq!(rect, DirtyRect { x0: 0, y0: 4, x1: 3, y1: 10 });
        assert_eq!(m.alpha(0, 9), 0.0);

        let missed = m.paint(Point::new(500.0, -500.0), 5.0, 1.0, BrushMode::Erase);
        assert!(missed.is_empty());
        let nan = m.paint(Point::new(f64::NAN, 2.0), 5.0, 1.0, BrushMode::Erase);
        assert!(nan.is_empty());
    }

    #[test]
    fn reset_brings_everything_back() {
        let mut m = Mask::new(12, 12);
        m.paint(Point::new(6.0, 6.0), 20.0, 1.0, BrushMode::Erase);
        assert!(m.samples().iter().all(|&a| a == 0.0));
        m.reset();
        assert!(m.is_opaque());
    }

    #[test]
    fn clone_is_independent() {
        let original = Mask::new(8, 8);
        let mut copy = original.clone();
        copy.paint(Point::new(4.0, 4.0), 2.0, 1.0, BrushMode::Erase);
        assert!(original.is_opaque());
        assert!(!copy.is_opaque());
    }
}
