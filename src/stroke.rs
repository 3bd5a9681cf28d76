// Turns pointer motion into brush dabs.
// Visual expectation: dragging fast still leaves a solid band, not a dotted line.

use kurbo::Point;

use crate::mask::Mask;
use crate::types::{BrushMode, DirtyRect};

/// Brush parameters for one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dab {
    pub radius: f64,
    pub hardness: f64,
    pub mode: BrushMode,
}

/// Distance between dabs along a segment: half the radius, never below half a pixel.
pub fn dab_spacing(radius: f64) -> f64 {
    (radius * 0.5).max(0.5)
}

/// Stamp the first point of a gesture.
pub fn stamp(mask: &mut Mask, at: Point, dab: &Dab) -> DirtyRect {
    mask.paint(at, dab.radius, dab.hardness, dab.mode)
}

/// Paint the segment `from -> to` (image space).
///
/// `from` was already stamped by the previous call, so sampling starts one
/// step along the segment and always ends exactly on `to`.
pub fn stroke_segment(mask: &mut Mask, from: Point, to: Point, dab: &Dab) -> DirtyRect {
    let length = from.distance(to);
    if !length.is_finite() {
        return DirtyRect::empty();
    }

    let steps = (length / dab_spacing(dab.radius)).ceil().max(1.0) as usize;
    let mut dirty = DirtyRect::empty();
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let p = from.lerp(to, t);
        dirty = dirty.union(&mask.paint(p, dab.radius, dab.hardness, dab.mode));
    }
    dirty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eraser(radius: f64) -> Dab {
        Dab { radius, hardness: 1.0, mode: BrushMode::Erase }
    }

    #[test]
    fn long_segment_leaves_no_gaps() {
        let mut m = Mask::new(100, 20);
        let dab = eraser(3.0);
        stamp(&mut m, Point::new(5.0, 10.0), &dab);
        stroke_segment(&mut m, Point::new(5.0, 10.0), Point::new(90.0, 10.0), &dab);
        for x in 5..=90 {
            for y in 8..=12 {
                assert_eq!(m.alpha(x, y), 0.0, "gap at ({x},{y})");
            }
        }
        assert_eq!(m.alpha(95, 10), 1.0);
    }

    #[test]
    fn diagonal_segment_is_continuous() {
        let mut m = Mask::new(64, 64);
        let dab = eraser(2.5);
        let (a, b) = (Point::new(4.0, 4.0), Point::new(60.0, 50.0));
        stamp(&mut m, a, &dab);
        stroke_segment(&mut m, a, b, &dab);
        for i in 0..=100 {
            let p = a.lerp(b, i as f64 / 100.0);
            let (x, y) = (p.x.round() as u32, p.y.round() as u32);
            assert_eq!(m.alpha(x, y), 0.0, "gap near ({x},{y})");
        }
    }

    #[test]
    fn zero_length_segment_stamps_once() {
        let mut m = Mask::new(20, 20);
        let dirty = stroke_segment(&mut m, Point::new(10.0, 10.0), Point::new(10.0, 10.0), &eraser(2.0));
        assert_eq!(dirty, DirtyRect { x0: 8, y0: 8, x1: 13, y1: 13 });
        assert_eq!(m.alpha(10, 10), 0.0);
    }

    #[test]
    fn dirty_rect_covers_the_whole_segment() {
        let mut m = Mask::new(50, 50);
        let dirty = stroke_segment(&mut m, Point::new(10.0, 10.0), Point::new(40.0, 30.0), &eraser(4.0));
        assert!(dirty.x0 <= 8 && dirty.y0 <= 10);
        assert!(dirty.x1 >= 44 && dirty.y1 >= 34);
    }

    #[test]
    fn spacing_never_exceeds_half_radius() {
        assert_eq!(dab_spacing(10.0), 5.0);
        assert_eq!(dab_spacing(0.2), 0.5);
    }
}
