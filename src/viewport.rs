//! Pan/zoom transform between window pixels and image pixels.
//!
//! The viewport never touches the mask. It only decides where the image is
//! drawn and which image pixel a pointer lands on.

use kurbo::{Point, Vec2};

/// Current pan/zoom. `scale` is kept inside `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    min_scale: f64,
    max_scale: f64,
}

impl Viewport {
    /// Identity view with the given zoom limits.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self { scale: 1.0, offset: Vec2::ZERO, min_scale, max_scale }
            .with_scale_clamped()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale_range(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Window pixel -> image pixel.
    pub fn to_image_space(&self, screen: Point) -> Point {
        ((screen - self.offset).to_vec2() / self.scale).to_point()
    }

    /// Image pixel -> window pixel.
    pub fn to_screen_space(&self, image: Point) -> Point {
        (image.to_vec2() * self.scale).to_point() + self.offset
    }

    /// Shift the image by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom, clamped. Zoom pivots on the canvas origin, so `offset` is left alone.
    pub fn zoom_to(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    pub fn zoom_by(&mut self, step: f64) {
        self.zoom_to(self.scale + step);
    }

    /// Back to `scale = 1`, `offset = (0, 0)`.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom_to(1.0);
    }

    fn with_scale_clamped(mut self) -> Self {
        self.zoom_to(self.scale);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn image_space_undoes_offset_then_scale() {
        let mut vp = Viewport::new(0.5, 5.0);
        vp.zoom_to(2.0);
        vp.pan(Vec2::new(10.0, -4.0));
        let p = vp.to_image_space(Point::new(30.0, 16.0));
        assert!(close(p, Point::new(10.0, 10.0)));
    }

    #[test]
    fn round_trip_holds_across_scales_and_offsets() {
        let scales = [0.5, 0.73, 1.0, 2.5, 5.0];
        let offsets = [Vec2::ZERO, Vec2::new(-120.5, 33.25), Vec2::new(7.0, 900.0)];
        let points = [Point::ORIGIN, Point::new(13.3, 250.9), Point::new(-4.0, 1e4)];
        for &s in &scales {
            for &o in &offsets {
                let mut vp = Viewport::new(0.5, 5.0);
                vp.zoom_to(s);
                vp.pan(o);
                for &p in &points {
                    let back = vp.to_image_space(vp.to_screen_space(p));
                    assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn zoom_clamps_and_keeps_offset() {
        let mut vp = Viewport::new(0.5, 5.0);
        vp.pan(Vec2::new(3.0, 4.0));
        vp.zoom_to(50.0);
        assert_eq!(vp.scale(), 5.0);
        vp.zoom_to(0.01);
        assert_eq!(vp.scale(), 0.5);
        vp.zoom_to(f64::NAN);
        assert_eq!(vp.scale(), 0.5);
        assert_eq!(vp.offset(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = Viewport::new(0.5, 5.0);
        vp.zoom_by(1.5);
        vp.pan(Vec2::new(-8.0, 2.0));
        vp.reset();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), Vec2::ZERO);
    }
}
