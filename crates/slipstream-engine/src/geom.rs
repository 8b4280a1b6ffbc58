//! Geometry for the flat scene.
//!
//! Convention: units are pixels of the active render target, top-left origin,
//! +X right, +Y down. Renderers convert to NDC in shaders using a viewport
//! uniform.

/// Axis-aligned rectangle in pixels.
///
/// Stored as scalar edges rather than origin/size vectors; everything this
/// engine draws is built from a handful of rects per frame, so the flat form
/// keeps construction sites short.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Flips negative extents so width/height come out non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }

    /// Moves the rectangle by `(dx, dy)` without changing its size.
    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Half-open containment: points on the right/bottom edges are outside.
    #[inline]
    pub fn contains(self, px: f32, py: f32) -> bool {
        let r = self.normalized();
        px >= r.x && px < r.x + r.w && py >= r.y && py < r.y + r.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_keeps_positive_rects() {
        let tile = Rect::new(300.0, 64.0, 128.0, 64.0);
        assert_eq!(tile.normalized(), tile);
    }

    #[test]
    fn normalized_flips_negative_width() {
        // A rect dragged leftwards: origin lands on the left edge.
        let n = Rect::new(200.0, 0.0, -80.0, 40.0).normalized();
        assert_eq!(n, Rect::new(120.0, 0.0, 80.0, 40.0));
    }

    #[test]
    fn normalized_flips_negative_height() {
        let n = Rect::new(0.0, 50.0, 40.0, -30.0).normalized();
        assert_eq!(n, Rect::new(0.0, 20.0, 40.0, 30.0));
    }

    // ── translated ────────────────────────────────────────────────────────

    #[test]
    fn translated_moves_without_resizing() {
        let moved = Rect::new(10.0, 10.0, 44.0, 64.0).translated(-4.0, 16.0);
        assert_eq!(moved, Rect::new(6.0, 26.0, 44.0, 64.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(99.9, 99.9));
        assert!(!r.contains(100.0, 50.0));
        assert!(!r.contains(50.0, 100.0));
    }

    #[test]
    fn contains_works_on_denormalized_rects() {
        assert!(Rect::new(100.0, 0.0, -100.0, 50.0).contains(30.0, 25.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn zero_extent_is_empty() {
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(5.0, 5.0, 1.0, 1.0).is_empty());
    }
}
