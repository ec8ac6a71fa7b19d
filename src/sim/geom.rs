//! Hit-test primitives

use glam::Vec2;

/// True if `point` lies inside or on the circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    /// Rectangle inset from a viewport by fractions of its size
    pub fn inset(width: f32, height: f32, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(width * left, height * top, width * right, height * bottom)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains_boundary() {
        let c = Vec2::new(10.0, 10.0);
        assert!(circle_contains(c, 5.0, Vec2::new(15.0, 10.0)));
        assert!(circle_contains(c, 5.0, c));
        assert!(!circle_contains(c, 5.0, Vec2::new(15.1, 10.0)));
        assert!(!circle_contains(c, 5.0, Vec2::new(14.0, 14.0)));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::inset(100.0, 200.0, 0.15, 0.25, 0.85, 0.8);
        assert!(r.min.abs_diff_eq(Vec2::new(15.0, 50.0), 1e-4));
        assert!(r.max.abs_diff_eq(Vec2::new(85.0, 160.0), 1e-4));
        assert!(r.contains(Vec2::new(15.5, 50.0)));
        assert!(r.contains(Vec2::new(50.0, 100.0)));
        assert!(!r.contains(Vec2::new(85.0, 100.0)));
        assert!(!r.contains(Vec2::new(50.0, 10.0)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let r = Rect::default();
        assert!(r.is_empty());
        assert!(!r.contains(Vec2::ZERO));
    }
}
