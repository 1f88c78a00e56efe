//! Plain 2D primitives shared by masks, the quadtree and separation.
//!
//! All rectangles use the same edge convention: `right = x + width` and
//! `bottom = y + height`. Intersection tests are strict, so shapes that only
//! share an edge do not intersect and zero-sized shapes never hit anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left + size).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.half_width(), self.y + self.half_height())
    }

    /// Zero or negative area, or any non-finite component.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !(self.x.is_finite() && self.y.is_finite())
    }

    /// Point containment, inclusive on the left/top edges and exclusive on the right/bottom.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True when `other` lies fully inside `self` (edges may coincide).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Strict overlap test.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    /// Overlap region, or `None` when the rectangles do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, r - x, b - y))
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Rect::new(x, y, r - x, b - y)
    }

    /// Grow by `dx`/`dy` on each side.
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x - dx, self.y - dy, self.width + 2.0 * dx, self.height + 2.0 * dy)
    }

    /// The four edges as segments: top, left, bottom, right.
    pub fn edges(&self) -> [Line; 4] {
        let tl = Vec2::new(self.x, self.y);
        let tr = Vec2::new(self.right(), self.y);
        let bl = Vec2::new(self.x, self.bottom());
        let br = Vec2::new(self.right(), self.bottom());
        [Line::new(tl, tr), Line::new(tl, bl), Line::new(bl, br), Line::new(tr, br)]
    }
}

/// Circle given by its center and radius.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.diameter(),
            self.diameter(),
        )
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}

/// Line segment between two points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn bounds(&self) -> Rect {
        let min = self.start.min(self.end);
        let max = self.start.max(self.end);
        Rect::from_min_size(min, max - min)
    }

    /// Closest point on the segment to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let d = self.end - self.start;
        let len2 = d.length_squared();
        if len2 == 0.0 {
            return self.start;
        }
        let t = ((p - self.start).dot(d) / len2).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Whether `p` lies on the segment, within `eps`.
    pub fn contains_point(&self, p: Vec2, eps: f32) -> bool {
        self.closest_point(p).distance_squared(p) <= eps * eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_use_non_inclusive_convention() {
        let r = Rect::new(10.0, 20.0, 5.0, 8.0);
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.bottom(), 28.0);
        assert_eq!(r.center(), Vec2::new(12.5, 24.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 5.0, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert_eq!(a.intersection(&c), Some(Rect::new(9.5, 5.0, 0.5, 5.0)));
    }

    #[test]
    fn test_zero_size_never_intersects_neighbour_edge() {
        let a = Rect::new(0.0, 0.0, 0.0, 0.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.is_degenerate());
    }

    #[test]
    fn test_union_and_contains() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(10.0, 0.0, 5.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 15.0, 5.0));
        assert!(u.contains_rect(&a));
        assert!(u.contains_rect(&b));
        assert!(!a.contains_rect(&u));
    }

    #[test]
    fn test_segment_closest_point_clamps() {
        let l = Line::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(l.closest_point(Vec2::new(5.0, 3.0)), Vec2::new(5.0, 0.0));
        assert_eq!(l.closest_point(Vec2::new(-4.0, 1.0)), Vec2::ZERO);
        assert!(l.contains_point(Vec2::new(3.0, 0.0), 1e-4));
        assert!(!l.contains_point(Vec2::new(3.0, 0.5), 1e-4));
    }
}
