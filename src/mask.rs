use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::geom::{Circle, Line, Rect};
use crate::narrowphase::Narrowphase;

/// Shape a mask takes inside its bounding box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MaskShape {
    /// The whole box.
    #[default]
    Quad,
    /// Circle inscribed in the box; radius is half the width.
    Circle,
    /// The box's top-left corner.
    Point,
    /// Segment from the top-left corner to the bottom-right corner.
    Line,
}

/// Resolved geometry of a mask at its current position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MaskGeometry {
    Rect(Rect),
    Circle(Circle),
    Point(Vec2),
    Line(Line),
}

/// Collision shape owned by an entity, tracking this frame's motion.
///
/// `position` is the top-left of the mask box (parent position + `offset`) and
/// `last` is where it was when the frame began. The difference drives the
/// per-axis deltas and the swept hull.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionMask {
    pub shape: MaskShape,
    pub position: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    pub last: Vec2,
}

impl CollisionMask {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            shape: MaskShape::Quad,
            position,
            size,
            offset: Vec2::ZERO,
            last: position,
        }
    }

    /// Switch to a circle of the given diameter.
    pub fn set_circle(&mut self, diameter: f32) {
        self.shape = MaskShape::Circle;
        self.size = Vec2::splat(diameter);
    }

    /// Sync to the parent, then snapshot the frame start.
    pub fn pre_update(&mut self, parent_position: Vec2) {
        self.update(parent_position);
        self.last = self.position;
    }

    /// Recompute position from the parent; run after motion, before collision.
    pub fn update(&mut self, parent_position: Vec2) {
        self.position = parent_position + self.offset;
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn delta(&self) -> Vec2 {
        self.position - self.last
    }

    pub fn delta_x(&self) -> f32 {
        self.position.x - self.last.x
    }

    pub fn delta_y(&self) -> f32 {
        self.position.y - self.last.y
    }

    pub fn delta_abs(&self) -> Vec2 {
        self.delta().abs()
    }

    /// Box covering the mask at both the start and the end of the frame.
    pub fn hull(&self) -> Rect {
        let min = self.position.min(self.last);
        Rect::from_min_size(min, self.size + self.delta_abs())
    }

    /// Swept-hull overlap test used by the broad phase.
    pub fn check_hull_intersection(&self, other: &CollisionMask) -> bool {
        self.hull().intersects(&other.hull())
    }

    pub fn geometry(&self) -> MaskGeometry {
        match self.shape {
            MaskShape::Quad => MaskGeometry::Rect(self.bounds()),
            MaskShape::Circle => {
                let r = self.size.x / 2.0;
                MaskGeometry::Circle(Circle::new(self.position + Vec2::splat(r), r))
            }
            MaskShape::Point => MaskGeometry::Point(self.position),
            MaskShape::Line => MaskGeometry::Line(Line::new(self.position, self.position + self.size)),
        }
    }

    /// Exact shape-vs-shape test at the current positions.
    pub fn intersects(&self, other: &CollisionMask) -> bool {
        use MaskGeometry as G;
        match (self.geometry(), other.geometry()) {
            (G::Rect(a), G::Rect(b)) => Narrowphase::rect_rect(&a, &b),
            (G::Circle(a), G::Circle(b)) => Narrowphase::circle_circle(&a, &b),
            (G::Circle(c), G::Rect(r)) | (G::Rect(r), G::Circle(c)) => Narrowphase::circle_rect(&c, &r),
            (G::Point(p), G::Rect(r)) | (G::Rect(r), G::Point(p)) => Narrowphase::point_rect(p, &r),
            (G::Point(p), G::Circle(c)) | (G::Circle(c), G::Point(p)) => Narrowphase::point_circle(p, &c),
            (G::Point(p), G::Line(l)) | (G::Line(l), G::Point(p)) => Narrowphase::point_line(p, &l),
            (G::Point(a), G::Point(b)) => a == b,
            (G::Line(a), G::Line(b)) => Narrowphase::segment_segment(&a, &b).is_some(),
            (G::Line(l), G::Circle(c)) | (G::Circle(c), G::Line(l)) => Narrowphase::segment_circle(&l, &c),
            (G::Line(l), G::Rect(r)) | (G::Rect(r), G::Line(l)) => Narrowphase::segment_rect(&l, &r).is_some(),
        }
    }

    /// Test against a raw world-space rectangle (e.g. a tile cell).
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        match self.geometry() {
            MaskGeometry::Rect(r) => Narrowphase::rect_rect(&r, rect),
            MaskGeometry::Circle(c) => Narrowphase::circle_rect(&c, rect),
            MaskGeometry::Point(p) => Narrowphase::point_rect(p, rect),
            MaskGeometry::Line(l) => Narrowphase::segment_rect(&l, rect).is_some(),
        }
    }
}
