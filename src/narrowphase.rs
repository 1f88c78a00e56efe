use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::geom::{Circle, Line, Rect};

/// Tolerance for point-on-segment tests.
pub const LINE_EPS: f32 = 1e-4;

/// Shape-vs-shape predicates behind [`crate::CollisionMask::intersects`].
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn rect_rect(a: &Rect, b: &Rect) -> bool {
        a.intersects(b)
    }

    fn circle_circle(a: &Circle, b: &Circle) -> bool {
        let rsum = a.radius + b.radius;
        a.center.distance_squared(b.center) <= rsum * rsum
    }

    fn circle_rect(c: &Circle, r: &Rect) -> bool {
        if r.is_degenerate() {
            return false;
        }
        let closest = Vec2::new(
            c.center.x.clamp(r.left(), r.right()),
            c.center.y.clamp(r.top(), r.bottom()),
        );
        (closest - c.center).length_squared() <= c.radius * c.radius
    }

    fn point_rect(p: Vec2, r: &Rect) -> bool {
        r.contains_point(p)
    }

    fn point_circle(p: Vec2, c: &Circle) -> bool {
        c.contains_point(p)
    }

    fn point_line(p: Vec2, l: &Line) -> bool {
        l.contains_point(p, LINE_EPS)
    }

    fn segment_segment(a: &Line, b: &Line) -> Option<Vec2> {
        let r = a.end - a.start;
        let s = b.end - b.start;
        let denom = r.perp_dot(s);
        if denom.abs() < f32::EPSILON {
            // Parallel; collinear overlap counts when an endpoint lies on the other segment.
            for (p, l) in [(a.start, b), (a.end, b), (b.start, a), (b.end, a)] {
                if l.contains_point(p, LINE_EPS) {
                    return Some(p);
                }
            }
            return None;
        }
        let qp = b.start - a.start;
        let t = qp.perp_dot(s) / denom;
        let u = qp.perp_dot(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(a.start + r * t)
        } else {
            None
        }
    }

    fn segment_circle(l: &Line, c: &Circle) -> bool {
        l.closest_point(c.center).distance_squared(c.center) <= c.radius * c.radius
    }

    fn segment_rect(l: &Line, r: &Rect) -> Option<Vec2> {
        if r.is_degenerate() {
            return None;
        }
        // Slab method clamped to the segment's [0, 1] parameter range.
        let d = l.end - l.start;
        let mut tmin = 0.0f32;
        let mut tmax = 1.0f32;

        for (o, dir, lo, hi) in [
            (l.start.x, d.x, r.left(), r.right()),
            (l.start.y, d.y, r.top(), r.bottom()),
        ] {
            if dir.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                core::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return None;
            }
        }
        Some(l.start + d * tmin)
    }
}
