//! Velocity integration and steering helpers.
//!
//! Integration is split into two half steps: half of the velocity change is
//! applied, the position advances with that midpoint velocity, then the other
//! half is applied. Separation's overlap bias assumes this error profile.

use glam::Vec2;

use crate::entity::Entity;
use crate::types::Faces;

/// `max` value meaning "no cap".
pub const DEFAULT_MAX_VELOCITY: f32 = 10_000.0;

/// Advance one velocity component by `elapsed` seconds.
///
/// Acceleration wins over drag. Drag shrinks the magnitude toward zero and never
/// flips the sign. The result is clamped to `[-max, max]` unless `max` is
/// [`DEFAULT_MAX_VELOCITY`].
pub fn compute_velocity(velocity: f32, acceleration: f32, drag: f32, max: f32, elapsed: f32) -> f32 {
    let mut v = velocity;
    if acceleration != 0.0 {
        v += acceleration * elapsed;
    } else if drag != 0.0 {
        let d = drag * elapsed;
        if v - d > 0.0 {
            v -= d;
        } else if v + d < 0.0 {
            v += d;
        } else {
            v = 0.0;
        }
    }

    if v != 0.0 && max != DEFAULT_MAX_VELOCITY {
        if v > max {
            v = max;
        } else if v < -max {
            v = -max;
        }
    }
    v
}

/// One half-step integration of a single axis.
///
/// Returns `(velocity_after, position_delta)`. The stored velocity ends at the
/// value [`compute_velocity`] would give; the position uses the midpoint velocity.
pub fn integrate(velocity: f32, acceleration: f32, drag: f32, max: f32, elapsed: f32) -> (f32, f32) {
    let half = (compute_velocity(velocity, acceleration, drag, max, elapsed) - velocity) / 2.0;
    let mid = velocity + half;
    let delta = mid * elapsed;
    (mid + half, delta)
}

/// Velocity of `speed` along `degrees` (0 = right, 90 = down).
pub fn velocity_from_angle(degrees: f32, speed: f32) -> Vec2 {
    let speed = if speed.is_nan() { 0.0 } else { speed };
    let a = degrees.to_radians();
    Vec2::new(a.cos() * speed, a.sin() * speed)
}

/// Velocity of `speed` in the direction an entity faces. Unknown facings yield zero.
pub fn velocity_from_facing(facing: Faces, speed: f32) -> Vec2 {
    let degrees = match facing {
        Faces::LEFT => 180.0,
        Faces::RIGHT => 0.0,
        Faces::UP => -90.0,
        Faces::DOWN => 90.0,
        _ => return Vec2::ZERO,
    };
    velocity_from_angle(degrees, speed)
}

pub fn distance_to_point(a: &Entity, target: Vec2) -> f32 {
    a.reference_point().distance(target)
}

pub fn distance_between(a: &Entity, b: &Entity) -> f32 {
    a.reference_point().distance(b.reference_point())
}

/// Angle from `a` to `target`, radians unless `as_degrees`.
pub fn angle_to_point(a: &Entity, target: Vec2, as_degrees: bool) -> f32 {
    let d = target - a.reference_point();
    let r = d.y.atan2(d.x);
    if as_degrees { r.to_degrees() } else { r }
}

pub fn angle_between(a: &Entity, b: &Entity, as_degrees: bool) -> f32 {
    angle_to_point(a, b.reference_point(), as_degrees)
}

/// Point the entity's velocity at `target`.
///
/// With `max_time_ms > 0` the speed is chosen so the target is reached in that time.
pub fn move_towards_point(source: &mut Entity, target: Vec2, speed: f32, max_time_ms: f32) {
    let a = angle_to_point(source, target, false);
    let speed = if max_time_ms > 0.0 {
        distance_to_point(source, target) / (max_time_ms / 1000.0)
    } else {
        speed
    };
    source.velocity = Vec2::new(a.cos() * speed, a.sin() * speed);
}

/// Zero the velocity and accelerate toward `target`, capping each axis.
pub fn accelerate_towards_point(source: &mut Entity, target: Vec2, accel: f32, max_x: f32, max_y: f32) {
    let a = angle_to_point(source, target, false);
    source.velocity = Vec2::ZERO;
    source.acceleration = Vec2::new(a.cos() * accel, a.sin() * accel);
    source.max_velocity = Vec2::new(max_x, max_y);
}
