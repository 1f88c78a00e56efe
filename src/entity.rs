use glam::Vec2;

use crate::geom::Rect;
use crate::mask::CollisionMask;
use crate::motion::{self, DEFAULT_MAX_VELOCITY};
use crate::types::Faces;

/// What happens when an entity leaves its `world_bounds`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutOfBounds {
    /// Clamp the position back onto the bounds.
    #[default]
    Stop,
    /// Kill the entity.
    Kill,
}

/// A movable, collidable game object.
///
/// Fields are public: game code tunes them directly between frames, and the
/// collision pass reads and corrects them in place.
#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vec2,
    pub size: Vec2,
    /// Position at the start of the frame.
    pub last: Vec2,

    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub drag: Vec2,
    pub max_velocity: Vec2,

    /// Degrees.
    pub angle: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    pub angular_drag: f32,
    pub max_angular: f32,

    pub mass: f32,
    pub elasticity: f32,
    pub immovable: bool,
    /// When false, motion integration is skipped.
    pub moves: bool,
    pub allow_collisions: Faces,
    pub touching: Faces,
    pub was_touching: Faces,

    pub exists: bool,
    pub alive: bool,
    pub active: bool,
    pub visible: bool,

    pub facing: Faces,
    /// Offset from `position` used as the reference point by steering helpers.
    pub origin: Vec2,
    pub health: f32,
    pub world_bounds: Option<Rect>,
    pub out_of_bounds: OutOfBounds,

    pub mask: CollisionMask,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let position = Vec2::new(x, y);
        let size = Vec2::new(width, height);
        Self {
            position,
            size,
            last: position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag: Vec2::ZERO,
            max_velocity: Vec2::splat(DEFAULT_MAX_VELOCITY),
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            angular_drag: 0.0,
            max_angular: DEFAULT_MAX_VELOCITY,
            mass: 1.0,
            elasticity: 0.0,
            immovable: false,
            moves: true,
            allow_collisions: Faces::ANY,
            touching: Faces::NONE,
            was_touching: Faces::NONE,
            exists: true,
            alive: true,
            active: true,
            visible: true,
            facing: Faces::RIGHT,
            origin: Vec2::ZERO,
            health: 1.0,
            world_bounds: None,
            out_of_bounds: OutOfBounds::Stop,
            mask: CollisionMask::new(position, size),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
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

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn reference_point(&self) -> Vec2 {
        self.position + self.origin
    }

    /// Resize the entity and its mask box together.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.mask.size = self.size;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.mask.update(self.position);
    }

    /// Confine the entity to a region, or `None` to lift the restriction.
    pub fn set_world_bounds(&mut self, bounds: Option<Rect>, action: OutOfBounds) {
        self.world_bounds = bounds;
        self.out_of_bounds = action;
    }

    /// Start-of-frame bookkeeping.
    pub fn pre_update(&mut self) {
        self.was_touching = self.touching;
        self.touching = Faces::NONE;
        self.last = self.position;
        self.mask.pre_update(self.position);
    }

    /// Integrate motion, apply the bounds policy, refresh the mask.
    pub fn post_update(&mut self, elapsed: f32) {
        if self.moves {
            self.update_motion(elapsed);
        }
        self.apply_world_bounds();
        self.mask.update(self.position);
    }

    fn update_motion(&mut self, elapsed: f32) {
        let (v, d) = motion::integrate(
            self.angular_velocity,
            self.angular_acceleration,
            self.angular_drag,
            self.max_angular,
            elapsed,
        );
        self.angular_velocity = v;
        self.angle += d;

        let (v, d) = motion::integrate(
            self.velocity.x,
            self.acceleration.x,
            self.drag.x,
            self.max_velocity.x,
            elapsed,
        );
        self.velocity.x = v;
        self.position.x += d;

        let (v, d) = motion::integrate(
            self.velocity.y,
            self.acceleration.y,
            self.drag.y,
            self.max_velocity.y,
            elapsed,
        );
        self.velocity.y = v;
        self.position.y += d;
    }

    fn apply_world_bounds(&mut self) {
        let Some(b) = self.world_bounds else {
            return;
        };
        let p = self.position;
        match self.out_of_bounds {
            OutOfBounds::Kill => {
                if p.x < b.left() || p.x > b.right() || p.y < b.top() || p.y > b.bottom() {
                    self.kill();
                }
            }
            OutOfBounds::Stop => {
                if p.x < b.left() {
                    self.position.x = b.left();
                } else if p.x > b.right() {
                    self.position.x = b.right();
                }
                if p.y < b.top() {
                    self.position.y = b.top();
                } else if p.y > b.bottom() {
                    self.position.y = b.bottom();
                }
            }
        }
    }

    /// Take the entity out of play without releasing it.
    pub fn kill(&mut self) {
        self.alive = false;
        self.exists = false;
    }

    pub fn revive(&mut self) {
        self.alive = true;
        self.exists = true;
    }

    /// Revive at a new position with motion and contacts cleared.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.revive();
        self.touching = Faces::NONE;
        self.was_touching = Faces::NONE;
        self.position = Vec2::new(x, y);
        self.last = self.position;
        self.velocity = Vec2::ZERO;
        self.mask.pre_update(self.position);
    }

    /// Subtract `damage` from health; kills at or below zero.
    pub fn hurt(&mut self, damage: f32) {
        self.health -= damage;
        if self.health <= 0.0 {
            self.kill();
        }
    }

    pub fn is_touching(&self, faces: Faces) -> bool {
        self.touching.intersects(faces)
    }

    /// Touching `faces` this frame but not last frame.
    pub fn just_touched(&self, faces: Faces) -> bool {
        self.touching.intersects(faces) && !self.was_touching.intersects(faces)
    }
}
