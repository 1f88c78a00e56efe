use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

use crate::error::{CollisionError, Result};
use crate::geom::Rect;

/// Bit flags naming the faces of an object (contacts and allowed collisions).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faces(pub u32);

impl Faces {
    pub const NONE: Faces = Faces(0);
    pub const LEFT: Faces = Faces(0x0001);
    pub const RIGHT: Faces = Faces(0x0010);
    pub const UP: Faces = Faces(0x0100);
    pub const DOWN: Faces = Faces(0x1000);
    pub const CEILING: Faces = Faces::UP;
    pub const FLOOR: Faces = Faces::DOWN;
    pub const WALL: Faces = Faces(0x0001 | 0x0010);
    pub const ANY: Faces = Faces(0x0001 | 0x0010 | 0x0100 | 0x1000);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All bits of `other` are set.
    pub fn contains(self, other: Faces) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Any bit of `other` is set.
    pub fn intersects(self, other: Faces) -> bool {
        (self.0 & other.0) != 0
    }
}

impl BitOr for Faces {
    type Output = Faces;
    fn bitor(self, rhs: Faces) -> Faces {
        Faces(self.0 | rhs.0)
    }
}

impl BitOrAssign for Faces {
    fn bitor_assign(&mut self, rhs: Faces) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Faces {
    type Output = Faces;
    fn bitand(self, rhs: Faces) -> Faces {
        Faces(self.0 & rhs.0)
    }
}

impl Not for Faces {
    type Output = Faces;
    fn not(self) -> Faces {
        Faces(!self.0 & Faces::ANY.0)
    }
}

/// Raw generation-checked slot handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    pub index: u32,
    pub generation: u32,
}

/// Handle to an entity owned by a [`crate::World`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub Handle);

/// Handle to a group owned by a [`crate::World`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub Handle);

/// What a group slot (or an overlap target) refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Member {
    Entity(EntityId),
    Group(GroupId),
}

impl From<EntityId> for Member {
    fn from(id: EntityId) -> Self {
        Member::Entity(id)
    }
}

impl From<GroupId> for Member {
    fn from(id: GroupId) -> Self {
        Member::Group(id)
    }
}

/// World-level configuration for motion and collision passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// World bounds; the quadtree root covers exactly this region.
    pub bounds: Rect,
    /// Quadtree granularity: the minimum cell is `(w + h) / (2 * divisions)`.
    pub divisions: u32,
    /// Slack added to the largest correction separation may apply.
    pub overlap_bias: f32,
    /// Hard cap on quadtree depth.
    pub max_depth: u32,
    /// Test each unordered pair at most once per overlap pass.
    pub dedupe_pairs: bool,
    /// Record build/execute timings of the last overlap pass.
    pub enable_timing: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            divisions: 6,
            overlap_bias: 4.0,
            max_depth: 16,
            dedupe_pairs: true,
            enable_timing: false,
        }
    }
}

impl WorldConfig {
    /// Parse a JSON document; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: WorldConfig =
            serde_json::from_str(json).map_err(|e| CollisionError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        if !(b.x.is_finite() && b.y.is_finite() && b.width.is_finite() && b.height.is_finite()) {
            return Err(CollisionError::InvalidConfig("bounds must be finite".into()));
        }
        if b.width < 0.0 || b.height < 0.0 {
            return Err(CollisionError::InvalidConfig("bounds size must be >= 0".into()));
        }
        if self.divisions == 0 {
            return Err(CollisionError::InvalidConfig("divisions must be >= 1".into()));
        }
        if !(self.overlap_bias.is_finite() && self.overlap_bias >= 0.0) {
            return Err(CollisionError::InvalidConfig("overlapBias must be finite and >= 0".into()));
        }
        if self.max_depth == 0 {
            return Err(CollisionError::InvalidConfig("maxDepth must be >= 1".into()));
        }
        Ok(())
    }
}

/// Counters for the most recent overlap pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapStats {
    /// Quadtree nodes allocated.
    pub nodes: usize,
    /// Objects loaded into the tree (each counted once, however many nodes hold it).
    pub entries: usize,
    /// Pairs met at tree nodes, including repeats across nodes.
    pub candidate_pairs: usize,
    /// Distinct unordered pairs met.
    pub unique_pairs: usize,
    /// Pairs whose hulls overlapped and were accepted by the process callback.
    pub overlaps: usize,
    /// Whether any node stopped subdividing because of `max_depth`.
    pub depth_capped: bool,
}

/// Timing breakdown for the last overlap pass.
#[derive(Copy, Clone, Debug, Default)]
pub struct OverlapTiming {
    pub build_ms: f64,
    pub execute_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_constants() {
        assert_eq!(Faces::WALL, Faces::LEFT | Faces::RIGHT);
        assert_eq!(Faces::ANY.0, 0x1111);
        assert!(Faces::ANY.contains(Faces::DOWN));
        assert!(!Faces::WALL.intersects(Faces::DOWN));
        assert_eq!(!Faces::WALL, Faces::UP | Faces::DOWN);
        assert!(Faces::NONE.is_empty());
    }

    #[test]
    fn test_config_json_defaults_and_overrides() {
        let cfg = WorldConfig::from_json(r#"{"divisions": 8, "bounds": {"x": 0, "y": 0, "width": 320, "height": 240}}"#).unwrap();
        assert_eq!(cfg.divisions, 8);
        assert_eq!(cfg.bounds.width, 320.0);
        assert_eq!(cfg.overlap_bias, 4.0);
        assert!(cfg.dedupe_pairs);

        let back = WorldConfig::from_json(&cfg.to_json()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            WorldConfig::from_json(r#"{"divisions": 0}"#),
            Err(CollisionError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_json("not json"),
            Err(CollisionError::Config(_))
        ));
        let cfg = WorldConfig { overlap_bias: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
