//! arcadia: quadtree broad phase and axis-separation collision for 2D game objects

pub mod types;
pub mod error;
pub mod geom;
pub mod api;
pub mod narrowphase;
pub mod motion;
pub mod mask;
pub mod entity;
pub mod group;
mod arena;
pub mod world;
pub mod quadtree;
pub mod collision;
pub mod tilemap;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::{CollisionError, Result};
pub use crate::geom::{Circle, Line, Rect};
pub use crate::narrowphase::Narrowphase;
pub use crate::mask::{CollisionMask, MaskGeometry, MaskShape};
pub use crate::entity::{Entity, OutOfBounds};
pub use crate::group::Group;
pub use crate::world::World;
pub use crate::quadtree::{List, QuadTree, Traversal};
pub use crate::tilemap::{Tile, TileBlock, TileHitFn, TileLayer};
