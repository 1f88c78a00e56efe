use glam::Vec2;

use crate::error::Result;
use crate::geom::{Circle, Line, Rect};
use crate::tilemap::TileBlock;
use crate::types::*;
use crate::world::World;

/// Callback fired for every pair that overlapped and passed processing.
pub type NotifyFn<'a> = dyn FnMut(&mut World, EntityId, EntityId) + 'a;

/// Callback deciding whether an overlapping pair counts; may mutate the world.
pub type ProcessFn<'a> = dyn FnMut(&mut World, EntityId, EntityId) -> bool + 'a;

/// Public contract of the collision engine.
pub trait CollisionApi {
    /// Broad phase: build a quadtree over `first` (and `second`), report overlapping pairs.
    ///
    /// With no `second`, `first` is tested against itself. Returns whether any
    /// pair overlapped and was accepted by `process` (or `process` is absent).
    fn overlap(
        &mut self,
        first: Member,
        second: Option<Member>,
        notify: Option<&mut NotifyFn<'_>>,
        process: Option<&mut ProcessFn<'_>>,
    ) -> Result<bool>;

    /// `overlap` with [`CollisionApi::separate`] bound as the process callback.
    fn collide(
        &mut self,
        first: Member,
        second: Option<Member>,
        notify: Option<&mut NotifyFn<'_>>,
    ) -> Result<bool>;

    /// Narrow phase: separate two entities on X then Y.
    fn separate(&mut self, a: EntityId, b: EntityId) -> Result<bool>;

    /// Separate an entity from one immovable tile cell.
    fn separate_tile(&mut self, object: EntityId, tile: &TileBlock) -> Result<bool>;

    /// Whether any tile separation happened since the flag was last cleared.
    fn tile_overlap(&self) -> bool;
}

/// Shape-vs-shape predicates used by masks.
pub trait NarrowphaseApi {
    // Overlaps --------------------------------------------------------------

    fn rect_rect(a: &Rect, b: &Rect) -> bool;
    fn circle_circle(a: &Circle, b: &Circle) -> bool;
    fn circle_rect(c: &Circle, r: &Rect) -> bool;
    fn point_rect(p: Vec2, r: &Rect) -> bool;
    fn point_circle(p: Vec2, c: &Circle) -> bool;
    fn point_line(p: Vec2, l: &Line) -> bool;

    // Segments --------------------------------------------------------------

    fn segment_segment(a: &Line, b: &Line) -> Option<Vec2>;
    fn segment_circle(l: &Line, c: &Circle) -> bool;
    fn segment_rect(l: &Line, r: &Rect) -> Option<Vec2>;
}

/// Tile-map side of the tile-collision adapter.
pub trait TileSource {
    /// Collidable cells overlapping `area`, in row-major order.
    fn tiles_overlapping(&self, area: &Rect) -> Vec<TileBlock>;
}
