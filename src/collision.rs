//! Overlap driver and axis separation.
//!
//! `separate` resolves X then Y independently. Each axis compares the two
//! bodies' frame deltas: the one moving further in the positive direction is
//! treated as having run into the other, the penetration is measured from its
//! leading edge, and anything deeper than `|d1| + |d2| + overlap_bias` is
//! ignored. Diagonal contacts can therefore resolve on one axis only; that is
//! expected.

use std::time::Instant;

use glam::Vec2;

use crate::api::{CollisionApi, NotifyFn, ProcessFn};
use crate::entity::Entity;
use crate::error::Result;
use crate::geom::Rect;
use crate::quadtree::{QuadTree, Traversal};
use crate::tilemap::TileBlock;
use crate::types::*;
use crate::world::World;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }

    /// Face on the positive side (RIGHT / DOWN).
    fn leading(self) -> Faces {
        match self {
            Axis::X => Faces::RIGHT,
            Axis::Y => Faces::DOWN,
        }
    }

    /// Face on the negative side (LEFT / UP).
    fn trailing(self) -> Faces {
        match self {
            Axis::X => Faces::LEFT,
            Axis::Y => Faces::UP,
        }
    }
}

/// One side of a per-axis separation.
trait Body {
    fn immovable(&self) -> bool;
    fn delta(&self, axis: Axis) -> f32;
    /// Box swept along `axis` over this frame.
    fn swept(&self, axis: Axis) -> Rect;
    /// Min edge and size of the collision box on `axis`.
    fn span(&self, axis: Axis) -> (f32, f32);
    fn allows(&self, face: Faces) -> bool;
    fn touch(&mut self, face: Faces);
    fn velocity(&self, axis: Axis) -> f32;
    fn set_velocity(&mut self, axis: Axis, v: f32);
    fn shift(&mut self, axis: Axis, by: f32);
    fn mass(&self) -> f32;
    fn elasticity(&self) -> f32;
    /// Horizontal displacement handed to a body resting on this one.
    fn carry(&self) -> Option<f32>;
    /// Whether a detected overlap on `axis` should be pushed out.
    fn separates(&self, axis: Axis) -> bool;
}

impl Body for Entity {
    fn immovable(&self) -> bool {
        self.immovable
    }

    fn delta(&self, axis: Axis) -> f32 {
        axis.of(self.mask.delta())
    }

    fn swept(&self, axis: Axis) -> Rect {
        let m = &self.mask;
        let d = m.delta();
        match axis {
            Axis::X => Rect::new(m.x() - d.x.max(0.0), m.last.y, m.width() + d.x.abs(), m.height()),
            Axis::Y => Rect::new(m.x(), m.y() - d.y.max(0.0), m.width(), m.height() + d.y.abs()),
        }
    }

    fn span(&self, axis: Axis) -> (f32, f32) {
        (axis.of(self.mask.position), axis.of(self.mask.size))
    }

    fn allows(&self, face: Faces) -> bool {
        self.allow_collisions.intersects(face)
    }

    fn touch(&mut self, face: Faces) {
        self.touching |= face;
    }

    fn velocity(&self, axis: Axis) -> f32 {
        axis.of(self.velocity)
    }

    fn set_velocity(&mut self, axis: Axis, v: f32) {
        *axis.of_mut(&mut self.velocity) = v;
    }

    fn shift(&mut self, axis: Axis, by: f32) {
        *axis.of_mut(&mut self.position) += by;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn elasticity(&self) -> f32 {
        self.elasticity
    }

    fn carry(&self) -> Option<f32> {
        (self.active && self.moves).then(|| self.position.x - self.last.x)
    }

    fn separates(&self, _axis: Axis) -> bool {
        true
    }
}

/// A tile cell seen as a static body.
struct TileBody<'a>(&'a TileBlock);

impl Body for TileBody<'_> {
    fn immovable(&self) -> bool {
        true
    }

    fn delta(&self, _axis: Axis) -> f32 {
        0.0
    }

    fn swept(&self, _axis: Axis) -> Rect {
        self.0.rect
    }

    fn span(&self, axis: Axis) -> (f32, f32) {
        (axis.of(self.0.rect.min()), axis.of(self.0.rect.size()))
    }

    fn allows(&self, face: Faces) -> bool {
        self.0.tile.allow_collisions.intersects(face)
    }

    fn touch(&mut self, _face: Faces) {}

    fn velocity(&self, _axis: Axis) -> f32 {
        0.0
    }

    fn set_velocity(&mut self, _axis: Axis, _v: f32) {}

    fn shift(&mut self, _axis: Axis, _by: f32) {}

    fn mass(&self) -> f32 {
        self.0.tile.mass
    }

    fn elasticity(&self) -> f32 {
        0.0
    }

    fn carry(&self) -> Option<f32> {
        None
    }

    fn separates(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.0.tile.separate_x,
            Axis::Y => self.0.tile.separate_y,
        }
    }
}

fn sign(v: f32) -> f32 {
    if v > 0.0 { 1.0 } else { -1.0 }
}

/// Resolve `a` against `b` on one axis. True when they were touching and
/// allowed to collide on the faces involved.
fn separate_axis<A: Body, B: Body>(a: &mut A, b: &mut B, axis: Axis, bias: f32) -> bool {
    if a.immovable() && b.immovable() {
        return false;
    }

    let d1 = a.delta(axis);
    let d2 = b.delta(axis);
    if d1 == d2 || !a.swept(axis).intersects(&b.swept(axis)) {
        return false;
    }

    let max_overlap = d1.abs() + d2.abs() + bias;
    let (a_min, a_size) = a.span(axis);
    let (b_min, b_size) = b.span(axis);
    let overlap = if d1 > d2 {
        let o = a_min + a_size - b_min;
        if o > max_overlap || !a.allows(axis.leading()) || !b.allows(axis.trailing()) {
            return false;
        }
        a.touch(axis.leading());
        b.touch(axis.trailing());
        o
    } else {
        let o = a_min - b_size - b_min;
        if -o > max_overlap || !a.allows(axis.trailing()) || !b.allows(axis.leading()) {
            return false;
        }
        a.touch(axis.trailing());
        b.touch(axis.leading());
        o
    };
    if overlap == 0.0 {
        return false;
    }
    if !a.separates(axis) || !b.separates(axis) {
        return true;
    }

    let v1 = a.velocity(axis);
    let v2 = b.velocity(axis);
    if !a.immovable() && !b.immovable() {
        a.shift(axis, -overlap * 0.5);
        b.shift(axis, overlap * 0.5);
        let n1 = ((v2 * v2 * b.mass()) / a.mass()).sqrt() * sign(v2);
        let n2 = ((v1 * v1 * a.mass()) / b.mass()).sqrt() * sign(v1);
        let avg = (n1 + n2) * 0.5;
        a.set_velocity(axis, avg + (n1 - avg) * a.elasticity());
        b.set_velocity(axis, avg + (n2 - avg) * b.elasticity());
    } else if !a.immovable() {
        a.shift(axis, -overlap);
        a.set_velocity(axis, v2 - v1 * a.elasticity());
        if axis == Axis::Y && d1 > d2 {
            if let Some(dx) = b.carry() {
                a.shift(Axis::X, dx);
            }
        }
    } else {
        b.shift(axis, overlap);
        b.set_velocity(axis, v1 - v2 * b.elasticity());
        if axis == Axis::Y && d1 < d2 {
            if let Some(dx) = a.carry() {
                b.shift(Axis::X, dx);
            }
        }
    }
    true
}

fn separate_pair<A: Body, B: Body>(a: &mut A, b: &mut B, bias: f32) -> bool {
    let x = separate_axis(a, b, Axis::X, bias);
    let y = separate_axis(a, b, Axis::Y, bias);
    x || y
}

impl World {
    /// Separate two live entities; stale or identical handles do nothing.
    fn separate_entities(&mut self, a: EntityId, b: EntityId) -> bool {
        let bias = self.cfg.overlap_bias;
        let Some((ea, eb)) = self.entity_pair_mut(a, b) else {
            return false;
        };
        ea.mask.update(ea.position);
        eb.mask.update(eb.position);
        separate_pair(ea, eb, bias)
    }
}

impl CollisionApi for World {
    fn overlap(
        &mut self,
        first: Member,
        second: Option<Member>,
        notify: Option<&mut NotifyFn<'_>>,
        process: Option<&mut ProcessFn<'_>>,
    ) -> Result<bool> {
        let list_a = self.collect_entities(first)?;
        let list_b = match second {
            Some(s) if s != first => Some(self.collect_entities(s)?),
            _ => None,
        };

        let t_build = self.cfg.enable_timing.then(Instant::now);
        let mut tree = QuadTree::new(self.cfg.bounds, self.cfg.divisions, self.cfg.max_depth);
        tree.load(self, &list_a, list_b.as_deref());
        let build_ms = t_build.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        let t_exec = self.cfg.enable_timing.then(Instant::now);
        let dedupe = self.cfg.dedupe_pairs;
        let (any, query) = {
            let mut t = Traversal::new(self, notify, process, dedupe);
            let any = tree.execute(&mut t);
            (any, t.stats())
        };
        let execute_ms = t_exec.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        let mut stats = tree.stats();
        stats.candidate_pairs = query.candidate_pairs;
        stats.unique_pairs = query.unique_pairs;
        stats.overlaps = query.overlaps;
        if stats.depth_capped {
            log::warn!(
                "quadtree hit max_depth {} with {} entries; consider fewer divisions",
                self.cfg.max_depth,
                stats.entries
            );
        }
        log::debug!(
            "overlap pass: {} entries, {} nodes, {} candidates ({} unique), {} overlaps",
            stats.entries,
            stats.nodes,
            stats.candidate_pairs,
            stats.unique_pairs,
            stats.overlaps
        );
        let timing = self.cfg.enable_timing.then_some(OverlapTiming { build_ms, execute_ms });
        self.record_pass(stats, timing);
        Ok(any)
    }

    fn collide(
        &mut self,
        first: Member,
        second: Option<Member>,
        notify: Option<&mut NotifyFn<'_>>,
    ) -> Result<bool> {
        let mut separate = |w: &mut World, a: EntityId, b: EntityId| w.separate_entities(a, b);
        self.overlap(first, second, notify, Some(&mut separate))
    }

    fn separate(&mut self, a: EntityId, b: EntityId) -> Result<bool> {
        self.entity(a)?;
        self.entity(b)?;
        Ok(self.separate_entities(a, b))
    }

    fn separate_tile(&mut self, object: EntityId, tile: &TileBlock) -> Result<bool> {
        let bias = self.cfg.overlap_bias;
        let e = self.entity_mut(object)?;
        e.mask.update(e.position);
        let hit = separate_pair(e, &mut TileBody(tile), bias);
        if hit {
            self.set_tile_overlap();
        }
        Ok(hit)
    }

    fn tile_overlap(&self) -> bool {
        self.tile_overlap_flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollisionError;
    use crate::tilemap::Tile;

    fn world() -> World {
        World::new(WorldConfig::default()).unwrap()
    }

    /// Entity that moved from `from` to `to` this frame.
    fn moved(w: &mut World, from: Vec2, to: Vec2, size: Vec2) -> EntityId {
        let mut e = Entity::new(from.x, from.y, size.x, size.y);
        e.pre_update();
        e.position = to;
        e.mask.update(to);
        w.spawn(e)
    }

    #[test]
    fn test_head_on_push_splits_overlap() {
        let mut w = world();
        let a = w.spawn(Entity::new(-5.0, 0.0, 10.0, 10.0).with_velocity(Vec2::new(5.0, 0.0)));
        let b = w.spawn(Entity::new(8.0, 0.0, 10.0, 10.0));
        w.step(1.0);
        assert_eq!(w.entity(a).unwrap().x(), 0.0);

        assert!(w.separate(a, b).unwrap());
        let (ea, eb) = (w.entity(a).unwrap(), w.entity(b).unwrap());
        assert!(ea.is_touching(Faces::RIGHT));
        assert!(eb.is_touching(Faces::LEFT));
        assert_eq!(ea.x(), -1.0);
        assert_eq!(eb.x(), 9.0);
        assert!(ea.right() <= eb.x());
        assert_eq!(ea.velocity.x, 2.5);
        assert_eq!(eb.velocity.x, 2.5);
    }

    #[test]
    fn test_falling_object_rests_on_platform() {
        for (elasticity, bounce) in [(0.0, 0.0), (0.5, -10.0)] {
            let mut w = world();
            let platform = w.spawn(Entity::new(0.0, 100.0, 50.0, 10.0).immovable());
            let mut falling = Entity::new(10.0, 75.0, 10.0, 10.0).with_velocity(Vec2::new(0.0, 20.0));
            falling.elasticity = elasticity;
            let b = w.spawn(falling);
            w.step(1.0);
            assert_eq!(w.entity(b).unwrap().y(), 95.0);

            assert!(w.separate(platform, b).unwrap());
            let (p, e) = (w.entity(platform).unwrap(), w.entity(b).unwrap());
            assert_eq!(e.bottom(), p.y());
            assert_eq!(e.velocity.y, bounce);
            assert!(e.is_touching(Faces::FLOOR));
            assert!(p.is_touching(Faces::CEILING));
            assert_eq!(p.y(), 100.0);
        }
    }

    #[test]
    fn test_moving_platform_carries_rider() {
        let mut w = world();
        let platform = moved(&mut w, Vec2::new(0.0, 100.0), Vec2::new(3.0, 100.0), Vec2::new(50.0, 10.0));
        w.entity_mut(platform).unwrap().immovable = true;
        let rider = moved(&mut w, Vec2::new(10.0, 75.0), Vec2::new(10.0, 95.0), Vec2::splat(10.0));
        w.entity_mut(rider).unwrap().velocity.y = 20.0;

        assert!(w.separate(platform, rider).unwrap());
        let r = w.entity(rider).unwrap();
        assert_eq!(r.y(), 90.0);
        assert_eq!(r.x(), 13.0);

        // Argument order does not matter.
        let mut w = world();
        let platform = moved(&mut w, Vec2::new(0.0, 100.0), Vec2::new(3.0, 100.0), Vec2::new(50.0, 10.0));
        w.entity_mut(platform).unwrap().immovable = true;
        let rider = moved(&mut w, Vec2::new(10.0, 75.0), Vec2::new(10.0, 95.0), Vec2::splat(10.0));
        assert!(w.separate(rider, platform).unwrap());
        assert_eq!(w.entity(rider).unwrap().position, Vec2::new(13.0, 90.0));
    }

    #[test]
    fn test_momentum_exchange_formula() {
        let mut w = world();
        let a = moved(&mut w, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let b = moved(&mut w, Vec2::new(22.0, 0.0), Vec2::new(17.0, 0.0), Vec2::splat(10.0));
        {
            let ea = w.entity_mut(a).unwrap();
            ea.velocity.x = 10.0;
            ea.elasticity = 0.5;
        }
        {
            let eb = w.entity_mut(b).unwrap();
            eb.velocity.x = -5.0;
            eb.mass = 4.0;
            eb.elasticity = 0.5;
        }
        assert!(w.separate(a, b).unwrap());
        let (ea, eb) = (w.entity(a).unwrap(), w.entity(b).unwrap());
        assert_eq!(ea.x(), 8.5);
        assert_eq!(eb.x(), 18.5);
        assert_eq!(ea.velocity.x, -6.25);
        assert_eq!(eb.velocity.x, 1.25);
    }

    #[test]
    fn test_two_immovables_never_separate() {
        let mut w = world();
        let a = moved(&mut w, Vec2::ZERO, Vec2::new(6.0, 6.0), Vec2::splat(10.0));
        let b = moved(&mut w, Vec2::new(20.0, 20.0), Vec2::new(10.0, 10.0), Vec2::splat(10.0));
        for id in [a, b] {
            let e = w.entity_mut(id).unwrap();
            e.immovable = true;
            e.velocity = Vec2::new(3.0, -3.0);
        }
        let before: Vec<_> = [a, b].iter().map(|&id| w.entity(id).unwrap().clone()).collect();
        assert!(!w.separate(a, b).unwrap());
        for (id, e0) in [a, b].iter().zip(before) {
            let e = w.entity(*id).unwrap();
            assert_eq!(e.position, e0.position);
            assert_eq!(e.velocity, e0.velocity);
            assert!(e.touching.is_empty());
        }
    }

    #[test]
    fn test_disabled_faces_block_contact() {
        let mut w = world();
        let a = moved(&mut w, Vec2::new(-5.0, 0.0), Vec2::new(2.0, 0.0), Vec2::splat(10.0));
        let b = w.spawn(Entity::new(4.0, 0.0, 10.0, 10.0));
        w.entity_mut(b).unwrap().allow_collisions = Faces::NONE;
        assert!(!w.separate(a, b).unwrap());
        assert!(w.entity(b).unwrap().touching.is_empty());
        assert!(w.entity(a).unwrap().touching.is_empty());
        assert_eq!(w.entity(a).unwrap().x(), 2.0);
        assert_eq!(w.entity(b).unwrap().x(), 4.0);

        // Only the face being hit matters.
        w.entity_mut(b).unwrap().allow_collisions = Faces::RIGHT | Faces::UP | Faces::DOWN;
        assert!(!w.separate(a, b).unwrap());
        w.entity_mut(b).unwrap().allow_collisions = Faces::LEFT;
        assert!(w.separate(a, b).unwrap());
    }

    #[test]
    fn test_equal_deltas_are_not_separated() {
        let mut w = world();
        let a = moved(&mut w, Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::splat(10.0));
        let b = moved(&mut w, Vec2::new(5.0, 0.0), Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(!w.separate(a, b).unwrap());
        assert_eq!(w.entity(a).unwrap().x(), 4.0);
    }

    #[test]
    fn test_deep_overlap_is_ignored() {
        let mut w = world();
        // 1 unit of motion cannot explain 9 units of penetration.
        let a = moved(&mut w, Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::splat(10.0));
        let b = w.spawn(Entity::new(2.0, 0.0, 10.0, 10.0));
        assert!(!w.separate(a, b).unwrap());
        assert!(w.entity(a).unwrap().touching.is_empty());
    }

    #[test]
    fn test_approach_settles_without_penetration() {
        let mut w = world();
        let bias = w.cfg.overlap_bias;
        let a = w.spawn(Entity::new(0.0, 0.0, 10.0, 10.0).with_velocity(Vec2::new(120.0, 0.0)));
        let b = w.spawn(Entity::new(30.0, 0.0, 10.0, 10.0));
        let mut contact = false;
        for _ in 0..60 {
            w.step(1.0 / 60.0);
            w.collide(a.into(), Some(b.into()), None).unwrap();
            let (ea, eb) = (w.entity(a).unwrap(), w.entity(b).unwrap());
            let pen = ea.right() - eb.x();
            assert!(pen <= bias);
            if eb.velocity.x > 0.0 {
                contact = true;
                assert!(pen <= 1e-3, "residual penetration {pen}");
            }
        }
        assert!(contact);
        let (ea, eb) = (w.entity(a).unwrap(), w.entity(b).unwrap());
        assert_eq!(ea.velocity.x, 60.0);
        assert_eq!(eb.velocity.x, 60.0);
    }

    #[test]
    fn test_separate_rejects_stale_handles() {
        let mut w = world();
        let a = w.spawn(Entity::new(0.0, 0.0, 1.0, 1.0));
        let b = w.spawn(Entity::new(0.0, 0.0, 1.0, 1.0));
        w.destroy_entity(b).unwrap();
        assert!(matches!(w.separate(a, b), Err(CollisionError::StaleEntity(_))));
        assert!(!w.separate(a, a).unwrap());
    }

    #[test]
    fn test_overlap_notifies_and_records_stats() {
        let mut w = world();
        let g = w.create_group(0);
        let a = w.spawn_in(g, Entity::new(10.0, 10.0, 10.0, 10.0)).unwrap();
        let b = w.spawn_in(g, Entity::new(15.0, 15.0, 10.0, 10.0)).unwrap();
        w.spawn_in(g, Entity::new(500.0, 500.0, 10.0, 10.0)).unwrap();
        let mut pairs = Vec::new();
        let mut notify = |_: &mut World, x: EntityId, y: EntityId| pairs.push((x, y));
        assert!(w.overlap(g.into(), None, Some(&mut notify), None).unwrap());
        assert_eq!(pairs.len(), 1);
        let (x, y) = pairs[0];
        assert!((x, y) == (a, b) || (x, y) == (b, a));
        let s = w.last_overlap_stats();
        assert_eq!(s.entries, 3);
        assert_eq!(s.overlaps, 1);
        assert!(w.timing().is_none());

        // Same member twice is a self-overlap.
        assert!(w.overlap(g.into(), Some(g.into()), None, None).unwrap());
    }

    #[test]
    fn test_overlap_timing_when_enabled() {
        let cfg = WorldConfig { enable_timing: true, ..Default::default() };
        let mut w = World::new(cfg).unwrap();
        let a = w.spawn(Entity::new(0.0, 0.0, 10.0, 10.0));
        assert!(!w.overlap(a.into(), None, None, None).unwrap());
        assert!(w.timing().is_some());
    }

    #[test]
    fn test_collide_group_against_wall() {
        let mut w = world();
        let wall = w.spawn(Entity::new(100.0, 0.0, 10.0, 200.0).immovable());
        let movers = w.create_group(0);
        let ids: Vec<_> = (0..4)
            .map(|i| {
                let e = Entity::new(80.0, i as f32 * 20.0, 10.0, 10.0).with_velocity(Vec2::new(768.0, 0.0));
                w.spawn_in(movers, e).unwrap()
            })
            .collect();
        w.step(1.0 / 64.0);
        let mut hits = 0;
        let mut notify = |_: &mut World, _: EntityId, _: EntityId| hits += 1;
        assert!(w.collide(movers.into(), Some(wall.into()), Some(&mut notify)).unwrap());
        assert_eq!(hits, 4);
        for id in ids {
            let e = w.entity(id).unwrap();
            assert_eq!(e.right(), 100.0);
            assert_eq!(e.velocity.x, 0.0);
            assert!(e.is_touching(Faces::RIGHT));
        }
    }

    #[test]
    fn test_tile_landing_sets_flag() {
        let mut w = world();
        let obj = moved(&mut w, Vec2::new(0.0, 5.0), Vec2::new(0.0, 15.0), Vec2::splat(10.0));
        w.entity_mut(obj).unwrap().velocity.y = 50.0;
        let block = TileBlock { rect: Rect::new(0.0, 20.0, 16.0, 16.0), tile: Tile::solid(), col: 0, row: 1 };
        assert!(!w.tile_overlap());
        assert!(w.separate_tile(obj, &block).unwrap());
        let e = w.entity(obj).unwrap();
        assert_eq!(e.bottom(), 20.0);
        assert_eq!(e.velocity.y, 0.0);
        assert!(e.is_touching(Faces::DOWN));
        assert!(w.tile_overlap());
    }

    #[test]
    fn test_tile_without_separation_only_reports() {
        let mut w = world();
        let obj = moved(&mut w, Vec2::new(0.0, 5.0), Vec2::new(0.0, 15.0), Vec2::splat(10.0));
        w.entity_mut(obj).unwrap().velocity.y = 50.0;
        let mut tile = Tile::solid();
        tile.separate_y = false;
        let block = TileBlock { rect: Rect::new(0.0, 20.0, 16.0, 16.0), tile, col: 0, row: 1 };
        assert!(w.separate_tile(obj, &block).unwrap());
        let e = w.entity(obj).unwrap();
        assert_eq!(e.y(), 15.0);
        assert_eq!(e.velocity.y, 50.0);
        assert!(e.is_touching(Faces::DOWN));
        assert!(w.tile_overlap());

        // A face the tile does not collide on lets the object through.
        w.clear_tile_overlap();
        let one_way = TileBlock { rect: Rect::new(0.0, 20.0, 16.0, 16.0), tile: Tile::with_faces(Faces::DOWN), col: 0, row: 1 };
        assert!(!w.separate_tile(obj, &one_way).unwrap());
        assert!(!w.tile_overlap());
    }
}
