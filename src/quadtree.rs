//! Broad-phase quadtree, rebuilt for every overlap pass.
//!
//! Objects are inserted by their swept hull. An object that straddles a
//! node's midlines is inserted into every quadrant it touches. Each entry is
//! stored once, in the node where insertion stopped, and the query tests a
//! node's lists together with those of all its ancestors. Pairs can
//! therefore show up in several nodes. That redundancy is what keeps
//! straddling pairs from being missed; repeats are filtered by the
//! traversal's seen-pair set.
//!
//! Build and query state travel in explicit `Insertion` and [`Traversal`]
//! values, so a tree borrows nothing global and passes are reentrant.

use std::collections::HashSet;

use glam::Vec2;

use crate::api::{NotifyFn, ProcessFn};
use crate::geom::Rect;
use crate::types::{EntityId, OverlapStats};
use crate::world::World;

/// Which of a node's two lists an object goes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum List {
    A,
    B,
}

const NW: usize = 0;
const NE: usize = 1;
const SE: usize = 2;
const SW: usize = 3;

/// Per-object build state threaded through insertion.
struct Insertion<'s> {
    id: EntityId,
    hull: Rect,
    list: List,
    min_size: f32,
    max_depth: u32,
    stats: &'s mut OverlapStats,
}

struct QuadNode {
    bounds: Rect,
    mid: Vec2,
    depth: u32,
    can_subdivide: bool,
    a: Vec<EntityId>,
    b: Vec<EntityId>,
    children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    fn new(bounds: Rect, depth: u32, min_size: f32, max_depth: u32, stats: &mut OverlapStats) -> Self {
        let splittable = bounds.width > min_size || bounds.height > min_size;
        if splittable && depth >= max_depth {
            stats.depth_capped = true;
        }
        stats.nodes += 1;
        Self {
            bounds,
            mid: bounds.center(),
            depth,
            can_subdivide: splittable && depth < max_depth,
            a: Vec::new(),
            b: Vec::new(),
            children: [None, None, None, None],
        }
    }

    fn quadrant(&self, q: usize) -> Rect {
        let half = self.bounds.size() / 2.0;
        let min = match q {
            NW => self.bounds.min(),
            NE => Vec2::new(self.mid.x, self.bounds.top()),
            SE => self.mid,
            _ => Vec2::new(self.bounds.left(), self.mid.y),
        };
        Rect::from_min_size(min, half)
    }

    fn child(&mut self, q: usize, ins: &mut Insertion) -> &mut QuadNode {
        let rect = self.quadrant(q);
        let depth = self.depth + 1;
        self.children[q]
            .get_or_insert_with(|| Box::new(QuadNode::new(rect, depth, ins.min_size, ins.max_depth, ins.stats)))
    }

    fn add_object(&mut self, ins: &mut Insertion) {
        let h = ins.hull;
        let n = self.bounds;
        if !self.can_subdivide
            || (n.left() >= h.left() && n.right() <= h.right() && n.top() >= h.top() && n.bottom() <= h.bottom())
        {
            self.add_to_list(ins.id, ins.list);
            return;
        }

        let (mx, my) = (self.mid.x, self.mid.y);
        let west = h.left() > n.left() && h.right() < mx;
        let east = h.left() > mx && h.right() < n.right();
        let north = h.top() > n.top() && h.bottom() < my;
        let south = h.top() > my && h.bottom() < n.bottom();
        let fit = if west && north {
            Some(NW)
        } else if west && south {
            Some(SW)
        } else if east && north {
            Some(NE)
        } else if east && south {
            Some(SE)
        } else {
            None
        };
        if let Some(q) = fit {
            self.child(q, ins).add_object(ins);
            return;
        }

        let spans_west = h.right() > n.left() && h.left() < mx;
        let spans_east = h.right() > mx && h.left() < n.right();
        let spans_north = h.bottom() > n.top() && h.top() < my;
        let spans_south = h.bottom() > my && h.top() < n.bottom();
        for (q, hit) in [
            (NW, spans_west && spans_north),
            (NE, spans_east && spans_north),
            (SE, spans_east && spans_south),
            (SW, spans_west && spans_south),
        ] {
            if hit {
                self.child(q, ins).add_object(ins);
            }
        }
    }

    fn add_to_list(&mut self, id: EntityId, list: List) {
        match list {
            List::A => self.a.push(id),
            List::B => self.b.push(id),
        }
    }

    /// `path_a` and `path_b` hold the ancestors' entries on the way down.
    fn execute(&self, t: &mut Traversal, path_a: &mut Vec<EntityId>, path_b: &mut Vec<EntityId>) -> bool {
        let (len_a, len_b) = (path_a.len(), path_b.len());
        path_a.extend_from_slice(&self.a);
        path_b.extend_from_slice(&self.b);

        let mut any = false;
        for (i, &obj) in path_a.iter().enumerate() {
            let others: &[EntityId] = if t.both_lists { &path_b[..] } else { &path_a[i + 1..] };
            if !others.is_empty() && t.overlap_node(obj, others) {
                any = true;
            }
        }
        for c in self.children.iter().flatten() {
            if c.execute(t, path_a, path_b) {
                any = true;
            }
        }

        path_a.truncate(len_a);
        path_b.truncate(len_b);
        any
    }

    fn list_slots(&self) -> usize {
        self.a.len() + self.b.len() + self.children.iter().flatten().map(|c| c.list_slots()).sum::<usize>()
    }
}

/// Spatial index over the world region for one overlap pass.
pub struct QuadTree {
    root: QuadNode,
    min_size: f32,
    max_depth: u32,
    both_lists: bool,
    stats: OverlapStats,
}

impl QuadTree {
    /// Root covers `bounds`; nodes stop splitting once both sides are at most
    /// `(w + h) / (2 * divisions)` or the depth reaches `max_depth`.
    pub fn new(bounds: Rect, divisions: u32, max_depth: u32) -> Self {
        let min_size = (bounds.width + bounds.height) / (2 * divisions.max(1)) as f32;
        let mut stats = OverlapStats::default();
        let root = QuadNode::new(bounds, 0, min_size, max_depth, &mut stats);
        Self { root, min_size, max_depth, both_lists: false, stats }
    }

    /// Index `first` into the A list and, when given, `second` into the B list.
    /// Two lists switch the query to A-versus-B only.
    pub fn load(&mut self, world: &World, first: &[EntityId], second: Option<&[EntityId]>) {
        for &id in first {
            self.add(world, id, List::A);
        }
        if let Some(second) = second {
            for &id in second {
                self.add(world, id, List::B);
            }
        }
        self.both_lists = second.is_some();
    }

    /// Insert one entity by its mask hull. Non-existing entities and
    /// entities with no collidable face are skipped.
    pub fn add(&mut self, world: &World, id: EntityId, list: List) {
        let Ok(e) = world.entity(id) else {
            return;
        };
        if !e.exists || e.allow_collisions.is_empty() {
            return;
        }
        self.stats.entries += 1;
        let mut ins = Insertion {
            id,
            hull: e.mask.hull(),
            list,
            min_size: self.min_size,
            max_depth: self.max_depth,
            stats: &mut self.stats,
        };
        self.root.add_object(&mut ins);
    }

    pub fn both_lists(&self) -> bool {
        self.both_lists
    }

    /// Walk the tree depth first; true if any pair counted.
    pub fn execute(&self, t: &mut Traversal) -> bool {
        t.both_lists = self.both_lists;
        self.root.execute(t, &mut Vec::new(), &mut Vec::new())
    }

    /// Build-side counters (nodes, entries, depth cap).
    pub fn stats(&self) -> OverlapStats {
        self.stats
    }

    /// Total list entries across all nodes. Entries shared with
    /// descendants through an ancestor are counted once.
    pub fn list_slots(&self) -> usize {
        self.root.list_slots()
    }
}

/// Query state for one pass: the world being tested, the callbacks, and
/// pair bookkeeping.
pub struct Traversal<'t, 'n, 'p> {
    world: &'t mut World,
    notify: Option<&'t mut NotifyFn<'n>>,
    process: Option<&'t mut ProcessFn<'p>>,
    both_lists: bool,
    dedupe: bool,
    seen: HashSet<(EntityId, EntityId)>,
    stats: OverlapStats,
}

impl<'t, 'n, 'p> Traversal<'t, 'n, 'p> {
    pub fn new(
        world: &'t mut World,
        notify: Option<&'t mut NotifyFn<'n>>,
        process: Option<&'t mut ProcessFn<'p>>,
        dedupe: bool,
    ) -> Self {
        Self {
            world,
            notify,
            process,
            both_lists: false,
            dedupe,
            seen: HashSet::new(),
            stats: OverlapStats::default(),
        }
    }

    /// Query-side counters (candidate, unique and accepted pairs).
    pub fn stats(&self) -> OverlapStats {
        self.stats
    }

    fn collidable(&self, id: EntityId) -> bool {
        self.world
            .entity(id)
            .is_ok_and(|e| e.exists && !e.allow_collisions.is_empty())
    }

    fn hulls_intersect(&self, a: EntityId, b: EntityId) -> bool {
        match (self.world.entity(a), self.world.entity(b)) {
            (Ok(ea), Ok(eb)) => ea.mask.check_hull_intersection(&eb.mask),
            _ => false,
        }
    }

    /// Test `obj` against each of `others`.
    fn overlap_node(&mut self, obj: EntityId, others: &[EntityId]) -> bool {
        let mut any = false;
        for &other in others {
            // A callback may have removed `obj` from play.
            if !self.collidable(obj) {
                break;
            }
            if obj == other || !self.collidable(other) {
                continue;
            }
            self.stats.candidate_pairs += 1;
            let key = if obj < other { (obj, other) } else { (other, obj) };
            if self.seen.insert(key) {
                self.stats.unique_pairs += 1;
            } else if self.dedupe {
                continue;
            }
            if !self.hulls_intersect(obj, other) {
                continue;
            }
            let accepted = match self.process.as_mut() {
                Some(process) => process(self.world, obj, other),
                None => true,
            };
            if !accepted {
                continue;
            }
            any = true;
            self.stats.overlaps += 1;
            if let Some(notify) = self.notify.as_mut() {
                notify(self.world, obj, other);
            }
        }
        any
    }
}
