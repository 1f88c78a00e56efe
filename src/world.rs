use std::collections::HashSet;

use crate::arena::Arena;
use crate::entity::Entity;
use crate::error::{CollisionError, Result};
use crate::group::Group;
use crate::types::*;

/// Owner of every entity and group, and the per-frame driver.
///
/// A frame is `step(elapsed)` (start-of-frame bookkeeping, then motion for
/// every entity) followed by any number of collision passes through
/// [`crate::CollisionApi`].
pub struct World {
    pub cfg: WorldConfig,
    entities: Arena<Entity>,
    groups: Arena<Group>,
    root: GroupId,
    tile_overlap: bool,
    last_stats: OverlapStats,
    last_timing: Option<OverlapTiming>,
}

impl World {
    pub fn new(cfg: WorldConfig) -> Result<Self> {
        cfg.validate()?;
        let mut groups = Arena::new();
        let root = GroupId(groups.insert(Group::new(0)));
        Ok(Self {
            cfg,
            entities: Arena::new(),
            groups,
            root,
            tile_overlap: false,
            last_stats: OverlapStats::default(),
            last_timing: None,
        })
    }

    /// Group that [`World::spawn`] adds to.
    pub fn root(&self) -> GroupId {
        self.root
    }

    // Entities -------------------------------------------------------------

    /// Store an entity without adding it to any group.
    pub fn insert_entity(&mut self, entity: Entity) -> EntityId {
        EntityId(self.entities.insert(entity))
    }

    /// Store an entity and add it to the root group.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.insert_entity(entity);
        if let Some(root) = self.groups.get_mut(self.root.0) {
            if root.insert(id.into()).is_none() {
                log::warn!("root group is full; {id:?} was not added");
            }
        }
        id
    }

    /// Store an entity and add it to `group`. Fails without storing when the
    /// group is stale; a full group keeps the entity detached.
    pub fn spawn_in(&mut self, group: GroupId, entity: Entity) -> Result<EntityId> {
        self.group(group)?;
        let id = self.insert_entity(entity);
        self.add_to_group(group, id.into())?;
        Ok(id)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(id.0).ok_or(CollisionError::StaleEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities.get_mut(id.0).ok_or(CollisionError::StaleEntity(id))
    }

    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains(id.0)
    }

    /// Two distinct entities borrowed mutably. `None` when either is stale or
    /// both handles are the same.
    pub fn entity_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        self.entities.get2_mut(a.0, b.0)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(h, e)| (EntityId(h), e))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Release an entity and empty every group slot that pointed at it.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<Entity> {
        let e = self.entities.remove(id.0).ok_or(CollisionError::StaleEntity(id))?;
        for (_, g) in self.groups.iter_mut() {
            g.scrub(id.into());
        }
        Ok(e)
    }

    // Groups ---------------------------------------------------------------

    /// New detached group. `max_size` 0 means unbounded.
    pub fn create_group(&mut self, max_size: usize) -> GroupId {
        GroupId(self.groups.insert(Group::new(max_size)))
    }

    /// New group nested in `parent`.
    pub fn create_group_in(&mut self, parent: GroupId, max_size: usize) -> Result<GroupId> {
        self.group(parent)?;
        let id = self.create_group(max_size);
        self.add_to_group(parent, id.into())?;
        Ok(id)
    }

    pub fn group(&self, id: GroupId) -> Result<&Group> {
        self.groups.get(id.0).ok_or(CollisionError::StaleGroup(id))
    }

    pub fn group_mut(&mut self, id: GroupId) -> Result<&mut Group> {
        self.groups.get_mut(id.0).ok_or(CollisionError::StaleGroup(id))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Release a group. Its members are not destroyed; slots in other groups
    /// that referenced it are emptied.
    pub fn destroy_group(&mut self, id: GroupId) -> Result<Group> {
        let g = self.groups.remove(id.0).ok_or(CollisionError::StaleGroup(id))?;
        for (_, other) in self.groups.iter_mut() {
            other.scrub(id.into());
        }
        Ok(g)
    }

    /// Whether `member` still refers to a live slot.
    pub fn check_member(&self, member: Member) -> Result<()> {
        match member {
            Member::Entity(id) => self.entity(id).map(|_| ()),
            Member::Group(id) => self.group(id).map(|_| ()),
        }
    }

    /// `(exists, alive)` of a member, `None` when stale.
    fn member_state(&self, member: Member) -> Option<(bool, bool)> {
        match member {
            Member::Entity(id) => self.entities.get(id.0).map(|e| (e.exists, e.alive)),
            Member::Group(id) => self.groups.get(id.0).map(|g| (g.exists, g.alive)),
        }
    }

    /// `group` is `target` or contains it at any depth.
    fn reaches(&self, group: GroupId, target: GroupId) -> bool {
        let mut stack = vec![group];
        let mut seen = HashSet::new();
        while let Some(g) = stack.pop() {
            if g == target {
                return true;
            }
            if !seen.insert(g) {
                continue;
            }
            if let Some(grp) = self.groups.get(g.0) {
                stack.extend(grp.members().filter_map(|m| match m {
                    Member::Group(c) => Some(c),
                    Member::Entity(_) => None,
                }));
            }
        }
        false
    }

    fn check_cycle(&self, parent: GroupId, member: Member) -> Result<()> {
        if let Member::Group(child) = member {
            if self.reaches(child, parent) {
                return Err(CollisionError::GroupCycle { parent, child });
            }
        }
        Ok(())
    }

    /// Add `member` to `group`. Returns false when the group is full.
    /// Adding a member twice is a no-op.
    pub fn add_to_group(&mut self, group: GroupId, member: Member) -> Result<bool> {
        self.check_member(member)?;
        self.group(group)?;
        self.check_cycle(group, member)?;
        let g = self.group_mut(group)?;
        if g.insert(member).is_some() {
            Ok(true)
        } else {
            log::warn!("group {group:?} is full (max_size {}); {member:?} not added", g.max_size());
            Ok(false)
        }
    }

    /// Remove `member` from `group`, leaving a reusable hole unless `splice`.
    pub fn remove_from_group(&mut self, group: GroupId, member: Member, splice: bool) -> Result<bool> {
        Ok(self.group_mut(group)?.remove(member, splice))
    }

    /// Swap `old` for `new` in place.
    pub fn replace_in_group(&mut self, group: GroupId, old: Member, new: Member) -> Result<bool> {
        self.check_member(new)?;
        self.group(group)?;
        self.check_cycle(group, new)?;
        Ok(self.group_mut(group)?.replace(old, new))
    }

    /// Hand out an entity for reuse.
    ///
    /// Bounded groups fill up with fresh entities from `make`, then rotate
    /// through their slots. Unbounded groups return the first non-existing
    /// entity, or store a fresh one. A rotated slot holding a group or an
    /// empty slot yields `None`.
    pub fn recycle(&mut self, group: GroupId, make: impl FnOnce() -> Entity) -> Result<Option<EntityId>> {
        let g = self.group(group)?;
        if g.max_size() > 0 {
            if g.len() < g.max_size() {
                let id = self.insert_entity(make());
                self.add_to_group(group, id.into())?;
                return Ok(Some(id));
            }
            return Ok(match self.group_mut(group)?.rotate() {
                Some(Member::Entity(id)) => Some(id),
                _ => None,
            });
        }
        if let Some(id) = self.first_available(group)? {
            return Ok(Some(id));
        }
        let id = self.insert_entity(make());
        self.add_to_group(group, id.into())?;
        Ok(Some(id))
    }

    /// First entity in `group` that does not exist.
    pub fn first_available(&self, group: GroupId) -> Result<Option<EntityId>> {
        Ok(self.group(group)?.members().find_map(|m| match m {
            Member::Entity(id) if self.entities.get(id.0).is_some_and(|e| !e.exists) => Some(id),
            _ => None,
        }))
    }

    pub fn first_null(&self, group: GroupId) -> Result<Option<usize>> {
        Ok(self.group(group)?.first_null())
    }

    pub fn first_extant(&self, group: GroupId) -> Result<Option<Member>> {
        self.first_where(group, |exists, _| exists)
    }

    pub fn first_alive(&self, group: GroupId) -> Result<Option<Member>> {
        self.first_where(group, |exists, alive| exists && alive)
    }

    pub fn first_dead(&self, group: GroupId) -> Result<Option<Member>> {
        self.first_where(group, |_, alive| !alive)
    }

    fn first_where(&self, group: GroupId, pred: impl Fn(bool, bool) -> bool) -> Result<Option<Member>> {
        Ok(self.group(group)?.members().find(|&m| {
            self.member_state(m).is_some_and(|(exists, alive)| pred(exists, alive))
        }))
    }

    /// Existing, alive direct members. `None` when the group has no occupied slot.
    pub fn count_living(&self, group: GroupId) -> Result<Option<usize>> {
        self.count_where(group, |exists, alive| exists && alive)
    }

    /// Dead direct members. `None` when the group has no occupied slot.
    pub fn count_dead(&self, group: GroupId) -> Result<Option<usize>> {
        self.count_where(group, |_, alive| !alive)
    }

    fn count_where(&self, group: GroupId, pred: impl Fn(bool, bool) -> bool) -> Result<Option<usize>> {
        let mut count = None;
        for m in self.group(group)?.members() {
            let n = count.get_or_insert(0);
            if self.member_state(m).is_some_and(|(exists, alive)| pred(exists, alive)) {
                *n += 1;
            }
        }
        Ok(count)
    }

    /// Kill every existing member (recursing into groups), then the group itself.
    pub fn kill_group(&mut self, group: GroupId) -> Result<()> {
        let members: Vec<Member> = self.group(group)?.members().collect();
        for m in members {
            match m {
                Member::Entity(id) => {
                    if let Some(e) = self.entities.get_mut(id.0) {
                        if e.exists {
                            e.kill();
                        }
                    }
                }
                Member::Group(id) => {
                    if self.groups.get(id.0).is_some_and(|g| g.exists) {
                        self.kill_group(id)?;
                    }
                }
            }
        }
        let g = self.group_mut(group)?;
        g.alive = false;
        g.exists = false;
        Ok(())
    }

    /// Drop every slot; members stay alive in the world.
    pub fn clear_group(&mut self, group: GroupId) -> Result<()> {
        self.group_mut(group)?.clear();
        Ok(())
    }

    /// Call `f` for each member. With `recursive`, nested groups are walked
    /// instead of being passed to `f`.
    pub fn for_each(
        &mut self,
        group: GroupId,
        recursive: bool,
        mut f: impl FnMut(&mut World, Member),
    ) -> Result<()> {
        for m in self.walk(group, recursive, false)? {
            f(self, m);
        }
        Ok(())
    }

    /// [`World::for_each`] restricted to alive members.
    pub fn for_each_alive(
        &mut self,
        group: GroupId,
        recursive: bool,
        mut f: impl FnMut(&mut World, Member),
    ) -> Result<()> {
        for m in self.walk(group, recursive, true)? {
            f(self, m);
        }
        Ok(())
    }

    fn walk(&self, group: GroupId, recursive: bool, alive_only: bool) -> Result<Vec<Member>> {
        let mut out = Vec::new();
        let mut stack: Vec<Member> = self.group(group)?.members().collect();
        stack.reverse();
        while let Some(m) = stack.pop() {
            let Some((_, alive)) = self.member_state(m) else {
                continue;
            };
            if alive_only && !alive {
                continue;
            }
            match m {
                Member::Group(g) if recursive => {
                    if let Some(grp) = self.groups.get(g.0) {
                        let start = stack.len();
                        stack.extend(grp.members());
                        stack[start..].reverse();
                    }
                }
                _ => out.push(m),
            }
        }
        Ok(out)
    }

    /// Existing entities reachable from `member` through existing groups, each once.
    pub fn collect_entities(&self, member: Member) -> Result<Vec<EntityId>> {
        self.check_member(member)?;
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![member];
        while let Some(m) = stack.pop() {
            match m {
                Member::Entity(id) => {
                    if self.entities.get(id.0).is_some_and(|e| e.exists) && seen.insert(id) {
                        out.push(id);
                    }
                }
                Member::Group(g) => {
                    if let Some(grp) = self.groups.get(g.0).filter(|grp| grp.exists) {
                        let start = stack.len();
                        stack.extend(grp.members());
                        stack[start..].reverse();
                    }
                }
            }
        }
        Ok(out)
    }

    // Frame ----------------------------------------------------------------

    /// Start-of-frame bookkeeping for every existing entity.
    pub fn pre_update(&mut self) {
        for (_, e) in self.entities.iter_mut() {
            if e.exists {
                e.pre_update();
            }
        }
    }

    /// Motion, bounds policy and mask refresh for every existing, active entity.
    pub fn integrate(&mut self, elapsed: f32) {
        for (_, e) in self.entities.iter_mut() {
            if e.exists && e.active {
                e.post_update(elapsed);
            }
        }
    }

    /// `pre_update` then `integrate`; run collision passes afterwards.
    pub fn step(&mut self, elapsed: f32) {
        self.pre_update();
        self.integrate(elapsed);
    }

    // Pass state -----------------------------------------------------------

    pub fn clear_tile_overlap(&mut self) {
        self.tile_overlap = false;
    }

    pub(crate) fn set_tile_overlap(&mut self) {
        self.tile_overlap = true;
    }

    pub(crate) fn tile_overlap_flag(&self) -> bool {
        self.tile_overlap
    }

    pub fn last_overlap_stats(&self) -> OverlapStats {
        self.last_stats
    }

    pub fn timing(&self) -> Option<OverlapTiming> {
        self.last_timing
    }

    pub(crate) fn record_pass(&mut self, stats: OverlapStats, timing: Option<OverlapTiming>) {
        self.last_stats = stats;
        self.last_timing = timing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn world() -> World {
        World::new(WorldConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let cfg = WorldConfig { divisions: 0, ..Default::default() };
        assert!(matches!(World::new(cfg), Err(CollisionError::InvalidConfig(_))));
    }

    #[test]
    fn test_spawn_adds_to_root_and_destroy_scrubs() {
        let mut w = world();
        let a = w.spawn(Entity::new(0.0, 0.0, 1.0, 1.0));
        let g = w.create_group_in(w.root(), 0).unwrap();
        w.add_to_group(g, a.into()).unwrap();
        assert!(w.group(w.root()).unwrap().contains(a.into()));

        w.destroy_entity(a).unwrap();
        assert!(matches!(w.entity(a), Err(CollisionError::StaleEntity(_))));
        assert!(!w.group(w.root()).unwrap().contains(a.into()));
        assert!(!w.group(g).unwrap().contains(a.into()));

        // The recycled slot gets a new generation.
        let b = w.spawn(Entity::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(b.0.index, a.0.index);
        assert!(w.entity(a).is_err());
        assert!(w.entity(b).is_ok());
    }

    #[test]
    fn test_group_cycles_are_rejected() {
        let mut w = world();
        let outer = w.create_group(0);
        let inner = w.create_group_in(outer, 0).unwrap();
        let leaf = w.create_group_in(inner, 0).unwrap();
        assert!(matches!(
            w.add_to_group(leaf, outer.into()),
            Err(CollisionError::GroupCycle { .. })
        ));
        assert!(matches!(
            w.add_to_group(outer, outer.into()),
            Err(CollisionError::GroupCycle { .. })
        ));
        let other = w.create_group(0);
        assert!(w.replace_in_group(leaf, Member::Group(other), outer.into()).is_err());
    }

    #[test]
    fn test_full_group_refuses() {
        let mut w = world();
        let g = w.create_group(1);
        let a = w.spawn_in(g, Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = w.insert_entity(Entity::new(0.0, 0.0, 1.0, 1.0));
        assert!(!w.add_to_group(g, b.into()).unwrap());
        assert_eq!(w.group(g).unwrap().members().collect::<Vec<_>>(), vec![a.into()]);
    }

    #[test]
    fn test_counts_and_first_queries() {
        let mut w = world();
        let g = w.create_group(0);
        assert_eq!(w.count_living(g).unwrap(), None);
        let a = w.spawn_in(g, Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = w.spawn_in(g, Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        w.entity_mut(a).unwrap().kill();
        assert_eq!(w.count_living(g).unwrap(), Some(1));
        assert_eq!(w.count_dead(g).unwrap(), Some(1));
        assert_eq!(w.first_alive(g).unwrap(), Some(b.into()));
        assert_eq!(w.first_dead(g).unwrap(), Some(a.into()));
        assert_eq!(w.first_available(g).unwrap(), Some(a));
        assert_eq!(w.first_extant(g).unwrap(), Some(b.into()));
        w.remove_from_group(g, b.into(), false).unwrap();
        assert_eq!(w.first_null(g).unwrap(), Some(1));
    }

    #[test]
    fn test_recycle_unbounded_reuses_dead() {
        let mut w = world();
        let g = w.create_group(0);
        let a = w.recycle(g, || Entity::new(0.0, 0.0, 2.0, 2.0)).unwrap().unwrap();
        let b = w.recycle(g, || Entity::new(0.0, 0.0, 2.0, 2.0)).unwrap().unwrap();
        assert_ne!(a, b);
        w.entity_mut(a).unwrap().kill();
        assert_eq!(w.recycle(g, || Entity::new(0.0, 0.0, 2.0, 2.0)).unwrap(), Some(a));
        assert_eq!(w.entity_count(), 2);
    }

    #[test]
    fn test_recycle_bounded_rotates() {
        let mut w = world();
        let g = w.create_group(2);
        let a = w.recycle(g, || Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap().unwrap();
        let b = w.recycle(g, || Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap().unwrap();
        assert_ne!(a, b);
        assert_eq!(w.recycle(g, || Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap(), Some(a));
        assert_eq!(w.recycle(g, || Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap(), Some(b));
        assert_eq!(w.entity_count(), 2);
    }

    #[test]
    fn test_collect_and_walks_skip_dead_groups() {
        let mut w = world();
        let g = w.create_group(0);
        let sub = w.create_group_in(g, 0).unwrap();
        let a = w.spawn_in(g, Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = w.spawn_in(sub, Entity::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        w.add_to_group(sub, a.into()).unwrap();
        assert_eq!(w.collect_entities(g.into()).unwrap(), vec![b, a]);

        let mut seen = Vec::new();
        w.for_each(g, true, |_, m| seen.push(m)).unwrap();
        assert_eq!(seen, vec![Member::Entity(b), Member::Entity(a), Member::Entity(a)]);

        let mut shallow = Vec::new();
        w.for_each(g, false, |_, m| shallow.push(m)).unwrap();
        assert_eq!(shallow, vec![Member::Group(sub), Member::Entity(a)]);

        w.kill_group(sub).unwrap();
        assert!(!w.entity(b).unwrap().alive);
        assert!(!w.entity(a).unwrap().alive);
        assert!(w.collect_entities(g.into()).unwrap().is_empty());
        let mut alive = Vec::new();
        w.for_each_alive(g, true, |_, m| alive.push(m)).unwrap();
        assert!(alive.is_empty());
    }

    #[test]
    fn test_step_runs_motion_after_snapshot() {
        let mut w = world();
        let a = w.spawn(Entity::new(0.0, 0.0, 4.0, 4.0).with_velocity(Vec2::new(0.0, 120.0)));
        w.step(0.5);
        let e = w.entity(a).unwrap();
        assert_eq!(e.position, Vec2::new(0.0, 60.0));
        assert_eq!(e.mask.last, Vec2::ZERO);
        assert_eq!(e.mask.delta_y(), 60.0);
    }
}
