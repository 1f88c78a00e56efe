use crate::types::Member;

/// Slot container of entities and nested groups.
///
/// Slots hold non-owning [`Member`] handles. An emptied slot stays in place
/// so it can be reused by the next insert; `len()` is the high-water mark.
/// Anything that needs to look at member state (alive counts, recycling,
/// recursive walks) goes through [`crate::World`], which owns the members.
#[derive(Clone, Debug)]
pub struct Group {
    slots: Vec<Option<Member>>,
    /// 0 means unbounded.
    max_size: usize,
    marker: usize,
    pub exists: bool,
    pub alive: bool,
    pub active: bool,
    pub visible: bool,
}

impl Default for Group {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Group {
    pub fn new(max_size: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_size,
            marker: 0,
            exists: true,
            alive: true,
            active: true,
            visible: true,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the cap. Slots past a smaller cap are dropped and returned.
    pub fn set_max_size(&mut self, max_size: usize) -> Vec<Member> {
        self.max_size = max_size;
        if self.marker >= max_size {
            self.marker = 0;
        }
        if max_size == 0 || max_size >= self.slots.len() {
            return Vec::new();
        }
        self.slots.drain(max_size..).flatten().collect()
    }

    pub fn slots(&self) -> &[Option<Member>] {
        &self.slots
    }

    /// Occupied slots in slot order.
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn contains(&self, member: Member) -> bool {
        self.index_of(member).is_some()
    }

    pub fn index_of(&self, member: Member) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(member))
    }

    pub fn first_null(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// No empty slot and no room to grow.
    pub fn is_full(&self) -> bool {
        self.max_size > 0 && self.slots.len() >= self.max_size && self.first_null().is_none()
    }

    /// Put `member` in the first empty slot, growing if allowed.
    ///
    /// Returns the slot index, the existing index when already present, or
    /// `None` when the group is full.
    pub fn insert(&mut self, member: Member) -> Option<usize> {
        if let Some(i) = self.index_of(member) {
            return Some(i);
        }
        if let Some(i) = self.first_null() {
            self.slots[i] = Some(member);
            return Some(i);
        }
        if self.max_size > 0 && self.slots.len() >= self.max_size {
            return None;
        }
        self.slots.push(Some(member));
        Some(self.slots.len() - 1)
    }

    /// Empty the member's slot, or close the gap when `splice` is set.
    pub fn remove(&mut self, member: Member, splice: bool) -> bool {
        let Some(i) = self.index_of(member) else {
            return false;
        };
        if splice {
            self.slots.remove(i);
        } else {
            self.slots[i] = None;
        }
        true
    }

    pub fn replace(&mut self, old: Member, new: Member) -> bool {
        match self.index_of(old) {
            Some(i) => {
                self.slots[i] = Some(new);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.marker = 0;
    }

    /// Slot at the rotating recycle marker, then advance the marker.
    pub(crate) fn rotate(&mut self) -> Option<Member> {
        if self.slots.is_empty() {
            return None;
        }
        let i = self.marker % self.slots.len();
        self.marker += 1;
        if self.max_size > 0 && self.marker >= self.max_size {
            self.marker = 0;
        }
        self.slots[i]
    }

    /// Empty every slot pointing at `member`.
    pub(crate) fn scrub(&mut self, member: Member) {
        for s in self.slots.iter_mut() {
            if *s == Some(member) {
                *s = None;
            }
        }
    }
}
