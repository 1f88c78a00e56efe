//! Generation-checked slot storage for entities and groups.

use crate::types::Handle;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Vec of slots with a free list; removing bumps the slot generation.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), len: 0 }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, value: T) -> Handle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, value: Some(value) });
        Handle { index, generation: 0 }
    }

    pub fn remove(&mut self, h: Handle) -> Option<T> {
        let slot = self.slots.get_mut(h.index as usize)?;
        if slot.generation != h.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(h.index);
        self.len -= 1;
        Some(value)
    }

    pub fn contains(&self, h: Handle) -> bool {
        self.get(h).is_some()
    }

    pub fn get(&self, h: Handle) -> Option<&T> {
        let slot = self.slots.get(h.index as usize)?;
        if slot.generation != h.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, h: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(h.index as usize)?;
        if slot.generation != h.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Two distinct live slots borrowed mutably at once.
    pub fn get2_mut(&mut self, a: Handle, b: Handle) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (ia, ib) = (a.index as usize, b.index as usize);
        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let lo_ref = head[lo].value.as_mut()?;
        let hi_ref = tail[0].value.as_mut()?;
        if ia < ib { Some((lo_ref, hi_ref)) } else { Some((hi_ref, lo_ref)) }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value
                .as_ref()
                .map(|v| (Handle { index: i as u32, generation: s.generation }, v))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.value
                .as_mut()
                .map(move |v| (Handle { index: i as u32, generation }, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_is_stale_after_reuse() {
        let mut a: Arena<&str> = Arena::new();
        let h0 = a.insert("a");
        assert_eq!(a.remove(h0), Some("a"));
        let h1 = a.insert("b");
        assert_eq!(h1.index, h0.index);
        assert_ne!(h1.generation, h0.generation);
        assert!(a.get(h0).is_none());
        assert_eq!(a.get(h1), Some(&"b"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_get2_mut_orders_and_rejects_aliasing() {
        let mut a = Arena::new();
        let h0 = a.insert(1);
        let h1 = a.insert(2);
        {
            let (x, y) = a.get2_mut(h1, h0).unwrap();
            assert_eq!((*x, *y), (2, 1));
            *x += 10;
        }
        assert_eq!(a.get(h1), Some(&12));
        assert!(a.get2_mut(h0, h0).is_none());
    }
}
