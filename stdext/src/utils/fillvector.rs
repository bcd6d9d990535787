use std::ops::{Index, IndexMut};

// We use a u32 here instead of usize under the assumption there simply won't be that many entries
// and so that we can save some bytes in the nodes that hold these indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FVIndex(pub u32);

impl FVIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Index for slot `index`. Panics once the arena outgrows 32-bit indices.
    #[inline]
    pub(crate) fn from_slot(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(i) => FVIndex(i),
            Err(_) => panic!("fill vector full: slot {index} does not fit a 32-bit index"),
        }
    }
}

enum Slot<V> {
    Occupied(V),
    // Link to the next vacant slot, forming the free list.
    Vacant(Option<u32>),
}

/// A place to store (owned) values that can be accessed by an index, with holes being re-used.
/// A poor man's slot map or arena: the free list is threaded through the vacant slots themselves,
/// so freeing and the "is this index live" check are both O(1).
pub struct FillVector<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<u32>,
    size: usize,
}

impl<V> FillVector<V> {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            free_head: None,
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            size: 0,
        }
    }

    /// Store the value produced by `f`, which is told the index it will live at.
    pub fn add<F: FnOnce(FVIndex) -> V>(&mut self, f: F) -> FVIndex {
        let id = match self.free_head {
            None => {
                let id = FVIndex::from_slot(self.slots.len());
                self.slots.push(Slot::Occupied(f(id)));
                id
            }
            Some(idx) => {
                let id = FVIndex(idx);
                let slot = &mut self.slots[idx as usize];
                let Slot::Vacant(next) = slot else {
                    unreachable!("free list points at an occupied slot");
                };
                self.free_head = *next;
                *slot = Slot::Occupied(f(id));
                id
            }
        };
        self.size += 1;
        id
    }

    /// Remove and return the value at `id`, or `None` if the slot is already free.
    pub fn take(&mut self, id: FVIndex) -> Option<V> {
        let slot = self.slots.get_mut(id.as_usize())?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        let Slot::Occupied(v) = std::mem::replace(slot, Slot::Vacant(self.free_head)) else {
            unreachable!();
        };
        self.free_head = Some(id.0);
        self.size -= 1;
        Some(v)
    }

    pub fn free(&mut self, id: FVIndex) -> bool {
        self.take(id).is_some()
    }

    pub fn get(&self, id: FVIndex) -> Option<&V> {
        match self.slots.get(id.as_usize())? {
            Slot::Occupied(v) => Some(v),
            Slot::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, id: FVIndex) -> Option<&mut V> {
        match self.slots.get_mut(id.as_usize())? {
            Slot::Occupied(v) => Some(v),
            Slot::Vacant(_) => None,
        }
    }

    /// Mutable access to two distinct live entries at once.
    pub fn get_pair_mut(&mut self, a: FVIndex, b: FVIndex) -> Option<(&mut V, &mut V)> {
        let (ai, bi) = (a.as_usize(), b.as_usize());
        if ai == bi || ai >= self.slots.len() || bi >= self.slots.len() {
            return None;
        }
        let (first, second) = if ai < bi {
            let (lo, hi) = self.slots.split_at_mut(bi);
            (&mut lo[ai], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ai);
            (&mut hi[0], &mut lo[bi])
        };
        match (first, second) {
            (Slot::Occupied(x), Slot::Occupied(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// Drop every value and forget the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.size = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots, live or vacant.
    pub fn capacity_used(&self) -> usize {
        self.slots.len()
    }
}

impl<V> Index<FVIndex> for FillVector<V> {
    type Output = V;

    #[inline]
    fn index(&self, index: FVIndex) -> &Self::Output {
        match &self.slots[index.as_usize()] {
            Slot::Occupied(v) => v,
            Slot::Vacant(_) => panic!("access to freed slot {}", index.0),
        }
    }
}

impl<V> IndexMut<FVIndex> for FillVector<V> {
    #[inline]
    fn index_mut(&mut self, index: FVIndex) -> &mut Self::Output {
        match &mut self.slots[index.as_usize()] {
            Slot::Occupied(v) => v,
            Slot::Vacant(_) => panic!("access to freed slot {}", index.0),
        }
    }
}

impl<V> Default for FillVector<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::fillvector::{FVIndex, FillVector};

    #[test]
    fn slot_index_bounds() {
        assert_eq!(FVIndex::from_slot(7), FVIndex(7));
        assert_eq!(FVIndex::from_slot(u32::MAX as usize), FVIndex(u32::MAX));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "fill vector full")]
    fn slot_index_overflow_panics() {
        FVIndex::from_slot(u32::MAX as usize + 1);
    }

    #[test]
    fn add_and_index() {
        let mut fv = FillVector::new();
        let a = fv.add(|_| "a");
        let b = fv.add(|_| "b");
        assert_eq!(fv[a], "a");
        assert_eq!(fv[b], "b");
        assert_eq!(fv.size(), 2);
    }

    #[test]
    fn holes_are_reused() {
        let mut fv = FillVector::with_capacity(4);
        let a = fv.add(|i| i.0);
        let b = fv.add(|i| i.0);
        let c = fv.add(|i| i.0);
        assert_eq!(fv.take(b), Some(1));
        assert_eq!(fv.get(b), None);
        assert!(!fv.free(b));

        let d = fv.add(|i| i.0 + 100);
        assert_eq!(d, b);
        assert_eq!(fv[d], 101);
        assert_eq!(fv.capacity_used(), 3);
        assert_eq!(fv[a], 0);
        assert_eq!(fv[c], 2);
    }

    #[test]
    fn free_list_is_lifo() {
        let mut fv = FillVector::new();
        let ids: Vec<_> = (0..5).map(|v| fv.add(|_| v)).collect();
        assert!(fv.free(ids[1]));
        assert!(fv.free(ids[3]));
        assert_eq!(fv.add(|_| 30), ids[3]);
        assert_eq!(fv.add(|_| 10), ids[1]);
        assert_eq!(fv.add(|_| 50), FVIndex(5));
        assert_eq!(fv.size(), 6);
    }

    #[test]
    fn pair_mut_swaps() {
        let mut fv = FillVector::new();
        let a = fv.add(|_| 1);
        let b = fv.add(|_| 2);
        {
            let (x, y) = fv.get_pair_mut(b, a).unwrap();
            std::mem::swap(x, y);
        }
        assert_eq!(fv[a], 2);
        assert_eq!(fv[b], 1);
        assert!(fv.get_pair_mut(a, a).is_none());
        fv.free(b);
        assert!(fv.get_pair_mut(a, b).is_none());
    }

    #[test]
    fn clear_resets() {
        let mut fv = FillVector::new();
        fv.add(|_| 1);
        let b = fv.add(|_| 2);
        fv.free(b);
        fv.clear();
        assert!(fv.is_empty());
        assert_eq!(fv.add(|_| 3), FVIndex(0));
    }
}
