//! Indexed binary min-heap with decrease-key.
//!
//! The heap stores `(priority, id)` pairs in a dense array and keeps a
//! position map from id to heap slot, so a priority can be lowered in
//! O(log n) without searching for the entry. Ids are dense indices in
//! `0..capacity`.

/// Heap entry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry<P> {
    priority: P,
    id: usize,
}

/// Binary min-heap over `(priority, id)` pairs with an id-to-slot map.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<P> {
    entries: Vec<Entry<P>>,
    slots: Vec<Option<usize>>,
}

impl<P: PartialOrd + Copy> IndexedMinHeap<P> {
    /// Create an empty heap able to hold ids in `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            slots: vec![None; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is currently queued.
    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(Option::is_some)
    }

    /// Current priority of a queued id.
    pub fn priority(&self, id: usize) -> Option<P> {
        self.slot(id).map(|slot| self.entries[slot].priority)
    }

    /// Queue a new id. The id must not already be present.
    pub fn insert(&mut self, priority: P, id: usize) {
        debug_assert!(!self.contains(id), "id {id} is already queued");
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
        }

        let slot = self.entries.len();
        self.entries.push(Entry { priority, id });
        self.slots[id] = Some(slot);
        self.sift_up(slot);
    }

    /// Lower the priority of `id` if `priority` is strictly lower than the
    /// current one. Returns whether anything changed.
    pub fn decrease(&mut self, priority: P, id: usize) -> bool {
        let Some(slot) = self.slot(id) else {
            return false;
        };
        if priority < self.entries[slot].priority {
            self.entries[slot].priority = priority;
            self.sift_up(slot);
            true
        } else {
            false
        }
    }

    /// Set the priority of `id` without comparing; the caller has already
    /// established that it is an improvement. Absent ids are ignored.
    pub fn decrease_raw(&mut self, priority: P, id: usize) {
        if let Some(slot) = self.slot(id) {
            self.entries[slot].priority = priority;
            self.sift_up(slot);
        }
    }

    /// Remove and return the id with the lowest priority.
    pub fn extract_min(&mut self) -> Option<(P, usize)> {
        let last = self.entries.pop()?;
        self.slots[last.id] = None;

        if self.entries.is_empty() {
            return Some((last.priority, last.id));
        }

        let root = std::mem::replace(&mut self.entries[0], last);
        self.slots[root.id] = None;
        self.slots[last.id] = Some(0);
        self.sift_down(0);

        Some((root.priority, root.id))
    }

    fn slot(&self, id: usize) -> Option<usize> {
        self.slots.get(id).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots[self.entries[a].id] = Some(a);
        self.slots[self.entries[b].id] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) >> 1;
            if self.entries[slot].priority < self.entries[parent].priority {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = (slot << 1) + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            // Prefer the right child only when it is strictly smaller.
            let child = if right < len && self.entries[right].priority < self.entries[left].priority
            {
                right
            } else {
                left
            };

            if self.entries[slot].priority > self.entries[child].priority {
                self.swap(slot, child);
                slot = child;
            } else {
                break;
            }
        }
    }
}
