//! Feature Arena with Generational Handles
//!
//! Every feature loaded into the world lives in one arena. Chunks, the
//! click-feedback map and render events refer to features by `FeatureId`:
//! - Each slot has a generation counter
//! - Removing a feature frees its slot for reuse
//! - The generation increments on reuse, invalidating old handles
//!
//! A stale handle (e.g. a feedback entry for a harvested bush) simply
//! resolves to `None` instead of aliasing whatever reused the slot.

use serde::{Deserialize, Serialize};
use super::feature::Feature;

/// Stable handle to a feature in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId {
    /// Slot in the arena
    index: u32,
    /// Generation counter - increments when slot is reused
    generation: u32,
}

impl FeatureId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Slot storage for features, reusing freed slots with bumped generations.
#[derive(Debug, Default)]
pub struct FeatureArena {
    /// Sparse feature data indexed by slot
    slots: Vec<Option<Feature>>,
    /// Generation counter for each slot
    generations: Vec<u32>,
    /// Free slots available for reuse (LIFO)
    free_indices: Vec<u32>,
    alive_count: usize,
}

impl FeatureArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a feature and return its handle.
    pub fn insert(&mut self, feature: Feature) -> FeatureId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped on remove
            self.slots[index as usize] = Some(feature);
            FeatureId::new(index, self.generations[index as usize])
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Some(feature));
            self.generations.push(0);
            FeatureId::new(index, 0)
        }
    }

    /// Remove a feature, returning it if the handle was live.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        if !self.contains(id) {
            return None;
        }
        let idx = id.index as usize;
        self.generations[idx] += 1;
        self.free_indices.push(id.index);
        self.alive_count -= 1;
        self.slots[idx].take()
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        let idx = id.index as usize;
        idx < self.slots.len() && self.generations[idx] == id.generation && self.slots[idx].is_some()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        if !self.contains(id) {
            return None;
        }
        self.slots[id.index as usize].as_ref()
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        if !self.contains(id) {
            return None;
        }
        self.slots[id.index as usize].as_mut()
    }

    /// Iterate over all live (handle, feature) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .map(|f| (FeatureId::new(idx as u32, self.generations[idx]), f))
            })
    }

    pub fn len(&self) -> usize {
        self.alive_count
    }

    pub fn is_empty(&self) -> bool {
        self.alive_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::feature::FeatureKind;
    use crate::game::math::Vec2;

    fn rock() -> Feature {
        Feature::new(FeatureKind::Rock, Vec2::ZERO)
    }

    #[test]
    fn test_insert_and_remove() {
        let mut arena = FeatureArena::new();

        let a = arena.insert(rock());
        let b = arena.insert(rock());
        assert_eq!(arena.len(), 2);

        assert!(arena.remove(a).is_some());
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert!(arena.remove(a).is_none());
    }

    #[test]
    fn test_generation_prevents_reuse_collision() {
        let mut arena = FeatureArena::new();

        let old = arena.insert(rock());
        arena.remove(old);

        // Same slot, new generation
        let new = arena.insert(Feature::new(FeatureKind::Tree, Vec2::ZERO));
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());

        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new).map(|f| f.kind), Some(FeatureKind::Tree));
    }

    #[test]
    fn test_iteration_skips_holes() {
        let mut arena = FeatureArena::new();
        let a = arena.insert(rock());
        let b = arena.insert(rock());
        let c = arena.insert(rock());
        arena.remove(b);

        let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }
}
