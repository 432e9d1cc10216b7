//! Event System
//!
//! The session never talks to the renderer or HUD directly. Each tick it
//! records what changed into typed queues and the frontend drains them
//! afterwards:
//! 1. Click harvests a bush → FeatureRemoved + ItemCollected + ChunkDirty
//! 2. Renderer rebuilds that chunk's batch
//! 3. HUD refreshes the inventory panel
//!
//! Queues are cleared at the start of every tick.

use super::arena::FeatureId;
use super::chunk::ChunkCoord;
use super::inventory::ItemKind;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for everything the frontend may react to.
#[derive(Debug, Default)]
pub struct Events {
    /// A feature took a non-lethal hit
    pub feature_hit: EventQueue<FeatureHitEvent>,

    /// A feature was harvested and removed
    pub feature_removed: EventQueue<FeatureRemovedEvent>,

    /// Items entered the inventory
    pub item_collected: EventQueue<ItemCollectedEvent>,

    /// Item consumed with the use action
    pub item_consumed: EventQueue<ItemKind>,

    /// Held-item visual changed
    pub held_item_changed: EventQueue<Option<ItemKind>>,

    /// Chunk render batch must be rebuilt
    pub chunk_dirty: EventQueue<ChunkCoord>,

    /// Chunk streamed in
    pub chunk_loaded: EventQueue<ChunkCoord>,

    /// Chunk streamed out
    pub chunk_unloaded: EventQueue<ChunkCoord>,

    /// Fading highlight on a recently hit feature
    pub feedback: EventQueue<FeedbackEvent>,

    /// Health reached zero
    pub session_ended: EventQueue<SessionEndedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues
    pub fn clear_all(&mut self) {
        self.feature_hit.clear();
        self.feature_removed.clear();
        self.item_collected.clear();
        self.item_consumed.clear();
        self.held_item_changed.clear();
        self.chunk_dirty.clear();
        self.chunk_loaded.clear();
        self.chunk_unloaded.clear();
        self.feedback.clear();
        self.session_ended.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureHitEvent {
    pub feature: FeatureId,
    pub damage: i32,
    pub remaining: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRemovedEvent {
    pub feature: FeatureId,
    pub chunk: ChunkCoord,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemCollectedEvent {
    pub item: ItemKind,
    pub count: u32,
    /// Harvested feature the item came from
    pub source: Option<FeatureId>,
}

/// Opacity below 1.0 means the highlight is fading out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackEvent {
    pub feature: FeatureId,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionEndedEvent {
    /// Seconds survived
    pub elapsed: f64,
    /// Whole hunger ticks elapsed
    pub ticks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.chunk_dirty.send(ChunkCoord::new(1, 2));
        events.item_collected.send(ItemCollectedEvent {
            item: ItemKind::Wood,
            count: 1,
            source: None,
        });
        assert_eq!(events.chunk_dirty.len(), 1);

        events.clear_all();
        assert!(events.chunk_dirty.is_empty());
        assert!(events.item_collected.is_empty());
    }
}
