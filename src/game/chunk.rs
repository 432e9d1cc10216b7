//! Chunks
//!
//! Fixed-size square buckets of the world. A chunk only stores handles;
//! the features themselves live in the world's arena.

use serde::{Deserialize, Serialize};
use super::arena::FeatureId;
use super::math::Vec2;

/// Integer grid coordinate of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `floor(x / size), floor(y / size)`
    pub fn from_position(position: Vec2, chunk_size: f64) -> Self {
        Self {
            x: (position.x / chunk_size).floor() as i32,
            y: (position.y / chunk_size).floor() as i32,
        }
    }

    /// Chebyshev (ring) distance between two chunk coordinates
    pub fn ring_distance(self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// World-space bottom-left corner
    pub fn origin(self, chunk_size: f64) -> Vec2 {
        Vec2::new(self.x as f64 * chunk_size, self.y as f64 * chunk_size)
    }

    /// All coordinates within `radius` (inclusive), row-major from the bottom row.
    pub fn ring(self, radius: i32) -> Vec<ChunkCoord> {
        let radius = radius.max(0);
        let mut coords = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for y in (self.y - radius)..=(self.y + radius) {
            for x in (self.x - radius)..=(self.x + radius) {
                coords.push(ChunkCoord::new(x, y));
            }
        }
        coords
    }
}

/// A spatial bucket owning the handles of the features inside it.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    /// Kept in insertion order so scans are deterministic
    features: Vec<FeatureId>,
    /// Render batch needs rebuilding
    dirty: bool,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            features: Vec::new(),
            dirty: true,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn add_feature(&mut self, id: FeatureId) {
        if !self.features.contains(&id) {
            self.features.push(id);
            self.dirty = true;
        }
    }

    /// Returns true if the handle was present.
    pub fn remove_feature(&mut self, id: FeatureId) -> bool {
        let before = self.features.len();
        self.features.retain(|&f| f != id);
        let removed = self.features.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.features.contains(&id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_floors_negatives() {
        assert_eq!(ChunkCoord::from_position(Vec2::new(10.0, 10.0), 100.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_position(Vec2::new(-0.5, 250.0), 100.0), ChunkCoord::new(-1, 2));
        assert_eq!(ChunkCoord::from_position(Vec2::new(-100.0, -100.1), 100.0), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn test_ring_is_row_major() {
        let ring = ChunkCoord::new(0, 0).ring(1);
        assert_eq!(ring.len(), 9);
        assert_eq!(ring[0], ChunkCoord::new(-1, -1));
        assert_eq!(ring[1], ChunkCoord::new(0, -1));
        assert_eq!(ring[4], ChunkCoord::new(0, 0));
        assert_eq!(ring[8], ChunkCoord::new(1, 1));
    }

    #[test]
    fn test_ring_distance() {
        let a = ChunkCoord::new(0, 0);
        assert_eq!(a.ring_distance(ChunkCoord::new(2, -1)), 2);
        assert_eq!(a.ring_distance(a), 0);
    }

    #[test]
    fn test_add_remove() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        let id = FeatureId::new(3, 0);
        chunk.take_dirty();

        chunk.add_feature(id);
        chunk.add_feature(id);
        assert_eq!(chunk.features().len(), 1);
        assert!(chunk.take_dirty());

        assert!(chunk.remove_feature(id));
        assert!(!chunk.remove_feature(id));
        assert!(chunk.features().is_empty());
        assert!(chunk.is_dirty());
    }
}
