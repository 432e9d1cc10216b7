//! Game World
//!
//! The World owns every loaded chunk and every live feature:
//! - Chunks are keyed by integer grid coordinate and created lazily
//! - Features live in a generational arena, chunks hold handles
//! - Streaming loads chunks around the player and evicts far ones
//!
//! Looking up any position always succeeds: an unseen chunk is generated
//! on first touch.

use std::collections::BTreeMap;
use super::arena::{FeatureArena, FeatureId};
use super::chunk::{Chunk, ChunkCoord};
use super::feature::Feature;
use super::generator::ChunkGenerator;
use super::math::Vec2;
use crate::config::WorldConfig;

/// What a streaming pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamReport {
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
    /// Features dropped along with unloaded chunks
    pub evicted: Vec<FeatureId>,
}

/// Chunked container for all world features.
pub struct World {
    chunk_size: f64,
    load_radius: i32,
    unload_radius: i32,
    /// Ordered map so every scan over loaded chunks is deterministic
    chunks: BTreeMap<ChunkCoord, Chunk>,
    features: FeatureArena,
    generator: Box<dyn ChunkGenerator>,
    /// Chunk containing the player after the last `update`
    center: ChunkCoord,
}

impl World {
    pub fn new(config: &WorldConfig, generator: Box<dyn ChunkGenerator>) -> Self {
        Self {
            chunk_size: config.chunk_size,
            load_radius: config.load_radius.max(0),
            // Never evict something still inside the load ring
            unload_radius: config.unload_radius.max(config.load_radius.max(0)),
            chunks: BTreeMap::new(),
            features: FeatureArena::new(),
            generator,
            center: ChunkCoord::new(0, 0),
        }
    }

    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    /// Chunk containing the player as of the last streaming update
    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    /// Pure coordinate mapping, no loading
    pub fn coord_for(&self, position: Vec2) -> ChunkCoord {
        ChunkCoord::from_position(position, self.chunk_size)
    }

    /// Get the chunk at `coord`, generating it on first access.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        let features = &mut self.features;
        let chunk_size = self.chunk_size;
        self.chunks
            .entry(coord)
            .or_insert_with(|| generate_chunk(&**generator, features, chunk_size, coord))
    }

    /// Chunk owning `position`, created lazily. Identity-stable until evicted.
    pub fn chunk_for(&mut self, position: Vec2) -> &Chunk {
        let coord = self.coord_for(position);
        self.ensure_chunk(coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Every chunk within `radius` of `center()`, loading as needed.
    /// Row-major order, bottom row first.
    ///
    /// `center()` only moves on `update`, so mid-tick callers that already
    /// moved the player want `chunks_around` with the new position.
    pub fn chunks_in_range(&mut self, radius: i32) -> Vec<ChunkCoord> {
        let coords = self.center.ring(radius);
        for &coord in &coords {
            self.ensure_chunk(coord);
        }
        coords
    }

    /// Like `chunks_in_range`, around the chunk containing `position`.
    pub fn chunks_around(&mut self, position: Vec2, radius: i32) -> Vec<ChunkCoord> {
        let coords = self.coord_for(position).ring(radius);
        for &coord in &coords {
            self.ensure_chunk(coord);
        }
        coords
    }

    /// Live features of a loaded chunk in scan order.
    pub fn chunk_features(&self, coord: ChunkCoord) -> impl Iterator<Item = (FeatureId, &Feature)> + '_ {
        self.chunks
            .get(&coord)
            .into_iter()
            .flat_map(|chunk| chunk.features().iter())
            .filter_map(move |&id| self.features.get(id).map(|f| (id, f)))
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Iterate over every loaded feature (for rendering)
    pub fn features(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features.iter()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Place a feature into the chunk its position maps to.
    pub fn spawn_feature(&mut self, feature: Feature) -> FeatureId {
        let coord = self.coord_for(feature.position);
        self.ensure_chunk(coord);
        let id = self.features.insert(feature);
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.add_feature(id);
        }
        id
    }

    /// Apply damage to a feature. Returns remaining health, or None for a stale handle.
    pub fn damage_feature(&mut self, id: FeatureId, damage: i32) -> Option<i32> {
        let feature = self.features.get_mut(id)?;
        feature.hit(damage);
        Some(feature.health())
    }

    /// Remove a feature from the arena and its chunk, marking the chunk dirty.
    pub fn remove_feature(&mut self, id: FeatureId) -> Option<Feature> {
        let feature = self.features.remove(id)?;
        let coord = self.coord_for(feature.position);
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.remove_feature(id);
        }
        Some(feature)
    }

    /// Streaming step, call once per tick with the player's center.
    ///
    /// Loads every chunk within the load radius and evicts chunks beyond the
    /// unload radius. The player's chunk always exists afterwards.
    pub fn update(&mut self, center: Vec2) -> StreamReport {
        let mut report = StreamReport::default();
        self.center = self.coord_for(center);

        for coord in self.center.ring(self.load_radius) {
            if !self.chunks.contains_key(&coord) {
                self.ensure_chunk(coord);
                report.loaded.push(coord);
            }
        }

        let far: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|c| c.ring_distance(self.center) > self.unload_radius)
            .collect();

        for coord in far {
            if let Some(chunk) = self.chunks.remove(&coord) {
                for &id in chunk.features() {
                    if self.features.remove(id).is_some() {
                        report.evicted.push(id);
                    }
                }
                report.unloaded.push(coord);
            }
        }

        if !report.loaded.is_empty() || !report.unloaded.is_empty() {
            log::debug!(
                "streaming around ({}, {}): +{} -{} chunks",
                self.center.x,
                self.center.y,
                report.loaded.len(),
                report.unloaded.len()
            );
        }

        report
    }

    /// Coordinates of chunks whose render batch must be rebuilt; clears the flags.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        self.chunks
            .values_mut()
            .filter_map(|chunk| chunk.take_dirty().then(|| chunk.coord()))
            .collect()
    }


    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Run the generator for `coord` and register its features in the arena.
fn generate_chunk(
    generator: &dyn ChunkGenerator,
    features: &mut FeatureArena,
    chunk_size: f64,
    coord: ChunkCoord,
) -> Chunk {
    let mut chunk = Chunk::new(coord);
    let generated = generator.generate(coord, chunk_size);
    let count = generated.len();

    for feature in generated {
        let home = ChunkCoord::from_position(feature.position, chunk_size);
        if home != coord {
            log::warn!(
                "generator placed {} at ({:.1}, {:.1}) outside chunk ({}, {}), dropped",
                feature.kind.label(),
                feature.position.x,
                feature.position.y,
                coord.x,
                coord.y
            );
            continue;
        }
        let id = features.insert(feature);
        chunk.add_feature(id);
    }

    log::debug!("generated chunk ({}, {}) with {} features", coord.x, coord.y, count);
    chunk
}
