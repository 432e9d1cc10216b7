//! Chunk Generation
//!
//! The world asks a `ChunkGenerator` for the features of a chunk the first
//! time that chunk is touched. Generation must be deterministic per
//! coordinate: revisiting an evicted chunk regenerates the same layout.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::chunk::ChunkCoord;
use super::feature::{BerryColor, Feature, FeatureKind};
use super::math::Vec2;

/// Produces the features of a freshly created chunk.
pub trait ChunkGenerator {
    /// Features for `coord`. Positions must fall inside the chunk bounds.
    fn generate(&self, coord: ChunkCoord, chunk_size: f64) -> Vec<Feature>;
}

/// Generates nothing (open field)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, _coord: ChunkCoord, _chunk_size: f64) -> Vec<Feature> {
        Vec::new()
    }
}

/// Hand-placed features, bucketed into whichever chunk asks for them.
#[derive(Debug, Clone, Default)]
pub struct FixedGenerator {
    features: Vec<Feature>,
}

impl FixedGenerator {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }
}

impl ChunkGenerator for FixedGenerator {
    fn generate(&self, coord: ChunkCoord, chunk_size: f64) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|f| ChunkCoord::from_position(f.position, chunk_size) == coord)
            .cloned()
            .collect()
    }
}

/// Spawn weights per kind (bushes pick a random color)
const KIND_WEIGHTS: [(u32, WeightedKind); 4] = [
    (35, WeightedKind::Tree),
    (20, WeightedKind::Rock),
    (15, WeightedKind::Cactus),
    (30, WeightedKind::Bush),
];

#[derive(Debug, Clone, Copy)]
enum WeightedKind {
    Tree,
    Rock,
    Cactus,
    Bush,
}

/// Seeded random scatter.
#[derive(Debug, Clone)]
pub struct SeededGenerator {
    pub seed: u64,
    pub min_features: u32,
    pub max_features: u32,
    /// No features are placed with their center within this distance of the origin
    pub spawn_clearing: f64,
}

impl SeededGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            min_features: 4,
            max_features: 10,
            spawn_clearing: 150.0,
        }
    }

    /// Per-chunk RNG derived from the world seed and the coordinate
    fn chunk_rng(&self, coord: ChunkCoord) -> StdRng {
        let mut h = self.seed ^ 0x9E37_79B9_7F4A_7C15;
        h ^= (coord.x as i64 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h = h.rotate_left(31);
        h ^= (coord.y as i64 as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
        StdRng::seed_from_u64(h)
    }

    fn pick_kind(rng: &mut StdRng) -> FeatureKind {
        let total: u32 = KIND_WEIGHTS.iter().map(|(w, _)| w).sum();
        let mut roll = rng.gen_range(0..total);
        let mut picked = WeightedKind::Tree;
        for (weight, kind) in KIND_WEIGHTS {
            if roll < weight {
                picked = kind;
                break;
            }
            roll -= weight;
        }
        match picked {
            WeightedKind::Tree => FeatureKind::Tree,
            WeightedKind::Rock => FeatureKind::Rock,
            WeightedKind::Cactus => FeatureKind::Cactus,
            WeightedKind::Bush => {
                let color = BerryColor::ALL[rng.gen_range(0..BerryColor::ALL.len())];
                FeatureKind::BerryBush(color)
            }
        }
    }
}

impl ChunkGenerator for SeededGenerator {
    fn generate(&self, coord: ChunkCoord, chunk_size: f64) -> Vec<Feature> {
        let mut rng = self.chunk_rng(coord);
        let origin = coord.origin(chunk_size);
        let count = rng.gen_range(self.min_features..=self.max_features.max(self.min_features));
        let clearing_sq = self.spawn_clearing * self.spawn_clearing;

        let mut features = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let kind = Self::pick_kind(&mut rng);
            // Anchor stays strictly inside the chunk so it maps back to `coord`
            let position = origin + Vec2::new(
                rng.gen_range(0.0..chunk_size),
                rng.gen_range(0.0..chunk_size),
            );
            let feature = Feature::new(kind, position);
            if feature.center().distance_squared(Vec2::ZERO) < clearing_sq {
                continue;
            }
            features.push(feature);
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let gen = SeededGenerator::new(42);
        let coord = ChunkCoord::new(3, -2);
        assert_eq!(gen.generate(coord, 512.0), gen.generate(coord, 512.0));
    }

    #[test]
    fn test_seeded_features_stay_in_chunk() {
        let gen = SeededGenerator::new(7);
        for coord in ChunkCoord::new(0, 0).ring(2) {
            for f in gen.generate(coord, 512.0) {
                assert_eq!(ChunkCoord::from_position(f.position, 512.0), coord);
            }
        }
    }

    #[test]
    fn test_spawn_clearing() {
        let gen = SeededGenerator {
            seed: 1,
            min_features: 50,
            max_features: 50,
            spawn_clearing: 200.0,
        };
        for coord in ChunkCoord::new(0, 0).ring(1) {
            for f in gen.generate(coord, 256.0) {
                assert!(f.center().len() >= 200.0);
            }
        }
    }

    #[test]
    fn test_fixed_generator_buckets_by_chunk() {
        let gen = FixedGenerator::default()
            .with(Feature::new(FeatureKind::Rock, Vec2::new(10.0, 10.0)))
            .with(Feature::new(FeatureKind::Tree, Vec2::new(-10.0, 10.0)));
        assert_eq!(gen.generate(ChunkCoord::new(0, 0), 100.0).len(), 1);
        assert_eq!(gen.generate(ChunkCoord::new(-1, 0), 100.0)[0].kind, FeatureKind::Tree);
        assert!(gen.generate(ChunkCoord::new(5, 5), 100.0).is_empty());
    }
}
