//! Game Module
//!
//! Top-down survival sandbox on an endless chunked plane.
//!
//! Key concepts:
//! - World: lazily generated chunks holding features (trees, rocks, cacti, bushes)
//! - Feature: obstacle/resource with health; harvesting yields an item
//! - Session: one play-through, advanced once per frame in a fixed order
//! - Events: per-tick notifications for the frontend (redraws, sounds, screens)
//!
//! Design philosophy:
//! - Simulation is plain data, no rendering or windowing dependencies
//! - Input and projection are traits so the session runs headless

pub mod math;
pub mod arena;
pub mod feature;
pub mod chunk;
pub mod generator;
pub mod world;
pub mod inventory;
pub mod health;
pub mod player;
pub mod collision;
pub mod events;
pub mod timers;
pub mod input;
pub mod camera;
pub mod interaction;
pub mod session;

// Re-export main types
pub use arena::FeatureId;
pub use camera::{OrthoCamera, Projection};
pub use chunk::ChunkCoord;
pub use events::Events;
pub use feature::{BerryColor, Feature, FeatureKind};
pub use generator::{ChunkGenerator, SeededGenerator};
pub use input::{FrameInput, GameKey, InputSource, MouseAction};
pub use inventory::{Inventory, ItemKind};
pub use math::Vec2;
pub use session::{GameSession, TickOutcome};
pub use world::World;
