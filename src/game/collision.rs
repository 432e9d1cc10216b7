//! Collision System
//!
//! Axis-separated soft collision against world features. The player is a
//! point (its center) and each collidable feature a soft radius:
//! `(base + half_width)^2 / 4` compared against squared distance.
//!
//! Each axis is tested on its own so the player slides along obstacles:
//! only the blocked component of the movement is cancelled.

use super::arena::FeatureId;
use super::feature::soft_threshold;
use super::math::Vec2;
use super::world::World;

/// Result of resolving one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Movement that is actually allowed
    pub delta: Vec2,
    /// Horizontal component was cancelled
    pub blocked_x: bool,
    /// Vertical component was cancelled
    pub blocked_y: bool,
}

/// Resolve a desired movement `delta` for a player centered at `center`.
///
/// Only the chunk at the destination is consulted. Features are scanned in
/// chunk order; the first one that blocks both axes ends the scan with a
/// zero delta.
pub fn resolve_movement(world: &mut World, center: Vec2, delta: Vec2, soft_radius_base: f64) -> CollisionResult {
    let mut result = CollisionResult {
        delta,
        blocked_x: false,
        blocked_y: false,
    };
    if delta.is_zero() {
        return result;
    }

    let destination = center + delta;
    let coord = world.coord_for(destination);
    world.ensure_chunk(coord);

    for (_, feature) in world.chunk_features(coord) {
        if !feature.collidable {
            continue;
        }
        let threshold = soft_threshold(feature, soft_radius_base);

        // Y-only destination
        if feature.distance_to(Vec2::new(center.x, center.y + result.delta.y)) <= threshold {
            result.delta.y = 0.0;
            result.blocked_y = true;
        }
        // X-only destination
        if feature.distance_to(Vec2::new(center.x + result.delta.x, center.y)) <= threshold {
            result.delta.x = 0.0;
            result.blocked_x = true;
        }

        if result.delta.is_zero() {
            return CollisionResult {
                delta: Vec2::ZERO,
                blocked_x: true,
                blocked_y: true,
            };
        }
    }

    result
}

/// First hazard in the player's chunk within its soft radius plus `bonus`.
///
/// Hazards don't stack: only the first match in scan order counts.
pub fn find_hazard(world: &mut World, center: Vec2, soft_radius_base: f64, bonus: f64) -> Option<FeatureId> {
    let coord = world.coord_for(center);
    world.ensure_chunk(coord);

    world
        .chunk_features(coord)
        .find(|(_, f)| {
            f.collidable && f.is_hazard() && f.distance_to(center) <= soft_threshold(f, soft_radius_base) + bonus
        })
        .map(|(id, _)| id)
}
