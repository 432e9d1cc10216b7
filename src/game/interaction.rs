//! Interaction System
//!
//! Two player actions:
//! - Primary click: hit the feature under the pointer if it is within reach,
//!   harvesting it when its health runs out
//! - Secondary: eat the active item if it is edible
//!
//! A click affects at most one feature. Chunks around the player are
//! scanned in row-major order and features in chunk order, so the same
//! click on overlapping features always picks the same one.

use rand::Rng;
use super::arena::FeatureId;
use super::chunk::ChunkCoord;
use super::feature::soft_threshold;
use super::health::HealthState;
use super::inventory::{Inventory, ItemKind};
use super::math::Vec2;
use super::timers::FeedbackMap;
use super::world::World;
use crate::config::InteractionConfig;

/// Size of the pointer's hit box in world units
const POINTER_SIZE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

/// Result of a primary click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Nothing in reach under the pointer
    Miss,
    /// Feature damaged but still standing
    Hit {
        feature: FeatureId,
        damage: i32,
        remaining: i32,
    },
    /// Feature destroyed and removed, one item awarded
    Harvested {
        feature: FeatureId,
        chunk: ChunkCoord,
        damage: i32,
        reward: ItemKind,
        /// Reward came from the rare weapon roll
        weapon_drop: bool,
    },
}

/// Damage dealt to `feature` by the held item
fn damage_for(world: &World, feature: FeatureId, held: Option<ItemKind>, config: &InteractionConfig) -> i32 {
    let bonus = match (world.feature(feature), held) {
        (Some(f), Some(item)) => f.kind.spec().tool_bonus.contains(&item),
        _ => false,
    };
    if bonus {
        config.tool_damage
    } else {
        config.base_damage
    }
}

/// First feature in reach of `player_center` whose box contains `target`.
fn pick_target(world: &mut World, player_center: Vec2, target: Vec2, config: &InteractionConfig) -> Option<(ChunkCoord, FeatureId)> {
    for coord in world.chunks_around(player_center, config.click_ring) {
        let found = world.chunk_features(coord).find(|(_, f)| {
            let reach = soft_threshold(f, config.soft_radius_base) + config.click_range_bonus;
            f.distance_to(player_center) < reach && f.collide_with(target, POINTER_SIZE)
        });
        if let Some((id, _)) = found {
            return Some((coord, id));
        }
    }
    None
}

/// Resolve a primary click at world point `target`.
pub fn resolve_click<R: Rng>(
    world: &mut World,
    inventory: &mut Inventory,
    feedback: &mut FeedbackMap,
    player_center: Vec2,
    target: Vec2,
    config: &InteractionConfig,
    rng: &mut R,
) -> ClickOutcome {
    let Some((chunk, feature)) = pick_target(world, player_center, target, config) else {
        return ClickOutcome::Miss;
    };

    let damage = damage_for(world, feature, inventory.active_item(), config);
    let Some(remaining) = world.damage_feature(feature, damage) else {
        return ClickOutcome::Miss;
    };

    if remaining > 0 {
        feedback.set(feature, config.feedback_duration);
        return ClickOutcome::Hit {
            feature,
            damage,
            remaining,
        };
    }

    let Some(removed) = world.remove_feature(feature) else {
        return ClickOutcome::Miss;
    };
    feedback.remove(feature);

    let weapon_drop = rng.gen_range(0..config.weapon_loot_odds.max(1)) == 0;
    let reward = if weapon_drop {
        ItemKind::WEAPONS[rng.gen_range(0..ItemKind::WEAPONS.len())]
    } else {
        removed.kind.spec().drop
    };
    inventory.add_item(reward, 1);

    log::debug!(
        "harvested {} at ({:.0}, {:.0}) -> {}{}",
        removed.kind.label(),
        removed.position.x,
        removed.position.y,
        reward.label(),
        if weapon_drop { " (rare drop)" } else { "" }
    );

    ClickOutcome::Harvested {
        feature,
        chunk,
        damage,
        reward,
        weapon_drop,
    }
}

/// Eat one unit of the active item if it is edible. Never touches the world.
pub fn use_active_item(inventory: &mut Inventory, health: &mut HealthState, config: &InteractionConfig) -> Option<ItemKind> {
    let item = inventory.active_item()?;
    if !item.is_edible() {
        return None;
    }
    if !inventory.remove_item(item, 1) {
        return None;
    }
    health.delta(config.eat_restore);
    Some(item)
}
