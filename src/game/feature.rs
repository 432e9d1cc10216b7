//! World Features
//!
//! Features are the static objects scattered over the world: trees, rocks,
//! cacti and berry bushes. They never move. Clicking wears them down and a
//! feature with no health left is harvested and removed from its chunk.
//!
//! Per-kind behavior (size, toughness, collision, drops) comes from a static
//! table instead of being spread over string comparisons.

use serde::{Deserialize, Serialize};
use super::inventory::ItemKind;
use super::math::{Aabb, Vec2};

/// Berry colors (each bush drops its own berries)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BerryColor {
    Blue,
    Orange,
    Purple,
    Red,
    Yellow,
}

impl BerryColor {
    pub const ALL: [BerryColor; 5] = [
        BerryColor::Blue,
        BerryColor::Orange,
        BerryColor::Purple,
        BerryColor::Red,
        BerryColor::Yellow,
    ];
}

/// Kinds of world features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Tree,
    Rock,
    /// Hurts the player while standing close
    Cactus,
    BerryBush(BerryColor),
}

/// Static behavior for one feature kind
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// Default footprint (width, height)
    pub size: (f64, f64),
    /// Hits needed at base damage
    pub health: i32,
    /// Blocks player movement
    pub collidable: bool,
    /// Drains player health in proximity
    pub hazard: bool,
    /// Item awarded when harvested
    pub drop: ItemKind,
    /// Held items that deal bonus damage to this kind
    pub tool_bonus: &'static [ItemKind],
}

const TOOLS: &[ItemKind] = &[ItemKind::Shovel, ItemKind::Spear];

impl FeatureKind {
    /// Look up the behavior table entry for this kind
    pub fn spec(self) -> FeatureSpec {
        match self {
            FeatureKind::Tree => FeatureSpec {
                size: (60.0, 100.0),
                health: 5,
                collidable: true,
                hazard: false,
                drop: ItemKind::Wood,
                tool_bonus: TOOLS,
            },
            FeatureKind::Rock => FeatureSpec {
                size: (50.0, 40.0),
                health: 4,
                collidable: true,
                hazard: false,
                drop: ItemKind::Stone,
                tool_bonus: TOOLS,
            },
            FeatureKind::Cactus => FeatureSpec {
                size: (40.0, 60.0),
                health: 3,
                collidable: true,
                hazard: true,
                drop: ItemKind::Cactus,
                tool_bonus: TOOLS,
            },
            FeatureKind::BerryBush(color) => FeatureSpec {
                size: (40.0, 40.0),
                health: 2,
                collidable: false,
                hazard: false,
                drop: ItemKind::Berries(color),
                tool_bonus: TOOLS,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeatureKind::Tree => "tree",
            FeatureKind::Rock => "rock",
            FeatureKind::Cactus => "cactus",
            FeatureKind::BerryBush(_) => "berry bush",
        }
    }
}

/// A static, damageable world object.
///
/// `position` is the bottom-left anchor; distances are measured from the
/// footprint center.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub kind: FeatureKind,
    pub position: Vec2,
    pub size: Vec2,
    health: i32,
    pub collidable: bool,
}

impl Feature {
    /// Create a feature with the default size/health/collision of its kind
    pub fn new(kind: FeatureKind, position: Vec2) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            position,
            size: Vec2::new(spec.size.0, spec.size.1),
            health: spec.health,
            collidable: spec.collidable,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.max(0);
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    pub fn is_hazard(&self) -> bool {
        self.kind.spec().hazard
    }

    pub fn half_width(&self) -> f64 {
        self.size.x / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size.scale(0.5)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Apply damage, returns true if this hit destroyed the feature.
    pub fn hit(&mut self, damage: i32) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health = (self.health - damage.max(0)).max(0);
        self.health == 0
    }

    /// Squared distance from the footprint center to a point
    pub fn distance_to(&self, point: Vec2) -> f64 {
        self.center().distance_squared(point)
    }

    /// Does a box at `point` with `size` overlap this feature?
    pub fn collide_with(&self, point: Vec2, size: Vec2) -> bool {
        self.bounds().overlaps(&Aabb::new(point, size))
    }
}

/// Soft collision radius: `(base + half_width)^2 / 4`.
///
/// This is a tuned squared-distance threshold, not a geometric circle.
pub fn soft_threshold(feature: &Feature, base: f64) -> f64 {
    let r = base + feature.half_width();
    r * r / 4.0
}
