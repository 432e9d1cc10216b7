//! Player
//!
//! Position is the bottom-left anchor; the center is always derived from
//! position + half size so the two can never drift apart.

use super::inventory::ItemKind;
use super::math::Vec2;

/// Walk cycle frame length in seconds
const WALK_FRAME_TIME: f64 = 0.15;
/// Frames in the walk cycle
const WALK_FRAMES: u32 = 4;

/// Movement animation state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    /// Accumulated time spent walking (drives the frame index)
    Walking { elapsed: f64 },
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    size: Vec2,
    /// Facing in radians, 0 = +x, counter-clockwise
    rotation: f64,
    anim: AnimState,
    /// Item drawn in hand
    held_item: Option<ItemKind>,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
            anim: AnimState::Idle,
            held_item: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size.scale(0.5)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Face along `direction`; a zero vector keeps the last facing.
    pub fn face(&mut self, direction: Vec2) {
        if !direction.is_zero() {
            self.rotation = direction.y.atan2(direction.x);
        }
    }

    pub fn anim(&self) -> AnimState {
        self.anim
    }

    pub fn walk(&mut self, dt: f64) {
        let elapsed = match self.anim {
            AnimState::Walking { elapsed } => elapsed + dt,
            AnimState::Idle => dt,
        };
        self.anim = AnimState::Walking { elapsed };
    }

    pub fn stop(&mut self) {
        self.anim = AnimState::Idle;
    }

    /// Current walk-cycle frame (0 while idle)
    pub fn frame(&self) -> u32 {
        match self.anim {
            AnimState::Idle => 0,
            AnimState::Walking { elapsed } => (elapsed / WALK_FRAME_TIME) as u32 % WALK_FRAMES,
        }
    }

    pub fn held_item(&self) -> Option<ItemKind> {
        self.held_item
    }

    /// Returns true if the visual changed
    pub fn change_item(&mut self, item: Option<ItemKind>) -> bool {
        let changed = self.held_item != item;
        self.held_item = item;
        changed
    }
}
