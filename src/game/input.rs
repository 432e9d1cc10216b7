//! Input contract
//!
//! The session only ever asks pure questions about input. The one side
//! effect it performs itself is clearing the per-tick mouse action set
//! once it has been consumed.

use std::collections::HashSet;
use super::math::Vec2;

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    /// Hotbar slot 0..=9 (keys 1..9 then 0)
    Slot(u8),
}

/// Number of hotbar slots reachable from the number row
pub const SLOT_KEYS: u8 = 10;

/// Mouse events collected since the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Hit / harvest
    Primary,
    /// Use (eat) the active item
    Secondary,
    ScrollUp,
    ScrollDown,
}

/// Source of input for one tick.
pub trait InputSource {
    /// Is the key held right now?
    fn is_key_down(&self, key: GameKey) -> bool;

    /// Was the key pressed this tick?
    fn is_key_pressed(&self, key: GameKey) -> bool;

    /// Did this mouse action happen since the last clear?
    fn has_mouse_action(&self, action: MouseAction) -> bool;

    /// Forget consumed mouse actions
    fn clear_mouse_actions(&mut self);

    /// Pointer in window pixels, origin top-left
    fn pointer(&self) -> Vec2;

    /// Window size in pixels
    fn window_size(&self) -> Vec2;
}

/// Plain snapshot of input state (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub held: HashSet<GameKey>,
    pub pressed: HashSet<GameKey>,
    pub mouse: HashSet<MouseAction>,
    pub pointer: Vec2,
    pub window_size: Vec2,
}

impl FrameInput {
    pub fn new(window_size: Vec2) -> Self {
        Self {
            window_size,
            pointer: window_size.scale(0.5),
            ..Default::default()
        }
    }

    pub fn hold(mut self, key: GameKey) -> Self {
        self.held.insert(key);
        self
    }

    pub fn press(mut self, key: GameKey) -> Self {
        self.pressed.insert(key);
        self
    }

    pub fn click(mut self, action: MouseAction) -> Self {
        self.mouse.insert(action);
        self
    }

    pub fn point_at(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }
}

impl InputSource for FrameInput {
    fn is_key_down(&self, key: GameKey) -> bool {
        self.held.contains(&key)
    }

    fn is_key_pressed(&self, key: GameKey) -> bool {
        self.pressed.contains(&key)
    }

    fn has_mouse_action(&self, action: MouseAction) -> bool {
        self.mouse.contains(&action)
    }

    fn clear_mouse_actions(&mut self) {
        self.mouse.clear();
    }

    fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn window_size(&self) -> Vec2 {
        self.window_size
    }
}
