//! Input state management
//!
//! Keyboard: WASD or arrow keys move, number row selects a hotbar slot.
//! Mouse: left button hits, right button eats, wheel zooms.

use std::collections::HashSet;
use macroquad::prelude::*;
use primal::game::input::{GameKey, InputSource, MouseAction};
use primal::game::math::Vec2 as WorldVec2;

/// Number row in slot order: 1..9 then 0
static SLOT_KEYS: [KeyCode; 10] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
    KeyCode::Key0,
];

/// Live keyboard/mouse state backed by macroquad
pub struct InputState {
    /// Mouse actions seen since the last clear
    mouse: HashSet<MouseAction>,
}

impl InputState {
    pub fn new() -> Self {
        Self { mouse: HashSet::new() }
    }

    /// Call once per frame before the session tick
    pub fn poll(&mut self) {
        if is_mouse_button_pressed(MouseButton::Left) {
            self.mouse.insert(MouseAction::Primary);
        }
        if is_mouse_button_pressed(MouseButton::Right) {
            self.mouse.insert(MouseAction::Secondary);
        }

        let (_, wheel) = mouse_wheel();
        if wheel < 0.0 {
            self.mouse.insert(MouseAction::ScrollDown);
        } else if wheel > 0.0 {
            self.mouse.insert(MouseAction::ScrollUp);
        }
    }

    fn keys_for(key: GameKey) -> &'static [KeyCode] {
        match key {
            GameKey::Left => &[KeyCode::A, KeyCode::Left],
            GameKey::Right => &[KeyCode::D, KeyCode::Right],
            GameKey::Up => &[KeyCode::W, KeyCode::Up],
            GameKey::Down => &[KeyCode::S, KeyCode::Down],
            GameKey::Slot(slot) => match SLOT_KEYS.get(slot as usize) {
                Some(code) => std::slice::from_ref(code),
                None => &[],
            },
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputState {
    fn is_key_down(&self, key: GameKey) -> bool {
        Self::keys_for(key).iter().any(|&code| is_key_down(code))
    }

    fn is_key_pressed(&self, key: GameKey) -> bool {
        Self::keys_for(key).iter().any(|&code| is_key_pressed(code))
    }

    fn has_mouse_action(&self, action: MouseAction) -> bool {
        self.mouse.contains(&action)
    }

    fn clear_mouse_actions(&mut self) {
        self.mouse.clear();
    }

    fn pointer(&self) -> WorldVec2 {
        let (x, y) = mouse_position();
        WorldVec2::new(x as f64, y as f64)
    }

    fn window_size(&self) -> WorldVec2 {
        WorldVec2::new(screen_width() as f64, screen_height() as f64)
    }
}
