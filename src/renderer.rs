//! World Renderer
//!
//! Draws the session with macroquad 2D primitives. Feature geometry is
//! cached per chunk and only rebuilt when the session reports the chunk as
//! loaded or dirty; unloaded chunks drop their batch.

use std::collections::BTreeMap;
use macroquad::prelude::*;
use primal::game::feature::{BerryColor, FeatureKind};
use primal::game::inventory::ItemKind;
use primal::game::math::Vec2 as WorldVec2;
use primal::game::{ChunkCoord, FeatureId, GameSession, OrthoCamera};

/// Window background (grass)
const GROUND: Color = Color::new(0.42, 0.62, 0.29, 1.0);
/// Hit highlight
const FLASH: Color = Color::new(1.0, 1.0, 1.0, 0.45);

/// Hotbar cell size in pixels
const SLOT_SIZE: f32 = 48.0;
const SLOT_GAP: f32 = 6.0;

/// One feature as drawn: world rect plus fill
#[derive(Debug, Clone, Copy)]
struct Sprite {
    id: FeatureId,
    min: WorldVec2,
    size: WorldVec2,
    color: Color,
}

/// Per-chunk draw batches
#[derive(Default)]
pub struct WorldRenderer {
    batches: BTreeMap<ChunkCoord, Vec<Sprite>>,
    /// Highlights in their last unit, from this tick's feedback events
    fading: BTreeMap<FeatureId, f32>,
}

fn feature_color(kind: FeatureKind) -> Color {
    match kind {
        FeatureKind::Tree => Color::new(0.13, 0.36, 0.16, 1.0),
        FeatureKind::Rock => Color::new(0.5, 0.5, 0.52, 1.0),
        FeatureKind::Cactus => Color::new(0.25, 0.55, 0.3, 1.0),
        FeatureKind::BerryBush(color) => berry_color(color),
    }
}

fn berry_color(color: BerryColor) -> Color {
    match color {
        BerryColor::Blue => Color::new(0.25, 0.35, 0.85, 1.0),
        BerryColor::Orange => Color::new(0.95, 0.55, 0.15, 1.0),
        BerryColor::Purple => Color::new(0.55, 0.25, 0.7, 1.0),
        BerryColor::Red => Color::new(0.85, 0.2, 0.2, 1.0),
        BerryColor::Yellow => Color::new(0.95, 0.85, 0.2, 1.0),
    }
}

fn item_color(item: ItemKind) -> Color {
    match item {
        ItemKind::Wood => Color::new(0.55, 0.35, 0.18, 1.0),
        ItemKind::Stone => Color::new(0.5, 0.5, 0.52, 1.0),
        ItemKind::Cactus => Color::new(0.25, 0.55, 0.3, 1.0),
        ItemKind::Berries(color) => berry_color(color),
        ItemKind::Shovel => Color::new(0.7, 0.7, 0.75, 1.0),
        ItemKind::Spear => Color::new(0.8, 0.75, 0.6, 1.0),
    }
}

/// Maps world points to window pixels for one frame
struct ScreenMap {
    camera: OrthoCamera,
    scale_x: f32,
    scale_y: f32,
    window_h: f32,
}

impl ScreenMap {
    fn new(camera: OrthoCamera) -> Self {
        let (w, h) = (screen_width(), screen_height());
        Self {
            scale_x: w / camera.viewport.x as f32,
            scale_y: h / camera.viewport.y as f32,
            window_h: h,
            camera,
        }
    }

    fn point(&self, world: WorldVec2) -> (f32, f32) {
        let vp = self.camera.world_to_viewport(world);
        (vp.x as f32 * self.scale_x, self.window_h - vp.y as f32 * self.scale_y)
    }

    /// Window rect (x, y, w, h) of a world box anchored bottom-left
    fn rect(&self, min: WorldVec2, size: WorldVec2) -> (f32, f32, f32, f32) {
        let (x, y) = self.point(WorldVec2::new(min.x, min.y + size.y));
        let w = (size.x / self.camera.zoom) as f32 * self.scale_x;
        let h = (size.y / self.camera.zoom) as f32 * self.scale_y;
        (x, y, w, h)
    }
}

impl WorldRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the chunk events of the last tick
    pub fn sync(&mut self, session: &GameSession) {
        let events = session.events();
        for coord in events.chunk_unloaded.iter() {
            self.batches.remove(coord);
        }
        for coord in events.chunk_loaded.iter().chain(events.chunk_dirty.iter()) {
            self.rebuild(session, *coord);
        }

        self.fading = events
            .feedback
            .iter()
            .map(|e| (e.feature, e.opacity as f32))
            .collect();
    }

    fn rebuild(&mut self, session: &GameSession, coord: ChunkCoord) {
        let sprites = session
            .world()
            .chunk_features(coord)
            .map(|(id, f)| Sprite {
                id,
                min: f.position,
                size: f.size,
                color: feature_color(f.kind),
            })
            .collect();
        self.batches.insert(coord, sprites);
    }

    /// Draw world, player and HUD
    pub fn draw(&self, session: &GameSession) {
        clear_background(GROUND);
        let map = ScreenMap::new(session.camera());

        for sprite in self.batches.values().flatten() {
            let (x, y, w, h) = map.rect(sprite.min, sprite.size);
            draw_rectangle(x, y, w, h, sprite.color);

            if session.feedback().contains(sprite.id) {
                // Fully lit until the last unit, then fades out
                let opacity = self.fading.get(&sprite.id).copied().unwrap_or(1.0);
                let alpha = FLASH.a * opacity;
                draw_rectangle(x, y, w, h, Color::new(FLASH.r, FLASH.g, FLASH.b, alpha));
            }
        }

        self.draw_player(session, &map);
        self.draw_hud(session);
    }

    fn draw_player(&self, session: &GameSession, map: &ScreenMap) {
        let player = session.player();
        let (x, y, w, h) = map.rect(player.position(), player.size());
        // Walk cycle bob
        let bob = [0.0, -2.0, 0.0, 2.0][player.frame() as usize % 4];
        draw_rectangle(x, y + bob, w, h, Color::new(0.85, 0.7, 0.55, 1.0));

        let (cx, cy) = map.point(player.center());
        let reach = w.max(h) * 0.6;
        let angle = player.rotation() as f32;
        // Window y grows downward
        let (hx, hy) = (cx + angle.cos() * reach, cy - angle.sin() * reach);
        let hand = player.held_item().map(item_color).unwrap_or(DARKBROWN);
        draw_line(cx, cy, hx, hy, 3.0, hand);
        draw_circle(hx, hy, 5.0, hand);
    }

    fn draw_hud(&self, session: &GameSession) {
        let health = session.health();
        draw_rectangle(16.0, 16.0, 204.0, 20.0, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_rectangle(18.0, 18.0, 200.0 * health.fraction() as f32, 16.0, RED);
        draw_text(&format!("{:.0}", health.get()), 226.0, 32.0, 20.0, WHITE);

        let inventory = session.inventory();
        let active = inventory.active_slot();
        let y = screen_height() - SLOT_SIZE - 16.0;
        for (slot, stack) in inventory.stacks().iter().enumerate() {
            let x = 16.0 + slot as f32 * (SLOT_SIZE + SLOT_GAP);
            let border = if Some(slot) == active { YELLOW } else { Color::new(0.0, 0.0, 0.0, 0.6) };
            draw_rectangle(x - 2.0, y - 2.0, SLOT_SIZE + 4.0, SLOT_SIZE + 4.0, border);
            draw_rectangle(x, y, SLOT_SIZE, SLOT_SIZE, Color::new(0.15, 0.15, 0.15, 0.85));
            draw_rectangle(x + 10.0, y + 10.0, SLOT_SIZE - 20.0, SLOT_SIZE - 20.0, item_color(stack.kind));
            draw_text(&stack.count.to_string(), x + 4.0, y + SLOT_SIZE - 4.0, 18.0, WHITE);
        }
        if let Some(stack) = inventory.active() {
            draw_text(stack.kind.label(), 16.0, y - 10.0, 20.0, WHITE);
        }
    }
}

/// End-of-session screen
pub fn draw_death_screen(session: &GameSession) {
    clear_background(Color::new(0.08, 0.05, 0.05, 1.0));
    let title = "You died";
    let dims = measure_text(title, None, 64, 1.0);
    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0;
    draw_text(title, cx - dims.width / 2.0, cy, 64.0, RED);

    let detail = format!("Survived {:.0}s. Press Enter to start over.", session.elapsed());
    let dims = measure_text(&detail, None, 24, 1.0);
    draw_text(&detail, cx - dims.width / 2.0, cy + 40.0, 24.0, LIGHTGRAY);
}
