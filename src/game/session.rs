//! Game Session
//!
//! Owns the whole simulation state of one play-through and advances it
//! once per rendered frame. Each `update` runs in a fixed order so the
//! same inputs always produce the same result:
//!
//! 1. movement input → collision-resolved delta → position, animation
//! 2. facing from the pointer
//! 3. hazard proximity drain
//! 4. click (priority) or use-item, gated by the click cooldown
//! 5. hunger clock
//! 6. zoom
//! 7. feedback decay
//! 8. hotbar selection
//! 9. world streaming
//! 10. terminal check (health depleted)

use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::GameConfig;
use super::camera::{normalize_pointer, OrthoCamera, Projection};
use super::collision::{find_hazard, resolve_movement};
use super::events::{
    Events, FeatureHitEvent, FeatureRemovedEvent, ItemCollectedEvent, SessionEndedEvent,
};
use super::generator::{ChunkGenerator, SeededGenerator};
use super::health::HealthState;
use super::input::{GameKey, InputSource, MouseAction, SLOT_KEYS};
use super::interaction::{resolve_click, use_active_item, ClickOutcome};
use super::inventory::Inventory;
use super::math::Vec2;
use super::player::Player;
use super::timers::{FeedbackMap, HungerClock};
use super::world::World;

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Health ran out; hand over to the end-of-session screen
    Ended,
}

/// One play-through: world, player and everything they carry.
pub struct GameSession {
    config: GameConfig,
    world: World,
    player: Player,
    inventory: Inventory,
    health: HealthState,
    hunger: HungerClock,
    feedback: FeedbackMap,
    events: Events,
    /// Loot rolls
    rng: StdRng,
    zoom: f64,
    /// Seconds until the next click/use is accepted
    click_cooldown: f64,
    elapsed: f64,
    ended: bool,
}

impl GameSession {
    /// Create a session with an explicit world generator and loot RNG seed.
    pub fn new(config: GameConfig, generator: Box<dyn ChunkGenerator>, rng_seed: u64) -> Self {
        let player = Player::new(
            Vec2::from(config.player.spawn),
            Vec2::from(config.player.size),
        );
        // Chunks the click ring reaches must outlive the tick they were loaded in
        let mut world_config = config.world;
        world_config.unload_radius = world_config.unload_radius.max(config.interaction.click_ring);
        let mut world = World::new(&world_config, generator);
        world.update(player.center());

        Self {
            world,
            player,
            inventory: Inventory::new(),
            health: HealthState::new(config.player.max_health),
            hunger: HungerClock::new(&config.hunger),
            feedback: FeedbackMap::new(),
            events: Events::new(),
            rng: StdRng::seed_from_u64(rng_seed),
            zoom: config.camera.initial_zoom,
            click_cooldown: 0.0,
            elapsed: 0.0,
            ended: false,
            config,
        }
    }

    /// Create a session with the seeded world generator.
    /// `fallback_seed` is used when the config doesn't pin one.
    pub fn from_config(config: GameConfig, fallback_seed: u64) -> Self {
        let seed = config.generator.seed.unwrap_or(fallback_seed);
        let generator = SeededGenerator {
            seed,
            min_features: config.generator.min_features,
            max_features: config.generator.max_features,
            spawn_clearing: config.generator.spawn_clearing,
        };
        log::info!("starting session with world seed {}", seed);
        Self::new(config, Box::new(generator), seed.wrapping_add(1))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthState {
        &mut self.health
    }

    pub fn feedback(&self) -> &FeedbackMap {
        &self.feedback
    }

    /// Events recorded by the last tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn hunger(&self) -> &HungerClock {
        &self.hunger
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Camera following the player at the current zoom
    pub fn camera(&self) -> OrthoCamera {
        let viewport = Vec2::new(self.config.viewport.width, self.config.viewport.height);
        OrthoCamera::new(self.player.center(), self.zoom, viewport)
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the simulation by `dt` seconds.
    ///
    /// `projection` maps the virtual viewport to world space (usually
    /// `self.camera()` captured before the call).
    pub fn update(&mut self, input: &mut dyn InputSource, projection: &dyn Projection, dt: f64) -> TickOutcome {
        if self.ended {
            return TickOutcome::Ended;
        }
        let dt = dt.max(0.0);
        self.events.clear_all();
        self.elapsed += dt;

        self.move_player(input, dt);
        self.face_pointer(input);
        self.apply_hazards(dt);
        self.process_actions(input, projection, dt);
        self.hunger.advance(dt, &mut self.health);
        self.adjust_zoom(input, dt);

        for fading in self.feedback.decay(dt) {
            self.events.feedback.send(fading);
        }
        input.clear_mouse_actions();

        self.select_slot(input);
        self.stream_world();

        if self.health.is_depleted() {
            self.ended = true;
            log::info!(
                "session ended after {:.1}s ({} hunger ticks)",
                self.elapsed,
                self.hunger.ticks()
            );
            self.events.session_ended.send(SessionEndedEvent {
                elapsed: self.elapsed,
                ticks: self.hunger.ticks(),
            });
            return TickOutcome::Ended;
        }
        TickOutcome::Continue
    }

    /// Desired movement from held direction keys
    fn movement_input(&self, input: &dyn InputSource, dt: f64) -> Vec2 {
        let step = self.config.player.speed * dt;
        let mut delta = Vec2::ZERO;
        if input.is_key_down(GameKey::Left) {
            delta.x -= step;
        }
        if input.is_key_down(GameKey::Right) {
            delta.x += step;
        }
        if input.is_key_down(GameKey::Up) {
            delta.y += step;
        }
        if input.is_key_down(GameKey::Down) {
            delta.y -= step;
        }
        delta
    }

    fn move_player(&mut self, input: &dyn InputSource, dt: f64) {
        let mut delta = self.movement_input(input, dt);
        if !delta.is_zero() {
            delta = resolve_movement(
                &mut self.world,
                self.player.center(),
                delta,
                self.config.interaction.soft_radius_base,
            )
            .delta;
        }

        if delta.is_zero() {
            self.player.stop();
        } else {
            self.player.walk(dt);
        }
        self.player.set_position(self.player.position() + delta);
    }

    /// Face the pointer; the camera keeps the player at the window center.
    fn face_pointer(&mut self, input: &dyn InputSource) {
        let pointer = input.pointer();
        let half = input.window_size().scale(0.5);
        // Window y grows downward
        self.player.face(Vec2::new(pointer.x - half.x, half.y - pointer.y));
    }

    fn apply_hazards(&mut self, dt: f64) {
        let cfg = &self.config.interaction;
        if find_hazard(&mut self.world, self.player.center(), cfg.soft_radius_base, cfg.hazard_bonus).is_some() {
            self.health.delta(-cfg.hazard_drain * dt);
        }
    }

    fn process_actions(&mut self, input: &dyn InputSource, projection: &dyn Projection, dt: f64) {
        self.click_cooldown = (self.click_cooldown - dt).max(0.0);
        if self.click_cooldown > 0.0 {
            return;
        }

        if input.has_mouse_action(MouseAction::Primary) {
            let viewport = Vec2::new(self.config.viewport.width, self.config.viewport.height);
            let point = normalize_pointer(input.pointer(), input.window_size(), viewport);
            let target = projection.viewport_to_world(point);
            self.click(target);
            self.click_cooldown = self.config.interaction.click_cooldown;
        } else if input.has_mouse_action(MouseAction::Secondary) {
            if let Some(item) = use_active_item(&mut self.inventory, &mut self.health, &self.config.interaction) {
                self.events.item_consumed.send(item);
                self.refresh_held_item();
            }
            self.click_cooldown = self.config.interaction.click_cooldown;
        }
    }

    /// Primary click at a world-space point
    pub fn click(&mut self, target: Vec2) -> ClickOutcome {
        let outcome = resolve_click(
            &mut self.world,
            &mut self.inventory,
            &mut self.feedback,
            self.player.center(),
            target,
            &self.config.interaction,
            &mut self.rng,
        );

        match outcome {
            ClickOutcome::Miss => {}
            ClickOutcome::Hit { feature, damage, remaining } => {
                self.events.feature_hit.send(FeatureHitEvent { feature, damage, remaining });
            }
            ClickOutcome::Harvested { feature, chunk, reward, .. } => {
                self.events.feature_removed.send(FeatureRemovedEvent { feature, chunk });
                self.events.item_collected.send(ItemCollectedEvent {
                    item: reward,
                    count: 1,
                    source: Some(feature),
                });
                self.refresh_held_item();
            }
        }
        outcome
    }

    fn adjust_zoom(&mut self, input: &dyn InputSource, dt: f64) {
        let cam = &self.config.camera;
        if input.has_mouse_action(MouseAction::ScrollDown) {
            self.zoom = (self.zoom + dt * cam.zoom_rate).min(cam.zoom_max);
        } else if input.has_mouse_action(MouseAction::ScrollUp) {
            self.zoom = (self.zoom - dt * cam.zoom_rate).max(cam.zoom_min);
        }
    }

    /// First newly pressed number key picks the hotbar slot
    fn select_slot(&mut self, input: &dyn InputSource) {
        for slot in 0..SLOT_KEYS {
            if input.is_key_pressed(GameKey::Slot(slot)) {
                if self.inventory.set_active(slot as usize) {
                    self.refresh_held_item();
                }
                return;
            }
        }
    }

    /// Sync the in-hand visual with the active inventory slot
    fn refresh_held_item(&mut self) {
        let held = self.inventory.active_item();
        if self.player.change_item(held) {
            self.events.held_item_changed.send(held);
        }
    }

    fn stream_world(&mut self) {
        let report = self.world.update(self.player.center());
        self.feedback.purge(&report.evicted);

        for coord in report.loaded {
            self.events.chunk_loaded.send(coord);
        }
        for coord in report.unloaded {
            self.events.chunk_unloaded.send(coord);
        }
        for coord in self.world.take_dirty_chunks() {
            self.events.chunk_dirty.send(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::game::chunk::ChunkCoord;
    use crate::game::feature::{BerryColor, Feature, FeatureKind};
    use crate::game::generator::{EmptyGenerator, FixedGenerator};
    use crate::game::input::FrameInput;
    use crate::game::inventory::ItemKind;

    const WINDOW: Vec2 = Vec2 { x: 1280.0, y: 720.0 };

    fn config() -> GameConfig {
        let mut config = GameConfig::default();
        config.world = WorldConfig {
            chunk_size: 500.0,
            load_radius: 1,
            unload_radius: 2,
        };
        config
    }

    fn session_with(features: Vec<Feature>) -> GameSession {
        GameSession::new(config(), Box::new(FixedGenerator::new(features)), 5)
    }

    fn idle() -> FrameInput {
        FrameInput::new(WINDOW)
    }

    /// Window pixel that projects onto world point `target` (window == viewport)
    fn pointer_for(session: &GameSession, target: Vec2) -> Vec2 {
        let vp = session.camera().world_to_viewport(target);
        Vec2::new(vp.x, WINDOW.y - vp.y)
    }

    fn tick(session: &mut GameSession, input: &mut FrameInput, dt: f64) -> TickOutcome {
        let camera = session.camera();
        session.update(input, &camera, dt)
    }

    #[test]
    fn test_walks_freely() {
        let mut s = GameSession::new(config(), Box::new(EmptyGenerator), 1);
        let mut input = idle().hold(GameKey::Right).hold(GameKey::Up);
        tick(&mut s, &mut input, 0.5);
        assert_eq!(s.player().position(), Vec2::new(100.0, 100.0));
        assert!(matches!(s.player().anim(), crate::game::player::AnimState::Walking { .. }));

        tick(&mut s, &mut idle(), 0.5);
        assert_eq!(s.player().anim(), crate::game::player::AnimState::Idle);
    }

    #[test]
    fn test_slides_along_obstacle() {
        // Player center starts at (20, 40); rock centered up and to the left
        // at (10, 65), threshold (40 + 10)^2 / 4 = 625
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(0.0, 55.0)).with_size(Vec2::new(20.0, 20.0));
        let mut s = session_with(vec![rock]);
        let mut input = idle().hold(GameKey::Right).hold(GameKey::Up);

        tick(&mut s, &mut input, 0.02);
        // y blocked, x slides by speed * dt = 4
        assert_eq!(s.player().position(), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_hazard_drains_over_time() {
        let cactus = Feature::new(FeatureKind::Cactus, Vec2::new(60.0, 30.0)).with_size(Vec2::new(20.0, 20.0));
        let mut s = session_with(vec![cactus]);
        tick(&mut s, &mut idle(), 0.5);
        // 9 per second for half a second
        assert_eq!(s.health().get(), 95.5);
    }

    #[test]
    fn test_overlapping_hazards_drain_once() {
        let first = Feature::new(FeatureKind::Cactus, Vec2::new(60.0, 30.0)).with_size(Vec2::new(20.0, 20.0));
        let second = Feature::new(FeatureKind::Cactus, Vec2::new(60.0, 35.0)).with_size(Vec2::new(20.0, 20.0));
        let mut s = session_with(vec![first, second]);
        assert_eq!(s.world().feature_count(), 2);

        tick(&mut s, &mut idle(), 0.5);
        // One 9 * dt drain, not two
        assert_eq!(s.health().get(), 95.5);
    }

    #[test]
    fn test_harvested_neighbor_stays_gone() {
        let mut cfg = config();
        cfg.world = WorldConfig {
            chunk_size: 100.0,
            load_radius: 0,
            unload_radius: 0,
        };
        // Rock in chunk (1, 0), inside click reach of the player in (0, 0)
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(100.0, 20.0)).with_health(1);
        let mut s = GameSession::new(cfg, Box::new(FixedGenerator::new(vec![rock])), 5);
        let pointer = pointer_for(&s, Vec2::new(110.0, 30.0));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.05);
        assert_eq!(s.events().feature_removed.len(), 1);
        assert!(s.world().is_loaded(ChunkCoord::new(1, 0)));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.05);
        assert!(s.events().feature_removed.is_empty());
        assert_eq!(s.world().feature_count(), 0);
        let total: u32 = s.inventory().stacks().iter().map(|st| st.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_click_hits_and_highlights() {
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(60.0, 40.0)).with_health(3);
        let mut s = session_with(vec![rock]);
        let id = s.world().features().next().map(|(id, _)| id).unwrap();

        let pointer = pointer_for(&s, Vec2::new(80.0, 50.0));
        let mut input = idle().point_at(pointer).click(MouseAction::Primary);
        tick(&mut s, &mut input, 0.01);

        assert_eq!(s.world().feature(id).map(|f| f.health()), Some(2));
        assert_eq!(s.events().feature_hit.len(), 1);
        // Decayed by this tick's dt already
        assert!((s.feedback().timer(id).unwrap() - 3.49).abs() < 1e-9);
        // Consumed mouse actions are cleared
        assert!(input.mouse.is_empty());
    }

    #[test]
    fn test_fading_highlight_reported() {
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(60.0, 40.0)).with_health(3);
        let mut s = session_with(vec![rock]);
        let id = s.world().features().next().map(|(id, _)| id).unwrap();
        let pointer = pointer_for(&s, Vec2::new(80.0, 50.0));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.01);
        // Still above one unit: lit, nothing fading yet
        assert!(s.events().feedback.is_empty());

        tick(&mut s, &mut idle(), 2.75);
        let fading: Vec<_> = s.events().feedback.iter().copied().collect();
        assert_eq!(fading.len(), 1);
        assert_eq!(fading[0].feature, id);
        assert!((fading[0].opacity - 0.74).abs() < 1e-9);
    }

    #[test]
    fn test_click_cooldown() {
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(60.0, 40.0)).with_health(5);
        let mut s = session_with(vec![rock]);
        let id = s.world().features().next().map(|(id, _)| id).unwrap();
        let pointer = pointer_for(&s, Vec2::new(80.0, 50.0));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.01);
        // Still cooling down (0.03 - 0.01)
        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.01);
        assert_eq!(s.world().feature(id).map(|f| f.health()), Some(4));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.05);
        assert_eq!(s.world().feature(id).map(|f| f.health()), Some(3));
    }

    #[test]
    fn test_click_takes_priority_over_eat() {
        let bush = Feature::new(FeatureKind::BerryBush(BerryColor::Red), Vec2::new(60.0, 40.0)).with_health(2);
        let mut s = session_with(vec![bush]);
        s.inventory_mut().add_item(ItemKind::Berries(BerryColor::Red), 1);
        s.inventory_mut().set_active(0);
        s.health_mut().set(50.0);

        let pointer = pointer_for(&s, Vec2::new(70.0, 50.0));
        let mut input = idle()
            .point_at(pointer)
            .click(MouseAction::Primary)
            .click(MouseAction::Secondary);
        tick(&mut s, &mut input, 0.01);

        assert_eq!(s.events().feature_hit.len(), 1);
        assert!(s.events().item_consumed.is_empty());
        assert_eq!(s.inventory().count_of(ItemKind::Berries(BerryColor::Red)), 1);
        assert_eq!(s.health().get(), 50.0);
    }

    #[test]
    fn test_harvest_updates_inventory_and_chunk() {
        let bush = Feature::new(FeatureKind::BerryBush(BerryColor::Yellow), Vec2::new(60.0, 40.0)).with_health(1);
        let mut s = session_with(vec![bush]);
        let pointer = pointer_for(&s, Vec2::new(70.0, 50.0));

        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.01);

        assert_eq!(s.world().feature_count(), 0);
        assert_eq!(s.events().feature_removed.len(), 1);
        assert_eq!(s.events().item_collected.len(), 1);
        assert!(s.events().chunk_dirty.iter().any(|c| *c == ChunkCoord::new(0, 0)));
        let total: u32 = s.inventory().stacks().iter().map(|st| st.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_eat_restores_and_clears_slot() {
        let mut s = GameSession::new(config(), Box::new(EmptyGenerator), 1);
        s.inventory_mut().add_item(ItemKind::Berries(BerryColor::Blue), 1);
        tick(&mut s, &mut idle().press(GameKey::Slot(0)), 0.01);
        assert_eq!(s.player().held_item(), Some(ItemKind::Berries(BerryColor::Blue)));
        assert_eq!(s.events().held_item_changed.len(), 1);

        s.health_mut().set(40.0);
        tick(&mut s, &mut idle().click(MouseAction::Secondary), 0.01);

        assert!(s.inventory().is_empty());
        assert_eq!(s.health().get(), 45.0);
        assert_eq!(s.player().held_item(), None);
        assert_eq!(s.events().item_consumed.len(), 1);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut s = GameSession::new(config(), Box::new(EmptyGenerator), 1);
        for _ in 0..10 {
            tick(&mut s, &mut idle().click(MouseAction::ScrollDown), 0.1);
        }
        assert_eq!(s.zoom(), 1.6);
        for _ in 0..10 {
            tick(&mut s, &mut idle().click(MouseAction::ScrollUp), 0.1);
        }
        assert_eq!(s.zoom(), 0.68);
    }

    #[test]
    fn test_terminal_checked_after_tick_settles() {
        // Hazard drain would empty health, but eating later in the same tick refills it
        let cactus = Feature::new(FeatureKind::Cactus, Vec2::new(60.0, 30.0)).with_size(Vec2::new(20.0, 20.0));
        let mut s = session_with(vec![cactus]);
        s.inventory_mut().add_item(ItemKind::Berries(BerryColor::Purple), 2);
        s.inventory_mut().set_active(0);
        s.health_mut().set(0.05);

        let outcome = tick(&mut s, &mut idle().click(MouseAction::Secondary), 0.01);
        assert_eq!(outcome, TickOutcome::Continue);
        assert!((s.health().get() - 5.0).abs() < 1e-9);
        assert!(!s.is_ended());
    }

    #[test]
    fn test_session_ends_and_stays_ended() {
        let mut s = GameSession::new(config(), Box::new(EmptyGenerator), 1);
        s.health_mut().set(1.0);

        // Tick 9 escalates: drains 2
        let mut outcome = TickOutcome::Continue;
        for _ in 0..9 {
            outcome = tick(&mut s, &mut idle(), 1.0);
        }
        assert_eq!(outcome, TickOutcome::Ended);
        assert!(s.is_ended());
        assert_eq!(s.events().session_ended.len(), 1);

        // Further updates are ignored
        let before = s.player().position();
        assert_eq!(tick(&mut s, &mut idle().hold(GameKey::Right), 1.0), TickOutcome::Ended);
        assert_eq!(s.player().position(), before);
    }

    #[test]
    fn test_streaming_purges_feedback() {
        let rock = Feature::new(FeatureKind::Rock, Vec2::new(60.0, 40.0)).with_health(5);
        let mut s = session_with(vec![rock]);
        let id = s.world().features().next().map(|(id, _)| id).unwrap();
        let pointer = pointer_for(&s, Vec2::new(80.0, 50.0));
        tick(&mut s, &mut idle().point_at(pointer).click(MouseAction::Primary), 0.01);
        assert!(s.feedback().contains(id));

        // Teleport far away: the rock's chunk is evicted this tick
        s.player_mut().set_position(Vec2::new(5000.0, 0.0));
        tick(&mut s, &mut idle(), 0.01);

        assert!(s.world().feature(id).is_none());
        assert!(!s.feedback().contains(id));
        assert!(!s.events().chunk_unloaded.is_empty());
    }

    #[test]
    fn test_from_config_is_deterministic() {
        let mut cfg = config();
        cfg.generator.seed = Some(99);
        let a = GameSession::from_config(cfg, 0);
        let b = GameSession::from_config(cfg, 12345);
        let fa: Vec<_> = a.world().features().map(|(_, f)| (f.kind, f.position)).collect();
        let fb: Vec<_> = b.world().features().map(|(_, f)| (f.kind, f.position)).collect();
        assert_eq!(fa, fb);
    }
}
