//! Game configuration
//!
//! Every gameplay tunable lives here and is passed into the session at
//! construction. Uses RON (Rusty Object Notation) so designers can tweak
//! values in a human-readable file; missing fields fall back to defaults.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fixed virtual viewport the pointer is normalized into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// World units per second
    pub speed: f64,
    pub size: (f64, f64),
    pub max_health: f64,
    /// Bottom-left spawn anchor
    pub spawn: (f64, f64),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 200.0,
            size: (40.0, 80.0),
            max_health: 100.0,
            spawn: (0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of a square chunk in world units
    pub chunk_size: f64,
    /// Chunks within this ring distance of the player are kept loaded
    pub load_radius: i32,
    /// Chunks beyond this ring distance are evicted
    pub unload_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512.0,
            load_radius: 2,
            unload_radius: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// None picks a seed at startup
    pub seed: Option<u64>,
    pub min_features: u32,
    pub max_features: u32,
    pub spawn_clearing: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_features: 4,
            max_features: 10,
            spawn_clearing: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Base of the soft radius `(base + half_width)^2 / 4`
    pub soft_radius_base: f64,
    /// Extra squared distance for hazard proximity
    pub hazard_bonus: f64,
    /// Health drained per second next to a hazard
    pub hazard_drain: f64,
    /// Extra squared distance for click reach
    pub click_range_bonus: f64,
    /// Ring radius of chunks scanned on click
    pub click_ring: i32,
    pub base_damage: i32,
    pub tool_damage: i32,
    /// Highlight duration after a non-lethal hit
    pub feedback_duration: f64,
    /// Seconds between accepted clicks
    pub click_cooldown: f64,
    /// Health restored by eating
    pub eat_restore: f64,
    /// 1-in-N chance a harvest drops a weapon instead
    pub weapon_loot_odds: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            soft_radius_base: 40.0,
            hazard_bonus: 2_000.0,
            hazard_drain: 9.0,
            click_range_bonus: 12_000.0,
            click_ring: 1,
            base_damage: 1,
            tool_damage: 2,
            feedback_duration: 3.5,
            click_cooldown: 0.03,
            eat_restore: 5.0,
            weapon_loot_odds: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HungerConfig {
    /// Every Nth tick applies the escalating drain
    pub escalate_every: u64,
    /// Every Mth tick (not a multiple of N) applies the flat drain
    pub flat_every: u64,
    pub flat_drain: f64,
    /// Bumped by one before each escalating drain
    pub initial_escalating_drain: f64,
}

impl Default for HungerConfig {
    fn default() -> Self {
        Self {
            escalate_every: 9,
            flat_every: 10,
            flat_drain: 1.0,
            initial_escalating_drain: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Zoom change per second of scrolling
    pub zoom_rate: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 1.0,
            zoom_min: 0.68,
            zoom_max: 1.6,
            zoom_rate: 3.0,
        }
    }
}

/// Top-level configuration handed to `GameSession::new`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: ViewportConfig,
    pub player: PlayerConfig,
    pub world: WorldConfig,
    pub generator: GeneratorConfig,
    pub interaction: InteractionConfig,
    pub hunger: HungerConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    /// Parse and validate a RON string
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load `path` if it exists, otherwise defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, msg: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(msg.to_string()))
            }
        }

        check(self.viewport.width > 0.0 && self.viewport.height > 0.0, "viewport must be non-empty")?;
        check(self.player.speed.is_finite() && self.player.speed >= 0.0, "player.speed must be >= 0")?;
        check(self.player.size.0 > 0.0 && self.player.size.1 > 0.0, "player.size must be positive")?;
        check(self.player.max_health > 0.0, "player.max_health must be positive")?;
        check(self.world.chunk_size > 0.0 && self.world.chunk_size.is_finite(), "world.chunk_size must be positive")?;
        check(self.world.load_radius >= 0, "world.load_radius must be >= 0")?;
        check(self.world.unload_radius >= self.world.load_radius, "world.unload_radius must be >= load_radius")?;
        check(self.generator.min_features <= self.generator.max_features, "generator.min_features exceeds max_features")?;
        check(self.interaction.click_ring >= 0, "interaction.click_ring must be >= 0")?;
        check(
            self.world.unload_radius >= self.interaction.click_ring,
            "world.unload_radius must be >= interaction.click_ring",
        )?;
        check(self.interaction.weapon_loot_odds > 0, "interaction.weapon_loot_odds must be > 0")?;
        check(self.interaction.feedback_duration > 0.0, "interaction.feedback_duration must be positive")?;
        check(self.hunger.escalate_every > 0 && self.hunger.flat_every > 0, "hunger cadence must be > 0")?;
        check(
            self.camera.zoom_min > 0.0 && self.camera.zoom_min <= self.camera.zoom_max,
            "camera zoom bounds must satisfy 0 < min <= max",
        )?;
        Ok(())
    }
}
