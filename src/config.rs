//! Simulation tunables.
//!
//! Every distance is in viewport units, every speed in units per tick and
//! every duration in ticks. Loaded from JSON; missing fields fall back to
//! the defaults below.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Inclusive-exclusive tick range `[min, max)` for randomized durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

impl TickRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a duration from the range.
    pub fn sample(self, rng: &mut fastrand::Rng) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.u32(self.min..self.max)
    }
}

/// Tunables for the cat, the toys and the viewport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Proximity radii ===
    /// Idle cat notices a pointer inside this radius and walks over.
    pub notice_radius: f32,
    /// Walking cat starts hunting a pointer inside this radius.
    pub chase_radius: f32,
    /// Hunting cat gives up once the pointer is farther than this.
    pub release_radius: f32,
    /// Sitting or sleeping cat gets up when the pointer comes this close.
    pub wake_radius: f32,

    // === Movement ===
    pub walk_speed: f32,
    pub hunt_speed: f32,
    /// Distance at which a walk target counts as reached.
    pub arrive_epsilon: f32,
    /// Ticks between sprite frames while walking.
    pub walk_frame_period: u32,
    /// Ticks between sprite frames while hunting.
    pub hunt_frame_period: u32,

    // === Autonomy ===
    /// Per-tick chance an idle cat wanders off on its own.
    pub wander_chance: f32,
    /// Chance the cat sits down when it reaches its walk target.
    pub sit_chance: f32,
    pub sit_ticks: TickRange,
    /// Chance a cat whose sit ran out dozes off instead of standing up.
    pub doze_chance: f32,
    pub sleep_ticks: TickRange,

    // === Cat footprint ===
    /// Sprite width; the cat's x is kept within `[0, width - cat_width]`.
    pub cat_width: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Wander targets are picked in `[wander_min_x, width - wander_right_inset)`.
    pub wander_min_x: f32,
    pub wander_right_inset: f32,
    /// Wander targets sit this far above the bottom of the viewport.
    pub wander_floor_offset: f32,

    // === Reaction overlay ===
    pub reaction_chance: f32,
    pub reaction_ticks: u32,
    /// Sitting cat shows the heart sprite while the overlay has more than this left.
    pub heart_threshold: u32,

    // === Toys ===
    pub gravity: f32,
    /// Toys bounce on a floor this far above the bottom of the viewport.
    pub toy_floor_offset: f32,
    /// Fraction of vertical speed kept after a floor bounce.
    pub bounce_damping: f32,
    pub toy_lifetime: u32,
    /// Initial toy velocity is drawn from `[-toy_spawn_speed, toy_spawn_speed)` per axis.
    pub toy_spawn_speed: f32,

    // === Viewport ===
    /// Fixed viewport height; width follows the host container.
    pub viewport_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            notice_radius: 150.0,
            chase_radius: 80.0,
            release_radius: 200.0,
            wake_radius: 100.0,

            walk_speed: 2.0,
            hunt_speed: 3.5,
            arrive_epsilon: 10.0,
            walk_frame_period: 8,
            hunt_frame_period: 5,

            wander_chance: 0.01,
            sit_chance: 0.3,
            sit_ticks: TickRange::new(60, 120),
            doze_chance: 0.25,
            sleep_ticks: TickRange::new(180, 360),

            cat_width: 100.0,
            margin_top: 10.0,
            margin_bottom: 40.0,
            wander_min_x: 50.0,
            wander_right_inset: 100.0,
            wander_floor_offset: 50.0,

            reaction_chance: 0.3,
            reaction_ticks: 90,
            heart_threshold: 30,

            gravity: 0.05,
            toy_floor_offset: 25.0,
            bounce_damping: 0.6,
            toy_lifetime: 300,
            toy_spawn_speed: 2.0,

            viewport_height: 200.0,
        }
    }
}

impl SimConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall the cat or break the radius hysteresis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("hunt_speed", self.hunt_speed),
            ("arrive_epsilon", self.arrive_epsilon),
            ("chase_radius", self.chase_radius),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let chances = [
            ("wander_chance", self.wander_chance),
            ("sit_chance", self.sit_chance),
            ("doze_chance", self.doze_chance),
            ("reaction_chance", self.reaction_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        if !(0.0..1.0).contains(&self.bounce_damping) {
            return Err(ConfigError::Invalid(format!(
                "bounce_damping must be in [0, 1), got {}",
                self.bounce_damping
            )));
        }
        if self.chase_radius >= self.notice_radius {
            return Err(ConfigError::Invalid(format!(
                "chase_radius ({}) must be smaller than notice_radius ({})",
                self.chase_radius, self.notice_radius
            )));
        }
        if self.notice_radius >= self.release_radius {
            return Err(ConfigError::Invalid(format!(
                "notice_radius ({}) must be smaller than release_radius ({})",
                self.notice_radius, self.release_radius
            )));
        }
        for (name, range) in [("sit_ticks", self.sit_ticks), ("sleep_ticks", self.sleep_ticks)] {
            if range.min == 0 || range.max < range.min {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-empty range starting above zero, got {}..{}",
                    range.min, range.max
                )));
            }
        }
        if self.toy_lifetime == 0 {
            return Err(ConfigError::Invalid("toy_lifetime must be at least one tick".into()));
        }
        if self.walk_frame_period == 0 || self.hunt_frame_period == 0 {
            return Err(ConfigError::Invalid("frame periods must be at least one tick".into()));
        }
        Ok(())
    }
}

/// Why a config file could not be used.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
