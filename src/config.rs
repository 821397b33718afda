//! Settings and gameplay tuning, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock game.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::BOOM_FRAMES;
use crate::error::{GameError, Result};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "RAIL_SHOOTER_CONFIG";

// ── Gameplay rules ────────────────────────────────────────────────────────────

/// Gameplay constants.  Carried inside `GameState` so the update never
/// reaches for globals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Grace period at the start of every round; no enemy spawns before it.
    /// On the first run the title is shown for this long.
    pub title_frames: u32,
    pub fadeout_frames: u32,
    pub spawn_interval: u32,
    pub enemy_fire_interval: u32,
    pub ship_fire_interval: u32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Full width of the vertical drift band, centred on zero.
    pub enemy_max_drift: f32,
    /// Full height of the band new enemies appear in, centred on zero.
    pub enemy_spawn_spread: f32,
    pub red_shot_speed: f32,
    pub blue_shot_speed: f32,
    /// Vertical distance to an enemy under which the ship opens fire.
    pub firing_alignment: f32,
    pub ship_hit_radius_sq: f32,
    pub enemy_hit_radius_sq: f32,
    pub explosion_stages: u32,
    pub explosion_stage_len: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            title_frames: 120,
            fadeout_frames: 60,
            spawn_interval: 60,
            enemy_fire_interval: 40,
            ship_fire_interval: 5,
            enemy_speed_min: 0.004,
            enemy_speed_max: 0.006,
            enemy_max_drift: 0.01,
            enemy_spawn_spread: 1.0,
            red_shot_speed: 0.005,
            blue_shot_speed: 0.05,
            firing_alignment: 0.1,
            ship_hit_radius_sq: 0.001,
            enemy_hit_radius_sq: 0.005,
            explosion_stages: 3,
            explosion_stage_len: 4,
        }
    }
}

impl Rules {
    /// Ticks an explosion stays alive.
    pub fn explosion_lifetime(&self) -> u32 {
        self.explosion_stages * self.explosion_stage_len
    }

    pub fn validate(&self) -> Result<()> {
        let intervals = [
            ("spawn_interval", self.spawn_interval),
            ("enemy_fire_interval", self.enemy_fire_interval),
            ("ship_fire_interval", self.ship_fire_interval),
            ("explosion_stage_len", self.explosion_stage_len),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(GameError::Config(format!("{name} must be positive")));
            }
        }
        if !(1..=BOOM_FRAMES).contains(&self.explosion_stages) {
            return Err(GameError::Config(format!(
                "explosion_stages must be between 1 and {BOOM_FRAMES}, got {}",
                self.explosion_stages
            )));
        }

        // Speeds, radii and bands all feed distances or sampling ranges.
        let magnitudes = [
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("enemy_max_drift", self.enemy_max_drift),
            ("enemy_spawn_spread", self.enemy_spawn_spread),
            ("red_shot_speed", self.red_shot_speed),
            ("blue_shot_speed", self.blue_shot_speed),
            ("firing_alignment", self.firing_alignment),
            ("ship_hit_radius_sq", self.ship_hit_radius_sq),
            ("enemy_hit_radius_sq", self.enemy_hit_radius_sq),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::Config(format!(
                    "{name} must be a finite, non-negative number, got {value}"
                )));
            }
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(GameError::Config(format!(
                "enemy_speed_min ({}) exceeds enemy_speed_max ({})",
                self.enemy_speed_min, self.enemy_speed_max
            )));
        }
        Ok(())
    }
}

// ── Program settings ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target update rate.
    pub fps: u32,
    /// Directory holding the nine image assets.
    pub asset_dir: PathBuf,
    /// Log destination.  The terminal is taken over by the game, so logs
    /// only become visible when written here.
    pub log_file: Option<PathBuf>,
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            asset_dir: PathBuf::from("res"),
            log_file: None,
            rules: Rules::default(),
        }
    }
}

impl Settings {
    pub fn parse(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| GameError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from the file named by `RAIL_SHOOTER_CONFIG`, or fall back to the
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(GameError::Config("fps must be positive".to_string()));
        }
        self.rules.validate()
    }
}
