//! Data-driven game balance
//!
//! Every balance number the simulation uses lives here so it can be tweaked
//! without touching gameplay code. Persisted as JSON in LocalStorage (web) or
//! read from the file named by `BLOCK_DODGE_TUNING` (native).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SIM_DT;

/// Problems found while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("tuning value `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("tuning range `{field}` is empty: [{min}, {max})")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Base movement speed (pixels per tick)
    pub player_speed: f32,
    /// Multiplier applied while the Speed ability is active
    pub speed_boost: f32,

    // === Spawning ===
    /// Seconds between timed hazard spawns
    pub hazard_interval: f32,
    /// Seconds between ability pickup spawns
    pub ability_interval: f32,
    /// Hazard size range [min, max)
    pub hazard_min_size: f32,
    pub hazard_max_size: f32,
    /// Random bonus added on top of the baseline fall speed, sampled in [0, bonus)
    pub hazard_speed_bonus: f32,
    /// Cumulative variant cut points: r < chaser_cut => Chaser, r < random_walk_cut => RandomWalk
    pub chaser_cut: f32,
    pub random_walk_cut: f32,

    // === Behaviors ===
    /// Chaser pursuit speed (pixels per tick, on top of its fall)
    pub chaser_speed: f32,
    /// Max horizontal drift of random walkers (pixels per tick)
    pub walk_max_speed_x: f32,
    /// Direction hold duration range in ticks [min, max)
    pub walk_hold_min: u32,
    pub walk_hold_max: u32,
    /// Undodgeable homing speed (pixels per tick)
    pub undodgeable_speed: f32,
    pub undodgeable_size: f32,

    // === Pickups and projectiles ===
    pub pickup_size: f32,
    pub pickup_fall_speed: f32,
    pub projectile_speed: f32,

    // === Abilities ===
    pub shield_ticks: u32,
    pub speed_ticks: u32,

    // === Scoring and difficulty ===
    pub dodge_reward: u64,
    pub shot_reward: u64,
    /// Baseline fall speed at score zero
    pub base_fall_speed: f32,
    /// Score needed for each +1 to the baseline
    pub difficulty_step: u64,
    /// Score interval between Undodgeable spawns
    pub milestone_step: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            speed_boost: 2.0,

            hazard_interval: 0.4,
            ability_interval: 8.0,
            hazard_min_size: 20.0,
            hazard_max_size: 50.0,
            hazard_speed_bonus: 3.0,
            chaser_cut: 0.15,
            random_walk_cut: 0.45,

            chaser_speed: 1.5,
            walk_max_speed_x: 1.5,
            walk_hold_min: 30,
            walk_hold_max: 90,
            undodgeable_speed: 0.5,
            undodgeable_size: 50.0,

            pickup_size: 20.0,
            pickup_fall_speed: 2.0,
            projectile_speed: 8.0,

            shield_ticks: 300,
            speed_ticks: 600,

            dodge_reward: 1,
            shot_reward: 10,
            base_fall_speed: 2.0,
            difficulty_step: 500,
            milestone_step: 1000,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_dodge_tuning";

    /// Environment variable naming a tuning JSON file (native only)
    pub const ENV_VAR: &'static str = "BLOCK_DODGE_TUNING";

    /// Parse and validate tuning JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("speed_boost", self.speed_boost),
            ("hazard_interval", self.hazard_interval),
            ("ability_interval", self.ability_interval),
            ("hazard_min_size", self.hazard_min_size),
            ("pickup_size", self.pickup_size),
            ("projectile_speed", self.projectile_speed),
            ("undodgeable_size", self.undodgeable_size),
            ("base_fall_speed", self.base_fall_speed),
            ("pickup_fall_speed", self.pickup_fall_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        // At most one timed spawn of each kind per tick
        let intervals = [
            ("hazard_interval", self.hazard_interval),
            ("ability_interval", self.ability_interval),
        ];
        for (field, value) in intervals {
            if value < SIM_DT {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        if self.hazard_min_size >= self.hazard_max_size {
            return Err(TuningError::EmptyRange {
                field: "hazard_size",
                min: self.hazard_min_size,
                max: self.hazard_max_size,
            });
        }
        if self.walk_hold_min >= self.walk_hold_max {
            return Err(TuningError::EmptyRange {
                field: "walk_hold",
                min: self.walk_hold_min as f32,
                max: self.walk_hold_max as f32,
            });
        }
        if !(0.0..=self.random_walk_cut).contains(&self.chaser_cut) {
            return Err(TuningError::OutOfRange {
                field: "chaser_cut",
                value: self.chaser_cut,
            });
        }
        if !(0.0..=1.0).contains(&self.random_walk_cut) {
            return Err(TuningError::OutOfRange {
                field: "random_walk_cut",
                value: self.random_walk_cut,
            });
        }
        if self.difficulty_step == 0 {
            return Err(TuningError::OutOfRange {
                field: "difficulty_step",
                value: 0.0,
            });
        }
        if self.milestone_step == 0 {
            return Err(TuningError::OutOfRange {
                field: "milestone_step",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Baseline fall speed for a given score
    pub fn baseline_for_score(&self, score: u64) -> f32 {
        self.base_fall_speed + (score / self.difficulty_step) as f32
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from the file named by `BLOCK_DODGE_TUNING` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Read and validate a tuning JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
