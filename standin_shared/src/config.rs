//! Configuration system.
//!
//! Loads simulation configuration from JSON strings (file IO left to app).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimError, SimResult},
    world::MAX_WORLD_SIZE,
};

/// World side length used by the binaries when none is given.
pub const DEFAULT_WORLD_SIZE: u32 = 1000;

/// Tunable parameters of the simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Side length of the square world. Must be positive.
    pub size: u32,
    /// Minimum wall-clock interval between two simulation steps.
    #[serde(default = "default_ms_per_frame")]
    pub ms_per_frame: u64,
    /// Mover population cap.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    /// Pickup population cap.
    #[serde(default = "default_max_powerups")]
    pub max_powerups: usize,
}

fn default_ms_per_frame() -> u64 {
    20
}

fn default_max_players() -> usize {
    50
}

fn default_max_powerups() -> usize {
    50
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_SIZE)
    }
}

impl SimConfig {
    /// Default caps and tick rate for a world of the given size.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ms_per_frame: default_ms_per_frame(),
            max_players: default_max_players(),
            max_powerups: default_max_powerups(),
        }
    }

    /// The tick interval as a `Duration`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.ms_per_frame)
    }

    /// Checks the values the driver cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.size == 0 {
            return Err(SimError::invalid("world size must be positive"));
        }
        if self.size > MAX_WORLD_SIZE {
            return Err(SimError::invalid(format!(
                "world size {} exceeds {MAX_WORLD_SIZE}",
                self.size
            )));
        }
        Ok(())
    }

    /// Parses and validates config from JSON.
    pub fn from_json_str(s: &str) -> SimResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
