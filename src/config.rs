use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;

pub const WIDTH: i32 = 40;
pub const HEIGHT: i32 = 30;

/// Tick interval as a function of score.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpeedCurve {
    pub base_ms: u64,
    pub step_ms: u64,
    pub floor_ms: u64,
}

impl SpeedCurve {
    pub fn interval_for(&self, score: u32) -> u64 {
        self.base_ms
            .saturating_sub(u64::from(score).saturating_mul(self.step_ms))
            .max(self.floor_ms)
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        SpeedCurve { base_ms: 100, step_ms: 2, floor_ms: 50 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub speed: SpeedCurve,
    /// Food RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub colors: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: WIDTH,
            height: HEIGHT,
            speed: SpeedCurve::default(),
            seed: None,
            colors: true,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `SNAKE_SEED`, `SNAKE_LOG`, `SNAKE_LOG_LEVEL`,
    /// `NO_COLOR` and `TERM` as returned by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GameConfig::default();

        if let Some(raw) = lookup("SNAKE_SEED") {
            let seed = raw.trim().parse::<u64>()
                .with_context(|| format!("invalid SNAKE_SEED {:?}", raw))?;
            config.seed = Some(seed);
        }

        config.log_file = lookup("SNAKE_LOG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("SNAKE_LOG_LEVEL") {
            config.log_level = raw.trim().parse::<LevelFilter>()
                .with_context(|| format!("invalid SNAKE_LOG_LEVEL {:?}", raw))?;
        }

        let no_color = lookup("NO_COLOR").map_or(false, |v| !v.is_empty());
        let dumb_term = lookup("TERM").map_or(false, |t| t == "dumb");
        config.colors = !(no_color || dumb_term);

        Ok(config)
    }
}
