use thiserror::Error;

use crate::mode::Schedule;

pub const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICK_MS: u64 = 100;
const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("schedule period must be positive")]
    ZeroPeriod,
    #[error("scatter window ({scatter_ticks}) must be shorter than the period ({period})")]
    ScatterTooLong { scatter_ticks: u64, period: u64 },
    #[error("frighten duration must be positive")]
    ZeroFrighten,
}

/// Constants of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Seed for the fallback-direction generator, re-applied on every reset.
    pub seed: u64,
    pub schedule: Schedule,
    /// Ticks of Frightened mode after a power pellet.
    pub frighten_ticks: u32,
    pub pellet_score: u32,
    pub power_score: u32,
    /// Reward for catching a frightened hunter.
    pub capture_score: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            schedule: Schedule::default(),
            frighten_ticks: 60,
            pellet_score: 10,
            power_score: 50,
            capture_score: 200,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Schedule {
            scatter_ticks,
            period,
        } = self.schedule;
        if period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if scatter_ticks >= period {
            return Err(ConfigError::ScatterTooLong {
                scatter_ticks,
                period,
            });
        }
        if self.frighten_ticks == 0 {
            return Err(ConfigError::ZeroFrighten);
        }
        Ok(())
    }
}

/// Pacing of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: u64,
}

impl RunSettings {
    /// Reads `MAZE_TICK_MS`, `MAZE_FPS` and `MAZE_SEED`; unset, unparsable
    /// or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };
        Self {
            tick_ms: read("MAZE_TICK_MS").unwrap_or(DEFAULT_TICK_MS),
            render_fps: read("MAZE_FPS").unwrap_or(DEFAULT_RENDER_FPS),
            seed: read("MAZE_SEED").unwrap_or(DEFAULT_SEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_schedules() {
        let mut config = SimConfig::default();
        config.schedule.period = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod));

        config.schedule = Schedule {
            scatter_ticks: 10,
            period: 10,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ScatterTooLong {
                scatter_ticks: 10,
                period: 10
            })
        );

        let config = SimConfig {
            frighten_ticks: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrighten));
    }

    #[test]
    fn settings_fall_back_on_garbage() {
        let settings = RunSettings::from_lookup(|key| match key {
            "MAZE_TICK_MS" => Some("40".to_string()),
            "MAZE_FPS" => Some("fast".to_string()),
            "MAZE_SEED" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(settings.tick_ms, 40);
        assert_eq!(settings.render_fps, DEFAULT_RENDER_FPS);
        assert_eq!(settings.seed, DEFAULT_SEED);
    }
}
