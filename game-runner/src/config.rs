use game_core::GameSettings;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub round_time_seconds: u32,
    pub max_rounds: u32,
    pub round_end_delay_seconds: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub words_file: Option<PathBuf>,
}

impl Config {
    /// Read settings from the process environment
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            round_time_seconds: parse_var(&lookup, "ROUND_TIME_SECONDS", defaults.round_time_seconds)?,
            max_rounds: parse_var(&lookup, "MAX_ROUNDS", defaults.max_rounds)?,
            round_end_delay_seconds: parse_var(
                &lookup,
                "ROUND_END_DELAY_SECONDS",
                defaults.round_end_delay_seconds,
            )?,
            canvas_width: parse_var(&lookup, "CANVAS_WIDTH", defaults.canvas_width)?,
            canvas_height: parse_var(&lookup, "CANVAS_HEIGHT", defaults.canvas_height)?,
            words_file: lookup("WORDS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            round_time_seconds: self.round_time_seconds,
            max_rounds: self.max_rounds,
            round_end_delay_seconds: self.round_end_delay_seconds,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            round_time_seconds: settings.round_time_seconds,
            max_rounds: settings.max_rounds,
            round_end_delay_seconds: settings.round_end_delay_seconds,
            canvas_width: 800,
            canvas_height: 600,
            words_file: None,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
