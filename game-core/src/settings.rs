use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interval of the round countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub round_time_seconds: u32,
    pub max_rounds: u32,
    pub round_end_delay_seconds: u32, // Pause between a round ending and the next one starting
}

impl GameSettings {
    pub fn round_end_delay(&self) -> Duration {
        Duration::from_secs(self.round_end_delay_seconds.into())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_time_seconds: 60,
            max_rounds: 3,
            round_end_delay_seconds: 3,
        }
    }
}
