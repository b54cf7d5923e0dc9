use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type PlayerId = String;

/// Author id used for game-flow narration.
pub const SYSTEM_USER_ID: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub avatar: String, // Display glyph
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
            avatar: avatar.into(),
        }
    }
}

/// The fixed four-seat roster every local session starts with.
pub fn default_roster() -> Vec<Player> {
    vec![
        Player::new("1", "Player 1", "👨‍🎨"),
        Player::new("2", "Player 2", "👩‍🎨"),
        Player::new("3", "Player 3", "👨‍🚀"),
        Player::new("4", "Player 4", "👩‍🚀"),
    ]
}
