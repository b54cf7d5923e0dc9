use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{Message, Player, PlayerId};

pub type GameId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    #[default]
    Waiting,
    Playing,
    RoundEnd,
    Finished,
}

/// Read-only view of a game handed to the rendering layer after each command.
/// The word is masked for everyone but the drawer while a round is being played.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: GameId,
    pub state: GameState,
    pub round: u32,
    pub max_rounds: u32,
    pub time_left: u32,
    pub current_player_id: Option<PlayerId>,
    pub user_id: Option<PlayerId>,
    pub word: String,
    pub word_options: Vec<String>,
    pub players: Vec<Player>,
    pub messages: Vec<Message>,
}

impl GameSnapshot {
    pub fn is_drawer(&self, player_id: &str) -> bool {
        self.current_player_id.as_deref() == Some(player_id)
    }
}

/// Replaces every letter with `_`, keeping spaces so multi-word answers show their shape.
pub fn mask_word(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_whitespace() { c } else { '_' })
        .collect()
}
