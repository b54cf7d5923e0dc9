use game_types::{GameId, Message, Player, PlayerId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEndReason {
    Timeout,
    CorrectGuess,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    GameStarted {
        game_id: GameId,
        players: Vec<Player>,
    },
    RoundStarted {
        game_id: GameId,
        round: u32,
        drawer_id: PlayerId,
        word_options: Vec<String>,
    },
    WordChosen {
        game_id: GameId,
        drawer_id: PlayerId,
        word: String,
    },
    TimerTicked {
        game_id: GameId,
        time_left: u32,
    },
    GuessedCorrectly {
        game_id: GameId,
        player_id: PlayerId,
        points_earned: u32,
        drawer_points: u32,
    },
    RoundEnded {
        game_id: GameId,
        round: u32,
        word: String,
        reason: RoundEndReason,
    },
    GameFinished {
        game_id: GameId,
        winner: Player,
        final_scores: Vec<Player>,
    },
    MessagePosted {
        game_id: GameId,
        message: Message,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameStarted { game_id, .. } => *game_id,
            GameEvent::RoundStarted { game_id, .. } => *game_id,
            GameEvent::WordChosen { game_id, .. } => *game_id,
            GameEvent::TimerTicked { game_id, .. } => *game_id,
            GameEvent::GuessedCorrectly { game_id, .. } => *game_id,
            GameEvent::RoundEnded { game_id, .. } => *game_id,
            GameEvent::GameFinished { game_id, .. } => *game_id,
            GameEvent::MessagePosted { game_id, .. } => *game_id,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
