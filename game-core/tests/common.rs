#![allow(dead_code)]

use chrono::Utc;
use game_core::{Game, GameEvent, GameEventHandler, GameSettings, WordBank};
use game_types::{GameState, Message};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Creates a test WordBank with a known set of words
pub fn create_test_word_bank() -> WordBank {
    WordBank::from_word_list("apple\nbanana\ncherry\nhouse\ntrain").unwrap()
}

/// Creates an initialized game with the default roster and a fixed seed
pub fn create_test_game() -> Game {
    create_game_with_settings(GameSettings::default())
}

pub fn create_game_with_settings(settings: GameSettings) -> Game {
    let mut game = Game::with_seed(settings, create_test_word_bank(), 11);
    game.initialize();
    game
}

/// Creates a game that is already in its first round
pub fn create_started_game() -> Game {
    let mut game = create_test_game();
    assert!(game.start_game());
    game
}

/// Creates a short game: `round_time` seconds per round, `max_rounds` rounds
pub fn create_short_game(round_time: u32, max_rounds: u32) -> Game {
    create_game_with_settings(GameSettings {
        round_time_seconds: round_time,
        max_rounds,
        round_end_delay_seconds: 3,
    })
}

pub fn guess_message(player_id: &str, text: &str, is_correct: bool) -> Message {
    Message::user(
        format!("guess-{}", player_id),
        player_id,
        text,
        Utc::now().to_rfc3339(),
        is_correct,
    )
}

/// A guesser who is not the current drawer
pub fn any_guesser(game: &Game) -> String {
    game.players()
        .iter()
        .find(|p| Some(p.id.as_str()) != game.current_player_id())
        .map(|p| p.id.clone())
        .expect("game has a non-drawing player")
}

/// Submits the right answer on behalf of a non-drawer
pub fn guess_correctly(game: &mut Game) -> String {
    let guesser = any_guesser(game);
    let word = game.current_word().to_string();
    game.send_message(guess_message(&guesser, &word, true));
    guesser
}

/// Waits out the pause between rounds
pub fn skip_round_break(game: &mut Game) {
    let delay = game.settings().round_end_delay();
    game.advance(delay);
}

pub fn assert_state(game: &Game, expected_state: GameState, expected_round: u32) {
    assert_eq!(
        game.state(),
        expected_state,
        "Expected state {:?}, got {:?}",
        expected_state,
        game.state()
    );
    assert_eq!(
        game.round(),
        expected_round,
        "Expected round {}, got {}",
        expected_round,
        game.round()
    );
}

pub fn seconds(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn count_matching(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
