use chrono::Utc;
use game_types::{
    GameError, GameId, GameSnapshot, GameState, Message, Player, PlayerId, default_roster,
    mask_word,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    GameEvent, GameEventBus, GameEventHandler, GameSettings, RoundEndReason, RoundScheduler,
    ScheduledTask, ScoringEngine, TICK_INTERVAL, TaskHandle, WordBank, guess_matches,
};

pub const WELCOME_TEXT: &str = "Welcome to Draw and Guess! Click \"Start Game\" to begin.";
pub const GAME_STARTED_TEXT: &str = "Game started! Get ready to draw or guess.";

/// Local user seat assigned by `initialize`.
const DEFAULT_USER_ID: &str = "1";

/// The draw-and-guess state machine.
///
/// All state lives here and only changes through its methods. Commands issued
/// in the wrong state are ignored rather than reported. Time only moves when
/// the owner calls [`Game::advance`], which fires the round countdown and the
/// delayed start of the next round.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    settings: GameSettings,
    word_bank: WordBank,
    players: Vec<Player>,
    messages: Vec<Message>,
    user_id: Option<PlayerId>,
    current_player_id: Option<PlayerId>,
    state: GameState,
    current_word: String,
    word_options: Vec<String>,
    round: u32,
    rounds_started: u64,
    time_left: u32,
    scheduler: RoundScheduler,
    round_timer: Option<TaskHandle>,
    next_round: Option<TaskHandle>,
    message_seq: u64,
    rng: StdRng,
    event_bus: GameEventBus,
}

impl Game {
    pub fn new(settings: GameSettings, word_bank: WordBank) -> Self {
        Self::with_rng(settings, word_bank, StdRng::from_entropy())
    }

    /// Same as [`Game::new`] with reproducible word selection.
    pub fn with_seed(settings: GameSettings, word_bank: WordBank, seed: u64) -> Self {
        Self::with_rng(settings, word_bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, word_bank: WordBank, rng: StdRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            time_left: settings.round_time_seconds,
            settings,
            word_bank,
            players: Vec::new(),
            messages: Vec::new(),
            user_id: None,
            current_player_id: None,
            state: GameState::Waiting,
            current_word: String::new(),
            word_options: Vec::new(),
            round: 0,
            rounds_started: 0,
            scheduler: RoundScheduler::new(),
            round_timer: None,
            next_round: None,
            message_seq: 0,
            rng,
            event_bus: GameEventBus::new(),
        }
    }

    /// Seat the default four-player roster and post the welcome message.
    pub fn initialize(&mut self) {
        self.reset_with(default_roster());
    }

    /// Reset the session around the given roster. The local user takes the first seat.
    pub fn initialize_with(&mut self, roster: Vec<Player>) -> Result<(), GameError> {
        if roster.is_empty() {
            return Err(GameError::EmptyRoster);
        }

        self.reset_with(roster);
        Ok(())
    }

    fn reset_with(&mut self, roster: Vec<Player>) {
        self.cancel_round_timer();
        if let Some(handle) = self.next_round.take() {
            self.scheduler.cancel(handle);
        }

        self.user_id = roster
            .iter()
            .find(|p| p.id == DEFAULT_USER_ID)
            .or_else(|| roster.first())
            .map(|p| p.id.clone());
        self.players = roster;
        self.state = GameState::Waiting;
        self.current_player_id = None;
        self.current_word.clear();
        self.word_options.clear();
        self.round = 0;
        self.time_left = self.settings.round_time_seconds;
        self.messages.clear();
        self.post_system_message(WELCOME_TEXT.to_string());

        info!("Initialized game {} with {} players", self.id, self.players.len());
    }

    pub fn start_game(&mut self) -> bool {
        if !matches!(self.state, GameState::Waiting | GameState::Finished) {
            debug!("Ignoring start_game in state {:?}", self.state);
            return false;
        }
        if self.players.is_empty() {
            debug!("Ignoring start_game before initialize");
            return false;
        }

        self.round = 1;
        ScoringEngine::reset_scores(&mut self.players);
        // Every game starts its rotation at the first seat
        self.current_player_id = None;

        info!("Game {} started with {} players", self.id, self.players.len());
        self.event_bus.publish(GameEvent::GameStarted {
            game_id: self.id,
            players: self.players.clone(),
        });

        self.start_new_round();
        self.post_system_message(GAME_STARTED_TEXT.to_string());
        true
    }

    /// Append a chat message and apply scoring when it is a correct guess from a non-drawer.
    pub fn send_message(&mut self, message: Message) {
        let is_scoring_guess = message.is_correct
            && self.state == GameState::Playing
            && self.current_player_id.as_deref() != Some(message.user_id.as_str());
        let guesser_id = message.user_id.clone();

        self.push_message(message);

        if !is_scoring_guess {
            return;
        }

        let Some(award) = ScoringEngine::award_correct_guess(
            &mut self.players,
            &guesser_id,
            self.current_player_id.as_deref(),
        ) else {
            debug!("Ignoring correct guess from unknown player {}", guesser_id);
            return;
        };

        info!(
            "{} guessed '{}' in round {}",
            award.guesser_name, self.current_word, self.round
        );
        self.event_bus.publish(GameEvent::GuessedCorrectly {
            game_id: self.id,
            player_id: award.guesser_id.clone(),
            points_earned: award.guesser_points,
            drawer_points: award.drawer_points,
        });

        let text = format!(
            "{} guessed the word correctly! +{} points. The word was \"{}\"",
            award.guesser_name, award.guesser_points, self.current_word
        );
        self.finish_round(RoundEndReason::CorrectGuess, text);
    }

    /// Chat submission from the local user. Whitespace-only input is dropped.
    pub fn submit_guess(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(user_id) = self.user_id.clone() else {
            debug!("Ignoring chat message before initialize");
            return false;
        };

        let is_correct = self.is_correct_guess_by(&user_id, text);
        let message = Message::user(
            self.next_message_id(),
            user_id,
            text,
            Utc::now().to_rfc3339(),
            is_correct,
        );
        self.send_message(message);
        true
    }

    /// End the running round by timeout.
    pub fn end_round(&mut self) -> bool {
        if self.state != GameState::Playing {
            debug!("Ignoring end_round in state {:?}", self.state);
            return false;
        }

        let text = format!("Round ended! The word was \"{}\"", self.current_word);
        self.finish_round(RoundEndReason::Timeout, text);
        true
    }

    /// Word choice on behalf of the local user.
    pub fn choose_word(&mut self, word: &str) -> bool {
        match self.user_id.clone() {
            Some(user_id) => self.choose_word_by(&user_id, word),
            None => false,
        }
    }

    /// Let the drawer swap the auto-assigned word for another of the offered candidates.
    pub fn choose_word_by(&mut self, player_id: &str, word: &str) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        if self.current_player_id.as_deref() != Some(player_id) {
            debug!("Ignoring word choice from non-drawer {}", player_id);
            return false;
        }
        let Some(choice) = self.word_options.iter().find(|w| guess_matches(w, word)).cloned()
        else {
            debug!("Ignoring choice '{}' outside the offered words", word);
            return false;
        };

        self.current_word = choice;
        self.event_bus.publish(GameEvent::WordChosen {
            game_id: self.id,
            drawer_id: player_id.to_string(),
            word: self.current_word.clone(),
        });
        true
    }

    pub fn is_correct_guess(&self, text: &str) -> bool {
        match &self.user_id {
            Some(user_id) => self.is_correct_guess_by(user_id, text),
            None => false,
        }
    }

    pub fn is_correct_guess_by(&self, player_id: &str, text: &str) -> bool {
        if self.state != GameState::Playing || self.current_player_id.as_deref() == Some(player_id) {
            return false;
        }

        guess_matches(text, &self.current_word)
    }

    /// Move the game clock forward, firing every countdown tick and round start that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some((handle, task)) = self.scheduler.pop_due(until) {
            self.run_task(handle, task);
        }
        self.scheduler.advance_to(until);
    }

    /// One countdown step.
    pub fn tick(&mut self) {
        self.advance(TICK_INTERVAL);
    }

    pub fn subscribe(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn set_user_id(&mut self, player_id: &str) -> bool {
        if self.player(player_id).is_none() {
            return false;
        }
        self.user_id = Some(player_id.to_string());
        true
    }

    /// The state as seen by `viewer_id`. Only the drawer sees the word while the round runs.
    pub fn snapshot_for(&self, viewer_id: &str) -> GameSnapshot {
        let is_drawer = self.current_player_id.as_deref() == Some(viewer_id);
        let hidden = self.state == GameState::Playing && !is_drawer;

        GameSnapshot {
            id: self.id,
            state: self.state,
            round: self.round,
            max_rounds: self.settings.max_rounds,
            time_left: self.time_left,
            current_player_id: self.current_player_id.clone(),
            user_id: self.user_id.clone(),
            word: if hidden {
                mask_word(&self.current_word)
            } else {
                self.current_word.clone()
            },
            word_options: if is_drawer && self.state == GameState::Playing {
                self.word_options.clone()
            } else {
                Vec::new()
            },
            players: self.players.clone(),
            messages: self.messages.clone(),
        }
    }

    /// Snapshot for the local user.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_for(self.user_id.as_deref().unwrap_or_default())
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.current_player_id.as_deref()
    }

    pub fn drawer(&self) -> Option<&Player> {
        self.current_player_id.as_deref().and_then(|id| self.player(id))
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn word_options(&self) -> &[String] {
        &self.word_options
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Rounds started over the life of this game, across restarts.
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    pub fn max_rounds(&self) -> u32 {
        self.settings.max_rounds
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_timer_running(&self) -> bool {
        self.round_timer.is_some()
    }

    pub fn is_next_round_pending(&self) -> bool {
        self.next_round.is_some()
    }

    /// Outstanding scheduled tasks, countdown and round start included.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    fn run_task(&mut self, handle: TaskHandle, task: ScheduledTask) {
        match task {
            ScheduledTask::Tick if self.round_timer == Some(handle) => self.on_tick(),
            ScheduledTask::StartNextRound if self.next_round == Some(handle) => {
                self.next_round = None;
                self.start_new_round();
            }
            _ => debug!("Dropping stale {:?} task", task),
        }
    }

    fn on_tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        debug!("Round {} time left: {}s", self.round, self.time_left);
        self.event_bus.publish(GameEvent::TimerTicked {
            game_id: self.id,
            time_left: self.time_left,
        });

        if self.time_left == 0 {
            self.end_round();
        }
    }

    fn start_new_round(&mut self) {
        self.cancel_round_timer();

        let next_index = self
            .current_player_id
            .as_deref()
            .and_then(|id| self.players.iter().position(|p| p.id == id))
            .filter(|&i| i + 1 < self.players.len())
            .map_or(0, |i| i + 1);
        let Some(drawer) = self.players.get(next_index) else {
            return;
        };
        let drawer_id = drawer.id.clone();
        let drawer_name = drawer.name.clone();

        self.word_options = self.word_bank.pick_options(&mut self.rng);
        // Auto-assigned until the drawer picks another candidate
        self.current_word = self.word_options.first().cloned().unwrap_or_default();
        self.current_player_id = Some(drawer_id.clone());
        self.state = GameState::Playing;
        self.rounds_started += 1;
        self.time_left = self.settings.round_time_seconds;
        self.round_timer = Some(
            self.scheduler
                .schedule_repeating(ScheduledTask::Tick, TICK_INTERVAL),
        );

        info!("Round {} started, {} is drawing", self.round, drawer_name);
        self.event_bus.publish(GameEvent::RoundStarted {
            game_id: self.id,
            round: self.round,
            drawer_id,
            word_options: self.word_options.clone(),
        });
        self.post_system_message(format!(
            "Round {}: {} is drawing now!",
            self.round, drawer_name
        ));
    }

    fn finish_round(&mut self, reason: RoundEndReason, announcement: String) {
        self.cancel_round_timer();
        self.state = GameState::RoundEnd;
        self.post_system_message(announcement);

        info!("Round {} ended ({:?})", self.round, reason);
        self.event_bus.publish(GameEvent::RoundEnded {
            game_id: self.id,
            round: self.round,
            word: self.current_word.clone(),
            reason,
        });

        self.round += 1;
        if self.round > self.settings.max_rounds {
            self.end_game();
            return;
        }

        self.next_round = Some(self.scheduler.schedule_once(
            ScheduledTask::StartNextRound,
            self.settings.round_end_delay(),
        ));
    }

    fn end_game(&mut self) {
        self.state = GameState::Finished;

        let Some(winner) = ScoringEngine::leader(&self.players).cloned() else {
            return;
        };

        info!("Game {} finished, {} wins", self.id, winner.name);
        self.post_system_message(format!(
            "Game over! {} wins with {} points!",
            winner.name, winner.score
        ));
        self.event_bus.publish(GameEvent::GameFinished {
            game_id: self.id,
            winner,
            final_scores: ScoringEngine::standings(&self.players),
        });
    }

    fn cancel_round_timer(&mut self) {
        if let Some(handle) = self.round_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn post_system_message(&mut self, text: String) {
        let message = Message::system(self.next_message_id(), text, Utc::now().to_rfc3339());
        self.push_message(message);
    }

    fn push_message(&mut self, message: Message) {
        self.messages.push(message.clone());
        self.event_bus.publish(GameEvent::MessagePosted {
            game_id: self.id,
            message,
        });
    }

    /// Creation time in milliseconds plus a per-game sequence, so ids stay unique within a millisecond.
    fn next_message_id(&mut self) -> String {
        self.message_seq += 1;
        format!("{}-{}", Utc::now().timestamp_millis(), self.message_seq)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameSettings::default(), WordBank::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::MessageKind;

    fn started_game() -> Game {
        let mut game = Game::with_seed(GameSettings::default(), WordBank::default(), 1);
        game.initialize();
        assert!(game.start_game());
        game
    }

    fn correct_guess_from(game: &Game, player_id: &str) -> Message {
        Message::user(
            "1000",
            player_id,
            game.current_word().to_string(),
            Utc::now().to_rfc3339(),
            true,
        )
    }

    #[test]
    fn test_fresh_game_is_empty() {
        let game = Game::default();
        assert!(game.players().is_empty());
        assert!(game.messages().is_empty());
        assert_eq!(game.current_player_id(), None);
        assert_eq!(game.user_id(), None);
        assert_eq!(game.state(), GameState::Waiting);
        assert_eq!(game.current_word(), "");
    }

    #[test]
    fn test_initialize() {
        let mut game = Game::default();
        game.initialize();

        assert_eq!(game.user_id(), Some("1"));
        assert_eq!(game.players().len(), 4);
        assert_eq!(game.messages().len(), 1);
        assert_eq!(game.messages()[0].kind, MessageKind::System);
        assert_eq!(game.messages()[0].text, WELCOME_TEXT);
    }

    #[test]
    fn test_initialize_with_empty_roster() {
        let mut game = Game::default();
        assert_eq!(game.initialize_with(Vec::new()), Err(GameError::EmptyRoster));
    }

    #[test]
    fn test_start_game() {
        let game = started_game();

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.round(), 1);
        assert_eq!(game.current_player_id(), Some("1"));
        assert!(!game.current_word().is_empty());
        assert_eq!(game.word_options().len(), 3);
        assert_eq!(game.current_word(), game.word_options()[0]);
        assert_eq!(game.time_left(), 60);
        assert!(game.is_timer_running());

        // Welcome + round announcement + game started
        assert_eq!(game.messages().len(), 3);
        assert_eq!(game.messages()[1].text, "Round 1: Player 1 is drawing now!");
        assert_eq!(game.messages()[2].text, GAME_STARTED_TEXT);
    }

    #[test]
    fn test_start_game_is_ignored_while_playing() {
        let mut game = started_game();
        let messages = game.messages().len();

        assert!(!game.start_game());
        assert_eq!(game.round(), 1);
        assert_eq!(game.messages().len(), messages);
        assert_eq!(game.pending_tasks(), 1);
    }

    #[test]
    fn test_start_game_requires_players() {
        let mut game = Game::default();
        assert!(!game.start_game());
        assert_eq!(game.state(), GameState::Waiting);
    }

    #[test]
    fn test_correct_guess_detection() {
        let mut game = started_game();
        assert!(game.set_user_id("2"));
        let word = game.current_word().to_string();

        assert!(game.is_correct_guess(&word));
        assert!(game.is_correct_guess(&word.to_uppercase()));
        assert!(game.is_correct_guess(&format!("  {}  ", word)));
        assert!(!game.is_correct_guess("wrong guess"));

        // Drawer cannot guess
        assert!(game.set_user_id("1"));
        assert!(!game.is_correct_guess(&word));
    }

    #[test]
    fn test_guess_outside_playing_state() {
        let mut game = Game::default();
        game.initialize();
        assert!(!game.is_correct_guess_by("2", ""));
    }

    #[test]
    fn test_awards_points_for_correct_guess() {
        let mut game = started_game();
        let message = correct_guess_from(&game, "2");
        game.send_message(message);

        assert_eq!(game.player("2").unwrap().score, 10);
        assert_eq!(game.player("1").unwrap().score, 5);
        assert_eq!(game.state(), GameState::RoundEnd);
        assert_eq!(game.round(), 2);
        assert!(!game.is_timer_running());

        let last = game.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::System);
        assert!(last.text.contains("guessed the word correctly"));
        assert!(last.text.starts_with("Player 2"));
    }

    #[test]
    fn test_drawer_marked_correct_is_not_scored() {
        let mut game = started_game();
        let message = correct_guess_from(&game, "1");
        game.send_message(message);

        assert_eq!(game.player("1").unwrap().score, 0);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.messages().last().unwrap().kind, MessageKind::User);
    }

    #[test]
    fn test_incorrect_message_is_just_appended() {
        let mut game = started_game();
        let before = game.messages().len();
        game.send_message(Message::user("5", "3", "hello", Utc::now().to_rfc3339(), false));

        assert_eq!(game.messages().len(), before + 1);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.players().iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_ends_game_after_max_rounds() {
        let mut game = started_game();

        for round in 1..=3 {
            assert_eq!(game.round(), round);
            assert!(game.end_round());
            game.advance(Duration::from_secs(3));
        }

        assert_eq!(game.state(), GameState::Finished);
        let last = game.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::System);
        assert!(last.text.contains("Game over"));
        assert!(last.text.contains("wins with"));
        assert_eq!(game.pending_tasks(), 0);
    }

    #[test]
    fn test_rounds_started_counts_across_restarts() {
        let mut game = started_game();
        assert_eq!(game.rounds_started(), 1);

        for _ in 1..=3 {
            assert!(game.end_round());
            game.advance(Duration::from_secs(3));
        }
        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.rounds_started(), 3);

        assert!(game.start_game());
        assert_eq!(game.round(), 1);
        assert_eq!(game.rounds_started(), 4);
    }

    #[test]
    fn test_end_round_ignored_between_rounds() {
        let mut game = started_game();
        assert!(game.end_round());
        let messages = game.messages().len();

        assert!(!game.end_round());
        assert_eq!(game.round(), 2);
        assert_eq!(game.messages().len(), messages);
    }

    #[test]
    fn test_choose_word() {
        let mut game = started_game();
        let alternative = game.word_options()[2].clone();

        assert!(game.choose_word(&alternative.to_uppercase()));
        assert_eq!(game.current_word(), alternative);
        assert!(!game.choose_word("definitely not offered"));
        assert_eq!(game.current_word(), alternative);
    }

    #[test]
    fn test_guesser_cannot_choose_word() {
        let mut game = started_game();
        let word = game.current_word().to_string();
        let alternative = game.word_options()[1].clone();

        assert!(game.set_user_id("2"));
        assert!(!game.choose_word(&alternative));
        assert!(!game.choose_word_by("3", &alternative));
        assert_eq!(game.current_word(), word);

        assert!(game.choose_word_by("1", &alternative));
        assert_eq!(game.current_word(), alternative);
    }

    #[test]
    fn test_initialize_resets_running_game() {
        let mut game = started_game();
        game.initialize();

        assert_eq!(game.state(), GameState::Waiting);
        assert_eq!(game.round(), 0);
        assert_eq!(game.pending_tasks(), 0);
        assert_eq!(game.messages().len(), 1);
        assert_eq!(game.user_id(), Some("1"));
    }

    #[test]
    fn test_snapshot_masks_word_for_guessers() {
        let game = started_game();
        let word = game.current_word().to_string();

        let drawer_view = game.snapshot_for("1");
        assert_eq!(drawer_view.word, word);
        assert_eq!(drawer_view.word_options.len(), 3);

        let guesser_view = game.snapshot_for("2");
        assert_eq!(guesser_view.word, mask_word(&word));
        assert!(guesser_view.word_options.is_empty());
        assert!(guesser_view.is_drawer("1"));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut game = started_game();
        for _ in 0..3 {
            game.end_round();
            game.advance(Duration::from_secs(3));
        }

        let mut ids: Vec<&str> = game.messages().iter().map(|m| m.id.as_str()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
