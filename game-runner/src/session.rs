use anyhow::{Context, Result};
use game_core::{
    DrawingSurface, Game, GameEvent, GameEventHandler, RasterCanvas, TICK_INTERVAL, WordBank,
};
use game_types::{GameState, Message, MessageKind};
use tracing::{debug, info};

use crate::commands::{Command, HELP_TEXT};
use crate::config::Config;

/// Lines to show the user after a command, plus whether the session should end.
#[derive(Debug, Default)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }
}

/// Logs game flow through tracing.
struct EventLogger;

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::TimerTicked { time_left, .. } => debug!("{}s left", time_left),
            GameEvent::MessagePosted { .. } => {}
            GameEvent::GuessedCorrectly {
                player_id,
                points_earned,
                ..
            } => info!("Player {} earned {} points", player_id, points_earned),
            other => debug!("Game event: {:?}", other),
        }
    }
}

/// Terminal front end for one local game: a chat feed on stdout and a raster canvas.
///
/// The game is polled after every command and clock tick; only messages not yet shown
/// are rendered.
pub struct Session {
    game: Game,
    surface: DrawingSurface<RasterCanvas>,
    shown_messages: usize,
    canvas_rounds_started: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let word_bank = match &config.words_file {
            Some(path) => {
                info!("Loading words from {}", path.display());
                let list = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read word list {}", path.display()))?;
                WordBank::from_word_list(&list)
                    .with_context(|| format!("Unusable word list {}", path.display()))?
            }
            None => WordBank::default(),
        };

        let canvas = RasterCanvas::new(config.canvas_width, config.canvas_height)
            .context("Failed to create canvas")?;

        let mut game = Game::new(config.game_settings(), word_bank);
        game.subscribe(Box::new(EventLogger));
        game.initialize();

        Ok(Self::with_game(game, canvas))
    }

    /// Wrap an already initialized game.
    pub fn with_game(game: Game, canvas: RasterCanvas) -> Self {
        let mut session = Self {
            game,
            surface: DrawingSurface::new(canvas),
            shown_messages: 0,
            canvas_rounds_started: 0,
        };
        session.sync_surface();
        session
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn surface(&self) -> &DrawingSurface<RasterCanvas> {
        &self.surface
    }

    /// Everything in the feed that has not been shown yet.
    pub fn intro(&mut self) -> Vec<String> {
        let mut lines = vec![format!(
            "You are {} (/help for commands)",
            self.local_name()
        )];
        lines.extend(self.drain_feed());
        lines
    }

    /// One second of game time.
    pub fn tick(&mut self) -> Vec<String> {
        self.game.advance(TICK_INTERVAL);
        self.sync_surface();

        let mut lines = self.drain_feed();
        let time_left = self.game.time_left();
        if self.game.state() == GameState::Playing && matches!(time_left, 30 | 10 | 5) {
            lines.push(format!("{}s left", time_left));
        }
        lines
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::default();
        }

        let mut reply = match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => Reply::line(format!("! {}", e)),
        };

        self.sync_surface();
        let mut lines = self.drain_feed();
        lines.append(&mut reply.lines);
        reply.lines = lines;
        reply
    }

    fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Start => {
                if !self.game.start_game() {
                    return Reply::line("! A game is already running");
                }
                Reply::default()
            }
            Command::Guess(text) => {
                self.game.submit_guess(&text);
                Reply::default()
            }
            Command::Choose(word) => {
                if !self.game.choose_word(&word) {
                    return Reply::line(format!("! Cannot choose '{}'", word));
                }
                Reply::line(format!("Your word is now \"{}\"", self.game.current_word()))
            }
            Command::As(player_id) => {
                if !self.game.set_user_id(&player_id) {
                    return Reply::line(format!("! No player with id {}", player_id));
                }
                Reply::line(format!("You are now {}", self.local_name()))
            }
            Command::Draw(points) => self.draw(&points),
            Command::Color(value) => match self.surface.set_color_hex(&value) {
                Ok(()) => Reply::line(format!("Color set to {}", self.surface.style().color)),
                Err(e) => Reply::line(format!("! {}", e)),
            },
            Command::Width(width) => {
                self.surface.set_line_width(width);
                Reply::line(format!("Width set to {}", self.surface.style().width))
            }
            Command::Tool(tool) => {
                self.surface.select_tool(tool);
                Reply::line(format!("Tool set to {:?}", tool))
            }
            Command::ClearCanvas => {
                if !self.surface.is_enabled() {
                    return Reply::line("! Only the drawer can clear the canvas");
                }
                self.surface.clear();
                Reply::line("Canvas cleared")
            }
            Command::Save(path) => match self.surface.context().save_png(&path) {
                Ok(()) => Reply::line(format!("Saved canvas to {}", path.display())),
                Err(e) => Reply::line(format!("! Failed to save {}: {}", path.display(), e)),
            },
            Command::State => match serde_json::to_string_pretty(&self.game.snapshot()) {
                Ok(json) => Reply::line(json),
                Err(e) => Reply::line(format!("! {}", e)),
            },
            Command::Help => Reply::line(HELP_TEXT),
            Command::Quit => Reply {
                lines: Vec::new(),
                quit: true,
            },
        }
    }

    fn draw(&mut self, points: &[game_types::Point]) -> Reply {
        let Some((first, rest)) = points.split_first() else {
            return Reply::default();
        };

        if !self.surface.pointer_down(first.x, first.y) {
            return Reply::line(format!("! The canvas is disabled ({})", self.surface.cursor()));
        }
        for point in rest {
            self.surface.pointer_move(point.x, point.y);
        }

        match self.surface.pointer_up() {
            Some(stroke) => Reply::line(format!(
                "Drew {} segments in {}",
                stroke.points.len().saturating_sub(1),
                stroke.color
            )),
            None => Reply::line("Filled the canvas"),
        }
    }

    /// The canvas only accepts input from the drawer during a round, and starts blank each round.
    fn sync_surface(&mut self) {
        let playing = self.game.state() == GameState::Playing;
        // Round numbers repeat after a restart, so compare start counts
        if playing && self.canvas_rounds_started != self.game.rounds_started() {
            self.surface.clear();
            self.canvas_rounds_started = self.game.rounds_started();
        }
        self.surface.set_enabled(playing && self.is_local_drawer());
    }

    fn is_local_drawer(&self) -> bool {
        self.game.user_id().is_some() && self.game.user_id() == self.game.current_player_id()
    }

    fn local_name(&self) -> String {
        self.game
            .user_id()
            .and_then(|id| self.game.player(id))
            .map(|p| format!("{} {}", p.avatar, p.name))
            .unwrap_or_else(|| "a spectator".to_string())
    }

    fn drain_feed(&mut self) -> Vec<String> {
        let start = self.shown_messages.min(self.game.messages().len());
        let lines: Vec<String> = self.game.messages()[start..]
            .iter()
            .map(|m| self.render_message(m))
            .collect();
        self.shown_messages = self.game.messages().len();
        lines
    }

    fn render_message(&self, message: &Message) -> String {
        match message.kind {
            MessageKind::System => format!("* {}", message.text),
            MessageKind::User => {
                let name = self
                    .game
                    .player(&message.user_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or(message.user_id.as_str());
                format!("{}: {}", name, message.text)
            }
        }
    }
}
