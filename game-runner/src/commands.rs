use game_types::{Point, Tool};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Type a guess and press enter, or use a command:
  /start                 start (or restart) the game
  /choose <word>         pick another of the offered words (drawer)
  /as <player id>        take another seat
  /draw x y x y ...      drag the pointer through the points (drawer)
  /color #rrggbb         set the stroke color
  /width <n>             set the stroke width
  /tool pencil|eraser|fill
  /clear                 wipe the canvas
  /save <file.png>       export the canvas
  /state                 print the game state as JSON
  /quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Guess(String),
    Choose(String),
    As(String),
    Draw(Vec<Point>),
    Color(String),
    Width(f32),
    Tool(Tool),
    ClearCanvas,
    Save(PathBuf),
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    UnknownCommand(String),
    #[error("/{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("Not a number: {0}")]
    InvalidNumber(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("/draw needs at least two x y pairs")]
    IncompletePath,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Ok(Command::Guess(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };

        let required = |command: &'static str, what: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument { command, what })
            } else {
                Ok(arg.to_string())
            }
        };

        match name.to_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "choose" => required("choose", "a word").map(Command::Choose),
            "as" => required("as", "a player id").map(Command::As),
            "draw" => parse_path(arg).map(Command::Draw),
            "color" => required("color", "a #rrggbb color").map(Command::Color),
            "width" => {
                let value = required("width", "a number")?;
                value
                    .parse()
                    .map(Command::Width)
                    .map_err(|_| CommandError::InvalidNumber(value))
            }
            "tool" => match arg.to_lowercase().as_str() {
                "pencil" => Ok(Command::Tool(Tool::Pencil)),
                "eraser" => Ok(Command::Tool(Tool::Eraser)),
                "fill" => Ok(Command::Tool(Tool::Fill)),
                "" => Err(CommandError::MissingArgument {
                    command: "tool",
                    what: "pencil, eraser or fill",
                }),
                other => Err(CommandError::UnknownTool(other.to_string())),
            },
            "clear" => Ok(Command::ClearCanvas),
            "save" => required("save", "a file name").map(|p| Command::Save(PathBuf::from(p))),
            "state" => Ok(Command::State),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_path(arg: &str) -> Result<Vec<Point>, CommandError> {
    let numbers = arg
        .split_whitespace()
        .map(|n| {
            n.parse::<f32>()
                .map_err(|_| CommandError::InvalidNumber(n.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if numbers.len() < 4 || numbers.len() % 2 != 0 {
        return Err(CommandError::IncompletePath);
    }

    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}
