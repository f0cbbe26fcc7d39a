use std::path::PathBuf;
use std::str::FromStr;

use log::trace;
use thiserror::Error;

use crate::events::EventHandler;
use crate::helpers::parse_cell_label;
use crate::model::{Board, Difficulty, GameEngineCommand, GameEngineEvent, ParseDifficultyError};

/// One line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Tile(u32),
    Cell { row: usize, col: usize },
    Shuffle,
    Reset,
    Solve,
    Undo,
    Redo,
    Difficulty(Difficulty),
    ToggleNumbers,
    Save,
    History,
    Images,
    Image(String),
    Upload(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("type a command; `help` lists them")]
    Empty,
    #[error("unknown command {0:?}; `help` lists the commands")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error("{0:?} is not a tile number or cell like B3")]
    BadTile(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  <n> | move <n>     slide tile number n
  <cell>             slide the tile in a cell, e.g. B3
  shuffle | s        start a new shuffled game
  reset              back to the solved board
  solve              give up and show the solution
  undo | u, redo     step through this game's moves
  size <3x3|4x4|5x5> change difficulty
  numbers | n        toggle tile numbers
  save               record a finished game
  history            recent games
  images             list puzzle images
  image <id>         use a preset or uploaded image
  upload <path>      add your own image (5 MB max)
  help | ?           this text
  quit | q           save and exit";

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(InputError::Empty);
        };
        let rest = words.collect::<Vec<_>>().join(" ");
        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(InputError::MissingArgument(name))
            } else {
                Ok(rest.clone())
            }
        };

        let input = match command.to_ascii_lowercase().as_str() {
            "move" | "m" => parse_tile(&argument("move")?)?,
            "shuffle" | "s" | "new" => Input::Shuffle,
            "reset" => Input::Reset,
            "solve" => Input::Solve,
            "undo" | "u" => Input::Undo,
            "redo" => Input::Redo,
            "size" | "difficulty" => Input::Difficulty(argument("size")?.parse::<Difficulty>()?),
            "numbers" | "n" => Input::ToggleNumbers,
            "save" => Input::Save,
            "history" => Input::History,
            "images" => Input::Images,
            "image" => Input::Image(argument("image")?),
            "upload" => Input::Upload(PathBuf::from(argument("upload")?)),
            "help" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            _ if rest.is_empty() => {
                parse_tile(command).map_err(|_| InputError::Unknown(command.to_string()))?
            }
            _ => return Err(InputError::Unknown(command.to_string())),
        };
        Ok(input)
    }
}

fn parse_tile(word: &str) -> Result<Input, InputError> {
    if let Ok(id) = word.parse::<u32>() {
        return Ok(Input::Tile(id));
    }
    parse_cell_label(word)
        .map(|(row, col)| Input::Cell { row, col })
        .ok_or_else(|| InputError::BadTile(word.to_string()))
}

/// Turns game inputs into engine commands. Cell inputs are resolved against
/// the board most recently published by the engine.
#[derive(Default)]
pub struct InputTranslator {
    board: Option<Board>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// None when `input` is not a game action or names an empty or
    /// off-board cell.
    pub fn translate(&self, input: &Input) -> Option<GameEngineCommand> {
        let command = match input {
            Input::Tile(id) => GameEngineCommand::MoveTile(*id),
            Input::Cell { row, col } => GameEngineCommand::MoveTile(self.tile_in_cell(*row, *col)?),
            Input::Shuffle => GameEngineCommand::Shuffle,
            Input::Reset => GameEngineCommand::Reset,
            Input::Solve => GameEngineCommand::Solve,
            Input::Undo => GameEngineCommand::Undo,
            Input::Redo => GameEngineCommand::Redo,
            Input::Difficulty(difficulty) => GameEngineCommand::ChangeDifficulty(*difficulty),
            Input::Save => GameEngineCommand::SaveGame,
            Input::History => GameEngineCommand::LoadHistory(None),
            _ => {
                trace!(target: "input_translator", "No engine command for {:?}", input);
                return None;
            }
        };
        Some(command)
    }

    fn tile_in_cell(&self, row: usize, col: usize) -> Option<u32> {
        let board = self.board.as_ref()?;
        if row >= board.grid_size() || col >= board.grid_size() {
            return None;
        }
        board
            .tile_at(row * board.grid_size() + col)
            .filter(|tile| !tile.is_empty)
            .map(|tile| tile.id)
    }
}

impl EventHandler<GameEngineEvent> for InputTranslator {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        if let GameEngineEvent::SessionUpdated(session) = event {
            self.board = Some(session.tiles().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSession;

    #[test]
    fn test_parse_inputs() {
        assert_eq!("7".parse::<Input>(), Ok(Input::Tile(7)));
        assert_eq!("move 12".parse::<Input>(), Ok(Input::Tile(12)));
        assert_eq!("b3".parse::<Input>(), Ok(Input::Cell { row: 1, col: 2 }));
        assert_eq!("  Shuffle ".parse::<Input>(), Ok(Input::Shuffle));
        assert_eq!("size 5x5".parse::<Input>(), Ok(Input::Difficulty(Difficulty::Hard)));
        assert_eq!("size medium".parse::<Input>(), Ok(Input::Difficulty(Difficulty::Medium)));
        assert_eq!(
            "upload /tmp/my photo.png".parse::<Input>(),
            Ok(Input::Upload(PathBuf::from("/tmp/my photo.png")))
        );
        assert_eq!("image ocean".parse::<Input>(), Ok(Input::Image("ocean".to_string())));
        assert_eq!("q".parse::<Input>(), Ok(Input::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Input>(), Err(InputError::Empty));
        assert_eq!("   ".parse::<Input>(), Err(InputError::Empty));
        assert_eq!(
            "dance".parse::<Input>(),
            Err(InputError::Unknown("dance".to_string()))
        );
        assert_eq!("size".parse::<Input>(), Err(InputError::MissingArgument("size")));
        assert!(matches!(
            "size 6x6".parse::<Input>(),
            Err(InputError::Difficulty(_))
        ));
        assert_eq!(
            "move x".parse::<Input>(),
            Err(InputError::BadTile("x".to_string()))
        );
    }

    #[test]
    fn test_cells_resolve_against_current_board() {
        let mut translator = InputTranslator::new();
        // nothing published yet
        assert!(translator.translate(&Input::Cell { row: 0, col: 0 }).is_none());

        let session = GameSession::new(Difficulty::Easy, "img");
        translator.handle_event(&GameEngineEvent::SessionUpdated(session));

        assert!(matches!(
            translator.translate(&Input::Cell { row: 2, col: 1 }),
            Some(GameEngineCommand::MoveTile(8))
        ));
        // bottom-right is the empty cell, D1 is off the board
        assert!(translator.translate(&Input::Cell { row: 2, col: 2 }).is_none());
        assert!(translator.translate(&Input::Cell { row: 3, col: 0 }).is_none());
        assert!(matches!(
            translator.translate(&Input::Undo),
            Some(GameEngineCommand::Undo)
        ));
        assert!(translator.translate(&Input::Help).is_none());
    }
}
