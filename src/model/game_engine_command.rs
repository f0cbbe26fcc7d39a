use super::Difficulty;
use crate::game::GameSession;

#[derive(Debug, Clone)]
pub enum GameEngineCommand {
    MoveTile(u32),
    Shuffle,
    Reset,
    Solve,
    ChangeDifficulty(Difficulty),
    SetImage(String),
    Undo,
    Redo,
    SaveGame,
    LoadHistory(Option<usize>), // record limit; None uses the configured one
    LoadState(GameSession),
    InitDisplay,
}
