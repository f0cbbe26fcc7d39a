use super::{GameHistoryRecord, GameStats, TimerState};
use crate::game::GameSession;

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    SessionUpdated(GameSession),
    HistoryChanged {
        history_index: usize,
        history_length: usize,
    },
    TimerStateChanged(Option<TimerState>),
    PuzzleCompleted(GameStats),
    GameSaved(GameHistoryRecord),
    HistoryLoaded(Vec<GameHistoryRecord>),
    PersistenceFailed(String),
}
