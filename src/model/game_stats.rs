use crate::model::Difficulty;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Summary of a finished puzzle, emitted on completion and used to build the
/// history entry when the player saves the result.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GameStats {
    pub moves: u32,
    pub completion_time: Duration,
    pub difficulty: Difficulty,
    pub image_name: String,
    pub playthrough_id: Uuid,
}

impl GameStats {
    pub fn to_new_history(&self) -> NewGameHistory {
        NewGameHistory {
            image_name: self.image_name.clone(),
            moves: self.moves,
            time_elapsed: self.completion_time.as_secs(),
            difficulty: self.difficulty,
        }
    }
}

/// Insert payload for the history store; id and timestamp are assigned by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGameHistory {
    pub image_name: String,
    pub moves: u32,
    pub time_elapsed: u64, // seconds
    #[serde(default)]
    pub difficulty: Difficulty,
}
