use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, NewGameHistory};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryRecord {
    pub id: Uuid,
    pub image_name: String,
    pub moves: u32,
    pub time_elapsed: u64, // seconds
    pub difficulty: Difficulty,
    pub completed_at: DateTime<Utc>,
}

impl GameHistoryRecord {
    pub fn from_new(game: NewGameHistory, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_name: game.image_name,
            moves: game.moves,
            time_elapsed: game.time_elapsed,
            difficulty: game.difficulty,
            completed_at,
        }
    }
}
