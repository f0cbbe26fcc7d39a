mod board;
mod custom_image;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod game_history;
mod game_stats;
mod preset_image;
mod tile;
mod timer_state;

pub use board::{cell_coordinates, infer_grid_size, Board, BoardError, MIN_GRID_SIZE};
pub use custom_image::{CustomImageRecord, NewCustomImage};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use game_history::GameHistoryRecord;
pub use game_stats::{GameStats, NewGameHistory};
pub use preset_image::PresetImage;
pub use tile::{Tile, EMPTY_TILE_ID};
pub use timer_state::TimerState;
