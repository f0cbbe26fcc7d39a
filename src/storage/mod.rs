mod file_storage;
mod mem_storage;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;
use uuid::Uuid;

use crate::model::{CustomImageRecord, GameHistoryRecord, NewCustomImage, NewGameHistory};

pub use file_storage::FileStorage;
pub use mem_storage::MemStorage;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for completed games and uploaded images.
///
/// Implementations make no durability promise beyond their own medium; the
/// game session never depends on a write succeeding.
pub trait Storage: std::fmt::Debug {
    fn save_game_history(&mut self, game: NewGameHistory)
        -> Result<GameHistoryRecord, StorageError>;

    /// Most recent `limit` records, newest first.
    fn get_game_history(&self, limit: usize) -> Result<Vec<GameHistoryRecord>, StorageError>;

    fn save_custom_image(&mut self, image: NewCustomImage)
        -> Result<CustomImageRecord, StorageError>;

    /// All uploaded images, newest first.
    fn get_custom_images(&self) -> Result<Vec<CustomImageRecord>, StorageError>;

    fn get_custom_image_by_id(&self, id: Uuid) -> Result<Option<CustomImageRecord>, StorageError>;
}

pub type SharedStorage = Rc<RefCell<dyn Storage>>;

pub fn shared<S: Storage + 'static>(storage: S) -> SharedStorage {
    Rc::new(RefCell::new(storage))
}

// Records are kept in insertion order; among equal timestamps the later
// insertion counts as newer.
fn newest_history_first(records: &[GameHistoryRecord], limit: usize) -> Vec<GameHistoryRecord> {
    let mut sorted: Vec<GameHistoryRecord> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    sorted.truncate(limit);
    sorted
}

fn newest_images_first(records: &[CustomImageRecord]) -> Vec<CustomImageRecord> {
    let mut sorted: Vec<CustomImageRecord> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    sorted
}
