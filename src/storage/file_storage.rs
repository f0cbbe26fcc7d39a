use chrono::Utc;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{newest_history_first, newest_images_first, Storage, StorageError};
use crate::model::{CustomImageRecord, GameHistoryRecord, NewCustomImage, NewGameHistory};

const GAME_HISTORY_FILE: &str = "game_history.json";
const CUSTOM_IMAGES_FILE: &str = "custom_images.json";

/// JSON-file storage: one array per record kind under `data_dir`.
///
/// Records are cached in memory; each save rewrites the whole file and only
/// updates the cache once the write succeeded.
#[derive(Debug)]
pub struct FileStorage {
    data_dir: PathBuf,
    game_history: Vec<GameHistoryRecord>,
    custom_images: Vec<CustomImageRecord>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(io_error(path)(err)),
    }
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let contents = serde_json::to_string_pretty(records)?;
    fs::write(path, contents).map_err(io_error(path))
}

impl FileStorage {
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(io_error(&data_dir))?;

        let game_history = load_records(&data_dir.join(GAME_HISTORY_FILE))?;
        let custom_images = load_records(&data_dir.join(CUSTOM_IMAGES_FILE))?;
        debug!(
            target: "storage",
            "Opened {:?}: {} games, {} custom images",
            data_dir,
            game_history.len(),
            custom_images.len()
        );

        Ok(Self {
            data_dir,
            game_history,
            custom_images,
        })
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir.join(GAME_HISTORY_FILE)
    }

    fn custom_images_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOM_IMAGES_FILE)
    }
}

impl Storage for FileStorage {
    fn save_game_history(
        &mut self,
        game: NewGameHistory,
    ) -> Result<GameHistoryRecord, StorageError> {
        let record = GameHistoryRecord::from_new(game, Utc::now());
        let mut game_history = self.game_history.clone();
        game_history.push(record.clone());

        write_records(&self.history_path(), &game_history)?;
        trace!(target: "storage", "Saved game history {:?}", record);
        self.game_history = game_history;
        Ok(record)
    }

    fn get_game_history(&self, limit: usize) -> Result<Vec<GameHistoryRecord>, StorageError> {
        Ok(newest_history_first(&self.game_history, limit))
    }

    fn save_custom_image(
        &mut self,
        image: NewCustomImage,
    ) -> Result<CustomImageRecord, StorageError> {
        let record = CustomImageRecord::from_new(image, Utc::now());
        let mut custom_images = self.custom_images.clone();
        custom_images.push(record.clone());

        write_records(&self.custom_images_path(), &custom_images)?;
        trace!(target: "storage", "Saved custom image {:?}", record);
        self.custom_images = custom_images;
        Ok(record)
    }

    fn get_custom_images(&self) -> Result<Vec<CustomImageRecord>, StorageError> {
        Ok(newest_images_first(&self.custom_images))
    }

    fn get_custom_image_by_id(&self, id: Uuid) -> Result<Option<CustomImageRecord>, StorageError> {
        Ok(self.custom_images.iter().find(|image| image.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = FileStorage::open(dir.path()).unwrap();
            storage
                .save_game_history(NewGameHistory {
                    image_name: "Tropical Beach".to_string(),
                    moves: 88,
                    time_elapsed: 120,
                    difficulty: Difficulty::Medium,
                })
                .unwrap();
            storage
                .save_custom_image(NewCustomImage {
                    file_name: "1-abcdefg.jpg".to_string(),
                    original_name: "holiday.jpg".to_string(),
                    processed_path: "/uploads/1-abcdefg.jpg".to_string(),
                })
                .unwrap();
        }

        let storage = FileStorage::open(dir.path()).unwrap();
        let history = storage.get_game_history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].moves, 88);
        assert_eq!(history[0].difficulty, Difficulty::Medium);

        let images = storage.get_custom_images().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(
            storage.get_custom_image_by_id(images[0].id).unwrap().unwrap().original_name,
            "holiday.jpg"
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(GAME_HISTORY_FILE), "not json").unwrap();

        let result = FileStorage::open(dir.path());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_failed_write_leaves_cache_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        // a directory where the history file should be makes the write fail
        fs::create_dir_all(dir.path().join(GAME_HISTORY_FILE)).unwrap();

        let result = storage.save_game_history(NewGameHistory {
            image_name: "Custom Image".to_string(),
            moves: 3,
            time_elapsed: 9,
            difficulty: Difficulty::Easy,
        });
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(storage.get_game_history(10).unwrap().is_empty());
    }
}
