use chrono::Utc;
use log::trace;
use uuid::Uuid;

use super::{newest_history_first, newest_images_first, Storage, StorageError};
use crate::model::{CustomImageRecord, GameHistoryRecord, NewCustomImage, NewGameHistory};

/// Process-lifetime storage; everything is gone when it is dropped.
#[derive(Debug, Default)]
pub struct MemStorage {
    game_history: Vec<GameHistoryRecord>,
    custom_images: Vec<CustomImageRecord>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemStorage {
    fn save_game_history(
        &mut self,
        game: NewGameHistory,
    ) -> Result<GameHistoryRecord, StorageError> {
        let record = GameHistoryRecord::from_new(game, Utc::now());
        trace!(target: "storage", "Saving game history {:?}", record);
        self.game_history.push(record.clone());
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
        trace!(target: "storage", "Saving custom image {:?}", record);
        self.custom_images.push(record.clone());
        Ok(record)
    }

    fn get_custom_images(&self) -> Result<Vec<CustomImageRecord>, StorageError> {
        Ok(newest_images_first(&self.custom_images))
    }

    fn get_custom_image_by_id(&self, id: Uuid) -> Result<Option<CustomImageRecord>, StorageError> {
        Ok(self.custom_images.iter().find(|image| image.id == id).cloned())
    }
}
