use chrono::Utc;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::catalog::preset_images;
use super::upload::{generate_file_name, process_to_square, validate_upload, ImageUpload, UploadError};
use crate::model::{CustomImageRecord, NewCustomImage, PresetImage};
use crate::storage::{SharedStorage, StorageError};

pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Image picker backend: preset catalog plus processed player uploads.
pub struct ImageLibrary {
    storage: SharedStorage,
    uploads_dir: PathBuf,
}

impl ImageLibrary {
    pub fn new(storage: SharedStorage, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn presets(&self) -> Vec<PresetImage> {
        preset_images()
    }

    pub fn custom_images(&self) -> Result<Vec<CustomImageRecord>, StorageError> {
        self.storage.borrow().get_custom_images()
    }

    /// Looks an upload up by record id, falling back to its file name.
    pub fn find_custom(&self, key: &str) -> Result<Option<CustomImageRecord>, StorageError> {
        if let Ok(id) = Uuid::parse_str(key) {
            return self.storage.borrow().get_custom_image_by_id(id);
        }
        Ok(self
            .custom_images()?
            .into_iter()
            .find(|image| image.file_name == key))
    }

    /// Validates, squares and stores an upload. Nothing is written when
    /// validation or processing fails.
    pub fn upload(&self, upload: ImageUpload) -> Result<CustomImageRecord, UploadError> {
        let format = validate_upload(&upload)?;
        let processed = process_to_square(&upload.bytes)?;

        let file_name = generate_file_name(Utc::now(), &mut rand::rng());
        fs::create_dir_all(&self.uploads_dir).map_err(|source| UploadError::Io {
            path: self.uploads_dir.clone(),
            source,
        })?;
        let file_path = self.uploads_dir.join(&file_name);
        fs::write(&file_path, processed).map_err(|source| UploadError::Io {
            path: file_path.clone(),
            source,
        })?;

        let saved = self.storage.borrow_mut().save_custom_image(NewCustomImage {
            file_name: file_name.clone(),
            original_name: upload.original_name.clone(),
            processed_path: format!("{}{}", UPLOADS_URL_PREFIX, file_name),
        });
        match saved {
            Ok(record) => {
                info!(
                    target: "images",
                    "Stored {:?} upload {:?} as {:?}",
                    format,
                    upload.original_name,
                    record.processed_path
                );
                Ok(record)
            }
            Err(err) => {
                // keep the uploads directory in step with the records
                if let Err(remove_err) = fs::remove_file(&file_path) {
                    warn!(target: "images", "Could not remove {:?}: {}", file_path, remove_err);
                }
                Err(err.into())
            }
        }
    }

    /// Maps a `/uploads/<name>` reference to the file on disk, if present.
    pub fn resolve(&self, processed_path: &str) -> Option<PathBuf> {
        let file_name = processed_path.strip_prefix(UPLOADS_URL_PREFIX)?;
        // plain file names only
        if file_name.is_empty() || Path::new(file_name).components().count() != 1 {
            return None;
        }
        let path = self.uploads_dir.join(file_name);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemStorage};
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn uploads_dir(dir: &TempDir) -> PathBuf {
        dir.path().join("uploads")
    }

    fn png_upload() -> ImageUpload {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(300, 500))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageUpload {
            original_name: "portrait.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes,
        }
    }

    #[test]
    fn test_upload_writes_file_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(shared(MemStorage::new()), uploads_dir(&dir));

        let record = library.upload(png_upload()).unwrap();
        assert_eq!(record.original_name, "portrait.png");
        assert!(record.processed_path.starts_with(UPLOADS_URL_PREFIX));

        let path = library.resolve(&record.processed_path).unwrap();
        let stored = fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&stored).unwrap(), ImageFormat::Jpeg);
        assert_eq!(library.custom_images().unwrap(), vec![record]);
    }

    #[test]
    fn test_find_custom_by_id_or_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(shared(MemStorage::new()), uploads_dir(&dir));
        let record = library.upload(png_upload()).unwrap();

        assert_eq!(
            library.find_custom(&record.id.to_string()).unwrap(),
            Some(record.clone())
        );
        assert_eq!(
            library.find_custom(&record.file_name).unwrap(),
            Some(record.clone())
        );
        assert_eq!(library.find_custom(&Uuid::new_v4().to_string()).unwrap(), None);
        assert_eq!(library.find_custom("nope.jpg").unwrap(), None);
    }

    #[test]
    fn test_rejected_upload_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(shared(MemStorage::new()), uploads_dir(&dir));

        let mut upload = png_upload();
        upload.content_type = Some("application/pdf".to_string());
        assert!(matches!(library.upload(upload), Err(UploadError::NotAnImage(_))));
        assert!(library.custom_images().unwrap().is_empty());
        assert!(!uploads_dir(&dir).exists());
    }

    #[test]
    fn test_resolve_rejects_other_paths() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(shared(MemStorage::new()), uploads_dir(&dir));
        assert!(library.resolve("/uploads/../secret.txt").is_none());
        assert!(library.resolve("/uploads/").is_none());
        assert!(library.resolve("https://images.unsplash.com/x").is_none());
        assert!(library.resolve("/uploads/missing.jpg").is_none());
    }

    #[test]
    fn test_presets_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(shared(MemStorage::new()), uploads_dir(&dir));
        assert_eq!(library.presets().len(), 4);
    }
}
