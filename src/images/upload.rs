use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::storage::StorageError;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Edge length of the processed square image.
pub const PROCESSED_SIZE: u32 = 400;
pub const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no image file provided")]
    MissingFile,
    #[error("only image files are allowed ({0})")]
    NotAnImage(String),
    #[error("file is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("failed to process image: {0}")]
    Processing(String),
    #[error("failed to read or write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A file handed over by the player, before any processing.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let metadata = fs::metadata(path).map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // checked before reading so huge files never land in memory
        if metadata.len() as usize > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: metadata.len() as usize,
                limit: MAX_UPLOAD_BYTES,
            });
        }
        let bytes = fs::read(path).map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let original_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            original_name,
            content_type: content_type_for(path),
            bytes,
        })
    }
}

/// Declared type of a file from its extension. Files without an extension
/// declare nothing and are judged by their contents alone.
fn content_type_for(path: &Path) -> Option<String> {
    let extension = path.extension()?;
    let content_type = ImageFormat::from_extension(extension)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    Some(content_type.to_string())
}

/// Rejects uploads that are empty, oversized, declared as something other
/// than an image, or not in a format we can decode.
pub fn validate_upload(upload: &ImageUpload) -> Result<ImageFormat, UploadError> {
    if upload.bytes.is_empty() {
        return Err(UploadError::MissingFile);
    }
    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size: upload.bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    if let Some(content_type) = &upload.content_type {
        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(content_type.clone()));
        }
    }
    image::guess_format(&upload.bytes)
        .map_err(|_| UploadError::NotAnImage(upload.original_name.clone()))
}

/// Center-crops to a square, scales to [`PROCESSED_SIZE`] and re-encodes as JPEG.
pub fn process_to_square(bytes: &[u8]) -> Result<Vec<u8>, UploadError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| UploadError::Processing(err.to_string()))?;
    let square = decoded
        .resize_to_fill(PROCESSED_SIZE, PROCESSED_SIZE, FilterType::Lanczos3)
        .to_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&square)
        .map_err(|err| UploadError::Processing(err.to_string()))?;
    Ok(encoded)
}

/// `<unix millis>-<7 random chars>.jpg`; the processed file is always JPEG.
pub fn generate_file_name<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..7)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect();
    format!("{}-{}.jpg", now.timestamp_millis(), suffix)
}
