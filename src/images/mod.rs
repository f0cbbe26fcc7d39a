pub mod catalog;
mod library;
pub mod upload;

pub use catalog::{
    default_image_url, find_preset, history_image_name, image_name_for, preset_images,
};
pub use library::{ImageLibrary, UPLOADS_URL_PREFIX};
pub use upload::{ImageUpload, UploadError};
