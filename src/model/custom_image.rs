use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomImage {
    pub file_name: String,
    pub original_name: String,
    pub processed_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomImageRecord {
    pub id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub processed_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl CustomImageRecord {
    pub fn from_new(image: NewCustomImage, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: image.file_name,
            original_name: image.original_name,
            processed_path: image.processed_path,
            uploaded_at,
        }
    }
}
