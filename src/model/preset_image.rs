use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PresetImage {
    pub id: String,
    pub name: String,
    pub url: String,
    pub thumbnail: String,
}
