use crate::model::PresetImage;

const UNSPLASH_PARAMS: &str = "ixlib=rb-4.0.3&auto=format&fit=crop";

// (id, name, unsplash photo id)
const PRESETS: [(&str, &str, &str); 4] = [
    ("landscape", "Mountain Lake", "photo-1506905925346-21bda4d32df4"),
    ("cityscape", "City Skyline", "photo-1449824913935-59a10b8d2000"),
    ("ocean", "Tropical Beach", "photo-1559827260-dc66d52bef19"),
    ("forest", "Pine Forest", "photo-1542273917363-3b1817f69a2d"),
];

/// Names recorded in the game history; existing history stores only ever
/// distinguish presets from uploads.
pub const PRESET_IMAGE_NAME: &str = "Preset Image";
pub const CUSTOM_IMAGE_NAME: &str = "Custom Image";

fn unsplash_url(photo: &str, size: u32) -> String {
    format!(
        "https://images.unsplash.com/{}?{}&w={}&h={}",
        photo, UNSPLASH_PARAMS, size, size
    )
}

pub fn preset_images() -> Vec<PresetImage> {
    PRESETS
        .iter()
        .map(|(id, name, photo)| PresetImage {
            id: id.to_string(),
            name: name.to_string(),
            url: unsplash_url(photo, 400),
            thumbnail: unsplash_url(photo, 200),
        })
        .collect()
}

/// Image a fresh session starts with.
pub fn default_image_url() -> String {
    unsplash_url(PRESETS[0].2, 400)
}

pub fn find_preset(id: &str) -> Option<PresetImage> {
    preset_images().into_iter().find(|preset| preset.id == id)
}

fn is_preset_url(url: &str) -> bool {
    preset_images().iter().any(|preset| preset.url == url)
}

/// Name stored in the game history for the image at `url`.
pub fn history_image_name(url: &str) -> &'static str {
    if is_preset_url(url) {
        PRESET_IMAGE_NAME
    } else {
        CUSTOM_IMAGE_NAME
    }
}

/// Name shown to the player for the image at `url`.
pub fn image_name_for(url: &str) -> String {
    preset_images()
        .into_iter()
        .find(|preset| preset.url == url)
        .map(|preset| preset.name)
        .unwrap_or_else(|| CUSTOM_IMAGE_NAME.to_string())
}
