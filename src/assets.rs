use rust_embed::Embed;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

#[derive(Embed)]
#[folder = "assets/"]
struct BundledAssets;

pub const INSCRIPT_MAP: &str = "inscript-ml.json";
pub const LETTERS: &str = "letters.json";
pub const COMMON_WORDS: &str = "common-words.json";
pub const COURSE: &str = "course.json";

/// Decode one of the JSON files compiled into the binary.
pub fn load_json<T: DeserializeOwned>(name: &str) -> Result<T> {
    let file = BundledAssets::get(name).ok_or_else(|| Error::MissingAsset(name.to_string()))?;
    serde_json::from_slice(file.data.as_ref()).map_err(|e| Error::json(name, e))
}
