use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::error::EngineError;

/// Asset manifest mapping texture ids to image paths.
/// Loaded from JSON at runtime; the host resolves paths relative to its own base URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture id → relative image path (e.g. "sun" → "assets/2k_sun.jpg").
    #[serde(default)]
    pub textures: HashMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Manifest)
    }

    pub fn path(&self, id: &str) -> Option<&str> {
        self.textures.get(id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
