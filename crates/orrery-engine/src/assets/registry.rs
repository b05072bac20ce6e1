use std::collections::HashMap;
use serde::Serialize;
use crate::assets::manifest::AssetManifest;
use crate::error::EngineError;

/// Opaque handle to a texture slot. Doubles as the host-side texture index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextureHandle(pub u32);

/// Load state of a texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    /// Requested, not yet resolved by the host.
    Pending,
    Ready,
    /// The host could not load the image. The surface stays untextured.
    Failed,
}

/// Fire-and-forget texture loading.
///
/// `load_texture` returns immediately; the handle can be attached to a
/// material before the image arrives.
pub trait AssetLoader {
    fn load_texture(&mut self, id: &str) -> Result<TextureHandle, EngineError>;
}

/// One pending load, serialized for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureRequest {
    pub handle: TextureHandle,
    pub id: String,
    pub path: String,
}

#[derive(Debug, Clone)]
struct TextureSlot {
    id: String,
    state: TextureState,
}

/// Texture slots built from an AssetManifest.
pub struct TextureRegistry {
    manifest: AssetManifest,
    slots: Vec<TextureSlot>,
    by_id: HashMap<String, TextureHandle>,
    /// Requests not yet handed to the host.
    outbox: Vec<TextureRequest>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::from_manifest(AssetManifest::default())
    }

    pub fn from_manifest(manifest: AssetManifest) -> Self {
        Self {
            manifest,
            slots: Vec::new(),
            by_id: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Replace the manifest. Existing slots keep their handles.
    pub fn set_manifest(&mut self, manifest: AssetManifest) {
        self.manifest = manifest;
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn state(&self, handle: TextureHandle) -> Option<TextureState> {
        self.slots.get(handle.0 as usize).map(|s| s.state)
    }

    pub fn is_ready(&self, handle: TextureHandle) -> bool {
        self.state(handle) == Some(TextureState::Ready)
    }

    pub fn handle(&self, id: &str) -> Option<TextureHandle> {
        self.by_id.get(id).copied()
    }

    /// Record the host's load result. Unknown handles are ignored.
    pub fn resolve(&mut self, handle: TextureHandle, ok: bool) {
        let Some(slot) = self.slots.get_mut(handle.0 as usize) else {
            log::warn!("texture result for unknown handle {}", handle.0);
            return;
        };
        slot.state = if ok {
            log::debug!("texture '{}' ready", slot.id);
            TextureState::Ready
        } else {
            log::warn!("texture '{}' failed to load; rendering untextured", slot.id);
            TextureState::Failed
        };
    }

    /// Drain requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<TextureRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Drain pending requests as a JSON array for the host.
    pub fn requests_json(&mut self) -> String {
        let requests = self.take_requests();
        serde_json::to_string(&requests).unwrap_or_else(|_| "[]".to_string())
    }

    /// (pending, ready, failed) slot counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.slots.iter().fold((0, 0, 0), |(p, r, f), s| match s.state {
            TextureState::Pending => (p + 1, r, f),
            TextureState::Ready => (p, r + 1, f),
            TextureState::Failed => (p, r, f + 1),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl AssetLoader for TextureRegistry {
    /// Repeated ids share one slot and one request.
    fn load_texture(&mut self, id: &str) -> Result<TextureHandle, EngineError> {
        if let Some(handle) = self.by_id.get(id) {
            return Ok(*handle);
        }
        let path = self
            .manifest
            .path(id)
            .ok_or_else(|| EngineError::UnknownTexture(id.to_string()))?
            .to_string();

        let handle = TextureHandle(self.slots.len() as u32);
        self.slots.push(TextureSlot {
            id: id.to_string(),
            state: TextureState::Pending,
        });
        self.by_id.insert(id.to_string(), handle);
        self.outbox.push(TextureRequest {
            handle,
            id: id.to_string(),
            path,
        });
        Ok(handle)
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
