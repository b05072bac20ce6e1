use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshInstance {
    /// World matrix, column-major.
    pub model: [f32; 16],
    /// Material color RGB plus opacity.
    pub color: [f32; 4],
    /// Texture slot, or -1.0 while the texture is pending or failed.
    pub texture: f32,
    /// Geometry id into the uploaded geometry table.
    pub geometry: f32,
    /// Shading model in the low byte, material flag bits above it.
    pub flags: f32,
    /// Point sprite size (0 for solid meshes).
    pub point_size: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_TEXTURE: f32 = -1.0;
}

impl Default for MeshInstance {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array(),
            color: [1.0; 4],
            texture: Self::NO_TEXTURE,
            geometry: 0.0,
            flags: 0.0,
            point_size: 0.0,
        }
    }
}

/// Render buffer holding this frame's instances.
pub struct RenderBuffer {
    /// Opaque instances first, then transparent/additive from `transparent_split`.
    pub instances: Vec<MeshInstance>,
    pub transparent_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            transparent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
