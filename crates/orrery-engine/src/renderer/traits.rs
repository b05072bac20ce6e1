//! Renderer trait for native GPU backends.
//!
//! In the browser all drawing happens on the host side, which reads the
//! frame buffers directly. This trait is the same contract for Rust-side
//! consumers: a native backend, or a recording renderer in tests.

use super::camera::CameraUniform;
use super::instance::MeshInstance;
use super::surface::Surface;
use crate::components::material::Color;
use crate::systems::lighting::PointLight;

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Opaque instances first, then translucent ones from `transparent_split`.
    pub instances: &'a [MeshInstance],
    pub transparent_split: u32,
    pub camera: CameraUniform,
    pub ambient: Color,
    pub lights: &'a [PointLight],
    pub clear_color: Color,
    pub surface: Surface,
}

impl FrameData<'_> {
    pub fn opaque(&self) -> &[MeshInstance] {
        &self.instances[..self.transparent_split as usize]
    }

    pub fn translucent(&self) -> &[MeshInstance] {
        &self.instances[self.transparent_split as usize..]
    }
}

/// Renderer trait for GPU backends.
///
/// ```ignore
/// struct WgpuRenderer { /* device, queue, pipelines */ }
///
/// impl Renderer for WgpuRenderer {
///     fn backend(&self) -> &'static str { "wgpu" }
///     fn draw(&mut self, frame: &FrameData) { /* encode passes */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g. "webgpu", "wgpu", "recording").
    fn backend(&self) -> &'static str;

    /// Draw one complete frame. `frame.surface` carries the current viewport.
    fn draw(&mut self, frame: &FrameData);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    #[test]
    fn frame_splits_opaque_and_translucent() {
        let instances = [MeshInstance::default(); 3];
        let frame = FrameData {
            instances: &instances,
            transparent_split: 2,
            camera: CameraUniform::zeroed(),
            ambient: Color::WHITE,
            lights: &[],
            clear_color: Color::BLACK,
            surface: Surface::default(),
        };
        assert_eq!(frame.opaque().len(), 2);
        assert_eq!(frame.translucent().len(), 1);
    }
}
