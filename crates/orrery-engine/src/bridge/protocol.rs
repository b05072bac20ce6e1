/// Frame buffer layout shared with the host renderer.
/// Must stay in sync with the host's protocol reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 20 floats]
/// [Camera: 20 floats]
/// [Instances: max_instances × 24 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.
/// Geometry tessellations are not part of the frame buffer; they are
/// uploaded once after init.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_SPLIT: usize = 4;
pub const HEADER_SURFACE_WIDTH: usize = 5;
pub const HEADER_SURFACE_HEIGHT: usize = 6;
pub const HEADER_PIXEL_RATIO: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;
pub const HEADER_CLEAR_R: usize = 13;
pub const HEADER_CLEAR_G: usize = 14;
pub const HEADER_CLEAR_B: usize = 15;
pub const HEADER_AMBIENT_R: usize = 16;
pub const HEADER_AMBIENT_G: usize = 17;
pub const HEADER_AMBIENT_B: usize = 18;
pub const HEADER_ANTIALIAS: usize = 19;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section: view-projection (16) + position (4).
pub const CAMERA_FLOATS: usize = 20;

/// Floats per mesh instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 24;

/// Floats per point light: x, y, z, r, g, b, intensity, distance.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

pub const DEFAULT_MAX_LIGHTS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the camera section begins.
    pub camera_data_offset: usize,
    pub instance_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_data_offset = HEADER_FLOATS;
        let instance_data_offset = camera_data_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_lights,
            max_events,
            instance_data_floats,
            light_data_floats,
            event_data_floats,
            camera_data_offset,
            instance_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_lights, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::instance::MeshInstance;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.instance_data_floats, config.max_instances * 24);
        assert_eq!(layout.light_data_floats, config.max_lights * 8);
        assert_eq!(layout.event_data_floats, config.max_events * 4);
        assert_eq!(layout.camera_data_offset, 20);
        assert_eq!(layout.instance_data_offset, 40);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 4, 20);

        assert_eq!(layout.instance_data_offset, layout.camera_data_offset + CAMERA_FLOATS);
        assert_eq!(layout.light_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn wire_sizes_match_structs() {
        assert_eq!(INSTANCE_FLOATS, MeshInstance::FLOATS);
        assert_eq!(CAMERA_FLOATS, CameraUniform::FLOATS);
    }
}
