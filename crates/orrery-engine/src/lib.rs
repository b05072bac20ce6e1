pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::material::{Material, Color, Side, BlendMode, Shading};
pub use components::mesh::{Geometry, GeometryId, GeometryStore, MeshComponent};
pub use core::scene::Scene;
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, CameraRig, CameraEasing, CameraUniform};
pub use renderer::surface::Surface;
pub use renderer::{Renderer, FrameData};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetLoader, TextureHandle, TextureRegistry, TextureState};
pub use bridge::protocol::ProtocolLayout;
pub use systems::geometry::{GeometryBuffer, GeometryRange, Vertex};
pub use systems::lighting::{PointLight, LightState};
pub use systems::rng::Rng;
pub use error::EngineError;

// Extensions: decoupled optional systems
pub use extensions::{damp, damped_after, lerp, LocalTransform, TransformGraph};
