use glam::Vec3;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::{AssetLoader, TextureHandle, TextureRegistry};
use crate::components::entity::Entity;
use crate::components::material::Color;
use crate::components::mesh::{Geometry, GeometryId, GeometryStore};
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::surface::Surface;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum number of mesh instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Initial viewport size in CSS pixels, replaced by the first resize.
    pub surface_width: f32,
    pub surface_height: f32,
    pub pixel_ratio: f32,
    pub clear_color: Color,
    /// Hint for the host when creating its render context.
    pub antialias: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_instances: 64,
            max_lights: crate::bridge::protocol::DEFAULT_MAX_LIGHTS,
            max_events: 32,
            surface_width: 800.0,
            surface_height: 600.0,
            pixel_ratio: 1.0,
            clear_color: Color::BLACK,
            antialias: true,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply game-specific JSON configuration. Called before init.
    fn configure(&mut self, _json: &str) -> Result<(), EngineError> {
        Ok(())
    }

    /// Build the scene. Errors abort initialization.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// One display-frame tick.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub geometries: GeometryStore,
    pub camera: PerspectiveCamera,
    pub surface: Surface,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_surface(&GameConfig::default(), Surface::default())
    }

    /// Context sized by `config`. Fails on an unusable surface size.
    pub fn with_config(config: &GameConfig) -> Result<Self, EngineError> {
        let surface = Surface::new(config.surface_width, config.surface_height, config.pixel_ratio)?;
        Ok(Self::with_surface(config, surface))
    }

    /// Context with `config`'s capacities and an already validated surface.
    pub fn with_surface(config: &GameConfig, surface: Surface) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(surface.width, surface.height);
        Self {
            scene: Scene::with_capacity(config.max_instances),
            graph: TransformGraph::new(),
            geometries: GeometryStore::new(),
            camera,
            surface,
            lights: LightState::with_capacity(config.max_lights),
            textures: TextureRegistry::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity into the scene and the transform hierarchy.
    pub fn spawn_node(
        &mut self,
        entity: Entity,
        local: LocalTransform,
        parent: Option<EntityId>,
    ) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        self.graph.register_with(id, local);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.add(geometry)
    }

    pub fn load_texture(&mut self, id: &str) -> Result<TextureHandle, EngineError> {
        self.textures.load_texture(id)
    }

    pub fn local_mut(&mut self, id: EntityId) -> Option<&mut LocalTransform> {
        self.graph.get_local_mut(id)
    }

    /// Current world position, computed from the hierarchy without
    /// waiting for the next propagate.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.graph.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    /// Apply a viewport change to the surface and the camera projection.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) -> Result<(), EngineError> {
        self.surface.resize(width, height, pixel_ratio)?;
        self.camera.set_aspect(self.surface.width, self.surface.height);
        log::info!(
            "resized to {}x{} @{}x (aspect {:.3})",
            width,
            height,
            self.surface.pixel_ratio,
            self.camera.aspect
        );
        Ok(())
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn spawn_node_links_parent() {
        let mut ctx = EngineContext::new();
        let pivot = ctx.next_id();
        let body = ctx.next_id();
        ctx.spawn_node(Entity::new(pivot), LocalTransform::new(), None);
        ctx.spawn_node(Entity::new(body), LocalTransform::new().translated_x(-600.0), Some(pivot));

        assert_eq!(ctx.graph.get_parent(body), Some(pivot));
        assert_eq!(ctx.scene.len(), 2);
        let pos = ctx.world_position(body).unwrap();
        assert!((pos.x + 600.0).abs() < 1e-3);
    }

    #[test]
    fn resize_updates_surface_and_aspect() {
        let mut ctx = EngineContext::new();
        ctx.resize(1024.0, 512.0, 2.0).unwrap();
        assert_eq!(ctx.surface.width, 1024.0);
        assert_eq!(ctx.surface.pixel_ratio, 2.0);
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_resize_keeps_previous_projection() {
        let mut ctx = EngineContext::new();
        let before = ctx.camera.aspect;
        assert!(ctx.resize(0.0, 0.0, 1.0).is_err());
        assert_eq!(ctx.camera.aspect, before);
    }

    #[test]
    fn with_config_rejects_unusable_surface() {
        let config = GameConfig { surface_width: 0.0, surface_height: -5.0, ..GameConfig::default() };
        let err = EngineContext::with_config(&config).err();
        assert!(matches!(err, Some(EngineError::InvalidSurface { .. })));

        let config = GameConfig { surface_width: 1920.0, surface_height: 1080.0, ..GameConfig::default() };
        let ctx = EngineContext::with_config(&config).unwrap();
        assert_eq!(ctx.surface.width, 1920.0);
        assert!((ctx.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent { kind: 1.0, a: 0.0, b: 0.0, c: 0.0 });
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
