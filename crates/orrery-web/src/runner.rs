use orrery_engine::{
    Game, GameConfig, EngineContext, EngineError,
    InputEvent, InputQueue, RenderBuffer, AssetManifest,
    CameraUniform, FrameData, GeometryBuffer, ProtocolLayout,
    Renderer, Surface, TextureHandle,
};
use orrery_engine::bridge::protocol::*;
use orrery_engine::systems::render::build_render_buffer;
use crate::scheduler::FrameScheduler;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    geometry: GeometryBuffer,
    camera: CameraUniform,
    header: [f32; HEADER_FLOATS],
    config: GameConfig,
    layout: ProtocolLayout,
    /// Host viewport `(width, height, pixel_ratio)` given before init.
    viewport: Option<(f32, f32, f32)>,
    frame_count: u64,
    initialized: bool,
    stopped: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        // The real surface is validated in init.
        let ctx = EngineContext::with_surface(&config, Surface::default());
        let camera = ctx.camera.uniform();

        Self {
            ctx,
            game,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            geometry: GeometryBuffer::default(),
            camera,
            header: [0.0; HEADER_FLOATS],
            layout,
            config,
            viewport: None,
            frame_count: 0,
            initialized: false,
            stopped: false,
        }
    }

    /// Pass game-specific JSON configuration through to the game.
    /// Has no effect once the scene is built.
    pub fn configure(&mut self, json: &str) -> Result<(), EngineError> {
        if self.initialized {
            log::warn!("configure called after init; ignored");
            return Ok(());
        }
        self.game.configure(json)
    }

    /// Replace the texture manifest. Must precede `init` to affect the scene.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), EngineError> {
        let manifest = AssetManifest::from_json(json)?;
        log::debug!("manifest: {} textures", manifest.textures.len());
        self.ctx.textures.set_manifest(manifest);
        Ok(())
    }

    /// Set the viewport the scene starts with, overriding the game's
    /// configured surface size. Must precede `init`.
    pub fn set_viewport(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.viewport = Some((width, height, pixel_ratio));
    }

    /// Build the scene. Call once after construction.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);

        let (width, height, pixel_ratio) = self.viewport.unwrap_or((
            self.config.surface_width,
            self.config.surface_height,
            self.config.pixel_ratio,
        ));
        self.ctx.resize(width, height, pixel_ratio)?;

        self.game.init(&mut self.ctx)?;

        self.geometry = GeometryBuffer::build(&self.ctx.geometries);
        self.initialized = true;
        self.render();

        log::info!(
            "scene built: {} entities, {} meshes, {} geometries, {} textures requested",
            self.ctx.scene.len(),
            self.ctx.scene.visible_count(),
            self.ctx.geometries.len(),
            self.ctx.textures.len()
        );
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one tick: apply resizes, update the game, render.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height, pixel_ratio } = *event {
                if let Err(err) = self.ctx.resize(width, height, pixel_ratio) {
                    log::warn!("ignoring resize: {err}");
                }
            }
        }

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.frame_count += 1;
        self.render();
    }

    /// Run one display frame and request the next unless stopped.
    /// Returns whether another frame was requested.
    pub fn frame(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.stopped {
            return false;
        }
        self.tick();
        if self.stopped {
            return false;
        }
        scheduler.request_frame();
        true
    }

    /// Stop requesting frames. The scene stays readable.
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("stopped after {} frames", self.frame_count);
        }
        self.stopped = true;
    }

    /// Propagate transforms and refresh every output buffer.
    fn render(&mut self) {
        self.ctx.graph.propagate(&mut self.ctx.scene);
        build_render_buffer(self.ctx.scene.iter(), &self.ctx.textures, &mut self.render_buffer);

        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!(
                "{} instances exceed capacity {}; truncating",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
            self.render_buffer.instances.truncate(self.layout.max_instances);
            let split = self.render_buffer.transparent_split.min(self.layout.max_instances as u32);
            self.render_buffer.set_transparent_split(split);
        }
        self.ctx.events.truncate(self.layout.max_events);

        self.camera = self.ctx.camera.uniform();
        self.write_header();
    }

    fn write_header(&mut self) {
        let surface = self.ctx.surface;
        let clear = self.config.clear_color;
        let ambient = self.ctx.lights.ambient();
        let h = &mut self.header;

        h[HEADER_LOCK] = 0.0;
        h[HEADER_FRAME_COUNTER] = self.frame_count as f32;
        h[HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        h[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        h[HEADER_TRANSPARENT_SPLIT] = self.render_buffer.transparent_split as f32;
        h[HEADER_SURFACE_WIDTH] = surface.width;
        h[HEADER_SURFACE_HEIGHT] = surface.height;
        h[HEADER_PIXEL_RATIO] = surface.pixel_ratio;
        h[HEADER_MAX_LIGHTS] = self.layout.max_lights as f32;
        h[HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_CLEAR_R] = clear.r;
        h[HEADER_CLEAR_G] = clear.g;
        h[HEADER_CLEAR_B] = clear.b;
        h[HEADER_AMBIENT_R] = ambient.r;
        h[HEADER_AMBIENT_G] = ambient.g;
        h[HEADER_AMBIENT_B] = ambient.b;
        h[HEADER_ANTIALIAS] = if self.config.antialias { 1.0 } else { 0.0 };
    }

    /// Hand the current frame to a Rust-side renderer.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) {
        let light_count = self.ctx.lights.count().min(self.layout.max_lights);
        renderer.draw(&FrameData {
            instances: &self.render_buffer.instances,
            transparent_split: self.render_buffer.transparent_split,
            camera: self.camera,
            ambient: self.ctx.lights.ambient(),
            lights: &self.ctx.lights.as_slice()[..light_count],
            clear_color: self.config.clear_color,
            surface: self.ctx.surface,
        });
    }

    // ---- Texture loading ----

    /// Pending texture requests as a JSON array of `{handle, id, path}`.
    pub fn texture_requests_json(&mut self) -> String {
        self.ctx.textures.requests_json()
    }

    pub fn resolve_texture(&mut self, handle: u32, ok: bool) {
        self.ctx.textures.resolve(TextureHandle(handle), ok);
    }

    // ---- State accessors ----

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn transparent_split(&self) -> u32 {
        self.render_buffer.transparent_split
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn geometry_vertices_ptr(&self) -> *const f32 {
        self.geometry.vertices_ptr()
    }

    /// Vertex data length in floats.
    pub fn geometry_vertices_len(&self) -> u32 {
        self.geometry.vertices_len() as u32
    }

    pub fn geometry_indices_ptr(&self) -> *const u32 {
        self.geometry.indices_ptr()
    }

    pub fn geometry_indices_len(&self) -> u32 {
        self.geometry.indices.len() as u32
    }

    pub fn geometry_ranges_ptr(&self) -> *const u32 {
        self.geometry.ranges_ptr()
    }

    pub fn geometry_count(&self) -> u32 {
        self.geometry.ranges.len() as u32
    }

    pub fn surface_width(&self) -> f32 {
        self.ctx.surface.width
    }

    pub fn surface_height(&self) -> f32 {
        self.ctx.surface.height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{HostScheduler, ManualScheduler};
    use orrery_engine::{
        Entity, Geometry, GameEvent, LocalTransform, Material, MeshComponent, BlendMode, Color,
        PointLight, MeshInstance,
    };
    use glam::Vec3;

    /// One opaque sphere spinning on Y, one additive sprite cloud, one pivot.
    struct Spinner {
        sphere: Option<orrery_engine::EntityId>,
        fail_init: bool,
    }

    impl Spinner {
        fn new() -> Self {
            Self { sphere: None, fail_init: false }
        }
    }

    impl Game for Spinner {
        fn config(&self) -> GameConfig {
            GameConfig { max_instances: 8, max_events: 2, ..Default::default() }
        }

        fn configure(&mut self, json: &str) -> Result<(), EngineError> {
            let value: serde_json::Value = serde_json::from_str(json).map_err(EngineError::Config)?;
            self.fail_init = value["fail"].as_bool().unwrap_or(false);
            Ok(())
        }

        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
            if self.fail_init {
                return Err(EngineError::InvalidConfig("asked to fail".into()));
            }
            let texture = ctx.load_texture("sun")?;
            let geometry = ctx.add_geometry(Geometry::sphere(10.0, 8, 6));
            let cloud = ctx.add_geometry(Geometry::Points { positions: vec![Vec3::X; 4] });

            let pivot = ctx.next_id();
            ctx.spawn_node(Entity::new(pivot), LocalTransform::new(), None);

            let sphere = ctx.next_id();
            ctx.spawn_node(
                Entity::new(sphere).with_mesh(MeshComponent::new(geometry, Material::lambert(texture))),
                LocalTransform::new().translated_x(100.0),
                Some(pivot),
            );
            self.sphere = Some(sphere);

            let points = ctx.next_id();
            ctx.spawn_node(
                Entity::new(points).with_mesh(MeshComponent::new(
                    cloud,
                    Material::points(5.0, Color::WHITE).with_blend(BlendMode::Additive),
                )),
                LocalTransform::new(),
                None,
            );
            ctx.lights.add(PointLight::new(Vec3::ONE, Color::WHITE, 1.0, 0.0));
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue) {
            if let Some(id) = self.sphere {
                if let Some(local) = ctx.local_mut(id) {
                    local.rotate_y(0.01);
                }
            }
            for kind in 0..3 {
                ctx.emit_event(GameEvent { kind: kind as f32, a: 0.0, b: 0.0, c: 0.0 });
            }
        }
    }

    fn runner() -> GameRunner<Spinner> {
        let mut runner = GameRunner::new(Spinner::new());
        runner.load_manifest(r#"{ "textures": { "sun": "sun.jpg" } }"#).unwrap();
        runner
    }

    struct Recording {
        frames: usize,
        last_instances: usize,
        last_split: u32,
        last_width: f32,
    }

    impl Renderer for Recording {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn draw(&mut self, frame: &FrameData) {
            self.frames += 1;
            self.last_instances = frame.instances.len();
            self.last_split = frame.transparent_split;
            self.last_width = frame.surface.width;
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut r = runner();
        r.tick();
        assert_eq!(r.frame_count(), 0);
        assert_eq!(r.instance_count(), 0);
    }

    #[test]
    fn init_builds_buffers_and_header() {
        let mut r = runner();
        r.init().unwrap();
        assert!(r.is_initialized());
        assert_eq!(r.instance_count(), 2);
        assert_eq!(r.transparent_split(), 1);
        assert_eq!(r.geometry_count(), 2);
        assert_eq!(r.geometry().ranges[1].index_count, 0);
        assert_eq!(r.header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(r.header[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(r.header[HEADER_ANTIALIAS], 1.0);

        let instance = r.render_buffer().instances[0];
        assert!((instance.model[12] - 100.0).abs() < 1e-3);
        assert_eq!(instance.texture, MeshInstance::NO_TEXTURE);
    }

    #[test]
    fn init_errors_propagate() {
        let mut r = GameRunner::new(Spinner::new());
        let err = r.init().unwrap_err();
        assert!(matches!(err, EngineError::UnknownTexture(_)));
        assert!(!r.is_initialized());

        let mut r = runner();
        r.configure(r#"{ "fail": true }"#).unwrap();
        assert!(matches!(r.init(), Err(EngineError::InvalidConfig(_))));

        let mut r = runner();
        assert!(matches!(r.configure("not json"), Err(EngineError::Config(_))));
        assert!(matches!(r.load_manifest("{"), Err(EngineError::Manifest(_))));
    }

    struct Unsized;

    impl Game for Unsized {
        fn config(&self) -> GameConfig {
            GameConfig { surface_width: 0.0, surface_height: -5.0, ..Default::default() }
        }

        fn init(&mut self, _ctx: &mut EngineContext) -> Result<(), EngineError> {
            Ok(())
        }

        fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue) {}
    }

    #[test]
    fn unusable_surface_fails_init() {
        let mut r = GameRunner::new(Unsized);
        let err = r.init().unwrap_err();
        assert!(matches!(err, EngineError::InvalidSurface { .. }));
        assert!(!r.is_initialized());

        let mut r = runner();
        r.set_viewport(f32::NAN, 720.0, 1.0);
        assert!(matches!(r.init(), Err(EngineError::InvalidSurface { .. })));
    }

    #[test]
    fn host_viewport_applies_before_scene_build() {
        let mut r = GameRunner::new(Unsized);
        r.set_viewport(1280.0, 720.0, 2.0);
        r.init().unwrap();
        assert_eq!(r.surface_width(), 1280.0);
        assert_eq!(r.surface_height(), 720.0);
        assert!((r.context().camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!(r.header[HEADER_PIXEL_RATIO], 2.0);
    }

    #[test]
    fn manual_scheduler_drives_exact_frame_count() {
        let mut r = runner();
        r.init().unwrap();
        let mut scheduler = ManualScheduler::new(25);
        assert_eq!(scheduler.run(&mut r), 25);
        assert_eq!(r.frame_count(), 25);
        assert_eq!(scheduler.requests(), 25);
        assert_eq!(r.header[HEADER_FRAME_COUNTER], 25.0);
    }

    #[test]
    fn stop_halts_frame_requests() {
        let mut r = runner();
        r.init().unwrap();
        let mut host = HostScheduler::new();
        assert!(r.frame(&mut host));
        assert!(host.take_request());

        r.stop();
        assert!(!r.frame(&mut host));
        assert!(!host.take_request());
        assert_eq!(r.frame_count(), 1);
        assert!(r.is_stopped());
    }

    #[test]
    fn resize_events_apply_before_update() {
        let mut r = runner();
        r.init().unwrap();
        r.push_input(InputEvent::Resize { width: 1600.0, height: 800.0, pixel_ratio: 2.0 });
        r.tick();
        assert_eq!(r.surface_width(), 1600.0);
        assert!((r.context().camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(r.header[HEADER_PIXEL_RATIO], 2.0);

        r.push_input(InputEvent::Resize { width: 0.0, height: 800.0, pixel_ratio: 1.0 });
        r.tick();
        assert_eq!(r.surface_width(), 1600.0);
    }

    #[test]
    fn events_are_capped_per_frame() {
        let mut r = runner();
        r.init().unwrap();
        r.tick();
        assert_eq!(r.game_events_len(), 2);
        r.tick();
        assert_eq!(r.game_events_len(), 2);
    }

    #[test]
    fn texture_round_trip_through_runner() {
        let mut r = runner();
        r.init().unwrap();
        let requests: serde_json::Value = serde_json::from_str(&r.texture_requests_json()).unwrap();
        let handle = requests[0]["handle"].as_u64().unwrap() as u32;
        r.resolve_texture(handle, true);
        r.tick();
        assert_eq!(r.render_buffer().instances[0].texture, handle as f32);
    }

    #[test]
    fn render_with_hands_over_frame() {
        let mut r = runner();
        r.init().unwrap();
        let mut renderer = Recording { frames: 0, last_instances: 0, last_split: 0, last_width: 0.0 };
        r.render_with(&mut renderer);
        assert_eq!(renderer.backend(), "recording");
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.last_instances, 2);
        assert_eq!(renderer.last_split, 1);
        assert_eq!(renderer.last_width, 800.0);

        r.push_input(InputEvent::Resize { width: 1280.0, height: 720.0, pixel_ratio: 1.0 });
        r.tick();
        r.render_with(&mut renderer);
        assert_eq!(renderer.last_width, 1280.0);
    }
}
