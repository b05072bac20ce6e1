pub mod runner;
pub mod scheduler;

pub use runner::GameRunner;
pub use scheduler::{FrameScheduler, HostScheduler, ManualScheduler};

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner and its host scheduler
/// - `with_runner()` helper returning `EngineError::NotInitialized` before init
/// - wasm-bindgen exports for init, frames, input, textures and buffer accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_game!(MyScene, "my-scene");
/// ```
///
/// The game type must provide `fn new() -> Self`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static SCHEDULER: RefCell<$crate::HostScheduler> = RefCell::new($crate::HostScheduler::new());
        }

        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R,
        ) -> Result<R, EngineError> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().ok_or(EngineError::NotInitialized)?;
                Ok(f(runner))
            })
        }

        fn to_js(err: EngineError) -> JsValue {
            JsValue::from_str(&err.to_string())
        }

        /// Build the scene for a `width` x `height` viewport. `manifest_json`
        /// overrides the game's default texture manifest; `config_json` is
        /// passed to `Game::configure`.
        #[wasm_bindgen]
        pub fn game_init(
            width: f32,
            height: f32,
            pixel_ratio: f32,
            manifest_json: Option<String>,
            config_json: Option<String>,
        ) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            runner.set_viewport(width, height, pixel_ratio);
            if let Some(json) = manifest_json.as_deref() {
                runner.load_manifest(json).map_err(to_js)?;
            }
            if let Some(json) = config_json.as_deref() {
                runner.configure(json).map_err(to_js)?;
            }
            runner.init().map_err(|err| {
                log::error!("{}: init failed: {}", $game_name, err);
                to_js(err)
            })?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        /// Run one display frame. Returns whether the host should request another.
        #[wasm_bindgen]
        pub fn game_frame(_dt: f32) -> bool {
            SCHEDULER.with(|s| {
                let mut scheduler = s.borrow_mut();
                let _ = with_runner(|r| r.frame(&mut *scheduler));
                scheduler.take_request()
            })
        }

        #[wasm_bindgen]
        pub fn game_stop() {
            let _ = with_runner(|r| r.stop());
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            let _ = with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_touch_move(x: f32, y: f32) {
            let _ = with_runner(|r| r.push_input(InputEvent::TouchMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32, pixel_ratio: f32) {
            let _ = with_runner(|r| r.push_input(InputEvent::Resize { width, height, pixel_ratio }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            let _ = with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Textures ----

        /// Pending texture loads as JSON `[{ handle, id, path }]`.
        #[wasm_bindgen]
        pub fn game_texture_requests() -> String {
            with_runner(|r| r.texture_requests_json()).unwrap_or_else(|_| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(handle: u32, ok: bool) {
            let _ = with_runner(|r| r.resolve_texture(handle, ok));
        }

        // ---- Frame data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_transparent_split() -> u32 {
            with_runner(|r| r.transparent_split()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_surface_width() -> f32 {
            with_runner(|r| r.surface_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_surface_height() -> f32 {
            with_runner(|r| r.surface_height()).unwrap_or(0.0)
        }

        // ---- Geometry (uploaded once after init) ----

        #[wasm_bindgen]
        pub fn get_geometry_vertices_ptr() -> *const f32 {
            with_runner(|r| r.geometry_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertices_len() -> u32 {
            with_runner(|r| r.geometry_vertices_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_ptr() -> *const u32 {
            with_runner(|r| r.geometry_indices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_len() -> u32 {
            with_runner(|r| r.geometry_indices_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_geometry_ranges_ptr() -> *const u32 {
            with_runner(|r| r.geometry_ranges_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_geometry_count() -> u32 {
            with_runner(|r| r.geometry_count()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
