/// Solar system: a textured sun, eight planets on circular orbits, a few
/// moons/rings, an asteroid belt and a pointer-steered camera.
///
/// Every frame advances by fixed angles; there is no simulated clock.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{self, SpinAxis};
use crate::builder::build_scene;
use crate::config::SceneConfig;
use crate::registry::BodyRegistry;

const DEFAULT_MANIFEST: &str = include_str!("../assets/manifest.json");

// ── Custom event kinds from the page ─────────────────────────────────

/// Ease the camera back to the center.
pub const CUSTOM_RESET_VIEW: u32 = 1;

// ── Game event kinds to the page ─────────────────────────────────────

/// Texture progress: a = pending, b = ready, c = failed.
pub const EVENT_TEXTURES: f32 = 1.0;

/// Camera target for a pointer at page coordinates (x, y).
///
/// The viewport center maps to zero; moving right or down pushes the target
/// negative.
pub fn pointer_target(surface: &Surface, x: f32, y: f32, gain: f32) -> Vec2 {
    Vec2::new(
        (surface.width / 2.0 - x) * gain,
        (surface.height / 2.0 - y) * gain,
    )
}

/// Apply one frame of spin to every body and one frame of revolution to
/// every pivot.
pub fn animate(ctx: &mut EngineContext, registry: &BodyRegistry) {
    for body in registry.bodies() {
        if let Some(local) = ctx.local_mut(body.body) {
            match body.spin_axis {
                SpinAxis::Y => local.rotate_y(body.spin_rate),
                SpinAxis::Z => local.rotate_z(body.spin_rate),
            }
        }
    }
    for (pivot, rate) in registry.pivots() {
        if let Some(local) = ctx.local_mut(pivot) {
            local.rotate_y(rate);
        }
    }
}

pub struct SolarSystem {
    config: SceneConfig,
    rig: CameraRig,
    registry: Option<BodyRegistry>,
    /// Last reported (pending, ready, failed) texture counts.
    texture_counts: (usize, usize, usize),
}

impl SolarSystem {
    pub fn new() -> Self {
        let config = SceneConfig::default();
        Self {
            rig: CameraRig::new(config.damping, config.easing),
            config,
            registry: None,
            texture_counts: (0, 0, 0),
        }
    }

    fn handle_input(&mut self, surface: &Surface, input: &InputQueue) {
        for event in input.iter() {
            if let Some((x, y)) = event.pointer() {
                self.rig.set_target(pointer_target(surface, x, y, self.config.pointer_gain));
                continue;
            }
            match *event {
                InputEvent::Custom { kind: CUSTOM_RESET_VIEW, .. } => {
                    self.rig.set_target(Vec2::ZERO);
                }
                InputEvent::Custom { kind, .. } => {
                    log::warn!("unknown custom event kind {kind}");
                }
                _ => {}
            }
        }
    }

    fn report_textures(&mut self, ctx: &mut EngineContext) {
        let counts = ctx.textures.counts();
        if counts == self.texture_counts {
            return;
        }
        self.texture_counts = counts;
        let (pending, ready, failed) = counts;
        ctx.emit_event(GameEvent {
            kind: EVENT_TEXTURES,
            a: pending as f32,
            b: ready as f32,
            c: failed as f32,
        });
    }
}

#[cfg(test)]
impl SolarSystem {
    pub fn registry(&self) -> Option<&BodyRegistry> {
        self.registry.as_ref()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn scene_config(&self) -> &SceneConfig {
        &self.config
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 48,
            max_events: 8,
            clear_color: Color::BLACK,
            antialias: true,
            ..GameConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), EngineError> {
        self.config = SceneConfig::from_json(json)?;
        log::debug!("scene config: {:?}", self.config);
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        if ctx.textures.manifest().is_empty() {
            ctx.textures.set_manifest(AssetManifest::from_json(DEFAULT_MANIFEST)?);
        }

        let registry = build_scene(ctx, &self.config)?;
        self.rig = CameraRig::new(self.config.damping, self.config.easing);
        log::info!(
            "solar system: {} planets, {} orbit guides, {} moons/rings, {} asteroids, camera easing {:?}",
            registry.planets.len(),
            registry.orbit_rings.len(),
            registry.attachments.len(),
            self.config.asteroid_count,
            self.config.easing
        );
        log::debug!(
            "backdrop {:?}, asteroid field {:?}, bodies {:?}",
            registry.backdrop,
            registry.asteroid_field,
            registry.bodies().map(|b| b.name).collect::<Vec<_>>()
        );
        self.registry = Some(registry);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(&ctx.surface, input);

        let offset = self.rig.step();
        ctx.camera.position = Vec3::new(offset.x, offset.y, bodies::CAMERA_Z);
        ctx.camera.look_at(Vec3::ZERO);

        if let Some(registry) = &self.registry {
            animate(ctx, registry);
        }

        self.report_textures(ctx);
    }
}
