//! Scene construction. Every function inserts into the shared scene graph
//! and returns the ids it created; nothing here runs per frame.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use orrery_engine::*;

use crate::asteroids::sample_belt;
use crate::bodies::{self, Attachment, MoonDesc, PlanetDesc, RingDesc};
use crate::config::SceneConfig;
use crate::registry::{BodyHandle, BodyRegistry};

/// Spawn a mesh entity under `parent` (or at the root).
fn spawn_mesh(
    ctx: &mut EngineContext,
    tag: &str,
    geometry: Geometry,
    material: Material,
    local: LocalTransform,
    parent: Option<EntityId>,
) -> EntityId {
    let geometry = ctx.add_geometry(geometry);
    let id = ctx.next_id();
    let entity = Entity::new(id)
        .with_tag(tag)
        .with_mesh(MeshComponent::new(geometry, material));
    ctx.spawn_node(entity, local, parent)
}

/// Starfield sphere, viewed from inside.
pub fn build_backdrop(ctx: &mut EngineContext) -> Result<EntityId, EngineError> {
    let texture = ctx.load_texture(bodies::STARS_TEXTURE)?;
    Ok(spawn_mesh(
        ctx,
        "stars",
        Geometry::sphere(bodies::STARS_RADIUS, bodies::STARS_SEGMENTS, bodies::STARS_SEGMENTS),
        Material::lambert(texture).with_side(Side::Back),
        LocalTransform::new(),
        None,
    ))
}

pub fn build_sun(ctx: &mut EngineContext) -> Result<EntityId, EngineError> {
    let texture = ctx.load_texture(bodies::SUN_TEXTURE)?;
    Ok(spawn_mesh(
        ctx,
        "sun",
        Geometry::sphere(bodies::SUN_RADIUS, bodies::SUN_SEGMENTS, bodies::SUN_SEGMENTS),
        Material::lambert(texture),
        LocalTransform::new(),
        None,
    ))
}

/// Textured sphere at the origin of `local`'s frame. The caller places it.
pub fn build_planet(
    ctx: &mut EngineContext,
    name: &str,
    texture: &str,
    radius: f32,
    local: LocalTransform,
    parent: Option<EntityId>,
) -> Result<EntityId, EngineError> {
    let texture = ctx.load_texture(texture)?;
    Ok(spawn_mesh(
        ctx,
        name,
        Geometry::sphere(radius, bodies::PLANET_SEGMENTS, bodies::PLANET_SEGMENTS),
        Material::lambert(texture),
        local,
        parent,
    ))
}

/// Thin torus tracing an orbit, laid flat in the XZ plane. Never animated.
pub fn build_orbit_ring(ctx: &mut EngineContext, distance: f32) -> EntityId {
    spawn_mesh(
        ctx,
        "orbit",
        Geometry::torus(
            distance,
            bodies::ORBIT_RING_TUBE,
            bodies::ORBIT_RING_RADIAL_SEGMENTS,
            bodies::ORBIT_RING_TUBULAR_SEGMENTS,
        ),
        Material::basic(Color::from_hex(bodies::ORBIT_RING_COLOR)),
        LocalTransform::new().rotated_x(FRAC_PI_2),
        None,
    )
}

/// One additive point cloud for the whole belt.
pub fn build_asteroid_field(
    ctx: &mut EngineContext,
    config: &SceneConfig,
) -> Result<EntityId, EngineError> {
    let texture = ctx.load_texture(bodies::PARTICLE_TEXTURE)?;
    let mut rng = Rng::new(config.seed);
    let positions = sample_belt(
        &mut rng,
        config.asteroid_count,
        config.asteroid_min_radius,
        config.asteroid_max_radius,
        config.asteroid_inclination,
    );
    log::debug!("asteroid belt: {} points", positions.len());

    let material = Material::points(bodies::ASTEROID_SIZE, Color::from_hex(bodies::ASTEROID_COLOR))
        .with_texture(texture)
        .with_transparent(true)
        .with_blend(BlendMode::Additive)
        .with_depth(true, false);
    Ok(spawn_mesh(
        ctx,
        "asteroids",
        Geometry::Points { positions },
        material,
        LocalTransform::new(),
        None,
    ))
}

/// Textured annulus parented to a planet body.
pub fn build_planet_rings(
    ctx: &mut EngineContext,
    desc: &RingDesc,
    parent: EntityId,
) -> Result<EntityId, EngineError> {
    let texture = ctx.load_texture(desc.texture)?;
    let local = if desc.flat {
        LocalTransform::new().rotated_x(FRAC_PI_2)
    } else {
        LocalTransform::new()
    };
    Ok(spawn_mesh(
        ctx,
        desc.texture,
        Geometry::ring(desc.inner_radius, desc.outer_radius, desc.theta_segments),
        Material::basic(Color::WHITE)
            .with_texture(texture)
            .with_side(Side::Double)
            .with_transparent(true),
        local,
        Some(parent),
    ))
}

pub fn build_moon(
    ctx: &mut EngineContext,
    desc: &MoonDesc,
    parent: EntityId,
) -> Result<EntityId, EngineError> {
    build_planet(
        ctx,
        desc.name,
        desc.texture,
        desc.radius,
        LocalTransform::new().translated_x(desc.distance),
        Some(parent),
    )
}

/// Pivot at the origin carrying one planet, plus its orbit guide and decoration.
pub fn build_orbiting_planet(
    ctx: &mut EngineContext,
    desc: &PlanetDesc,
    attachments: &mut Vec<(&'static str, EntityId)>,
) -> Result<(BodyHandle, EntityId), EngineError> {
    let pivot = ctx.next_id();
    ctx.spawn_node(
        Entity::new(pivot).with_tag(format!("{}_pivot", desc.name)),
        LocalTransform::new(),
        None,
    );

    let local = LocalTransform::new()
        .rotated_y(desc.pre_rotation_y)
        .translated_x(desc.distance);
    let body = build_planet(ctx, desc.name, desc.texture, desc.radius, local, Some(pivot))?;

    match desc.attachment {
        Some(Attachment::Moon(moon)) => {
            let id = build_moon(ctx, &moon, body)?;
            attachments.push((moon.name, id));
        }
        Some(Attachment::Rings(rings)) => {
            let id = build_planet_rings(ctx, &rings, body)?;
            attachments.push((rings.texture, id));
        }
        None => {}
    }

    let ring = build_orbit_ring(ctx, desc.orbital_distance());

    let handle = BodyHandle {
        name: desc.name,
        body,
        pivot: Some(pivot),
        spin_rate: desc.spin,
        spin_axis: desc.spin_axis,
        revolution_rate: desc.revolution,
        orbital_distance: desc.orbital_distance(),
    };
    Ok((handle, ring))
}

pub fn setup_lighting(ctx: &mut EngineContext) {
    ctx.lights.clear();
    ctx.lights.set_ambient(Color::from_hex(bodies::AMBIENT_COLOR));
    ctx.lights.add(PointLight::new(
        Vec3::from_array(bodies::LIGHT_POSITION),
        Color::WHITE,
        bodies::LIGHT_INTENSITY,
        0.0,
    ));
}

pub fn setup_camera(ctx: &mut EngineContext) {
    let mut camera = PerspectiveCamera::new(
        bodies::CAMERA_FOV_DEGREES,
        ctx.surface.aspect(),
        bodies::CAMERA_NEAR,
        bodies::CAMERA_FAR,
    )
    .with_position(Vec3::new(0.0, 0.0, bodies::CAMERA_Z));
    camera.look_at(Vec3::ZERO);
    ctx.camera = camera;
}

/// Populate the whole scene. Texture ids must all be listed in the manifest.
pub fn build_scene(
    ctx: &mut EngineContext,
    config: &SceneConfig,
) -> Result<BodyRegistry, EngineError> {
    setup_lighting(ctx);
    setup_camera(ctx);

    let backdrop = build_backdrop(ctx)?;
    let sun_id = build_sun(ctx)?;
    let sun = BodyHandle {
        name: "sun",
        body: sun_id,
        pivot: None,
        spin_rate: bodies::SUN_SPIN,
        spin_axis: bodies::SpinAxis::Y,
        revolution_rate: 0.0,
        orbital_distance: 0.0,
    };

    let mut planets = Vec::with_capacity(bodies::PLANET_COUNT);
    let mut orbit_rings = Vec::with_capacity(bodies::PLANET_COUNT);
    let mut attachments = Vec::new();
    for desc in &bodies::PLANETS {
        let (handle, ring) = build_orbiting_planet(ctx, desc, &mut attachments)?;
        log::debug!("{} at {} (pivot {:?})", desc.name, handle.orbital_distance, handle.pivot);
        planets.push(handle);
        orbit_rings.push(ring);
    }

    let asteroid_field = build_asteroid_field(ctx, config)?;

    Ok(BodyRegistry {
        backdrop,
        sun,
        planets,
        orbit_rings,
        asteroid_field,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(include_str!("../assets/manifest.json")).unwrap()
    }

    fn context() -> EngineContext {
        let mut ctx = EngineContext::new();
        ctx.textures.set_manifest(manifest());
        ctx
    }

    #[test]
    fn builds_every_body_once() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();

        assert_eq!(registry.planets.len(), bodies::PLANET_COUNT);
        assert_eq!(registry.orbit_rings.len(), bodies::PLANET_COUNT);
        assert_eq!(registry.attachments.len(), 3);
        // backdrop + sun + (pivot + body + ring) per planet + attachments + belt
        assert_eq!(ctx.scene.len(), 2 + 3 * bodies::PLANET_COUNT + 3 + 1);
        assert_eq!(ctx.scene.visible_count(), ctx.scene.len() - bodies::PLANET_COUNT);
        assert!(registry.sun.pivot.is_none());
        assert!(registry.planets.iter().all(|p| p.pivot.is_some()));
    }

    #[test]
    fn unknown_texture_aborts_the_build() {
        let mut ctx = EngineContext::new();
        let err = build_scene(&mut ctx, &SceneConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTexture(id) if id == "stars"));
    }

    #[test]
    fn planets_stay_at_their_distance_for_every_pivot_angle() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();

        for step in 0..12 {
            for planet in &registry.planets {
                let pos = ctx.world_position(planet.body).unwrap();
                assert!(pos.y.abs() < 1e-2, "{} left the ecliptic", planet.name);
                assert!(
                    (pos.length() - planet.orbital_distance).abs() < 0.05,
                    "{} at {} after step {step}",
                    planet.name,
                    pos.length()
                );
            }
            for (pivot, _) in registry.pivots() {
                ctx.local_mut(pivot).unwrap().rotate_y(TAU / 12.0);
            }
        }
    }

    #[test]
    fn uranus_starts_on_the_negative_z_axis() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();
        let uranus = registry.planet("uranus").unwrap();
        let pos = ctx.world_position(uranus.body).unwrap();
        assert!((pos - Vec3::new(0.0, 0.0, -2400.0)).length() < 1e-2);

        let mercury = registry.planet("mercury").unwrap();
        let pos = ctx.world_position(mercury.body).unwrap();
        assert!((pos - Vec3::new(-600.0, 0.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn moon_follows_earth() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();
        let earth = registry.planet("earth").unwrap();
        let moon = registry.attachment("moon").unwrap();
        assert_eq!(ctx.graph.get_parent(moon), Some(earth.body));

        let gap = ctx.world_position(moon).unwrap() - ctx.world_position(earth.body).unwrap();
        assert!((gap.length() - 100.0).abs() < 1e-2);
    }

    #[test]
    fn orbit_rings_lie_flat() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();
        for ring in &registry.orbit_rings {
            let local = ctx.graph.get_local(*ring).unwrap();
            // Torus is built in XY; its normal (Z) must end up along Y.
            let normal = local.rotation * Vec3::Z;
            assert!(normal.y.abs() > 0.999);
            assert!(ctx.graph.get_parent(*ring).is_none());
        }
    }

    #[test]
    fn asteroid_material_is_additive_without_depth_write() {
        let mut ctx = context();
        let registry = build_scene(&mut ctx, &SceneConfig::default()).unwrap();
        let field = ctx.scene.get(registry.asteroid_field).unwrap();
        let mesh = field.mesh.as_ref().unwrap();
        assert_eq!(mesh.material.blend, BlendMode::Additive);
        assert!(mesh.material.transparent);
        assert!(mesh.material.depth_test);
        assert!(!mesh.material.depth_write);
        assert_eq!(mesh.material.point_size(), bodies::ASTEROID_SIZE);

        match ctx.geometries.get(mesh.geometry) {
            Some(Geometry::Points { positions }) => assert_eq!(positions.len(), 1000),
            other => panic!("expected points, got {other:?}"),
        }
    }

    #[test]
    fn camera_and_lights_match_the_scene() {
        let mut ctx = context();
        build_scene(&mut ctx, &SceneConfig::default()).unwrap();
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 0.0, -4000.0));
        assert_eq!(ctx.camera.target, Vec3::ZERO);
        assert_eq!(ctx.camera.fov_y_degrees, 50.0);
        assert_eq!(ctx.lights.count(), 1);
        let ambient = ctx.lights.ambient();
        assert!((ambient.r - 0x77 as f32 / 255.0).abs() < 1e-6);
    }
}
