//! Scene data: body sizes, orbit offsets, spin and revolution rates, and the
//! fixed camera/light setup.
//!
//! Distances and radii are scene units, chosen for legibility rather than
//! astronomical scale. Rates are radians per display frame.

use std::f32::consts::FRAC_PI_2;

// ── Backdrop ─────────────────────────────────────────────────────────

pub const STARS_TEXTURE: &str = "stars";
pub const STARS_RADIUS: f32 = 4000.0;
pub const STARS_SEGMENTS: u32 = 128;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_TEXTURE: &str = "sun";
pub const SUN_RADIUS: f32 = 500.0;
pub const SUN_SEGMENTS: u32 = 128;
pub const SUN_SPIN: f32 = 0.005;

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANET_SEGMENTS: u32 = 64;
pub const PLANET_COUNT: usize = 8;

/// Local axis a body spins about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonDesc {
    pub name: &'static str,
    pub texture: &'static str,
    pub radius: f32,
    /// Offset from the parent body along its local X.
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDesc {
    pub texture: &'static str,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub theta_segments: u32,
    /// Quarter turn about X so the ring lies in the body's equatorial plane.
    pub flat: bool,
}

/// Optional decoration parented to a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    Moon(MoonDesc),
    Rings(RingDesc),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDesc {
    pub name: &'static str,
    pub texture: &'static str,
    pub radius: f32,
    /// Signed offset along the pivot's X axis; the sign picks the starting side.
    pub distance: f32,
    pub spin: f32,
    pub spin_axis: SpinAxis,
    pub revolution: f32,
    /// Rotation about Y applied before the orbital offset.
    pub pre_rotation_y: f32,
    pub attachment: Option<Attachment>,
}

impl PlanetDesc {
    pub fn orbital_distance(&self) -> f32 {
        self.distance.abs()
    }
}

pub const PLANETS: [PlanetDesc; PLANET_COUNT] = [
    PlanetDesc {
        name: "mercury",
        texture: "mercury",
        radius: 20.0,
        distance: -600.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0033,
        pre_rotation_y: 0.0,
        attachment: None,
    },
    PlanetDesc {
        name: "venus",
        texture: "venus",
        radius: 65.0,
        distance: 750.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0028,
        pre_rotation_y: 0.0,
        attachment: None,
    },
    PlanetDesc {
        name: "earth",
        texture: "earth",
        radius: 70.0,
        distance: -950.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0023,
        pre_rotation_y: 0.0,
        attachment: Some(Attachment::Moon(MoonDesc {
            name: "moon",
            texture: "moon",
            radius: 15.0,
            distance: 100.0,
        })),
    },
    PlanetDesc {
        name: "mars",
        texture: "mars",
        radius: 40.0,
        distance: 1150.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0021,
        pre_rotation_y: 0.0,
        attachment: None,
    },
    PlanetDesc {
        name: "jupiter",
        texture: "jupiter",
        radius: 150.0,
        distance: -1500.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0028,
        pre_rotation_y: 0.0,
        attachment: None,
    },
    PlanetDesc {
        name: "saturn",
        texture: "saturn",
        radius: 120.0,
        distance: 2000.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0015,
        pre_rotation_y: 0.0,
        attachment: Some(Attachment::Rings(RingDesc {
            texture: "saturn_rings",
            inner_radius: 130.0,
            outer_radius: 300.0,
            theta_segments: 64,
            flat: true,
        })),
    },
    PlanetDesc {
        name: "uranus",
        texture: "uranus",
        radius: 30.0,
        distance: 2400.0,
        spin: 0.015,
        spin_axis: SpinAxis::Z,
        revolution: 0.0026,
        pre_rotation_y: FRAC_PI_2,
        attachment: Some(Attachment::Rings(RingDesc {
            texture: "uranus_rings",
            inner_radius: 40.0,
            outer_radius: 45.0,
            theta_segments: 64,
            flat: false,
        })),
    },
    PlanetDesc {
        name: "neptune",
        texture: "neptune",
        radius: 28.0,
        distance: 2600.0,
        spin: 0.01,
        spin_axis: SpinAxis::Y,
        revolution: 0.0012,
        pre_rotation_y: 0.0,
        attachment: None,
    },
];

// ── Orbit guides ─────────────────────────────────────────────────────

pub const ORBIT_RING_TUBE: f32 = 2.0;
pub const ORBIT_RING_RADIAL_SEGMENTS: u32 = 16;
pub const ORBIT_RING_TUBULAR_SEGMENTS: u32 = 100;
pub const ORBIT_RING_COLOR: u32 = 0xbfbfbf;

// ── Asteroid belt ────────────────────────────────────────────────────

pub const PARTICLE_TEXTURE: &str = "particle";
pub const ASTEROID_SIZE: f32 = 50.0;
pub const ASTEROID_COLOR: u32 = 0x4f2e1e;

// ── Lighting ─────────────────────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0x777777;
pub const LIGHT_POSITION: [f32; 3] = [500.0, 500.0, -2000.0];
pub const LIGHT_INTENSITY: f32 = 1.0;

// ── Camera ───────────────────────────────────────────────────────────

pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10000.0;
pub const CAMERA_Z: f32 = -4000.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_planet_has_a_distinct_orbit() {
        let mut distances: Vec<f32> = PLANETS.iter().map(PlanetDesc::orbital_distance).collect();
        distances.sort_by(f32::total_cmp);
        distances.dedup();
        assert_eq!(distances.len(), PLANET_COUNT);
        assert!(distances[0] > SUN_RADIUS);
    }

    #[test]
    fn only_uranus_spins_on_z() {
        for p in &PLANETS {
            assert_eq!(p.spin_axis == SpinAxis::Z, p.name == "uranus", "{}", p.name);
        }
    }

    #[test]
    fn backdrop_encloses_the_system() {
        let outer = PLANETS.iter().map(PlanetDesc::orbital_distance).fold(0.0, f32::max);
        assert!(STARS_RADIUS > outer + ASTEROID_SIZE);
        assert!(CAMERA_Z.abs() <= STARS_RADIUS);
    }
}
