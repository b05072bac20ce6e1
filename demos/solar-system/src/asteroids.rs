//! Asteroid belt sampling.

use std::f32::consts::{FRAC_PI_2, TAU};
use glam::Vec3;
use orrery_engine::Rng;

/// Convert spherical coordinates to Cartesian, Y up.
///
/// `polar` is measured from +Y, `azimuth` around Y starting at +Z.
pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let s = polar.sin();
    Vec3::new(radius * s * azimuth.sin(), radius * polar.cos(), radius * s * azimuth.cos())
}

/// Sample `count` points in a flat annulus around the origin.
///
/// Radii are uniform in `[min_radius, max_radius)` and azimuths uniform in
/// `[0, 2π)`. `inclination` lifts every point out of the XZ plane by the same
/// elevation angle.
pub fn sample_belt(
    rng: &mut Rng,
    count: usize,
    min_radius: f32,
    max_radius: f32,
    inclination: f32,
) -> Vec<Vec3> {
    let polar = FRAC_PI_2 - inclination;
    (0..count)
        .map(|_| {
            let radius = rng.range(min_radius, max_radius);
            let azimuth = TAU * rng.next_f32();
            spherical_to_cartesian(radius, polar, azimuth)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spherical_axes() {
        let p = spherical_to_cartesian(10.0, FRAC_PI_2, 0.0);
        assert!((p - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        let p = spherical_to_cartesian(10.0, FRAC_PI_2, FRAC_PI_2);
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        let p = spherical_to_cartesian(10.0, 0.0, 1.234);
        assert!((p - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn belt_points_lie_in_the_band_on_the_ecliptic() {
        let mut rng = Rng::new(2024);
        let points = sample_belt(&mut rng, 1000, 1250.0, 1300.0, 0.0);
        assert_eq!(points.len(), 1000);
        for p in &points {
            let r = p.length();
            assert!(r >= 1250.0 - 1e-2 && r <= 1300.0 + 1e-2, "r = {r}");
            assert!(p.y.abs() < 1e-2, "y = {}", p.y);
            let azimuth = p.x.atan2(p.z).rem_euclid(TAU);
            assert!((0.0..TAU).contains(&azimuth));
        }
    }

    #[test]
    fn belt_covers_every_quadrant() {
        let mut rng = Rng::new(1);
        let points = sample_belt(&mut rng, 1000, 1250.0, 1300.0, 0.0);
        let mut quadrants = [0usize; 4];
        for p in &points {
            let q = (p.x >= 0.0) as usize + 2 * (p.z >= 0.0) as usize;
            quadrants[q] += 1;
        }
        assert!(quadrants.iter().all(|&n| n > 150), "{quadrants:?}");
    }

    #[test]
    fn inclination_lifts_points() {
        let mut rng = Rng::new(3);
        let tilt = 0.1;
        for p in sample_belt(&mut rng, 50, 1250.0, 1300.0, tilt) {
            let elevation = (p.y / p.length()).asin();
            assert!((elevation - tilt).abs() < 1e-3);
        }
    }

    #[test]
    fn same_seed_same_belt() {
        let a = sample_belt(&mut Rng::new(9), 10, 1.0, 2.0, 0.0);
        let b = sample_belt(&mut Rng::new(9), 10, 1.0, 2.0, 0.0);
        assert_eq!(a, b);
    }
}
