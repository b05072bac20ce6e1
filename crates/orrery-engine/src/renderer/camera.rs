use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use serde::Deserialize;
use crate::extensions::easing::damp;

/// Perspective camera that always aims at `target`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}

/// GPU-side uniform data for the camera.
/// Wire format: 20 floats (view-projection column-major, then position xyz + pad).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Update the aspect ratio from a viewport size. Degenerate sizes are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Right-handed view matrix with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.extend(0.0).to_array(),
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 10000.0)
    }
}

/// How the rig eases its Y offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraEasing {
    /// Each axis eases toward its own target.
    #[default]
    Independent,
    /// Y is rebuilt from the freshly eased X: `y = x + (ty - y) * k`.
    Coupled,
}

/// Pointer-driven camera offset with damped easing.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub current: Vec2,
    pub target: Vec2,
    /// Fraction of the remaining distance covered per tick.
    pub damping: f32,
    pub easing: CameraEasing,
}

impl CameraRig {
    pub fn new(damping: f32, easing: CameraEasing) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            damping,
            easing,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance one tick and return the new offset.
    pub fn step(&mut self) -> Vec2 {
        let k = self.damping;
        match self.easing {
            CameraEasing::Independent => {
                self.current.x = damp(self.current.x, self.target.x, k);
                self.current.y = damp(self.current.y, self.target.y, k);
            }
            CameraEasing::Coupled => {
                let dy = self.target.y - self.current.y;
                self.current.x = damp(self.current.x, self.target.x, k);
                self.current.y = self.current.x + dy * k;
            }
        }
        self.current
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(0.05, CameraEasing::Independent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::easing::damped_after;

    const EPS: f32 = 1e-2;

    #[test]
    fn view_projection_maps_target_to_screen_center() {
        let cam = PerspectiveCamera::new(50.0, 16.0 / 9.0, 0.1, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, -4000.0));
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn set_aspect_ignores_degenerate_sizes() {
        let mut cam = PerspectiveCamera::default();
        cam.set_aspect(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.set_aspect(800.0, 0.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_carries_position() {
        let cam = PerspectiveCamera::default().with_position(Vec3::new(1.0, 2.0, -3.0));
        let u = cam.uniform();
        assert_eq!(u.position, [1.0, 2.0, -3.0, 0.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }

    #[test]
    fn independent_rig_matches_closed_form() {
        let mut rig = CameraRig::new(0.05, CameraEasing::Independent);
        rig.set_target(Vec2::new(400.0, -300.0));
        for _ in 0..30 {
            rig.step();
        }
        assert!((rig.current.x - damped_after(0.0, 400.0, 0.05, 30)).abs() < EPS);
        assert!((rig.current.y - damped_after(0.0, -300.0, 0.05, 30)).abs() < EPS);
    }

    #[test]
    fn coupled_rig_follows_recurrence() {
        let mut rig = CameraRig::new(0.05, CameraEasing::Coupled);
        rig.set_target(Vec2::new(400.0, -300.0));

        let (mut x, mut y) = (0.0f32, 0.0f32);
        for _ in 0..30 {
            let dx = 400.0 - x;
            let dy = -300.0 - y;
            x += dx * 0.05;
            y = x + dy * 0.05;
            rig.step();
        }
        assert!((rig.current.x - x).abs() < EPS);
        assert!((rig.current.y - y).abs() < EPS);
        // The coupled Y never settles on its target.
        assert!((rig.current.y - -300.0).abs() > 1.0);
    }

    #[test]
    fn rig_at_rest_stays_at_origin() {
        let mut rig = CameraRig::default();
        for _ in 0..100 {
            rig.step();
        }
        assert_eq!(rig.current, Vec2::ZERO);
    }

    #[test]
    fn easing_parses_lowercase() {
        let e: CameraEasing = serde_json::from_str("\"coupled\"").unwrap();
        assert_eq!(e, CameraEasing::Coupled);
    }
}
