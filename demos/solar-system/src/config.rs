use serde::Deserialize;
use orrery_engine::{CameraEasing, EngineError};

/// Tunables for the scene, loaded from JSON before init. Missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fraction of the remaining camera offset covered per frame.
    pub damping: f32,
    /// Pointer pixels to camera units.
    pub pointer_gain: f32,
    pub easing: CameraEasing,
    pub asteroid_count: usize,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    /// Tilt of the belt out of the ecliptic, radians.
    pub asteroid_inclination: f32,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            pointer_gain: 4.0,
            easing: CameraEasing::Independent,
            asteroid_count: 1000,
            asteroid_min_radius: 1250.0,
            asteroid_max_radius: 1300.0,
            asteroid_inclination: 0.0,
            seed: 0x5eed_cafe,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json).map_err(EngineError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !self.pointer_gain.is_finite() {
            return Err(EngineError::InvalidConfig("pointer_gain must be finite".into()));
        }
        if !(self.asteroid_min_radius >= 0.0 && self.asteroid_min_radius < self.asteroid_max_radius) {
            return Err(EngineError::InvalidConfig(format!(
                "asteroid radius band [{}, {}) is empty",
                self.asteroid_min_radius, self.asteroid_max_radius
            )));
        }
        Ok(())
    }
}
