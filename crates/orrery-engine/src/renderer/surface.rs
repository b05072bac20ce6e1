use crate::error::EngineError;

/// Drawable viewport size in CSS pixels plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Result<Self, EngineError> {
        let mut surface = Self { width: 1.0, height: 1.0, pixel_ratio: 1.0 };
        surface.resize(width, height, pixel_ratio)?;
        Ok(surface)
    }

    /// Apply a new viewport size. Leaves the surface unchanged on error.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) -> Result<(), EngineError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidSurface { width, height });
        }
        self.width = width;
        self.height = height;
        // A missing or bogus ratio falls back to 1.
        self.pixel_ratio = if valid(pixel_ratio) { pixel_ratio } else { 1.0 };
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, pixel_ratio: 1.0 }
    }
}
