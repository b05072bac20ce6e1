use crate::assets::registry::TextureHandle;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Which faces of a mesh are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    /// Interior faces only (for enclosing spheres seen from inside).
    Back,
    Double,
}

/// Blend mode for mesh rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Normal,
    /// Additive blending for glowing sprites (src-alpha, one).
    Additive,
}

/// Lighting model applied by the host shader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shading {
    /// Diffuse-only, lit by the scene lights.
    #[default]
    Lambert,
    /// Unlit flat color/texture.
    Basic,
    /// Screen-facing point sprites of the given world size.
    Points { size: f32 },
}

impl Shading {
    pub fn as_u32(self) -> u32 {
        match self {
            Shading::Lambert => 0,
            Shading::Basic => 1,
            Shading::Points { .. } => 2,
        }
    }
}

/// Surface description attached to a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// Texture handle; the surface falls back to `color` until the texture is ready.
    pub texture: Option<TextureHandle>,
    pub side: Side,
    pub blend: BlendMode,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: Shading::Lambert,
            color: Color::WHITE,
            texture: None,
            side: Side::Front,
            blend: BlendMode::Normal,
            transparent: false,
            depth_test: true,
            depth_write: true,
        }
    }
}

// Wire flag bits, mirrored by the host renderer.
pub const FLAG_SIDE_BACK: u32 = 1 << 0;
pub const FLAG_SIDE_DOUBLE: u32 = 1 << 1;
pub const FLAG_ADDITIVE: u32 = 1 << 2;
pub const FLAG_TRANSPARENT: u32 = 1 << 3;
pub const FLAG_DEPTH_TEST: u32 = 1 << 4;
pub const FLAG_DEPTH_WRITE: u32 = 1 << 5;

impl Material {
    pub fn lambert(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            ..Default::default()
        }
    }

    pub fn points(size: f32, color: Color) -> Self {
        Self {
            shading: Shading::Points { size },
            color,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_depth(mut self, test: bool, write: bool) -> Self {
        self.depth_test = test;
        self.depth_write = write;
        self
    }

    /// Whether this material must be drawn after all opaque geometry.
    pub fn is_translucent(&self) -> bool {
        self.transparent || self.blend == BlendMode::Additive
    }

    /// Point sprite size, zero for non-point materials.
    pub fn point_size(&self) -> f32 {
        match self.shading {
            Shading::Points { size } => size,
            _ => 0.0,
        }
    }

    /// Pack side/blend/depth state into the wire bitfield.
    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        match self.side {
            Side::Front => {}
            Side::Back => flags |= FLAG_SIDE_BACK,
            Side::Double => flags |= FLAG_SIDE_DOUBLE,
        }
        if self.blend == BlendMode::Additive {
            flags |= FLAG_ADDITIVE;
        }
        if self.transparent {
            flags |= FLAG_TRANSPARENT;
        }
        if self.depth_test {
            flags |= FLAG_DEPTH_TEST;
        }
        if self.depth_write {
            flags |= FLAG_DEPTH_WRITE;
        }
        flags
    }
}
