use glam::Vec3;
use crate::components::material::Material;

/// Index into the scene's `GeometryStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

/// Parametric geometry description. Tessellated once by `systems::geometry`.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere centered on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Torus in the local XY plane.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Flat annulus in the local XY plane.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
    /// Unconnected point cloud.
    Points { positions: Vec<Vec3> },
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Geometry::Torus {
            radius,
            tube,
            radial_segments: radial_segments.max(3),
            tubular_segments: tubular_segments.max(3),
        }
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Self {
        Geometry::Ring {
            inner_radius,
            outer_radius,
            theta_segments: theta_segments.max(3),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Torus { .. } => "torus",
            Geometry::Ring { .. } => "ring",
            Geometry::Points { .. } => "points",
        }
    }
}

/// Component for tessellated meshes: shared geometry plus a per-entity material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: GeometryId,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// Interned geometry descriptions, indexed by `GeometryId`.
#[derive(Debug, Default)]
pub struct GeometryStore {
    geometries: Vec<Geometry>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry, reusing an identical existing entry.
    pub fn add(&mut self, geometry: Geometry) -> GeometryId {
        if let Some(idx) = self.geometries.iter().position(|g| *g == geometry) {
            return GeometryId(idx as u32);
        }
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn get(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeometryId, &Geometry)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryId(i as u32), g))
    }
}
