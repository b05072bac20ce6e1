//! Tessellation of parametric geometry into flat vertex/index arrays.
//!
//! Every geometry in the store is tessellated once into a single
//! `GeometryBuffer`; the host uploads it and draws each instance with the
//! range matching its `geometry` id.

use std::f32::consts::{PI, TAU};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::{Geometry, GeometryStore};

/// Interleaved vertex: 8 floats = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const FLOATS: usize = 8;

    fn new(position: Vec3, normal: Vec3, u: f32, v: f32) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: [u, v],
        }
    }
}

/// Slice of the shared buffers belonging to one geometry id.
/// Wire format: 4 u32 `[vertex_offset, vertex_count, index_offset, index_count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct GeometryRange {
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_offset: u32,
    /// Zero for point clouds, which draw vertices directly.
    pub index_count: u32,
}

/// Tessellated output of a single geometry.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

pub fn tessellate(geometry: &Geometry) -> MeshData {
    match geometry {
        Geometry::Sphere { radius, width_segments, height_segments } => {
            sphere(*radius, *width_segments, *height_segments)
        }
        Geometry::Torus { radius, tube, radial_segments, tubular_segments } => {
            torus(*radius, *tube, *radial_segments, *tubular_segments)
        }
        Geometry::Ring { inner_radius, outer_radius, theta_segments } => {
            ring(*inner_radius, *outer_radius, *theta_segments)
        }
        Geometry::Points { positions } => MeshData {
            vertices: positions
                .iter()
                .map(|p| Vertex::new(*p, Vec3::ZERO, 0.0, 0.0))
                .collect(),
            indices: Vec::new(),
        },
    }
}

/// UV sphere. Rows run pole to pole; the first and last rows emit one
/// triangle per segment.
fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let (w, h) = (width_segments, height_segments);
    let mut data = MeshData {
        vertices: Vec::with_capacity(((w + 1) * (h + 1)) as usize),
        indices: Vec::with_capacity((6 * w * h.saturating_sub(1)) as usize),
    };

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        // Pole vertices sit half a segment over so each pole triangle samples its own column.
        let u_offset = if iy == 0 {
            0.5 / w as f32
        } else if iy == h {
            -0.5 / w as f32
        } else {
            0.0
        };
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            let normal = position.normalize_or_zero();
            data.vertices.push(Vertex::new(position, normal, u + u_offset, 1.0 - v));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    data
}

/// Torus around the local Z axis, lying in the XY plane.
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let (r, t) = (radial_segments, tubular_segments);
    let mut data = MeshData {
        vertices: Vec::with_capacity(((r + 1) * (t + 1)) as usize),
        indices: Vec::with_capacity((6 * r * t) as usize),
    };

    for j in 0..=r {
        let v = j as f32 / r as f32 * TAU;
        for i in 0..=t {
            let u = i as f32 / t as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - center).normalize_or_zero();
            data.vertices.push(Vertex::new(
                position,
                normal,
                i as f32 / t as f32,
                j as f32 / r as f32,
            ));
        }
    }

    let row = t + 1;
    for j in 1..=r {
        for i in 1..=t {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

/// Flat annulus in the XY plane, facing +Z.
///
/// UVs are radial rather than planar: inner-edge vertices (closer than
/// `inner + 1` to the center) get `u = 0`, the rest `u = 1`, all with `v = 1`,
/// so a 1D strip texture maps across the ring's width.
fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> MeshData {
    let t = theta_segments;
    let mut data = MeshData {
        vertices: Vec::with_capacity((2 * (t + 1)) as usize),
        indices: Vec::with_capacity((6 * t) as usize),
    };

    for radius in [inner_radius, outer_radius] {
        for i in 0..=t {
            let segment = i as f32 / t as f32 * TAU;
            let position = Vec3::new(radius * segment.cos(), radius * segment.sin(), 0.0);
            let u = if position.length() < inner_radius + 1.0 { 0.0 } else { 1.0 };
            data.vertices.push(Vertex::new(position, Vec3::Z, u, 1.0));
        }
    }

    for i in 0..t {
        let a = i;
        let b = i + t + 1;
        let c = i + t + 2;
        let d = i + 1;
        data.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    data
}

/// All geometries of a store packed into shared vertex and index arrays.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffer {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Indexed by `GeometryId`.
    pub ranges: Vec<GeometryRange>,
}

impl GeometryBuffer {
    pub fn build(store: &GeometryStore) -> Self {
        let mut buffer = Self::default();
        for (id, geometry) in store.iter() {
            let mesh = tessellate(geometry);
            let range = GeometryRange {
                vertex_offset: buffer.vertices.len() as u32,
                vertex_count: mesh.vertices.len() as u32,
                index_offset: buffer.indices.len() as u32,
                index_count: mesh.indices.len() as u32,
            };
            log::debug!(
                "geometry {} ({}): {} vertices, {} indices",
                id.0,
                geometry.kind(),
                range.vertex_count,
                range.index_count
            );
            buffer.vertices.extend(mesh.vertices);
            buffer.indices.extend(mesh.indices);
            buffer.ranges.push(range);
        }
        buffer
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Length of the vertex data in floats.
    pub fn vertices_len(&self) -> usize {
        self.vertices.len() * Vertex::FLOATS
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }

    pub fn ranges_ptr(&self) -> *const u32 {
        self.ranges.as_ptr() as *const u32
    }
}
