use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::components::material::Material;
use crate::renderer::instance::{MeshInstance, RenderBuffer};

/// Pack a material into the instance `flags` float: shading in bits 0..8,
/// material flag bits from bit 8 up.
pub fn pack_flags(material: &Material) -> f32 {
    (material.shading.as_u32() | (material.flags() << 8)) as f32
}

/// Build the render buffer from a set of entities.
///
/// Opaque meshes come first, then transparent and additive ones, with
/// `transparent_split` at the boundary. Entities without a mesh (pivots)
/// and inactive entities are skipped. A texture that is not `Ready` is
/// written as `MeshInstance::NO_TEXTURE`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    textures: &TextureRegistry,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut translucent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };
        let material = &mesh.material;

        let texture = match material.texture {
            Some(handle) if textures.is_ready(handle) => handle.0 as f32,
            _ => MeshInstance::NO_TEXTURE,
        };

        let instance = MeshInstance {
            model: entity.world.to_cols_array(),
            color: [material.color.r, material.color.g, material.color.b, 1.0],
            texture,
            geometry: mesh.geometry.0 as f32,
            flags: pack_flags(material),
            point_size: material.point_size(),
        };

        if material.is_translucent() {
            translucent.push(instance);
        } else {
            buffer.push(instance);
        }
    }

    let split = buffer.instance_count();
    buffer.set_transparent_split(split);
    for inst in translucent {
        buffer.push(inst);
    }
}
