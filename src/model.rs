use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use gltf::buffer;
use itertools::izip;

use crate::math::AABB;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

pub struct ModelPrimitive {
    pub index: usize,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub bounding_box: AABB,
}

impl ModelPrimitive {
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|triangle| {
            Some([
                self.vertices.get(triangle[0] as usize)?,
                self.vertices.get(triangle[1] as usize)?,
                self.vertices.get(triangle[2] as usize)?,
            ])
        })
    }
}

pub struct Model {
    pub name: String,
    pub primitives: Vec<ModelPrimitive>,
    pub bounding_box: AABB,
}

pub type Buffers<'a> = &'a [buffer::Data];

impl Model {
    pub fn from_gltf(
        name: impl Into<String>,
        mesh: gltf::Mesh,
        buffers: Buffers,
    ) -> anyhow::Result<Model> {
        let name = name.into();
        let mut primitives = Vec::new();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "Skipping primitive {} of {}: unsupported mode {:?}",
                    primitive.index(),
                    name,
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| anyhow::anyhow!("Primitive without positions in {}", name))?
                .map(Vec3::from)
                .collect();

            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(normals) => normals.map(Vec3::from).collect(),
                None => vec![Vec3::Y; positions.len()],
            };

            let tex_coords: Vec<Vec2> = match reader.read_tex_coords(0) {
                Some(tex_coords) => tex_coords.into_f32().map(Vec2::from).collect(),
                None => vec![Vec2::ZERO; positions.len()],
            };

            let vertices = izip!(&positions, &normals, &tex_coords)
                .map(|(position, normal, tex_coords)| Vertex {
                    position: *position,
                    normal: *normal,
                    tex_coords: *tex_coords,
                })
                .collect::<Vec<Vertex>>();

            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect::<Vec<u32>>(),
                None => (0..vertices.len() as u32).collect(),
            };

            let Some(bounding_box) = AABB::from_points(positions.iter().copied()) else {
                continue;
            };

            let base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            primitives.push(ModelPrimitive {
                index: primitive.index(),
                vertices,
                indices,
                base_color,
                bounding_box,
            });
        }

        let bounding_box = primitives
            .iter()
            .map(|primitive| primitive.bounding_box)
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| anyhow::anyhow!("Mesh without primitives: {}", name))?;

        Ok(Model {
            name,
            primitives,
            bounding_box,
        })
    }
}

pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, tex_coords) as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
    ],
};

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Unit quad in the XY plane facing +Z, UVs spanning the quad.
    pub fn quad_model(name: &str) -> Model {
        let vertex = |x: f32, y: f32| Vertex {
            position: Vec3::new(x, y, 0.0),
            normal: Vec3::Z,
            tex_coords: Vec2::new(x + 0.5, 0.5 - y),
        };

        let vertices = vec![
            vertex(-0.5, -0.5),
            vertex(0.5, -0.5),
            vertex(0.5, 0.5),
            vertex(-0.5, 0.5),
        ];

        let bounding_box = AABB::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0));

        Model {
            name: name.to_string(),
            primitives: vec![ModelPrimitive {
                index: 0,
                vertices,
                indices: vec![0, 1, 2, 0, 2, 3],
                base_color: [1.0; 4],
                bounding_box,
            }],
            bounding_box,
        }
    }
}
