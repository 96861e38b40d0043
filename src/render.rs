//! Baking and GPU upload of map scenes.
//!
//! [`bake`] flattens a scene graph into world-space vertex data grouped by
//! primitive type; [`upload`] turns that data into `wgpu` buffers. Labels are
//! carried through with their world position since text rasterisation is up
//! to the renderer. World transforms must be current, which is the case for
//! graphs returned by the builder.
//!
//! # Key types
//!
//! - [`BakedScene`] holds CPU vertex data ready for upload
//! - [`GpuScene`] holds the uploaded buffers plus the labels

use cgmath::{Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::{
    model::{Label, LineVertex, Material, ModelVertex, Primitive, color_to_array},
    scene_graph::{SceneNode, walk},
};

pub struct BakedMesh {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub material: Material,
}

/// Lines and point sprites share a vertex format and only differ in topology.
pub struct BakedLines {
    pub name: String,
    pub vertices: Vec<LineVertex>,
    pub topology: wgpu::PrimitiveTopology,
    /// Line width or point size.
    pub width: f32,
}

#[derive(Clone, Debug)]
pub struct BakedLabel {
    pub name: String,
    pub label: Label,
    pub position: Point3<f32>,
}

#[derive(Default)]
pub struct BakedScene {
    pub meshes: Vec<BakedMesh>,
    pub lines: Vec<BakedLines>,
    pub labels: Vec<BakedLabel>,
}

pub fn bake(root: &dyn SceneNode) -> BakedScene {
    let mut scene = BakedScene::default();
    walk(root, &mut |node| {
        let Some(primitive) = node.primitive() else {
            return;
        };
        let world = node.get_world_transform();
        let to_world = |p: [f32; 3]| -> [f32; 3] { world.transform_point(p.into()).into() };

        match primitive {
            Primitive::Mesh { mesh, material } => {
                if mesh.is_empty() {
                    log::warn!("mesh {} is empty, not baked", node.name());
                    return;
                }
                let vertices = mesh
                    .vertices
                    .iter()
                    .map(|v| ModelVertex {
                        position: to_world(v.position),
                        tex_coords: v.tex_coords,
                        normal: world.transform_normal(Vector3::from(v.normal)).into(),
                    })
                    .collect();
                scene.meshes.push(BakedMesh {
                    name: node.name().to_string(),
                    vertices,
                    indices: mesh.indices.clone(),
                    material: material.clone(),
                });
            }
            Primitive::Lines(lines) => {
                let color = color_to_array(lines.color);
                scene.lines.push(BakedLines {
                    name: node.name().to_string(),
                    vertices: lines
                        .positions
                        .iter()
                        .map(|p| LineVertex {
                            position: to_world(*p),
                            color,
                        })
                        .collect(),
                    topology: lines.topology.into(),
                    width: lines.width,
                });
            }
            Primitive::Points(points) => {
                let color = color_to_array(points.color);
                scene.lines.push(BakedLines {
                    name: node.name().to_string(),
                    vertices: points
                        .positions
                        .iter()
                        .map(|p| LineVertex {
                            position: to_world(*p),
                            color,
                        })
                        .collect(),
                    topology: wgpu::PrimitiveTopology::PointList,
                    width: points.size,
                });
            }
            Primitive::Label(label) => scene.labels.push(BakedLabel {
                name: node.name().to_string(),
                label: label.clone(),
                position: world.transform_point(Point3::new(0.0, 0.0, 0.0)),
            }),
        }
    });
    scene
}

pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub material: Material,
}

pub struct GpuLines {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
    pub topology: wgpu::PrimitiveTopology,
    pub width: f32,
}

pub struct GpuScene {
    pub meshes: Vec<GpuMesh>,
    pub lines: Vec<GpuLines>,
    pub labels: Vec<BakedLabel>,
}

pub fn upload(device: &wgpu::Device, root: &dyn SceneNode) -> GpuScene {
    let baked = bake(root);

    let meshes = baked
        .meshes
        .into_iter()
        .map(|mesh| {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", mesh.name)),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", mesh.name)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            GpuMesh {
                num_elements: mesh.indices.len() as u32,
                name: mesh.name,
                vertex_buffer,
                index_buffer,
                material: mesh.material,
            }
        })
        .collect();

    let lines = baked
        .lines
        .into_iter()
        .filter(|lines| !lines.vertices.is_empty())
        .map(|lines| {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", lines.name)),
                contents: bytemuck::cast_slice(&lines.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            GpuLines {
                num_vertices: lines.vertices.len() as u32,
                name: lines.name,
                vertex_buffer,
                topology: lines.topology,
                width: lines.width,
            }
        })
        .collect();

    GpuScene {
        meshes,
        lines,
        labels: baked.labels,
    }
}
