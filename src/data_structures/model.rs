//! Renderable primitives and the vertex formats they are uploaded with.

use cgmath::Point3;
use wgpu::Color;

/// Describes how a vertex type is laid out in a GPU vertex buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

/**
 * As we store vertex data directly in the GPU memory we need to tell what the bytes refer to:
 *
 * stride: length of a vertex
 * attributes: position (location 0), tex coords (location 1), normal (location 2)
 */
impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Vertex of line and point primitives; the color is baked in per vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex for LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

pub fn color_to_array(color: Color) -> [f32; 4] {
    [
        color.r as f32,
        color.g as f32,
        color.b as f32,
        color.a as f32,
    ]
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<ModelVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over the triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        let position = |i: u32| Point3::from(self.vertices[i as usize].position);
        self.indices
            .chunks_exact(3)
            .map(move |tri| [position(tri[0]), position(tri[1]), position(tri[2])])
    }
}

/// How the positions of a [`Lines`] primitive are connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Consecutive positions are connected.
    LineStrip,
    /// Every pair of positions is one segment.
    LineList,
}

impl From<Topology> for wgpu::PrimitiveTopology {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lines {
    pub positions: Vec<[f32; 3]>,
    pub topology: Topology,
    pub color: Color,
    pub width: f32,
}

impl Lines {
    pub fn segment_count(&self) -> usize {
        match self.topology {
            Topology::LineStrip => self.positions.len().saturating_sub(1),
            Topology::LineList => self.positions.len() / 2,
        }
    }
}

/// Point sprites of a fixed size.
#[derive(Clone, Debug, PartialEq)]
pub struct Points {
    pub positions: Vec<[f32; 3]>,
    pub color: Color,
    pub size: f32,
}

/// Horizontal text anchor of a [`Label`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    Left,
    #[default]
    Center,
    Right,
}

/// Text placed at its node's position. Rasterisation is left to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: String,
    pub font_size: f32,
    pub anchor: Anchor,
    pub color: Color,
    /// Turn the text towards the camera every frame instead of keeping the node's
    /// rotation.
    pub billboard: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Color(Color),
    /// Tiled image texture, wrapped in both directions.
    Texture {
        path: String,
        repeat: [f32; 2],
        /// Used until the texture is loaded.
        fallback: Color,
    },
}

impl Material {
    pub fn base_color(&self) -> Color {
        match self {
            Material::Color(color) => *color,
            Material::Texture { fallback, .. } => *fallback,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Mesh { mesh: Mesh, material: Material },
    Lines(Lines),
    Points(Points),
    Label(Label),
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Mesh { .. } => "mesh",
            Primitive::Lines(_) => "lines",
            Primitive::Points(_) => "points",
            Primitive::Label(_) => "label",
        }
    }

    pub fn as_mesh(&self) -> Option<(&Mesh, &Material)> {
        match self {
            Primitive::Mesh { mesh, material } => Some((mesh, material)),
            _ => None,
        }
    }

    pub fn as_lines(&self) -> Option<&Lines> {
        match self {
            Primitive::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&Points> {
        match self {
            Primitive::Points(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Primitive::Label(label) => Some(label),
            _ => None,
        }
    }
}
