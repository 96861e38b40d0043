//! Scene data structures: meshes, materials, transforms and the scene graph.
//!
//! - `model` contains vertex types, meshes, line/point sets, labels and materials
//! - `instance` holds the local/world transformation of a node
//! - `scene_graph` enables hierarchical scene organization
//! - `texture` contains the GPU texture wrapper used for tiled materials

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
