//! flow-maps
//!
//! Turns GeoJSON feature collections into a 3D scene graph for local-scale
//! map visualization. A single build pass resolves a coordinate origin,
//! projects every feature into planar units around it and emits renderable
//! primitives: land fills with holes, border lines, roads as lines or tubes,
//! POI markers with text labels and a water backdrop. The resulting graph is
//! plain CPU data and can be uploaded into `wgpu` buffers via [`render`].
//!
//! High-level modules
//! - `builder`: the scene build pass and its output
//! - `config`: environment-driven configuration
//! - `data_structures`: meshes, materials, transforms and the scene graph
//! - `geo`: features, origin resolution, projection, POIs and zones
//! - `resources`: async loading of fonts and textures
//! - `render`: baking a scene graph to world space and uploading it
//! - `shapes`: procedural geometry (fills, edges, tubes, disks)
//! - `theme`: named color presets
//!

pub mod builder;
pub mod config;
pub mod data_structures;
pub mod geo;
pub mod render;
pub mod resources;
pub mod shapes;
pub mod theme;

// Re-exports commonly used types for convenience in downstream code.
pub use builder::{BuildOptions, MapScene, SceneBuilder};
pub use config::{LineStyle, MapConfig};
pub use geo_types::{Coord, coord};
pub use theme::{Palette, ThemePreset};
