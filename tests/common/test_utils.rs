use cgmath::{Point3, Vector2};
use flow_maps::{
    MapConfig, SceneBuilder,
    data_structures::model::{Mesh, Primitive},
};

pub const HOME: (f64, f64) = (-80.19, 25.76);

/// A small downtown map: an origin POI, a second POI, a block with a courtyard,
/// a road, a park and a geometry collection that is not rendered.
pub const DOWNTOWN: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "id": "home", "origin": true },
      "geometry": { "type": "Point", "coordinates": [-80.19, 25.76] }
    },
    {
      "type": "Feature",
      "properties": { "id": "Bayfront Park" },
      "geometry": { "type": "Point", "coordinates": [-80.186, 25.775] }
    },
    {
      "type": "Feature",
      "properties": { "id": "block" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [
          [[-80.20, 25.75], [-80.18, 25.75], [-80.18, 25.77], [-80.20, 25.77], [-80.20, 25.75]],
          [[-80.195, 25.755], [-80.185, 25.755], [-80.185, 25.765], [-80.195, 25.765], [-80.195, 25.755]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": { "id": "biscayne", "kind": "road" },
      "geometry": {
        "type": "LineString",
        "coordinates": [[-80.189, 25.74], [-80.188, 25.76], [-80.187, 25.78]]
      }
    },
    {
      "type": "Feature",
      "properties": { "id": "park", "kind": "park" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-80.187, 25.773], [-80.185, 25.773], [-80.185, 25.777], [-80.187, 25.773]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "id": "misc" },
      "geometry": {
        "type": "GeometryCollection",
        "geometries": [{ "type": "Point", "coordinates": [-80.19, 25.76] }]
      }
    }
  ]
}"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn builder() -> SceneBuilder {
    builder_with(|_| {})
}

pub fn builder_with(configure: impl FnOnce(&mut MapConfig)) -> SceneBuilder {
    init_logger();
    let mut config = MapConfig::default();
    configure(&mut config);
    SceneBuilder::new(config)
}

/// GeoJSON text of a collection holding the given features.
pub fn collection(features: &[String]) -> String {
    format!(
        r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
        features.join(",")
    )
}

pub fn feature(properties: &str, geometry: &str) -> String {
    format!(r#"{{ "type": "Feature", "properties": {properties}, "geometry": {geometry} }}"#)
}

/// Closed axis-aligned square ring in planar coordinates.
pub fn square(center: (f32, f32), half: f32) -> Vec<Vector2<f32>> {
    let (cx, cy) = center;
    vec![
        Vector2::new(cx - half, cy - half),
        Vector2::new(cx + half, cy - half),
        Vector2::new(cx + half, cy + half),
        Vector2::new(cx - half, cy + half),
        Vector2::new(cx - half, cy - half),
    ]
}

pub fn triangle_area(tri: &[Point3<f32>; 3]) -> f32 {
    let (a, b, c) = (tri[0], tri[1], tri[2]);
    ((b.x - a.x) * (c.z - a.z) - (c.x - a.x) * (b.z - a.z)).abs() / 2.0
}

pub fn mesh_area(mesh: &Mesh) -> f32 {
    mesh.triangles().map(|tri| triangle_area(&tri)).sum()
}

pub fn centroid(tri: &[Point3<f32>; 3]) -> Point3<f32> {
    Point3::new(
        (tri[0].x + tri[1].x + tri[2].x) / 3.0,
        (tri[0].y + tri[1].y + tri[2].y) / 3.0,
        (tri[0].z + tri[1].z + tri[2].z) / 3.0,
    )
}

/// Y component of the face normal, positive when the triangle faces up.
pub fn facing(tri: &[Point3<f32>; 3]) -> f32 {
    let u = tri[1] - tri[0];
    let v = tri[2] - tri[0];
    u.z * v.x - u.x * v.z
}

pub fn mesh_of(primitive: &Primitive) -> &Mesh {
    match primitive.as_mesh() {
        Some((mesh, _)) => mesh,
        None => panic!("expected a mesh, got {}", primitive.kind()),
    }
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// A device without a surface, `None` when the machine has no usable adapter.
#[cfg(feature = "integration-tests")]
pub async fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok()?;
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("test device"),
            required_limits: wgpu::Limits::downlevel_defaults(),
            ..Default::default()
        })
        .await
        .ok()
}
