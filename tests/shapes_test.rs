use cgmath::{MetricSpace, Point3, Vector2};
use flow_maps::{
    data_structures::model::{Mesh, ModelVertex},
    shapes::{disk_geometry, edges_geometry, polyline, shape_geometry, tube_geometry},
};

use crate::common::test_utils::{assert_close, centroid, facing, mesh_area, square};

mod common;

fn inside_square(p: Point3<f32>, center: (f32, f32), half: f32) -> bool {
    (p.x - center.0).abs() < half && (p.z - center.1).abs() < half
}

#[test]
fn square_fill_is_two_upward_triangles() {
    let mesh = shape_geometry(&square((0.0, 0.0), 1.0), &[], 0.0).unwrap();
    // the closing position is dropped
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_close(mesh_area(&mesh), 4.0, 1e-5);
    for tri in mesh.triangles() {
        assert!(facing(&tri) > 0.0);
    }
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
}

#[test]
fn fill_respects_winding_of_either_direction() {
    let mut clockwise = square((0.0, 0.0), 1.0);
    clockwise.reverse();
    let mesh = shape_geometry(&clockwise, &[], 0.0).unwrap();
    for tri in mesh.triangles() {
        assert!(facing(&tri) > 0.0);
    }
}

#[test]
fn fill_is_placed_at_elevation() {
    let mesh = shape_geometry(&square((3.0, -2.0), 1.0), &[], 0.75).unwrap();
    for vertex in &mesh.vertices {
        assert_eq!(vertex.position[1], 0.75);
        assert_eq!(vertex.tex_coords, [vertex.position[0], vertex.position[2]]);
    }
}

#[test]
fn holes_are_cut_out_of_the_fill() {
    let outer = square((0.0, 0.0), 5.0);
    let hole = square((0.0, 0.0), 2.0);
    let mesh = shape_geometry(&outer, &[hole], 0.0).unwrap();

    assert_close(mesh_area(&mesh), 100.0 - 16.0, 1e-3);
    for tri in mesh.triangles() {
        assert!(
            !inside_square(centroid(&tri), (0.0, 0.0), 2.0),
            "triangle {tri:?} lies inside the hole"
        );
    }
}

#[test]
fn degenerate_holes_fail() {
    let hole = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)];
    let err = shape_geometry(&square((0.0, 0.0), 5.0), &[hole], 0.0).unwrap_err();
    assert!(err.to_string().contains("hole #0"), "{err}");
}

#[test]
fn too_few_exterior_positions_fail() {
    let ring = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 0.0),
    ];
    assert!(shape_geometry(&ring, &[], 0.0).is_err());
    assert!(shape_geometry(&[], &[], 0.0).is_err());

    let repeated = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 0.0),
    ];
    assert!(shape_geometry(&repeated, &[], 0.0).is_err());
}

#[test]
fn repeated_positions_are_merged() {
    let mut ring = square((0.0, 0.0), 1.0);
    let (first, second) = (ring[0], ring[1]);
    ring.insert(1, first);
    ring.insert(3, second);
    let mesh = shape_geometry(&ring, &[], 0.0).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert_close(mesh_area(&mesh), 4.0, 1e-4);
}

#[test]
fn square_outline_has_four_segments() {
    let mesh = shape_geometry(&square((0.0, 0.0), 1.0), &[], 0.0).unwrap();
    let outline = edges_geometry(&mesh, 1.0);
    // the diagonal between the two coplanar triangles is not part of the outline
    assert_eq!(outline.len(), 8);
    for segment in outline.chunks_exact(2) {
        let horizontal = segment[0][2] == segment[1][2];
        let vertical = segment[0][0] == segment[1][0];
        assert!(horizontal || vertical, "diagonal segment {segment:?}");
    }
}

#[test]
fn outline_traces_holes_too() {
    let mesh = shape_geometry(
        &square((0.0, 0.0), 5.0),
        &[square((0.0, 0.0), 2.0)],
        0.0,
    )
    .unwrap();
    assert_eq!(edges_geometry(&mesh, 1.0).len(), 16);
}

#[test]
fn folded_triangles_keep_their_crease() {
    let vertex = |x: f32, y: f32, z: f32| ModelVertex {
        position: [x, y, z],
        ..Default::default()
    };
    let mesh = Mesh::new(
        vec![
            vertex(0.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(0.0, 1.0, 0.0),
            vertex(1.0, 1.0, -1.0),
        ],
        vec![0, 1, 2, 2, 1, 3],
    );
    let outline = edges_geometry(&mesh, 1.0);
    // one crease plus four boundary edges
    assert_eq!(outline.len(), 10);
    assert_eq!(outline[0..2], [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    // a threshold wider than the fold hides the crease
    assert_eq!(edges_geometry(&mesh, 80.0).len(), 8);
}

#[test]
fn degenerate_triangles_produce_no_edges() {
    let mesh = Mesh::new(
        vec![
            ModelVertex::default(),
            ModelVertex {
                position: [1.0, 0.0, 0.0],
                ..Default::default()
            },
            ModelVertex {
                position: [2.0, 0.0, 0.0],
                ..Default::default()
            },
        ],
        vec![0, 1, 2],
    );
    assert!(edges_geometry(&mesh, 1.0).is_empty());
}

#[test]
fn tube_has_one_ring_per_path_point() {
    let path = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 1.0),
    ];
    let mesh = tube_geometry(&path, 0.1, 8);
    assert_eq!(mesh.vertices.len(), 3 * 9);
    assert_eq!(mesh.indices.len(), 2 * 8 * 6);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

    for vertex in &mesh.vertices[..9] {
        let distance = Point3::from(vertex.position).distance(path[0]);
        assert_close(distance, 0.1, 1e-5);
    }
    assert_eq!(mesh.vertices[0].tex_coords[1], 0.0);
    assert_close(mesh.vertices[2 * 9].tex_coords[1], 1.0, 1e-6);
}

#[test]
fn vertical_tube_rings_stay_level() {
    let path = [Point3::new(2.0, 0.0, 3.0), Point3::new(2.0, 4.0, 3.0)];
    let mesh = tube_geometry(&path, 0.5, 6);
    assert_eq!(mesh.vertices.len(), 2 * 7);
    for (ring, center) in mesh.vertices.chunks_exact(7).zip(path) {
        for vertex in ring {
            assert_close(vertex.position[1], center.y, 1e-5);
            assert_close(Point3::from(vertex.position).distance(center), 0.5, 1e-5);
        }
    }
}

#[test]
fn tube_clamps_radial_segments() {
    let path = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)];
    let mesh = tube_geometry(&path, 0.1, 1);
    assert_eq!(mesh.vertices.len(), 2 * 4);
}

#[test]
fn tube_of_a_single_point_is_empty() {
    assert!(tube_geometry(&[Point3::new(0.0, 0.0, 0.0)], 0.1, 8).is_empty());
    assert!(tube_geometry(&[], 0.1, 8).is_empty());
}

#[test]
fn disk_faces_up_at_elevation() {
    let mesh = disk_geometry(10.0, 16, -0.5);
    assert_eq!(mesh.vertices.len(), 18);
    assert_eq!(mesh.indices.len(), 48);
    assert!(mesh.vertices.iter().all(|v| v.position[1] == -0.5));
    for tri in mesh.triangles() {
        assert!(facing(&tri) > 0.0);
    }
    let full_area = std::f32::consts::PI * 100.0;
    // a 16-gon covers most of the circle
    assert!(mesh_area(&mesh) > full_area * 0.97);
    assert!(mesh_area(&mesh) <= full_area);
}

#[test]
fn polyline_keeps_point_order() {
    let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)];
    assert_eq!(polyline(&points), vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
}
