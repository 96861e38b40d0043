use cgmath::Vector2;
use flow_maps::{
    coord,
    geo::{EARTH_RADIUS, Projection},
};

use crate::common::test_utils::{HOME, assert_close};

mod common;

fn home_projection() -> Projection {
    Projection::new(coord! { x: HOME.0, y: HOME.1 }, 0.01)
}

#[test]
fn origin_projects_to_zero() {
    let projection = home_projection();
    let p = projection.project(coord! { x: HOME.0, y: HOME.1 });
    assert_eq!(p, Vector2::new(0.0, 0.0));
}

#[test]
fn projection_is_deterministic() {
    let projection = home_projection();
    let lng_lat = coord! { x: -80.186, y: 25.775 };
    assert_eq!(projection.project(lng_lat), projection.project(lng_lat));
    assert_eq!(
        Projection::new(coord! { x: HOME.0, y: HOME.1 }, 0.01).project(lng_lat),
        projection.project(lng_lat)
    );
}

#[test]
fn one_degree_north_is_one_arc_degree_of_earth() {
    let projection = home_projection();
    let p = projection.project(coord! { x: HOME.0, y: HOME.1 + 1.0 });
    let expected = (EARTH_RADIUS * 1f64.to_radians() * 0.01) as f32;
    assert_close(p.x, 0.0, 1e-4);
    assert_close(p.y, expected, 1e-2);
}

#[test]
fn east_is_positive_x_and_shrinks_with_latitude() {
    let at_equator = Projection::new(coord! { x: 0.0, y: 0.0 }, 1.0);
    let at_home = Projection::new(coord! { x: 0.0, y: HOME.1 }, 1.0);

    let east_equator = at_equator.project(coord! { x: 0.01, y: 0.0 });
    let east_home = at_home.project(coord! { x: 0.01, y: HOME.1 });

    assert!(east_equator.x > 0.0);
    assert!(east_home.x > 0.0);
    assert_close(
        east_home.x / east_equator.x,
        HOME.1.to_radians().cos() as f32,
        1e-4,
    );
}

#[test]
fn scale_is_linear() {
    let origin = coord! { x: HOME.0, y: HOME.1 };
    let lng_lat = coord! { x: -80.17, y: 25.79 };
    let single = Projection::new(origin, 0.01).project(lng_lat);
    let double = Projection::new(origin, 0.02).project(lng_lat);
    assert_close(double.x, single.x * 2.0, 1e-4);
    assert_close(double.y, single.y * 2.0, 1e-4);
}

#[test]
fn unproject_recovers_the_coordinate() {
    let projection = home_projection();
    let lng_lat = coord! { x: -80.175, y: 25.781 };
    let back = projection.unproject(projection.project(lng_lat));
    assert!((back.x - lng_lat.x).abs() < 1e-6, "lng {}", back.x);
    assert!((back.y - lng_lat.y).abs() < 1e-6, "lat {}", back.y);
}

#[test]
fn world_position_puts_north_on_z_and_elevation_on_y() {
    let projection = home_projection();
    let lng_lat = coord! { x: -80.18, y: 25.77 };
    let planar = projection.project(lng_lat);
    let world = projection.to_world(lng_lat, 2.0);
    assert_eq!(world.x, planar.x);
    assert_eq!(world.y, 2.0);
    assert_eq!(world.z, planar.y);
}
