//! Geographic to scene coordinate projection.
//!
//! Uses an equirectangular approximation around the build origin, which is
//! accurate enough for city-sized maps. Planar `x` grows east and `y` grows
//! north; in the scene `y` becomes the `z` axis and elevation is `y` (Y up).
//!
//! Input is not validated. Longitudes and latitudes outside their usual
//! ranges, or non-finite values, produce unspecified results.

use cgmath::{Point3, Vector2};
use geo_types::Coord;

/// Mean earth radius in metres.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Projection around a fixed origin with a linear metre-to-unit scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    origin: Coord<f64>,
    scale: f64,
    lng_factor: f64,
}

impl Projection {
    pub fn new(origin: Coord<f64>, scale: f64) -> Self {
        Self {
            origin,
            scale,
            lng_factor: origin.y.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> Coord<f64> {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Planar offset of `lng_lat` from the origin, in scene units.
    pub fn project(&self, lng_lat: Coord<f64>) -> Vector2<f32> {
        let x = (lng_lat.x - self.origin.x).to_radians() * EARTH_RADIUS * self.lng_factor;
        let y = (lng_lat.y - self.origin.y).to_radians() * EARTH_RADIUS;
        Vector2::new((x * self.scale) as f32, (y * self.scale) as f32)
    }

    /// Inverse of [`Projection::project`].
    pub fn unproject(&self, planar: Vector2<f32>) -> Coord<f64> {
        let x = planar.x as f64 / self.scale;
        let y = planar.y as f64 / self.scale;
        Coord {
            x: self.origin.x + (x / (EARTH_RADIUS * self.lng_factor)).to_degrees(),
            y: self.origin.y + (y / EARTH_RADIUS).to_degrees(),
        }
    }

    /// Scene position of `lng_lat` lifted to `elevation`.
    pub fn to_world(&self, lng_lat: Coord<f64>, elevation: f32) -> Point3<f32> {
        let planar = self.project(lng_lat);
        Point3::new(planar.x, elevation, planar.y)
    }

    pub fn project_all(&self, coords: &[Coord<f64>]) -> Vec<Vector2<f32>> {
        coords.iter().map(|c| self.project(*c)).collect()
    }
}
