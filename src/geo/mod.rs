//! Geographic side of a map build.
//!
//! This module turns GeoJSON into typed features, picks the origin a build
//! is measured from and projects coordinates into scene units.

mod feature;
mod origin;
mod poi;
mod projection;
mod zones;

pub use feature::{FeatureKind, MapFeature, MapGeometry, PolygonRings, parse_feature_collection};
pub use origin::{CURRENT_POSITION_ID, DEFAULT_ORIGIN_ID, ResolvedOrigin, resolve_origin};
pub use poi::{Poi, PoiRegistry};
pub use projection::{EARTH_RADIUS, Projection};
pub use zones::Zone;
