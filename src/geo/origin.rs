//! Origin resolution.
//!
//! Exactly one origin is active per build. It comes from, in order of
//! precedence: an externally supplied current position, the first feature
//! marked as origin, the configured default.

use anyhow::anyhow;
use geo_types::Coord;

use super::feature::MapFeature;

/// Reserved id of the configured fallback origin.
pub const DEFAULT_ORIGIN_ID: &str = "DEFAULT_ORIGIN";
/// Reserved id of the externally supplied current position.
pub const CURRENT_POSITION_ID: &str = "CURRENT_POSITION";

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOrigin {
    pub id: String,
    /// Longitude in `x`, latitude in `y`.
    pub origin: Coord<f64>,
}

pub fn resolve_origin(
    features: &[MapFeature],
    override_origin: Option<Coord<f64>>,
    default_origin: Coord<f64>,
) -> anyhow::Result<ResolvedOrigin> {
    if let Some(current) = override_origin {
        return Ok(ResolvedOrigin {
            id: CURRENT_POSITION_ID.to_string(),
            origin: current,
        });
    }

    let marked = features
        .iter()
        .enumerate()
        .find(|(_, feature)| feature.is_origin);
    if let Some((idx, feature)) = marked {
        let id = feature
            .id
            .clone()
            .unwrap_or_else(|| format!("origin-{idx}"));
        let origin = feature.geometry.first_coord().ok_or_else(|| {
            anyhow!(
                "origin feature {id} has no usable coordinates ({})",
                feature.geometry.type_name()
            )
        })?;
        return Ok(ResolvedOrigin { id, origin });
    }

    Ok(ResolvedOrigin {
        id: DEFAULT_ORIGIN_ID.to_string(),
        origin: default_origin,
    })
}
