use anyhow::bail;
use geo_types::Coord;

/// A named outline drawn without fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub name: String,
    pub ring: Vec<Coord<f64>>,
}

impl Zone {
    pub fn new(name: impl Into<String>, ring: Vec<Coord<f64>>) -> Self {
        Self {
            name: name.into(),
            ring,
        }
    }

    /// Builds a zone from interleaved `lat, lng, lat, lng, ...` values.
    ///
    /// Note the latitude-first order, which is the reverse of GeoJSON.
    pub fn from_flat_lat_lng(name: impl Into<String>, values: &[f64]) -> anyhow::Result<Self> {
        let name = name.into();
        if values.len() % 2 != 0 {
            bail!(
                "zone {name} has an odd number of values ({}), expected lat/lng pairs",
                values.len()
            );
        }
        let ring = values
            .chunks_exact(2)
            .map(|pair| Coord {
                x: pair[1],
                y: pair[0],
            })
            .collect();
        Ok(Self { name, ring })
    }
}
