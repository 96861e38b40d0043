use std::collections::BTreeMap;

use geo_types::Coord;

use super::origin::{CURRENT_POSITION_ID, DEFAULT_ORIGIN_ID};

/// A named location, stored with its original (unprojected) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Poi {
    pub id: String,
    pub lng: f64,
    pub lat: f64,
}

impl Poi {
    pub fn new(id: impl Into<String>, lng_lat: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            lng: lng_lat.x,
            lat: lng_lat.y,
        }
    }

    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// POIs of one build keyed by id.
///
/// Always contains the two reserved entries for the default origin and the
/// current position. A later registration with the same id replaces the
/// earlier one.
#[derive(Clone, Debug, PartialEq)]
pub struct PoiRegistry {
    entries: BTreeMap<String, Poi>,
}

impl PoiRegistry {
    pub fn new(default_origin: Coord<f64>, current_position: Coord<f64>) -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
        };
        registry.insert(Poi::new(DEFAULT_ORIGIN_ID, default_origin));
        registry.insert(Poi::new(CURRENT_POSITION_ID, current_position));
        registry
    }

    pub fn insert(&mut self, poi: Poi) -> Option<Poi> {
        self.entries.insert(poi.id.clone(), poi)
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Poi> {
        self.entries.values()
    }
}
