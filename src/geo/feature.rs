//! Typed view of GeoJSON features.

use anyhow::{Context, anyhow, bail};
use geo_types::Coord;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value, feature::Id};
use serde_json::Value as JsonValue;

/// Exterior ring followed by its holes.
pub type PolygonRings = (Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>);

/// What a feature's fill represents, read from its `kind` property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeatureKind {
    #[default]
    Land,
    Grass,
    Water,
    Road,
}

impl FeatureKind {
    fn from_property(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("grass" | "park" | "garden" | "forest") => FeatureKind::Grass,
            Some("water" | "lake" | "river" | "pond") => FeatureKind::Water,
            Some("road" | "street" | "highway" | "path") => FeatureKind::Road,
            _ => FeatureKind::Land,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapGeometry {
    Point(Coord<f64>),
    LineString(Vec<Coord<f64>>),
    Polygon {
        exterior: Vec<Coord<f64>>,
        holes: Vec<Vec<Coord<f64>>>,
    },
    MultiPolygon(Vec<PolygonRings>),
    /// Any GeoJSON geometry type the builder does not render, by name.
    Unsupported(&'static str),
}

impl MapGeometry {
    /// The first position of the geometry, used when a feature marks the origin.
    pub fn first_coord(&self) -> Option<Coord<f64>> {
        match self {
            MapGeometry::Point(c) => Some(*c),
            MapGeometry::LineString(line) => line.first().copied(),
            MapGeometry::Polygon { exterior, .. } => exterior.first().copied(),
            MapGeometry::MultiPolygon(polygons) => {
                polygons.first().and_then(|(ext, _)| ext.first().copied())
            }
            MapGeometry::Unsupported(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MapGeometry::Point(_) => "Point",
            MapGeometry::LineString(_) => "LineString",
            MapGeometry::Polygon { .. } => "Polygon",
            MapGeometry::MultiPolygon(_) => "MultiPolygon",
            MapGeometry::Unsupported(name) => name,
        }
    }
}

/// One feature of the input collection with the properties the builder reads.
#[derive(Clone, Debug, PartialEq)]
pub struct MapFeature {
    /// `id` property, falling back to the GeoJSON feature id.
    pub id: Option<String>,
    /// Set when the `origin` property is `true`.
    pub is_origin: bool,
    pub kind: FeatureKind,
    pub geometry: MapGeometry,
}

impl MapFeature {
    pub fn new(id: Option<&str>, geometry: MapGeometry) -> Self {
        Self {
            id: id.map(str::to_string),
            is_origin: false,
            kind: FeatureKind::default(),
            geometry,
        }
    }

    pub fn with_origin(mut self, is_origin: bool) -> Self {
        self.is_origin = is_origin;
        self
    }

    pub fn with_kind(mut self, kind: FeatureKind) -> Self {
        self.kind = kind;
        self
    }
}

impl TryFrom<&Feature> for MapFeature {
    type Error = anyhow::Error;

    fn try_from(feature: &Feature) -> Result<Self, Self::Error> {
        let props = feature.properties.as_ref();
        let id = props
            .and_then(|p| p.get("id"))
            .and_then(json_to_id)
            .or_else(|| {
                feature.id.as_ref().map(|id| match id {
                    Id::String(s) => s.clone(),
                    Id::Number(n) => n.to_string(),
                })
            });
        let is_origin = props
            .and_then(|p| p.get("origin"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        let kind = FeatureKind::from_property(
            props.and_then(|p| p.get("kind")).and_then(JsonValue::as_str),
        );

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| anyhow!("feature {} has no geometry", id.as_deref().unwrap_or("<unnamed>")))?;
        let geometry = convert_geometry(geometry)
            .with_context(|| format!("feature {}", id.as_deref().unwrap_or("<unnamed>")))?;

        Ok(Self {
            id,
            is_origin,
            kind,
            geometry,
        })
    }
}

/// Parses GeoJSON text into a feature collection.
///
/// A bare `Feature` is accepted as a collection of one; a bare geometry is
/// rejected since it carries no properties.
pub fn parse_feature_collection(geojson: &str) -> anyhow::Result<FeatureCollection> {
    let parsed: GeoJson = geojson.parse().context("failed to parse GeoJSON")?;
    match parsed {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Feature(f) => Ok(FeatureCollection {
            bbox: None,
            features: vec![f],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => bail!("expected a FeatureCollection, got a bare geometry"),
    }
}

fn json_to_id(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_coord(position: &[f64]) -> anyhow::Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => bail!("position needs longitude and latitude, got {} value(s)", position.len()),
    }
}

fn to_line(positions: &[Vec<f64>]) -> anyhow::Result<Vec<Coord<f64>>> {
    positions.iter().map(|p| to_coord(p)).collect()
}

fn to_rings(rings: &[Vec<Vec<f64>>]) -> anyhow::Result<PolygonRings> {
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| anyhow!("polygon has no rings"))?;
    let exterior = to_line(exterior)?;
    let holes = holes
        .iter()
        .map(|ring| to_line(ring))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((exterior, holes))
}

fn convert_geometry(geometry: &Geometry) -> anyhow::Result<MapGeometry> {
    let converted = match &geometry.value {
        Value::Point(position) => MapGeometry::Point(to_coord(position)?),
        Value::LineString(line) => MapGeometry::LineString(to_line(line)?),
        Value::Polygon(rings) => {
            let (exterior, holes) = to_rings(rings)?;
            MapGeometry::Polygon { exterior, holes }
        }
        Value::MultiPolygon(polygons) => MapGeometry::MultiPolygon(
            polygons
                .iter()
                .map(|rings| to_rings(rings))
                .collect::<anyhow::Result<_>>()?,
        ),
        Value::MultiPoint(_) => MapGeometry::Unsupported("MultiPoint"),
        Value::MultiLineString(_) => MapGeometry::Unsupported("MultiLineString"),
        Value::GeometryCollection(_) => MapGeometry::Unsupported("GeometryCollection"),
    };
    Ok(converted)
}
