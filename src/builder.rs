//! The map scene build pass.
//!
//! [`SceneBuilder`] runs once per loaded dataset: it resolves the origin,
//! projects every feature around it and collects the generated primitives
//! under one root node. The build is synchronous and all-or-nothing; a
//! malformed feature aborts it with an error naming the feature.
//!
//! Node naming inside the returned group:
//!
//! | node | name |
//! |---|---|
//! | water backdrop | `water` |
//! | polygon fill / outline | `land:<id>` / `border:<id>` |
//! | line string | `road:<id>` |
//! | POI label | `label:<id>` |
//! | all POI markers | `poi-markers` |
//! | legacy zone outline | `zone:<name>` |
//!
//! Features without an id are named `feature-<index>`; the parts of a
//! MultiPolygon get a `#<part>` suffix.

use anyhow::{Context, anyhow};
use cgmath::{Point3, Vector3};
use geo_types::Coord;
use geojson::FeatureCollection;

use crate::{
    config::{LineStyle, MapConfig},
    data_structures::{
        instance::Instance,
        model::{Anchor, Label, Lines, Material, Points, Primitive, Topology},
        scene_graph::{self, ContainerNode, PrimitiveNode, SceneNode},
    },
    geo::{
        FeatureKind, MapFeature, MapGeometry, Poi, PoiRegistry, Projection, ResolvedOrigin, Zone,
        parse_feature_collection, resolve_origin,
    },
    resources::AssetRequest,
    shapes,
    theme::Palette,
};

pub const LAND_ELEVATION: f32 = 0.0;
/// Outlines sit slightly above the fill they trace.
pub const BORDER_OFFSET: f32 = 0.01;
pub const ROAD_ELEVATION: f32 = 0.02;
pub const WATER_ELEVATION: f32 = -0.5;
pub const LABEL_HEIGHT: f32 = 2.0;
pub const LABEL_FONT_SIZE: f32 = 1.0;
pub const MARKER_SIZE: f32 = 0.5;
pub const BORDER_WIDTH: f32 = 2.0;
pub const ROAD_WIDTH: f32 = 1.0;
pub const WATER_RADIUS: f32 = 2_000.0;
pub const WATER_SEGMENTS: u32 = 128;
pub const WATER_TEXTURE_REPEAT: f32 = 400.0;
/// Faces meeting at a sharper angle than this get an outline between them.
pub const EDGE_THRESHOLD_DEG: f32 = 1.0;

pub const ROOT_NAME: &str = "map";
pub const WATER_NAME: &str = "water";
pub const MARKERS_NAME: &str = "poi-markers";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// The current position. When set it becomes the origin of the build.
    pub override_origin: Option<Coord<f64>>,
    /// Outline-only zones drawn in addition to the features.
    pub zones: Vec<Zone>,
}

/// Everything one build hands back to the caller.
#[derive(Debug)]
pub struct MapScene {
    pub group: Box<dyn SceneNode>,
    pub origin: ResolvedOrigin,
    pub projection: Projection,
    pub pois: PoiRegistry,
    /// Fonts and textures the scene refers to, for the caller to load.
    pub assets: Vec<AssetRequest>,
}

impl MapScene {
    pub fn labels(&self) -> Vec<&Label> {
        scene_graph::primitives(self.group.as_ref())
            .into_iter()
            .filter_map(|(_, primitive)| primitive.as_label())
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&dyn SceneNode> {
        scene_graph::find_by_name(self.group.as_ref(), name)
    }
}

/// Primitives and POI produced by a single feature.
#[derive(Debug, Default)]
pub struct FeatureOutput {
    pub nodes: Vec<Box<dyn SceneNode>>,
    pub poi: Option<Poi>,
    /// Scene position of the POI marker, gathered into `poi-markers`.
    pub marker: Option<Point3<f32>>,
}

impl FeatureOutput {
    fn from_nodes(nodes: Vec<Box<dyn SceneNode>>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }
}

pub struct SceneBuilder {
    config: MapConfig,
    palette: Palette,
}

impl SceneBuilder {
    pub fn new(config: MapConfig) -> Self {
        let palette = config.theme.palette();
        Self { config, palette }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn build_geojson(&self, geojson: &str, options: &BuildOptions) -> anyhow::Result<MapScene> {
        let collection = parse_feature_collection(geojson)?;
        self.build(&collection, options)
    }

    pub fn build(
        &self,
        collection: &FeatureCollection,
        options: &BuildOptions,
    ) -> anyhow::Result<MapScene> {
        let features = collection
            .features
            .iter()
            .enumerate()
            .map(|(idx, feature)| {
                MapFeature::try_from(feature).with_context(|| format!("invalid feature #{idx}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        self.build_features(&features, options)
    }

    pub fn build_features(
        &self,
        features: &[MapFeature],
        options: &BuildOptions,
    ) -> anyhow::Result<MapScene> {
        let default_origin = self.config.default_origin;
        let origin = resolve_origin(features, options.override_origin, default_origin)?;
        log::info!(
            "map origin {} at ({}, {})",
            origin.id,
            origin.origin.x,
            origin.origin.y
        );
        let projection = Projection::new(origin.origin, self.config.scale);
        let mut pois = PoiRegistry::new(
            default_origin,
            options.override_origin.unwrap_or(default_origin),
        );

        let mut root = ContainerNode::new(ROOT_NAME);
        root.add_child(self.build_water());
        for zone in &options.zones {
            if let Some(outline) = self.build_zone_outline(zone, &projection) {
                root.add_child(outline);
            }
        }

        let mut markers = Vec::new();
        for (idx, feature) in features.iter().enumerate() {
            let output = self
                .build_feature(feature, idx, &projection)
                .with_context(|| format!("failed to build feature #{idx}"))?;
            for node in output.nodes {
                root.add_child(node);
            }
            if let Some(poi) = output.poi {
                if let Some(previous) = pois.insert(poi) {
                    log::warn!("POI {} registered more than once, keeping the last", previous.id);
                }
            }
            markers.extend(output.marker);
        }

        if !markers.is_empty() {
            root.add_child(
                PrimitiveNode::new(
                    MARKERS_NAME,
                    Primitive::Points(Points {
                        positions: markers.into_iter().map(Into::into).collect(),
                        color: self.palette.points,
                        size: MARKER_SIZE,
                    }),
                )
                .boxed(),
            );
        }
        root.update_world_transform_all();

        let mut assets = vec![AssetRequest::font(&self.config.font)];
        if let Some(texture) = &self.config.water_texture {
            assets.push(AssetRequest::texture(texture));
        }

        log::info!(
            "built map scene: {} top-level nodes, {} POIs",
            root.get_children().len(),
            pois.len()
        );
        Ok(MapScene {
            group: Box::new(root),
            origin,
            projection,
            pois,
            assets,
        })
    }

    /// Builds the primitives of one feature. `index` names features without an id.
    pub fn build_feature(
        &self,
        feature: &MapFeature,
        index: usize,
        projection: &Projection,
    ) -> anyhow::Result<FeatureOutput> {
        let name = feature
            .id
            .clone()
            .unwrap_or_else(|| format!("feature-{index}"));
        log::debug!("building {} {}", feature.geometry.type_name(), name);

        match &feature.geometry {
            MapGeometry::Point(lng_lat) => {
                let id = feature
                    .id
                    .as_deref()
                    .ok_or_else(|| anyhow!("Point feature #{index} has no id"))?;
                Ok(self.build_point(id, *lng_lat, projection))
            }
            MapGeometry::LineString(line) => Ok(FeatureOutput::from_nodes(
                self.build_line(&name, feature.kind, line, projection)
                    .into_iter()
                    .collect(),
            )),
            MapGeometry::Polygon { exterior, holes } => self
                .build_polygon(&name, feature.kind, exterior, holes, projection)
                .map(FeatureOutput::from_nodes),
            MapGeometry::MultiPolygon(polygons) => {
                let mut nodes = Vec::new();
                for (part, (exterior, holes)) in polygons.iter().enumerate() {
                    let part_name = format!("{name}#{part}");
                    nodes.extend(self.build_polygon(
                        &part_name,
                        feature.kind,
                        exterior,
                        holes,
                        projection,
                    )?);
                }
                Ok(FeatureOutput::from_nodes(nodes))
            }
            MapGeometry::Unsupported(type_name) => {
                log::debug!("skipping {name}: {type_name} geometries are not rendered");
                Ok(FeatureOutput::default())
            }
        }
    }

    fn build_point(&self, id: &str, lng_lat: Coord<f64>, projection: &Projection) -> FeatureOutput {
        let position = projection.to_world(lng_lat, LAND_ELEVATION);
        let label = PrimitiveNode::with_transform(
            format!("label:{id}"),
            Primitive::Label(Label {
                text: id.to_string(),
                font: self.config.font.clone(),
                font_size: LABEL_FONT_SIZE,
                anchor: Anchor::Center,
                color: self.palette.text,
                billboard: true,
            }),
            Instance::from(Vector3::new(position.x, LABEL_HEIGHT, position.z)),
        );

        FeatureOutput {
            nodes: vec![label.boxed()],
            poi: Some(Poi::new(id, lng_lat)),
            marker: Some(position),
        }
    }

    fn build_line(
        &self,
        name: &str,
        kind: FeatureKind,
        line: &[Coord<f64>],
        projection: &Projection,
    ) -> Option<Box<dyn SceneNode>> {
        if line.len() < 2 {
            log::warn!("line {name} has {} position(s), skipping", line.len());
            return None;
        }
        let path: Vec<Point3<f32>> = line
            .iter()
            .map(|c| projection.to_world(*c, ROAD_ELEVATION))
            .collect();
        let color = match kind {
            FeatureKind::Water => self.palette.water,
            _ => self.palette.roads,
        };

        let primitive = match self.config.line_style {
            LineStyle::Flat => Primitive::Lines(Lines {
                positions: shapes::polyline(&path),
                topology: Topology::LineStrip,
                color,
                width: ROAD_WIDTH,
            }),
            LineStyle::Tube {
                radius,
                radial_segments,
            } => Primitive::Mesh {
                mesh: shapes::tube_geometry(&path, radius, radial_segments),
                material: Material::Color(color),
            },
        };
        Some(PrimitiveNode::new(format!("road:{name}"), primitive).boxed())
    }

    fn build_polygon(
        &self,
        name: &str,
        kind: FeatureKind,
        exterior: &[Coord<f64>],
        holes: &[Vec<Coord<f64>>],
        projection: &Projection,
    ) -> anyhow::Result<Vec<Box<dyn SceneNode>>> {
        let exterior = projection.project_all(exterior);
        let holes: Vec<_> = holes.iter().map(|hole| projection.project_all(hole)).collect();
        let mesh = shapes::shape_geometry(&exterior, &holes, LAND_ELEVATION)
            .with_context(|| format!("polygon {name}"))?;
        if mesh.is_empty() {
            log::warn!("polygon {name} has no area, skipping");
            return Ok(vec![]);
        }

        let outline = shapes::edges_geometry(&mesh, EDGE_THRESHOLD_DEG);
        let fill = match kind {
            FeatureKind::Grass => self.palette.grass,
            FeatureKind::Water => self.palette.water,
            FeatureKind::Land | FeatureKind::Road => self.palette.land,
        };

        Ok(vec![
            PrimitiveNode::new(
                format!("land:{name}"),
                Primitive::Mesh {
                    mesh,
                    material: Material::Color(fill),
                },
            )
            .boxed(),
            PrimitiveNode::with_transform(
                format!("border:{name}"),
                Primitive::Lines(Lines {
                    positions: outline,
                    topology: Topology::LineList,
                    color: self.palette.borders,
                    width: BORDER_WIDTH,
                }),
                Instance::from(Vector3::new(0.0, BORDER_OFFSET, 0.0)),
            )
            .boxed(),
        ])
    }

    /// Outline of a zone as a closed loop of segments, without fill. A zone with only
    /// two distinct positions becomes one segment.
    pub fn build_zone_outline(
        &self,
        zone: &Zone,
        projection: &Projection,
    ) -> Option<Box<dyn SceneNode>> {
        let mut ring: Vec<Point3<f32>> = zone
            .ring
            .iter()
            .map(|c| projection.to_world(*c, LAND_ELEVATION + BORDER_OFFSET))
            .collect();
        ring.dedup();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 2 {
            log::warn!("zone {} has fewer than 2 positions, skipping", zone.name);
            return None;
        }

        // two positions close into a single segment, not a loop
        let segments = if ring.len() == 2 { 1 } else { ring.len() };
        let positions: Vec<[f32; 3]> = ring
            .iter()
            .zip(ring.iter().cycle().skip(1))
            .take(segments)
            .flat_map(|(from, to)| [[from.x, from.y, from.z], [to.x, to.y, to.z]])
            .collect();
        Some(
            PrimitiveNode::new(
                format!("zone:{}", zone.name),
                Primitive::Lines(Lines {
                    positions,
                    topology: Topology::LineList,
                    color: self.palette.borders,
                    width: BORDER_WIDTH,
                }),
            )
            .boxed(),
        )
    }

    fn build_water(&self) -> Box<dyn SceneNode> {
        let material = match &self.config.water_texture {
            Some(path) => Material::Texture {
                path: path.clone(),
                repeat: [WATER_TEXTURE_REPEAT, WATER_TEXTURE_REPEAT],
                fallback: self.palette.water,
            },
            None => Material::Color(self.palette.water),
        };
        PrimitiveNode::with_transform(
            WATER_NAME,
            Primitive::Mesh {
                mesh: shapes::disk_geometry(WATER_RADIUS, WATER_SEGMENTS, 0.0),
                material,
            },
            Instance::from(Vector3::new(0.0, WATER_ELEVATION, 0.0)),
        )
        .boxed()
    }
}
