//! Map configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file). Every key has a default so an empty environment yields a
//! usable [`MapConfig`].

use std::{fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Context, anyhow};
use geo_types::{Coord, coord};

use crate::theme::ThemePreset;

pub const ENV_ORIGIN_LNG: &str = "MAP_DEFAULT_ORIGIN_LNG";
pub const ENV_ORIGIN_LAT: &str = "MAP_DEFAULT_ORIGIN_LAT";
pub const ENV_THEME: &str = "MAP_THEME";
pub const ENV_FONT: &str = "MAP_FONT";
pub const ENV_WATER_TEXTURE: &str = "MAP_WATER_TEXTURE";
pub const ENV_SCALE: &str = "MAP_SCALE";
pub const ENV_LINE_STYLE: &str = "MAP_LINE_STYLE";
pub const ENV_ASSET_ROOT: &str = "MAP_ASSET_ROOT";

pub const DEFAULT_FONT: &str = "fonts/Orbitron-VariableFont_wght.ttf";
/// Scene units per metre: one unit covers 100 m.
pub const DEFAULT_SCALE: f64 = 0.01;
pub const DEFAULT_TUBE_RADIUS: f32 = 0.05;
pub const DEFAULT_TUBE_SEGMENTS: u32 = 8;

/// How LineString features are turned into primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineStyle {
    /// A single line strip through the projected points.
    Flat,
    /// A circular cross-section swept along the projected points.
    Tube { radius: f32, radial_segments: u32 },
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Tube {
            radius: DEFAULT_TUBE_RADIUS,
            radial_segments: DEFAULT_TUBE_SEGMENTS,
        }
    }
}

impl FromStr for LineStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "line" => Ok(LineStyle::Flat),
            "tube" => Ok(LineStyle::default()),
            other => Err(anyhow!("unknown line style '{other}', expected 'flat' or 'tube'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    /// Origin used when neither an override nor an origin-marked feature exists.
    pub default_origin: Coord<f64>,
    pub theme: ThemePreset,
    /// Font used for POI labels, relative to `asset_root`.
    pub font: String,
    /// Optional tiled texture for the water backdrop, relative to `asset_root`.
    pub water_texture: Option<String>,
    pub scale: f64,
    pub line_style: LineStyle,
    pub asset_root: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Downtown Miami
            default_origin: coord! { x: -80.1918, y: 25.7617 },
            theme: ThemePreset::default(),
            font: DEFAULT_FONT.to_string(),
            water_texture: None,
            scale: DEFAULT_SCALE,
            line_style: LineStyle::default(),
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl MapConfig {
    /// Reads the configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        if dotenvy::dotenv().is_err() {
            log::debug!("no .env file found, using process environment only");
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Missing or blank keys fall back to [`MapConfig::default`]; values that
    /// are present but cannot be parsed are reported as errors.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lng = parse_or(get(ENV_ORIGIN_LNG), ENV_ORIGIN_LNG, defaults.default_origin.x)?;
        let lat = parse_or(get(ENV_ORIGIN_LAT), ENV_ORIGIN_LAT, defaults.default_origin.y)?;
        let theme = match get(ENV_THEME) {
            Some(raw) => raw.parse().with_context(|| format!("invalid {ENV_THEME}"))?,
            None => defaults.theme,
        };
        let line_style = match get(ENV_LINE_STYLE) {
            Some(raw) => raw.parse().with_context(|| format!("invalid {ENV_LINE_STYLE}"))?,
            None => defaults.line_style,
        };
        let scale = parse_or(get(ENV_SCALE), ENV_SCALE, defaults.scale)?;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(anyhow!("invalid {ENV_SCALE}: must be a positive number, got {scale}"));
        }

        Ok(Self {
            default_origin: coord! { x: lng, y: lat },
            theme,
            font: get(ENV_FONT).unwrap_or(defaults.font),
            water_texture: get(ENV_WATER_TEXTURE),
            scale,
            line_style,
            asset_root: get(ENV_ASSET_ROOT)
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_root),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid {key} '{raw}': {e}")),
        None => Ok(default),
    }
}
