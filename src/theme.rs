//! Named color presets for map scenes.
//!
//! A [`ThemePreset`] is picked once through configuration and expands into a
//! [`Palette`] covering every colored element the builder emits.

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use wgpu::Color;

/// Converts a `0xRRGGBB` literal into an opaque [`Color`].
pub const fn hex(rgb: u32) -> Color {
    Color {
        r: ((rgb >> 16) & 0xff) as f64 / 255.0,
        g: ((rgb >> 8) & 0xff) as f64 / 255.0,
        b: (rgb & 0xff) as f64 / 255.0,
        a: 1.0,
    }
}

/// The colors used for one map build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub points: Color,
    pub borders: Color,
    pub land: Color,
    pub water: Color,
    pub roads: Color,
    pub grass: Color,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Magenta labels over cyan outlines on a dark sea.
    #[default]
    Neon,
    Daylight,
    Midnight,
    Blueprint,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 4] = [
        ThemePreset::Neon,
        ThemePreset::Daylight,
        ThemePreset::Midnight,
        ThemePreset::Blueprint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Neon => "neon",
            ThemePreset::Daylight => "daylight",
            ThemePreset::Midnight => "midnight",
            ThemePreset::Blueprint => "blueprint",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemePreset::Neon => Palette {
                text: hex(0xed225d),
                points: hex(0xff00ff),
                borders: hex(0x81efff),
                land: hex(0x1b1b3a),
                water: hex(0x05051a),
                roads: hex(0xf7e733),
                grass: hex(0x2bff88),
            },
            ThemePreset::Daylight => Palette {
                text: hex(0x202020),
                points: hex(0xd7263d),
                borders: hex(0x7a7a7a),
                land: hex(0xf2efe9),
                water: hex(0xaad3df),
                roads: hex(0xffffff),
                grass: hex(0xc8facc),
            },
            ThemePreset::Midnight => Palette {
                text: hex(0xe0e0e0),
                points: hex(0xffb000),
                borders: hex(0x3c4a5c),
                land: hex(0x1d2733),
                water: hex(0x0e1621),
                roads: hex(0x56687e),
                grass: hex(0x1f3b2d),
            },
            ThemePreset::Blueprint => Palette {
                text: hex(0xffffff),
                points: hex(0xffffff),
                borders: hex(0xcfe8ff),
                land: hex(0x1f4e8c),
                water: hex(0x123668),
                roads: hex(0x9cc9ff),
                grass: hex(0x2a6bb0),
            },
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ThemePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| anyhow!("unknown theme preset '{s}'"))
    }
}
