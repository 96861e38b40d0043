use std::{collections::HashMap, path::PathBuf};

use flow_maps::{
    LineStyle, MapConfig, ThemePreset, coord,
    config::{
        DEFAULT_FONT, DEFAULT_SCALE, ENV_ASSET_ROOT, ENV_FONT, ENV_LINE_STYLE, ENV_ORIGIN_LAT,
        ENV_ORIGIN_LNG, ENV_SCALE, ENV_THEME, ENV_WATER_TEXTURE,
    },
    geo::Zone,
    theme::hex,
};

fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<MapConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    MapConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_variables() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config, MapConfig::default());
    assert_eq!(config.default_origin, coord! { x: -80.1918, y: 25.7617 });
    assert_eq!(config.theme, ThemePreset::Neon);
    assert_eq!(config.font, DEFAULT_FONT);
    assert_eq!(config.water_texture, None);
    assert_eq!(config.scale, DEFAULT_SCALE);
    assert!(matches!(config.line_style, LineStyle::Tube { .. }));
}

#[test]
fn every_variable_is_read() {
    let config = config_from(&[
        (ENV_ORIGIN_LNG, "-0.1276"),
        (ENV_ORIGIN_LAT, " 51.5072 "),
        (ENV_THEME, "Blueprint"),
        (ENV_FONT, "fonts/Inter.ttf"),
        (ENV_WATER_TEXTURE, "textures/waves.jpg"),
        (ENV_SCALE, "0.5"),
        (ENV_LINE_STYLE, "flat"),
        (ENV_ASSET_ROOT, "static"),
    ])
    .unwrap();

    assert_eq!(config.default_origin, coord! { x: -0.1276, y: 51.5072 });
    assert_eq!(config.theme, ThemePreset::Blueprint);
    assert_eq!(config.font, "fonts/Inter.ttf");
    assert_eq!(config.water_texture.as_deref(), Some("textures/waves.jpg"));
    assert_eq!(config.scale, 0.5);
    assert_eq!(config.line_style, LineStyle::Flat);
    assert_eq!(config.asset_root, PathBuf::from("static"));
}

#[test]
fn blank_values_count_as_missing() {
    let config = config_from(&[(ENV_WATER_TEXTURE, ""), (ENV_THEME, "  ")]).unwrap();
    assert_eq!(config.water_texture, None);
    assert_eq!(config.theme, ThemePreset::Neon);
}

#[test]
fn malformed_values_are_errors() {
    let err = config_from(&[(ENV_ORIGIN_LNG, "west")]).unwrap_err();
    assert!(err.to_string().contains(ENV_ORIGIN_LNG), "{err}");

    let err = config_from(&[(ENV_THEME, "sepia")]).unwrap_err();
    assert!(format!("{err:#}").contains("sepia"), "{err:#}");

    assert!(config_from(&[(ENV_LINE_STYLE, "dashed")]).is_err());
    assert!(config_from(&[(ENV_SCALE, "0")]).is_err());
    assert!(config_from(&[(ENV_SCALE, "-1")]).is_err());
    assert!(config_from(&[(ENV_SCALE, "NaN")]).is_err());
}

#[test]
fn line_style_names() {
    assert_eq!("line".parse::<LineStyle>().unwrap(), LineStyle::Flat);
    assert_eq!("TUBE".parse::<LineStyle>().unwrap(), LineStyle::default());
}

#[test]
fn theme_names_parse_back() {
    for preset in ThemePreset::ALL {
        assert_eq!(preset.to_string().parse::<ThemePreset>().unwrap(), preset);
    }
    assert_eq!(" MIDNIGHT ".parse::<ThemePreset>().unwrap(), ThemePreset::Midnight);
}

#[test]
fn neon_palette_matches_the_classic_look() {
    let palette = ThemePreset::Neon.palette();
    assert_eq!(palette.text, hex(0xed225d));
    assert_eq!(palette.points, hex(0xff00ff));
    assert_eq!(palette.borders, hex(0x81efff));
}

#[test]
fn presets_differ() {
    let palettes: Vec<_> = ThemePreset::ALL.iter().map(|p| p.palette()).collect();
    for (i, a) in palettes.iter().enumerate() {
        for b in &palettes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn hex_colors_are_opaque() {
    let color = hex(0xff8000);
    assert_eq!(color.r, 1.0);
    assert_eq!(color.g, 128.0 / 255.0);
    assert_eq!(color.b, 0.0);
    assert_eq!(color.a, 1.0);
}

#[test]
fn zones_read_latitude_first() {
    let zone = Zone::from_flat_lat_lng("wynwood", &[25.80, -80.20, 25.81, -80.19]).unwrap();
    assert_eq!(zone.name, "wynwood");
    assert_eq!(
        zone.ring,
        vec![coord! { x: -80.20, y: 25.80 }, coord! { x: -80.19, y: 25.81 }]
    );
    assert!(Zone::from_flat_lat_lng("broken", &[25.80, -80.20, 25.81]).is_err());
}
