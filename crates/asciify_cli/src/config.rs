//! Optional TOML configuration, merged under the command-line flags.
//!
//! ```toml
//! [render]
//! columns = 160
//! scale_y = 12
//! preset = "complex"
//! colorize = true
//!
//! [display]
//! panel_width = 1200
//! panel_height = 800
//! magnification = 2
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Slider value meaning an aspect multiplier of exactly 1.
pub const SCALE_Y_UNIT: u32 = 12;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub render: RenderSection,
    pub display: DisplaySection,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub columns: u16,
    pub scale_y: u32,
    pub preset: String,
    pub charset: Option<String>,
    pub invert: bool,
    pub colorize: bool,
    pub edge_boost: bool,
    pub char_aspect: Option<f32>,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            columns: 120,
            scale_y: SCALE_Y_UNIT,
            preset: "classic".into(),
            charset: None,
            invert: false,
            colorize: false,
            edge_boost: false,
            char_aspect: None,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    /// Room available for the grid, in pixels, net of any chrome.
    pub panel_width: f32,
    pub panel_height: f32,
    pub magnification: u32,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { panel_width: 1200.0, panel_height: 800.0, magnification: 2 }
    }
}

impl FileConfig {
    /// Read and parse `path`. A path that was asked for but is missing is
    /// an error; absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::parse(&content).with_context(|| format!("failed to parse config file {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Aspect multiplier for a fine-tune slider value; zero means the default.
pub fn aspect_multiplier(scale_y: u32) -> f32 {
    let scale_y = if scale_y == 0 { SCALE_Y_UNIT } else { scale_y };
    scale_y as f32 / SCALE_Y_UNIT as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = FileConfig::parse(
            "[render]\ncolumns = 64\ncolorize = true\n\n[display]\nmagnification = 3\n",
        )
        .unwrap();
        assert_eq!(config.render.columns, 64);
        assert!(config.render.colorize);
        assert_eq!(config.render.scale_y, SCALE_Y_UNIT);
        assert_eq!(config.display.magnification, 3);
        assert_eq!(config.display.panel_width, 1200.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[render]\ncolumnz = 3\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciify.toml");
        std::fs::write(&path, "[render]\npreset = \"blocks\"\n").unwrap();
        assert_eq!(FileConfig::load(&path).unwrap().render.preset, "blocks");
    }

    #[test]
    fn scale_y_maps_to_multiplier() {
        assert_eq!(aspect_multiplier(12), 1.0);
        assert_eq!(aspect_multiplier(18), 1.5);
        assert_eq!(aspect_multiplier(0), 1.0);
    }
}
