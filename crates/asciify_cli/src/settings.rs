use asciify::{cached_char_aspect, GlyphRamp, RampPreset, RenderConfig};
use clap::{Args, ValueEnum};
use log::debug;

use crate::config::{aspect_multiplier, FileConfig};

#[derive(Args, Debug, Clone, Default)]
pub struct RenderSettings {
    /// Target column width
    #[arg(long)]
    pub width: Option<u16>,
    /// Vertical fine-tune; 12 keeps the measured proportions
    #[arg(long)]
    pub scale_y: Option<u32>,
    /// Glyph ramp preset
    #[arg(long, value_enum)]
    pub preset: Option<PresetChoice>,
    /// Custom glyph ramp, densest first (overrides --preset)
    #[arg(long)]
    pub charset: Option<String>,
    /// Map bright pixels to the dense end of the ramp
    #[arg(long, overrides_with = "no_invert")]
    pub invert: bool,
    /// Turn off `invert` even when the config file sets it
    #[arg(long, overrides_with = "invert")]
    pub no_invert: bool,
    /// Colour each glyph with its sampled pixel
    #[arg(long, overrides_with = "no_colorize")]
    pub colorize: bool,
    /// Turn off `colorize` even when the config file sets it
    #[arg(long, overrides_with = "colorize")]
    pub no_colorize: bool,
    /// Boost local contrast before mapping
    #[arg(long, overrides_with = "no_edge_boost")]
    pub edge_boost: bool,
    /// Turn off `edge_boost` even when the config file sets it
    #[arg(long, overrides_with = "edge_boost")]
    pub no_edge_boost: bool,
    /// Character width / line height; measured from the terminal when omitted
    #[arg(long)]
    pub char_aspect: Option<f32>,
    /// Available display width in pixels, used to size exported glyphs
    #[arg(long)]
    pub panel_width: Option<f32>,
    /// Available display height in pixels
    #[arg(long)]
    pub panel_height: Option<f32>,
    /// Integer magnification for PNG/JPEG export
    #[arg(long)]
    pub magnification: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetChoice {
    Complex,
    Classic,
    Blocks,
    Dots,
}

impl PresetChoice {
    fn to_preset(self) -> RampPreset {
        match self {
            PresetChoice::Complex => RampPreset::Complex,
            PresetChoice::Classic => RampPreset::Classic,
            PresetChoice::Blocks => RampPreset::Blocks,
            PresetChoice::Dots => RampPreset::Dots,
        }
    }
}

/// Flags layered over the config file, ready for the pipeline.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub config: RenderConfig,
    pub char_aspect: f32,
    pub panel_width: f32,
    pub panel_height: f32,
    pub magnification: u32,
}

impl RenderSettings {
    pub fn resolve(&self, file: &FileConfig) -> Resolved {
        let render = &file.render;
        let display = &file.display;

        let ramp = self.ramp(file);
        let config = RenderConfig {
            columns: self.width.unwrap_or(render.columns),
            aspect_multiplier: aspect_multiplier(self.scale_y.unwrap_or(render.scale_y)),
            ramp,
            invert: toggle(self.invert, self.no_invert, render.invert),
            colorize: toggle(self.colorize, self.no_colorize, render.colorize),
            edge_boost: toggle(self.edge_boost, self.no_edge_boost, render.edge_boost),
        };

        let char_aspect = match self.char_aspect.or(render.char_aspect) {
            Some(aspect) => aspect,
            None => cached_char_aspect(),
        };
        debug!("resolved render settings {config:?} with char aspect {char_aspect}");

        Resolved {
            config,
            char_aspect,
            panel_width: self.panel_width.unwrap_or(display.panel_width),
            panel_height: self.panel_height.unwrap_or(display.panel_height),
            magnification: self.magnification.unwrap_or(display.magnification),
        }
    }

    // Flag charset, flag preset, file charset, file preset. An empty
    // charset always means the classic preset.
    fn ramp(&self, file: &FileConfig) -> GlyphRamp {
        let charset = match (&self.charset, self.preset) {
            (Some(charset), _) => Some(charset.clone()),
            (None, Some(_)) => None,
            (None, None) => file.render.charset.clone(),
        };

        match charset {
            Some(charset) if charset.is_empty() => GlyphRamp::classic(),
            Some(charset) => GlyphRamp::new(charset),
            None => match self.preset {
                Some(choice) => choice.to_preset().ramp(),
                None => RampPreset::from_name(&file.render.preset).ramp(),
            },
        }
    }
}

// `--flag` and `--no-flag` both beat the file; clap keeps only the last one given.
fn toggle(on: bool, off: bool, file: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => file,
    }
}
