mod ascii;
mod image_pipeline;
pub mod present;
pub mod schedule;
pub mod session;

use std::path::Path;
use std::time::Instant;

use log::debug;

pub use ascii::{
    fit::{fit_scale, FitScale, BASE_LINE_HEIGHT, MIN_LINE_HEIGHT},
    gradient::{GlyphRamp, RampPreset},
    grid::{Cell, CellGrid},
    mapping::GlyphMapper,
};
pub use image_pipeline::{
    adjust::{boost_contrast, luma, pre_adjust, push_from_midtone},
    loader::SourceImage,
    metrics::{
        cached_char_aspect, measure_char_aspect, FixedProbe, MetricsProbe, TerminalProbe,
        DEFAULT_CHAR_ASPECT,
    },
    resize::{resample, TargetGeometry, MAX_GRID_CELLS},
};
pub use schedule::{Debouncer, DEFAULT_QUIESCENCE};
pub use session::Session;

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source image has zero width or height")]
    EmptySource,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{columns}x{rows} exceeds the size limit of {limit}")]
    ResourceExhaustion { columns: u64, rows: u64, limit: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in cells.
    pub columns: u16,
    /// User fine-tune applied on top of the measured character aspect.
    pub aspect_multiplier: f32,
    pub ramp: GlyphRamp,
    pub invert: bool,
    /// Presentation hint only; cells always carry their colour.
    pub colorize: bool,
    /// Apply the contrast booster before glyph mapping.
    pub edge_boost: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            aspect_multiplier: 1.0,
            ramp: GlyphRamp::classic(),
            invert: false,
            colorize: false,
            edge_boost: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), AsciiError> {
        if self.columns == 0 {
            return Err(AsciiError::InvalidConfig("columns must be at least 1".into()));
        }
        if !(self.aspect_multiplier.is_finite() && self.aspect_multiplier > 0.0) {
            return Err(AsciiError::InvalidConfig(format!(
                "aspect multiplier must be positive, got {}",
                self.aspect_multiplier
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AsciiRenderer {
    char_aspect: f32,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_ASPECT)
    }
}

impl AsciiRenderer {
    pub fn new(char_aspect: f32) -> Self {
        Self { char_aspect }
    }

    pub fn char_aspect(&self) -> f32 {
        self.char_aspect
    }

    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        config: &RenderConfig,
    ) -> Result<CellGrid, AsciiError> {
        let source = SourceImage::open(path)?;
        self.render(Some(&source), config)
    }

    pub fn render(
        &self,
        source: Option<&SourceImage>,
        config: &RenderConfig,
    ) -> Result<CellGrid, AsciiError> {
        Ok(self.prepare(source, config)?.compute())
    }

    /// Validate the configuration and size the grid without touching pixels.
    ///
    /// Without a source this succeeds and the prepared render yields the
    /// empty grid.
    pub fn prepare<'a>(
        &self,
        source: Option<&'a SourceImage>,
        config: &RenderConfig,
    ) -> Result<PreparedRender<'a>, AsciiError> {
        let Some(source) = source else {
            return Ok(PreparedRender { plan: None });
        };

        config.validate()?;
        let (width, height) = source.dimensions();
        let geometry = TargetGeometry::derive(
            config.columns,
            width,
            height,
            self.char_aspect,
            config.aspect_multiplier,
        )?;
        debug!(
            "sized {}x{} source to {}x{} cells (char aspect {}, multiplier {})",
            width,
            height,
            geometry.columns,
            geometry.rows,
            self.char_aspect,
            config.aspect_multiplier
        );

        Ok(PreparedRender {
            plan: Some(RenderPlan {
                source,
                geometry,
                mapper: GlyphMapper::new(config.ramp.clone(), config.invert),
                edge_boost: config.edge_boost,
            }),
        })
    }
}

struct RenderPlan<'a> {
    source: &'a SourceImage,
    geometry: TargetGeometry,
    mapper: GlyphMapper,
    edge_boost: bool,
}

/// First half of a render: configuration checked and grid sized.
///
/// Hosts that need to yield (for a layout pass, say) do so between
/// [`AsciiRenderer::prepare`] and [`PreparedRender::compute`].
pub struct PreparedRender<'a> {
    plan: Option<RenderPlan<'a>>,
}

impl PreparedRender<'_> {
    pub fn geometry(&self) -> Option<TargetGeometry> {
        self.plan.as_ref().map(|plan| plan.geometry)
    }

    /// Resample, optionally boost, and map to glyphs.
    pub fn compute(self) -> CellGrid {
        let Some(plan) = self.plan else {
            return CellGrid::empty();
        };

        let started = Instant::now();
        let mut pixels = resample(plan.source, plan.geometry);
        if plan.edge_boost {
            boost_contrast(&mut pixels);
        }
        let grid = plan.mapper.map_pixels(&pixels);
        debug!("mapped {}x{} cells in {:?}", grid.columns, grid.rows, started.elapsed());
        grid
    }
}

/// Compose grid sizing, resampling, the optional booster and glyph mapping.
///
/// Deterministic for identical inputs. `None` yields the empty grid.
pub fn compute_grid(
    source: Option<&SourceImage>,
    config: &RenderConfig,
    char_aspect: f32,
) -> Result<CellGrid, AsciiError> {
    AsciiRenderer::new(char_aspect).render(source, config)
}
