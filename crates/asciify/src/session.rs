//! Caller-owned render state.
//!
//! A session holds the current source and configuration. Both are only
//! ever replaced wholesale, so a render never observes a half-applied update.

use log::debug;

use crate::{AsciiError, AsciiRenderer, CellGrid, PreparedRender, RenderConfig, SourceImage};

#[derive(Debug)]
pub struct Session {
    source: Option<SourceImage>,
    config: RenderConfig,
    renderer: AsciiRenderer,
}

impl Session {
    /// `char_aspect` is the measured cell ratio, taken once by the caller.
    pub fn new(config: RenderConfig, char_aspect: f32) -> Self {
        Self { source: None, config, renderer: AsciiRenderer::new(char_aspect) }
    }

    pub fn load(&mut self, source: SourceImage) {
        let (width, height) = source.dimensions();
        debug!("session source replaced with {width}x{height} image");
        self.source = Some(source);
    }

    pub fn clear(&mut self) {
        self.source = None;
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn char_aspect(&self) -> f32 {
        self.renderer.char_aspect()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Cheap half of a render. See [`PreparedRender`].
    pub fn prepare(&self) -> Result<PreparedRender<'_>, AsciiError> {
        self.renderer.prepare(self.source.as_ref(), &self.config)
    }

    pub fn render(&self) -> Result<CellGrid, AsciiError> {
        Ok(self.prepare()?.compute())
    }
}
