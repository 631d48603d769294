use std::sync::OnceLock;

use log::{debug, warn};

/// Width-to-height ratio assumed when no measurement is available.
pub const DEFAULT_CHAR_ASPECT: f32 = 0.5;

/// Source of a measured character cell aspect (glyph width / line height).
pub trait MetricsProbe {
    fn measure(&self) -> Option<f32>;
}

/// Reads the cell geometry the controlling terminal reports.
///
/// Many terminals report zero pixel dimensions; those yield `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalProbe;

impl MetricsProbe for TerminalProbe {
    fn measure(&self) -> Option<f32> {
        let size = crossterm::terminal::window_size().ok()?;
        debug!(
            "terminal reports {}x{} cells in {}x{} px",
            size.columns, size.rows, size.width, size.height
        );
        cell_aspect(size.columns, size.rows, size.width, size.height)
    }
}

/// Probe returning a known ratio, for configured overrides and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedProbe(pub f32);

impl MetricsProbe for FixedProbe {
    fn measure(&self) -> Option<f32> {
        Some(self.0)
    }
}

/// Measure once, falling back to [`DEFAULT_CHAR_ASPECT`] on zero, non-finite
/// or missing results.
pub fn measure_char_aspect(probe: &dyn MetricsProbe) -> f32 {
    match probe.measure() {
        Some(aspect) if aspect.is_finite() && aspect > 0.0 => aspect,
        other => {
            warn!("character aspect unavailable ({other:?}), assuming {DEFAULT_CHAR_ASPECT}");
            DEFAULT_CHAR_ASPECT
        },
    }
}

/// Process-wide terminal measurement, taken on first use.
pub fn cached_char_aspect() -> f32 {
    static ASPECT: OnceLock<f32> = OnceLock::new();
    *ASPECT.get_or_init(|| measure_char_aspect(&TerminalProbe))
}

fn cell_aspect(columns: u16, rows: u16, width_px: u16, height_px: u16) -> Option<f32> {
    if columns == 0 || rows == 0 || width_px == 0 || height_px == 0 {
        return None;
    }
    let cell_width = f32::from(width_px) / f32::from(columns);
    let line_height = f32::from(height_px) / f32::from(rows);
    Some(cell_width / line_height)
}
