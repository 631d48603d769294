use image::RgbaImage;

use super::{
    gradient::GlyphRamp,
    grid::{Cell, CellGrid},
};
use crate::image_pipeline::adjust::luma;

pub struct GlyphMapper {
    ramp: GlyphRamp,
    invert: bool,
}

impl GlyphMapper {
    pub fn new(ramp: GlyphRamp, invert: bool) -> Self {
        Self { ramp, invert }
    }

    /// Ramp index for one pixel. Without inversion bright pixels land near
    /// index 0 and dark pixels near the end of the ramp.
    pub fn index_for(&self, r: u8, g: u8, b: u8) -> usize {
        let y = luma(r, g, b) / 255.0;
        let t = if self.invert { y } else { 1.0 - y };
        self.ramp.clamp_index(t)
    }

    /// Map a resampled buffer, one pixel per cell, into a grid. Cells always
    /// carry the pixel colour; whether it is shown is up to presentation.
    pub fn map_pixels(&self, pixels: &RgbaImage) -> CellGrid {
        let (columns, rows) = pixels.dimensions();
        let cells = pixels
            .pixels()
            .map(|pixel| {
                let [r, g, b, _] = pixel.0;
                Cell::new(self.ramp.char_at(self.index_for(r, g, b)), r, g, b)
            })
            .collect();

        CellGrid::new(columns, rows, cells)
    }
}
