use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, LATIN_FONTS};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::{AsciiError, CellGrid, FitScale, MAX_GRID_CELLS};

pub const DEFAULT_MAGNIFICATION: u32 = 2;
pub const JPEG_QUALITY: u8 = 92;

const BACKGROUND: Rgb<u8> = Rgb([0x0b, 0x0d, 0x10]);
const MONOCHROME_FOREGROUND: Rgb<u8> = Rgb([0xf1, 0xf5, 0xf9]);
const MAX_PIXELS: u64 = MAX_GRID_CELLS * 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(RasterFormat::Png),
            "jpg" | "jpeg" => Some(RasterFormat::Jpeg),
            _ => None,
        }
    }
}

/// Draw the grid into an image. Each cell occupies a
/// `char_width x line_height` box scaled by `magnification`, and its glyph
/// is the 8x8 bitmap font stretched over that box.
pub fn rasterize(
    grid: &CellGrid,
    scale: FitScale,
    magnification: u32,
    colorize: bool,
) -> Result<RgbImage, AsciiError> {
    if magnification == 0 {
        return Err(AsciiError::InvalidConfig("magnification must be at least 1".into()));
    }
    if !(scale.line_height > 0.0 && scale.char_width > 0.0) {
        return Err(AsciiError::InvalidConfig(format!("unusable cell size {scale:?}")));
    }

    let m = magnification as f32;
    let cell_width = scale.char_width * m;
    let cell_height = scale.line_height * m;
    let out_width = (grid.columns as f32 * cell_width).ceil();
    let out_height = (grid.rows as f32 * cell_height).ceil();

    // Area in f64 so oversized magnifications cannot overflow the check.
    let area = f64::from(out_width) * f64::from(out_height);
    if !area.is_finite()
        || area > MAX_PIXELS as f64
        || out_width > u32::MAX as f32
        || out_height > u32::MAX as f32
    {
        return Err(AsciiError::ResourceExhaustion {
            columns: out_width as u64,
            rows: out_height as u64,
            limit: MAX_PIXELS,
        });
    }

    let mut canvas = RgbImage::from_pixel(out_width as u32, out_height as u32, BACKGROUND);
    debug!(
        "rasterizing {}x{} cells onto {}x{} px",
        grid.columns,
        grid.rows,
        canvas.width(),
        canvas.height()
    );

    for (y, row) in grid.cell_rows().enumerate() {
        let top = (y as f32 * cell_height).floor() as u32;
        for (x, cell) in row.iter().enumerate() {
            let left = (x as f32 * cell_width).floor() as u32;
            let color = if colorize { Rgb(cell.fg) } else { MONOCHROME_FOREGROUND };
            draw_glyph(&mut canvas, cell.ch, left, top, cell_width, cell_height, color);
        }
    }

    Ok(canvas)
}

pub fn save_raster(image: &RgbImage, path: &Path, format: RasterFormat) -> Result<(), AsciiError> {
    match format {
        RasterFormat::Png => image.save_with_format(path, ImageFormat::Png)?,
        RasterFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(image)?;
            writer.flush()?;
        },
    }
    Ok(())
}

fn glyph_bitmap(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| BLOCK_FONTS.get(ch)).or_else(|| LATIN_FONTS.get(ch))
}

fn draw_glyph(
    canvas: &mut RgbImage,
    ch: char,
    left: u32,
    top: u32,
    width: f32,
    height: f32,
    color: Rgb<u8>,
) {
    let Some(bitmap) = glyph_bitmap(ch) else {
        return;
    };

    let box_width = width.ceil() as u32;
    let box_height = height.ceil() as u32;
    for dy in 0..box_height {
        let py = top + dy;
        if py >= canvas.height() {
            break;
        }
        let gy = ((dy as f32 * 8.0 / height) as usize).min(7);
        let row_bits = bitmap[gy];
        for dx in 0..box_width {
            let px = left + dx;
            if px >= canvas.width() {
                break;
            }
            let gx = ((dx as f32 * 8.0 / width) as usize).min(7);
            if (row_bits >> gx) & 1 == 1 {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}
