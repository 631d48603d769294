use image::imageops::FilterType;
use image::RgbaImage;

use super::loader::SourceImage;
use crate::AsciiError;

/// Upper bound on `columns * rows` for a single grid.
pub const MAX_GRID_CELLS: u64 = 4_194_304;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetGeometry {
    pub columns: u32,
    pub rows: u32,
}

impl TargetGeometry {
    /// Derive the row count that keeps the source proportions once the grid
    /// is drawn in monospace cells `char_aspect` wide per unit of height.
    ///
    /// `rows = max(1, round(columns * height / width * char_aspect * aspect_multiplier))`.
    /// Ties round away from zero (`f32::round`).
    pub fn derive(
        columns: u16,
        source_width: u32,
        source_height: u32,
        char_aspect: f32,
        aspect_multiplier: f32,
    ) -> Result<Self, AsciiError> {
        if columns == 0 {
            return Err(AsciiError::InvalidConfig("columns must be at least 1".into()));
        }
        if source_width == 0 || source_height == 0 {
            return Err(AsciiError::EmptySource);
        }
        if !(char_aspect.is_finite() && char_aspect > 0.0) {
            return Err(AsciiError::InvalidConfig(format!(
                "character aspect must be positive, got {char_aspect}"
            )));
        }
        if !(aspect_multiplier.is_finite() && aspect_multiplier > 0.0) {
            return Err(AsciiError::InvalidConfig(format!(
                "aspect multiplier must be positive, got {aspect_multiplier}"
            )));
        }

        let image_ratio = source_height as f32 / source_width as f32;
        let rows = (columns as f32 * image_ratio * (char_aspect * aspect_multiplier)).round();

        // Anything past the cell budget fails `check_limits` anyway; this
        // only keeps the float-to-int cast in range.
        if !rows.is_finite() || rows > MAX_GRID_CELLS as f32 {
            return Err(AsciiError::ResourceExhaustion {
                columns: u64::from(columns),
                rows: if rows.is_finite() { rows as u64 } else { u64::MAX },
                limit: MAX_GRID_CELLS,
            });
        }

        let geometry = Self { columns: u32::from(columns), rows: (rows as u32).max(1) };
        geometry.check_limits()?;
        Ok(geometry)
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    fn check_limits(&self) -> Result<(), AsciiError> {
        if u64::from(self.columns) * u64::from(self.rows) > MAX_GRID_CELLS {
            return Err(AsciiError::ResourceExhaustion {
                columns: u64::from(self.columns),
                rows: u64::from(self.rows),
                limit: MAX_GRID_CELLS,
            });
        }
        Ok(())
    }
}

/// Scale the whole source to exactly one pixel per output cell.
///
/// Catmull-Rom keeps the tonal structure of small grids instead of the
/// aliasing a nearest-neighbour pick would produce.
pub fn resample(source: &SourceImage, geometry: TargetGeometry) -> RgbaImage {
    source
        .image()
        .resize_exact(geometry.columns, geometry.rows, FilterType::CatmullRom)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba};

    use super::*;

    #[test]
    fn square_source_with_half_aspect_halves_rows() {
        let geometry = TargetGeometry::derive(80, 400, 400, 0.5, 1.0).unwrap();
        assert_eq!(geometry, TargetGeometry { columns: 80, rows: 40 });
    }

    #[test]
    fn multiplier_scales_rows() {
        let geometry = TargetGeometry::derive(80, 400, 400, 0.5, 1.5).unwrap();
        assert_eq!(geometry.rows, 60);
    }

    #[test]
    fn rows_never_drop_below_one() {
        let geometry = TargetGeometry::derive(1, 10_000, 1, 0.5, 1.0).unwrap();
        assert_eq!(geometry.rows, 1);

        for columns in [1u16, 2, 7, 80, 500] {
            for (w, h) in [(1u32, 1u32), (1000, 1), (3, 7), (1920, 1080)] {
                let geometry = TargetGeometry::derive(columns, w, h, 0.5, 1.0).unwrap();
                assert!(geometry.rows >= 1);
            }
        }
    }

    #[test]
    fn half_rounds_up() {
        // 3 * (1 / 1) * 0.5 = 1.5
        let geometry = TargetGeometry::derive(3, 1, 1, 0.5, 1.0).unwrap();
        assert_eq!(geometry.rows, 2);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(matches!(
            TargetGeometry::derive(0, 10, 10, 0.5, 1.0),
            Err(AsciiError::InvalidConfig(_))
        ));
        assert!(matches!(
            TargetGeometry::derive(10, 10, 10, 0.5, 0.0),
            Err(AsciiError::InvalidConfig(_))
        ));
        assert!(matches!(
            TargetGeometry::derive(10, 10, 10, f32::NAN, 1.0),
            Err(AsciiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let result = TargetGeometry::derive(u16::MAX, 1, 1000, 0.5, 1.0);
        assert!(matches!(result, Err(AsciiError::ResourceExhaustion { .. })));

        let result = TargetGeometry::derive(4000, 1, 1, 1.0, 1.0);
        assert!(matches!(result, Err(AsciiError::ResourceExhaustion { .. })));
    }

    #[test]
    fn tall_grids_within_budget_are_accepted() {
        // 100_000 rows is past u16 but far under the cell budget.
        let geometry = TargetGeometry::derive(1, 1, 200_000, 0.5, 1.0).unwrap();
        assert_eq!(geometry, TargetGeometry { columns: 1, rows: 100_000 });
        assert_eq!(geometry.cell_count(), 100_000);
    }

    #[test]
    fn limit_error_reports_the_cell_budget() {
        // 2048 * 2049 cells, just over the budget.
        let err = TargetGeometry::derive(2048, 2048, 4098, 0.5, 1.0).unwrap_err();
        match err {
            AsciiError::ResourceExhaustion { columns, rows, limit } => {
                assert_eq!((columns, rows, limit), (2048, 2049, MAX_GRID_CELLS));
                assert!(columns * rows > limit);
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn resample_hits_exact_dimensions() {
        let image = RgbaImage::from_pixel(37, 23, Rgba([10, 20, 30, 255]));
        let source = SourceImage::new(DynamicImage::ImageRgba8(image)).unwrap();
        let geometry = TargetGeometry { columns: 9, rows: 4 };
        let buffer = resample(&source, geometry);
        assert_eq!(buffer.dimensions(), (9, 4));
        assert_eq!(buffer.len(), geometry.cell_count() * 4);
    }

    #[test]
    fn resample_blends_neighbouring_pixels() {
        let strip = RgbaImage::from_fn(8, 1, |x, _| {
            let level = if x % 2 == 0 { 0 } else { 255 };
            Rgba([level, level, level, 255])
        });
        let source = SourceImage::new(DynamicImage::ImageRgba8(strip)).unwrap();
        let buffer = resample(&source, TargetGeometry { columns: 2, rows: 1 });

        // A nearest-neighbour pick would yield pure 0 or 255.
        for pixel in buffer.pixels() {
            let level = pixel.0[0];
            assert!((64..=192).contains(&level), "unblended level {level}");
        }
    }
}
