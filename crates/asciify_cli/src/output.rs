use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use asciify::present::{self, RasterFormat};
use asciify::{fit_scale, CellGrid};
use clap::ValueEnum;
use log::info;

use crate::settings::Resolved;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Txt,
    Html,
    Png,
    Jpg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(OutputFormat::Txt),
            "html" | "htm" => Ok(OutputFormat::Html),
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            _ => bail!("cannot infer an output format from {:?}", path),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Html => "html",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }
}

pub fn write_grid(
    grid: &CellGrid,
    settings: &Resolved,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let fit = fit_scale(
        grid.columns,
        grid.rows,
        settings.char_aspect,
        settings.panel_width,
        settings.panel_height,
    );
    let colorize = settings.config.colorize;

    match format {
        OutputFormat::Txt => fs::write(path, present::plain_text(grid))
            .with_context(|| format!("failed to write {:?}", path))?,
        OutputFormat::Html => fs::write(path, present::html_document(grid, colorize, fit.line_height))
            .with_context(|| format!("failed to write {:?}", path))?,
        OutputFormat::Png | OutputFormat::Jpg => {
            let raster_format = match format {
                OutputFormat::Png => RasterFormat::Png,
                _ => RasterFormat::Jpeg,
            };
            let image = present::rasterize(grid, fit, settings.magnification, colorize)
                .context("failed to rasterize grid")?;
            present::save_raster(&image, path, raster_format)
                .with_context(|| format!("failed to write {:?}", path))?;
        },
    }

    info!("wrote {}x{} grid to {:?}", grid.columns, grid.rows, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use asciify::{Cell, RenderConfig};

    use super::*;

    fn settings() -> Resolved {
        Resolved {
            config: RenderConfig::default(),
            char_aspect: 0.5,
            panel_width: 1200.0,
            panel_height: 800.0,
            magnification: 1,
        }
    }

    fn grid() -> CellGrid {
        CellGrid::new(2, 1, vec![Cell::new('#', 1, 2, 3), Cell::new('.', 4, 5, 6)])
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(&PathBuf::from("a.TXT")).unwrap(), OutputFormat::Txt);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("a.htm")).unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("a.jpeg")).unwrap(), OutputFormat::Jpg);
        assert!(OutputFormat::from_path(&PathBuf::from("a.gif")).is_err());
        assert!(OutputFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn writes_every_format() {
        let dir = tempfile::tempdir().unwrap();
        for format in [OutputFormat::Txt, OutputFormat::Html, OutputFormat::Png, OutputFormat::Jpg]
        {
            let path = dir.path().join(format!("out.{}", format.extension()));
            write_grid(&grid(), &settings(), format, &path).unwrap();
            assert!(path.metadata().unwrap().len() > 0);
        }
        let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(text, "#.\n");
    }

    #[test]
    fn raster_uses_fit_line_height() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_grid(&grid(), &settings(), OutputFormat::Png, &path).unwrap();
        let image = image::open(&path).unwrap().to_rgb8();
        // baseline 16 px lines, 8 px cells at magnification 1
        assert_eq!(image.dimensions(), (16, 16));
    }
}
