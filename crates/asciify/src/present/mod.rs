//! Ways to show or save a [`CellGrid`](crate::CellGrid).
//!
//! The grid itself never changes here; `colorize` only decides whether
//! each cell's sampled colour is used or a fixed foreground.

pub mod ansi;
pub mod html;
pub mod raster;
pub mod text;

pub use ansi::write_ansi;
pub use html::{html_document, html_fragment};
pub use raster::{rasterize, save_raster, RasterFormat, DEFAULT_MAGNIFICATION};
pub use text::plain_text;
