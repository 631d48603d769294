use std::fmt::Write;

use crate::CellGrid;

const PAGE_BACKGROUND: &str = "#0b0d10";
const PAGE_FOREGROUND: &str = "#e5e7eb";

/// Grid body for a `<pre>` element. Colorized output wraps every glyph in
/// a span carrying its cell colour.
pub fn html_fragment(grid: &CellGrid, colorize: bool) -> String {
    let mut out = String::new();
    for row in grid.cell_rows() {
        for cell in row {
            let glyph = escape_html(cell.ch);
            if colorize {
                let [r, g, b] = cell.fg;
                let _ = write!(out, "<span style=\"color: rgb({r},{g},{b})\">{glyph}</span>");
            } else {
                out.push_str(&glyph);
            }
        }
        out.push('\n');
    }
    out
}

/// Standalone page around [`html_fragment`], with the font sized to
/// `line_height` pixels.
pub fn html_document(grid: &CellGrid, colorize: bool, line_height: f32) -> String {
    let size = line_height.max(1.0);
    format!(
        "<!doctype html><meta charset=\"utf-8\"><title>ASCII Art</title>\
         <style>body{{background:{PAGE_BACKGROUND};color:{PAGE_FOREGROUND}}}\
         pre{{white-space:pre;font:{size}px/{size}px monospace}}</style>\
         <pre>{}</pre>\n",
        html_fragment(grid, colorize)
    )
}

fn escape_html(ch: char) -> String {
    match ch {
        '&' => "&amp;".into(),
        '<' => "&lt;".into(),
        '>' => "&gt;".into(),
        '"' => "&quot;".into(),
        '\'' => "&#39;".into(),
        other => other.to_string(),
    }
}
