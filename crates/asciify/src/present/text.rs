use crate::CellGrid;

/// Glyph rows, each terminated by a newline.
pub fn plain_text(grid: &CellGrid) -> String {
    let mut out = String::with_capacity(grid.cells.len() + grid.rows as usize);
    for row in grid.rows() {
        out.push_str(&row);
        out.push('\n');
    }
    out
}
