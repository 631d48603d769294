use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::CellGrid;

/// Write the grid to a terminal stream, one line per row. Colorized output
/// sets a truecolor foreground per cell and resets it at each row end.
pub fn write_ansi<W: Write>(grid: &CellGrid, colorize: bool, out: &mut W) -> io::Result<()> {
    for row in grid.cell_rows() {
        if colorize {
            let mut current = None;
            for cell in row {
                if current != Some(cell.fg) {
                    let [r, g, b] = cell.fg;
                    queue!(out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.fg);
                }
                queue!(out, Print(cell.ch))?;
            }
            queue!(out, ResetColor)?;
        } else {
            let line: String = row.iter().map(|cell| cell.ch).collect();
            queue!(out, Print(line))?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}
