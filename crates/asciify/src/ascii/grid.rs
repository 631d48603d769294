#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Sampled pixel colour encoded as RGB bytes.
    pub fg: [u8; 3],
}

impl Cell {
    pub fn new(ch: char, r: u8, g: u8, b: u8) -> Self {
        Self { ch, fg: [r, g, b] }
    }
}

/// Row-major grid of cells. `cells.len() == columns * rows` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    pub columns: u32,
    pub rows: u32,
    pub cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(columns: u32, rows: u32, cells: Vec<Cell>) -> Self {
        assert_eq!(columns as usize * rows as usize, cells.len());
        Self { columns, rows, cells }
    }

    /// Result of rendering without a loaded source.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, column: u32, row: u32) -> Option<&Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.columns as usize + column as usize)
    }

    pub fn cell_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let width = (self.columns as usize).max(1);
        self.cells.chunks(width)
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cell_rows().map(|row| row.iter().map(|cell| cell.ch).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_split_by_column_count() {
        let cells = "abcdef".chars().map(|ch| Cell::new(ch, 0, 0, 0)).collect();
        let grid = CellGrid::new(3, 2, cells);
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["abc".to_string(), "def".to_string()]);
        assert_eq!(grid.get(1, 1).map(|cell| cell.ch), Some('e'));
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = CellGrid::empty();
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert_eq!((grid.columns, grid.rows), (0, 0));
    }

    #[test]
    #[should_panic]
    fn mismatched_cell_count_panics() {
        CellGrid::new(2, 2, vec![Cell::new(' ', 0, 0, 0)]);
    }
}
