/// Reference line height the grid is laid out at before shrinking.
pub const BASE_LINE_HEIGHT: f32 = 16.0;
/// Line height below which glyphs stop shrinking and the grid overflows.
pub const MIN_LINE_HEIGHT: f32 = 6.0;

/// Display-layout hint for drawing a grid in a bounded area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitScale {
    pub line_height: f32,
    pub char_width: f32,
}

impl FitScale {
    pub fn baseline(char_aspect: f32) -> Self {
        Self { line_height: BASE_LINE_HEIGHT, char_width: char_aspect * BASE_LINE_HEIGHT }
    }

    /// Whether a `columns` x `rows` grid drawn at this scale fits the area.
    pub fn fits(&self, columns: u32, rows: u32, avail_width: f32, avail_height: f32) -> bool {
        columns as f32 * self.char_width <= avail_width
            && rows as f32 * self.line_height <= avail_height
    }
}

/// Shrink (never grow) the line height so the whole grid fits the
/// available area. Line heights are whole units, floored, and never drop
/// below [`MIN_LINE_HEIGHT`]; past that floor the grid overflows.
pub fn fit_scale(
    columns: u32,
    rows: u32,
    char_aspect: f32,
    avail_width: f32,
    avail_height: f32,
) -> FitScale {
    let baseline = FitScale::baseline(char_aspect);
    if columns == 0 || rows == 0 {
        return baseline;
    }

    let need_width = columns as f32 * baseline.char_width;
    let need_height = rows as f32 * baseline.line_height;
    let scale = (avail_width / need_width).min(avail_height / need_height).min(1.0);
    let scale = if scale.is_nan() { 1.0 } else { scale };

    let line_height = (BASE_LINE_HEIGHT * scale).floor().max(MIN_LINE_HEIGHT);
    FitScale { line_height, char_width: char_aspect * line_height }
}
