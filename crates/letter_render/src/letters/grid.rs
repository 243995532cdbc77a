/// Fixed number of letters per row.
pub const COLUMNS: u16 = 100;
/// Fixed number of letter rows.
pub const ROWS: u16 = 77;

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// `None` for the empty cell produced when the letter cursor wraps.
    pub letter: Option<char>,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Opacity in whichever scale the sampler's alpha mode produced; the raw
    /// mode hands through the 0-255 channel value unchanged.
    pub alpha: f32,
}

impl GridCell {
    /// Opacity as a CSS color consumer would apply it, clamped to [0.0, 1.0].
    pub fn opacity(&self) -> f32 {
        if self.alpha.is_nan() {
            return 0.0;
        }
        self.alpha.clamp(0.0, 1.0)
    }

    /// `rgba(r, g, b, a)` color descriptor for the letter.
    pub fn css_color(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub columns: u16,
    pub rows: u16,
    pub cells: Vec<GridCell>,
}

impl Grid {
    pub fn new(columns: u16, rows: u16, cells: Vec<GridCell>) -> Self {
        assert_eq!(usize::from(columns) * usize::from(rows), cells.len());
        Self { columns, rows, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<&GridCell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(usize::from(row) * usize::from(self.columns) + usize::from(column))
    }

    /// Cells of each row, top to bottom. A grid without columns still has
    /// `rows` (empty) rows.
    pub fn cell_rows(&self) -> impl Iterator<Item = &[GridCell]> + '_ {
        let width = usize::from(self.columns);
        (0..usize::from(self.rows))
            .map(move |row| self.cells.get(row * width..(row + 1) * width).unwrap_or(&[]))
    }

    /// Letters of each row, with wrap cells rendered as spaces.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cell_rows()
            .map(|row| row.iter().map(|cell| cell.letter.unwrap_or(' ')).collect::<String>())
    }
}
