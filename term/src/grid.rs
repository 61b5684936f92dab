//! The cell grid, a line, and the scrollback ring behind the main screen.

use std::collections::VecDeque;

use crate::cell::{cell_default, Cell};

/// A row of cells, stored only as long as it has been written to. Reads
/// pad implicitly out to the grid width; the padding is never persisted.
#[derive(Clone, Debug, Default)]
pub struct Line {
    cells: Vec<Cell>,
}

impl Line {
    pub fn blank() -> Line {
        Line { cells: Vec::new() }
    }

    pub fn with_width(width: usize) -> Line {
        Line {
            cells: vec![cell_default(); width],
        }
    }

    /// Reads the cell at `col`, returning a default cell if the line was
    /// never written that far.
    pub fn get(&self, col: usize) -> Cell {
        self.cells.get(col).copied().unwrap_or_else(cell_default)
    }

    /// Writes `cell` at `col`, growing the backing storage (padded with
    /// default cells) if needed.
    pub fn set(&mut self, col: usize, cell: Cell) {
        if self.cells.len() <= col {
            self.cells.resize(col + 1, cell_default());
        }
        self.cells[col] = cell;
    }

    /// A read-only view padded out to `width`.
    pub fn padded(&self, width: usize) -> Vec<Cell> {
        let mut out = self.cells.clone();
        out.resize(width, cell_default());
        out.truncate(width);
        out
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn resize(&mut self, width: usize) {
        self.cells.truncate(width);
    }
}

/// Bounded, append-mostly ring of scrolled-off lines for the main screen.
/// New lines are pushed at the back; once `capacity` is exceeded the oldest
/// line is dropped from the front.
#[derive(Clone, Debug)]
pub struct ScrollbackHistory {
    lines: VecDeque<Line>,
    capacity: usize,
}

impl ScrollbackHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn push(&mut self, line: Line) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line(&self, index_from_oldest: usize) -> Option<&Line> {
        self.lines.get(index_from_oldest)
    }
}

/// A fixed `(width, height)` rectangle of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Line>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![Line::blank(); height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row(&self, y: usize) -> &Line {
        &self.rows[y]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut Line {
        &mut self.rows[y]
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y].get(x)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].set(x, cell);
    }

    /// Snapshot of the visible grid, every line padded to `width`.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.rows.iter().map(|l| l.padded(self.width)).collect()
    }

    /// Clears a full row to default cells.
    pub fn clear_row(&mut self, y: usize) {
        self.rows[y] = Line::with_width(self.width);
    }

    pub fn clear_all(&mut self) {
        for row in &mut self.rows {
            *row = Line::with_width(self.width);
        }
    }

    /// Shifts rows `top..=bottom` (restricted to columns `left..=right`) up
    /// by `n`, filling the vacated rows at the bottom with default cells.
    /// The row leaving at the top is returned so callers can push it to
    /// history when appropriate; it is `None` when `left..=right` does not
    /// span the whole grid width, since a partial-width shift never
    /// produces a history line.
    pub fn scroll_up_region(
        &mut self,
        top: usize,
        bottom: usize,
        left: usize,
        right: usize,
        n: usize,
    ) -> Vec<Line> {
        let full_width = left == 0 && right == self.width.saturating_sub(1);
        let mut departed = Vec::new();
        for _ in 0..n {
            if top > bottom {
                break;
            }
            let leaving = self.rows[top].clone();
            if full_width {
                departed.push(leaving);
            }
            for y in top..bottom {
                let moved = self.extract_columns(y + 1, left, right);
                self.apply_columns(y, left, right, moved);
            }
            let blank = vec![cell_default(); right - left + 1];
            self.apply_columns(bottom, left, right, blank);
        }
        departed
    }

    /// Shifts rows `top..=bottom` (columns `left..=right`) down by `n`,
    /// filling vacated rows at the top with default cells. Never touches
    /// history.
    pub fn scroll_down_region(&mut self, top: usize, bottom: usize, left: usize, right: usize, n: usize) {
        for _ in 0..n {
            if top > bottom {
                break;
            }
            let mut y = bottom;
            while y > top {
                let moved = self.extract_columns(y - 1, left, right);
                self.apply_columns(y, left, right, moved);
                y -= 1;
            }
            let blank = vec![cell_default(); right - left + 1];
            self.apply_columns(top, left, right, blank);
        }
    }

    fn extract_columns(&self, y: usize, left: usize, right: usize) -> Vec<Cell> {
        (left..=right).map(|x| self.cell(x, y)).collect()
    }

    fn apply_columns(&mut self, y: usize, left: usize, right: usize, values: Vec<Cell>) {
        for (x, cell) in (left..=right).zip(values) {
            self.set_cell(x, y, cell);
        }
    }

    /// Resizes in place: preserves cells that remain in bounds, clears the
    /// rest. Non-positive dimensions are refused by the caller before this
    /// is reached.
    pub fn resize(&mut self, width: usize, height: usize) {
        for row in &mut self.rows {
            row.resize(width);
        }
        self.rows.resize_with(height, || Line::with_width(width));
        self.width = width;
        self.height = height;
    }
}
