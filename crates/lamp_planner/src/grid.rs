use crate::{
    constants::{MASK_FREE, MASK_SELECTED},
    error::{PlannerError, Result},
    geometry::{Point, Rect},
};
use serde::{Deserialize, Serialize};

/// Cell index: x = column, y = row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: usize,
    pub y: usize,
}

impl CellIndex {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Read-only view of one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: CellIndex,
    pub selected: bool,
    pub position: Point, // top-left [unit]
    pub size: f64,       // edge length [unit]
}

impl Cell {
    pub fn rect(&self) -> Rect {
        Rect::square(self.position, self.size)
    }
}

/// Fixed-size selection grid; every cell shares the same edge length.
///
/// Storage is x-major (`selected[x * rows + y]`) so iteration follows the
/// planner's visiting order: x outer, y inner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cell_size: u32,
    selected: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(cols: usize, rows: usize, cell_size: u32) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            selected: vec![false; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    fn offset(&self, idx: CellIndex) -> Option<usize> {
        (idx.x < self.cols && idx.y < self.rows).then(|| idx.x * self.rows + idx.y)
    }

    fn checked_offset(&self, idx: CellIndex) -> Result<usize> {
        self.offset(idx).ok_or(PlannerError::OutOfGrid {
            x: idx.x,
            y: idx.y,
            cols: self.cols,
            rows: self.rows,
        })
    }

    pub fn is_selected(&self, idx: CellIndex) -> bool {
        self.offset(idx).is_some_and(|i| self.selected[i])
    }

    pub fn set_selected(&mut self, idx: CellIndex, selected: bool) -> Result<()> {
        let i = self.checked_offset(idx)?;
        self.selected[i] = selected;
        Ok(())
    }

    /// Flip one cell; returns the new state.
    pub fn toggle(&mut self, idx: CellIndex) -> Result<bool> {
        let i = self.checked_offset(idx)?;
        self.selected[i] = !self.selected[i];
        Ok(self.selected[i])
    }

    pub fn clear(&mut self) {
        self.selected.fill(false);
    }

    pub fn cell(&self, idx: CellIndex) -> Option<Cell> {
        let i = self.offset(idx)?;
        let size = f64::from(self.cell_size);
        Some(Cell {
            index: idx,
            selected: self.selected[i],
            position: Point::new(idx.x as f64 * size, idx.y as f64 * size),
            size,
        })
    }

    /// All cells in visiting order (x outer, y inner).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cols)
            .flat_map(move |x| (0..self.rows).map(move |y| CellIndex::new(x, y)))
            .filter_map(move |idx| self.cell(idx))
    }

    pub fn selected_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|c| c.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Pointer position [unit] -> cell under it.
    pub fn cell_at_point(&self, p: Point) -> Option<CellIndex> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let size = f64::from(self.cell_size);
        let idx = CellIndex::new((p.x / size).floor() as usize, (p.y / size).floor() as usize);
        self.offset(idx).map(|_| idx)
    }

    fn centered_origin(&self, width: usize, height: usize) -> (isize, isize) {
        (
            (self.cols as isize - width as isize).div_euclid(2),
            (self.rows as isize - height as isize).div_euclid(2),
        )
    }

    /// Reset the selection to a `width x height` block centered in the grid.
    ///
    /// Parts of the block falling outside the grid are dropped.
    pub fn select_centered_area(&mut self, width: usize, height: usize) {
        self.clear();
        let (start_x, start_y) = self.centered_origin(width, height);
        for dx in 0..width as isize {
            for dy in 0..height as isize {
                let (x, y) = (start_x + dx, start_y + dy);
                if x >= 0 && y >= 0 {
                    // out-of-range indices are rejected by offset()
                    if let Some(i) = self.offset(CellIndex::new(x as usize, y as usize)) {
                        self.selected[i] = true;
                    }
                }
            }
        }
    }

    /// Reset the selection from a text mask centered in the grid.
    ///
    /// Each line is one row; `#` or `x` marks a selected cell and `.` a free
    /// one. Trailing whitespace and blank lines at the end are ignored.
    pub fn load_mask(&mut self, text: &str) -> Result<()> {
        let lines: Vec<&str> = text
            .trim_end()
            .lines()
            .map(|l| l.trim_end())
            .collect();
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if width > self.cols || height > self.rows {
            return Err(PlannerError::MaskSize {
                cols: self.cols,
                rows: self.rows,
            });
        }

        let mut marked = Vec::new();
        for (line_no, line) in lines.iter().enumerate() {
            for (col_no, ch) in line.chars().enumerate() {
                if MASK_SELECTED.contains(&ch) {
                    marked.push((col_no, line_no));
                } else if ch != MASK_FREE {
                    return Err(PlannerError::MaskChar {
                        line: line_no + 1,
                        column: col_no + 1,
                        found: ch,
                    });
                }
            }
        }

        self.clear();
        let (start_x, start_y) = self.centered_origin(width, height);
        for (dx, dy) in marked {
            let idx = CellIndex::new(start_x as usize + dx, start_y as usize + dy);
            self.set_selected(idx, true)?;
        }
        Ok(())
    }
}
