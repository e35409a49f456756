//! Debounced cell toggling for pointer-driven selection.
//!
//! Dragging a pointer across the grid reports the same cell many times per
//! second. The gate lets a cell flip only once per debounce period so a drag
//! paints instead of flickering.
//!
//! The batch binary plans from a fixed selection; the gate is the hook for an
//! interactive front end feeding pointer events into an `OccupancyGrid`.

use crate::{
    error::Result,
    geometry::Point,
    grid::{CellIndex, OccupancyGrid},
};
use log::trace;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

#[derive(Debug, Clone)]
pub struct ToggleGate {
    period: Duration,
    last_toggled: HashMap<CellIndex, Instant>,
}

impl ToggleGate {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_toggled: HashMap::new(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Flip `idx` unless it was flipped within the debounce period.
    ///
    /// Returns whether the cell changed.
    pub fn try_toggle(
        &mut self,
        grid: &mut OccupancyGrid,
        idx: CellIndex,
        now: Instant,
    ) -> Result<bool> {
        if let Some(&last) = self.last_toggled.get(&idx)
            && now.saturating_duration_since(last) <= self.period
        {
            trace!("debounced toggle of ({}, {})", idx.x, idx.y);
            return Ok(false);
        }
        grid.toggle(idx)?;
        self.last_toggled.insert(idx, now);
        Ok(true)
    }

    /// Pointer variant: positions outside the grid are ignored.
    pub fn toggle_at(&mut self, grid: &mut OccupancyGrid, p: Point, now: Instant) -> Result<bool> {
        match grid.cell_at_point(p) {
            Some(idx) => self.try_toggle(grid, idx, now),
            None => Ok(false),
        }
    }

    pub fn reset(&mut self) {
        self.last_toggled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toggle_always_applies() {
        let mut grid = OccupancyGrid::new(5, 5, 20);
        let mut gate = ToggleGate::new(Duration::from_millis(500));
        let now = Instant::now();
        assert!(gate.try_toggle(&mut grid, CellIndex::new(1, 1), now).unwrap());
        assert!(grid.is_selected(CellIndex::new(1, 1)));
    }

    #[test]
    fn test_rapid_retoggle_is_suppressed() {
        let mut grid = OccupancyGrid::new(5, 5, 20);
        let mut gate = ToggleGate::new(Duration::from_millis(500));
        let t0 = Instant::now();
        let idx = CellIndex::new(1, 1);

        assert!(gate.try_toggle(&mut grid, idx, t0).unwrap());
        assert!(!gate.try_toggle(&mut grid, idx, t0 + Duration::from_millis(200)).unwrap());
        // exactly the period is still suppressed
        assert!(!gate.try_toggle(&mut grid, idx, t0 + Duration::from_millis(500)).unwrap());
        assert!(grid.is_selected(idx));

        assert!(gate.try_toggle(&mut grid, idx, t0 + Duration::from_millis(501)).unwrap());
        assert!(!grid.is_selected(idx));
    }

    #[test]
    fn test_cells_are_debounced_independently() {
        let mut grid = OccupancyGrid::new(5, 5, 20);
        let mut gate = ToggleGate::new(Duration::from_millis(500));
        let t0 = Instant::now();
        assert!(gate.try_toggle(&mut grid, CellIndex::new(0, 0), t0).unwrap());
        assert!(gate.try_toggle(&mut grid, CellIndex::new(0, 1), t0).unwrap());
        assert_eq!(grid.selected_count(), 2);
    }

    #[test]
    fn test_toggle_at_pointer() {
        let mut grid = OccupancyGrid::new(5, 5, 20);
        let mut gate = ToggleGate::new(Duration::from_millis(500));
        let now = Instant::now();
        assert!(gate.toggle_at(&mut grid, Point::new(30.0, 45.0), now).unwrap());
        assert!(grid.is_selected(CellIndex::new(1, 2)));
        assert!(!gate.toggle_at(&mut grid, Point::new(130.0, 45.0), now).unwrap());

        gate.reset();
        assert!(gate.toggle_at(&mut grid, Point::new(30.0, 45.0), now).unwrap());
        assert!(!grid.is_selected(CellIndex::new(1, 2)));
    }
}
