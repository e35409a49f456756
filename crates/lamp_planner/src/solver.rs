//! Greedy light coverage.
//!
//! Selected cells are visited x outer / y inner. Each cell is sampled at unit
//! granularity against the light footprints placed so far:
//!
//! | cell state | action |
//! |------------|--------|
//! | no sample lit | new light at the cell's top-left corner |
//! | every sample lit | nothing |
//! | some samples lit | new light one unit up-left of the first free x / first free y |
//!
//! The result is order dependent and makes no attempt to minimise the lamp
//! count or avoid overlap.

use crate::{
    geometry::{Point, Rect},
    grid::{CellIndex, OccupancyGrid},
    lamp::{LampProfile, LightPlacement},
};
use log::{debug, warn};
use serde::Serialize;

/// Solver output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coverage {
    /// In placement order
    pub placements: Vec<LightPlacement>,
    /// Partially lit cells for which no free sample could be located.
    ///
    /// Classification and both free-sample scans walk the same unit samples,
    /// so this stays empty for any grid the solver builds itself.
    pub unresolved: Vec<CellIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Dark,
    Partial,
    Lit,
}

fn is_lit(p: Point, lights: &[Rect]) -> bool {
    lights.iter().any(|r| r.contains(p))
}

fn classify(area: &Rect, lights: &[Rect]) -> CellState {
    if lights.is_empty() {
        return CellState::Dark;
    }
    let (mut any_lit, mut any_dark) = (false, false);
    for p in area.unit_points() {
        if is_lit(p, lights) {
            any_lit = true;
        } else {
            any_dark = true;
        }
        if any_lit && any_dark {
            return CellState::Partial;
        }
    }
    if any_lit {
        CellState::Lit
    } else {
        CellState::Dark
    }
}

/// First free x (x-major scan) and first free y (y-major scan), independently.
///
/// `None` when every sample is lit.
fn first_free(area: &Rect, lights: &[Rect]) -> Option<Point> {
    let x = area.unit_points().find(|&p| !is_lit(p, lights))?.x;
    let y = area.unit_points_by_row().find(|&p| !is_lit(p, lights))?.y;
    Some(Point::new(x, y))
}

/// Place lights until every selected cell is at least partially lit.
pub fn solve_coverage(
    grid: &OccupancyGrid,
    profile: &LampProfile,
    units_per_meter: f64,
) -> Coverage {
    let scaled = profile.scaled(units_per_meter);
    let mut lights: Vec<Rect> = Vec::new();
    let mut coverage = Coverage::default();

    for cell in grid.selected_cells() {
        let area = cell.rect();
        let anchor = match classify(&area, &lights) {
            CellState::Dark => cell.position,
            CellState::Lit => continue,
            CellState::Partial => match first_free(&area, &lights) {
                Some(free) => free.offset(-1.0, -1.0),
                None => {
                    warn!(
                        "cell ({}, {}) is partially lit but has no free sample",
                        cell.index.x, cell.index.y
                    );
                    coverage.unresolved.push(cell.index);
                    continue;
                }
            },
        };

        let placement = scaled.place(anchor);
        debug!(
            "cell ({}, {}) -> light ({}, {}), lamp ({}, {})",
            cell.index.x,
            cell.index.y,
            placement.light_anchor.x,
            placement.light_anchor.y,
            placement.lamp_anchor.x,
            placement.lamp_anchor.y
        );
        lights.push(scaled.light_rect(anchor));
        coverage.placements.push(placement);
    }

    coverage
}
