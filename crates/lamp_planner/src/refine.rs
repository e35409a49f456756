//! Fixture overhang correction.
//!
//! The solver only cares about light footprints, so a fixture can hang past
//! the edge of the selected area. For every placement whose fixture is not
//! fully inside selected cells, the light anchor is pulled back along the
//! fixture's long axis by the overhang past the first selected cell touching
//! one of the fixture's corners. One nudge per placement; nothing is added or
//! removed.

use crate::{
    geometry::{Axis, Rect},
    grid::OccupancyGrid,
    lamp::{LampProfile, LightPlacement, ScaledProfile},
};
use log::{debug, warn};

fn is_inside_selection(fixture: &Rect, cells: &[Rect]) -> bool {
    fixture
        .unit_points()
        .all(|p| cells.iter().any(|c| c.contains(p)))
}

/// Overhang along the primary axis past the first cell touching a corner.
fn overhang(fixture: &Rect, cells: &[Rect], scaled: &ScaledProfile) -> Option<f64> {
    let axis = scaled.orientation.primary_axis();
    cells
        .iter()
        .find(|c| fixture.any_corner_in(c))
        .map(|c| fixture.far_edge(axis) - c.far_edge(axis))
}

fn refine_one(placement: LightPlacement, cells: &[Rect], scaled: &ScaledProfile) -> LightPlacement {
    let fixture = scaled.fixture_rect(placement.lamp_anchor);
    if is_inside_selection(&fixture, cells) {
        return placement;
    }

    match overhang(&fixture, cells, scaled) {
        Some(offset) if offset > 0.0 => {
            let anchor = match scaled.orientation.primary_axis() {
                Axis::X => placement.light_anchor.offset(-offset, 0.0),
                Axis::Y => placement.light_anchor.offset(0.0, -offset),
            };
            debug!(
                "light ({}, {}) moved back by {} to ({}, {})",
                placement.light_anchor.x, placement.light_anchor.y, offset, anchor.x, anchor.y
            );
            scaled.place(anchor)
        }
        Some(offset) => {
            debug!(
                "fixture at ({}, {}) overhangs but offset {} is not positive",
                placement.lamp_anchor.x, placement.lamp_anchor.y, offset
            );
            placement
        }
        None => {
            warn!(
                "fixture at ({}, {}) touches no selected cell",
                placement.lamp_anchor.x, placement.lamp_anchor.y
            );
            placement
        }
    }
}

/// Nudge placements so fixtures stay inside the selected cells.
///
/// Output has the same length and order as `placements`. Lamp anchors are
/// recomputed from the adjusted light anchors.
pub fn refine_placements(
    grid: &OccupancyGrid,
    profile: &LampProfile,
    units_per_meter: f64,
    placements: &[LightPlacement],
) -> Vec<LightPlacement> {
    let scaled = profile.scaled(units_per_meter);
    let cells: Vec<Rect> = grid.selected_cells().map(|c| c.rect()).collect();
    placements
        .iter()
        .map(|&p| refine_one(p, &cells, &scaled))
        .collect()
}
