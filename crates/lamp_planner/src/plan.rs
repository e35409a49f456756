use crate::{
    constants::DEFAULT_UNITS_PER_METER,
    geometry::Extent,
    grid::{CellIndex, OccupancyGrid},
    lamp::{LampProfile, LightPlacement},
    refine::refine_placements,
    solver::solve_coverage,
};
use log::{info, warn};
use serde::Serialize;

/// Planner settings that are not part of the lamp itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    pub units_per_meter: f64,
    pub refine: bool, // run the fixture overhang correction
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            units_per_meter: DEFAULT_UNITS_PER_METER,
            refine: false,
        }
    }
}

/// Everything a renderer needs to paint one plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightingPlan {
    pub profile: LampProfile,
    pub light: Extent,   // light footprint on x/y [unit]
    pub fixture: Extent, // fixture on x/y [unit]
    pub refined: bool,
    pub placements: Vec<LightPlacement>,
    pub unresolved: Vec<CellIndex>,
}

impl LightingPlan {
    pub fn lamp_count(&self) -> usize {
        self.placements.len()
    }
}

/// Solve coverage for the current selection, then refine if enabled.
///
/// Inputs are snapshots; nothing is cached between calls.
pub fn plan_lighting(
    grid: &OccupancyGrid,
    profile: &LampProfile,
    options: &PlanOptions,
) -> LightingPlan {
    let coverage = solve_coverage(grid, profile, options.units_per_meter);
    let placements = if options.refine {
        refine_placements(grid, profile, options.units_per_meter, &coverage.placements)
    } else {
        coverage.placements
    };

    info!(
        "{} selected cells -> {} lamps ({})",
        grid.selected_count(),
        placements.len(),
        profile.orientation
    );
    if !coverage.unresolved.is_empty() {
        warn!("{} cells left without a free sample", coverage.unresolved.len());
    }

    let scaled = profile.scaled(options.units_per_meter);
    LightingPlan {
        profile: *profile,
        light: scaled.light,
        fixture: scaled.fixture,
        refined: options.refine,
        placements,
        unresolved: coverage.unresolved,
    }
}
