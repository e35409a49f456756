pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod lamp;
pub mod plan;
pub mod refine;
pub mod solver;
pub mod toggle;
pub mod visualization;

pub use config::{Config, OutputFormat};
pub use error::{PlannerError, Result};
pub use geometry::{Extent, Orientation, Point, Rect};
pub use grid::{Cell, CellIndex, OccupancyGrid};
pub use lamp::{LampProfile, LightPlacement, ScaledProfile};
pub use plan::{LightingPlan, PlanOptions, plan_lighting};
pub use refine::refine_placements;
pub use solver::{Coverage, solve_coverage};
pub use toggle::ToggleGate;
pub use visualization::{RenderOptions, render_svg};
