use crate::{
    constants::{
        DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH, DEFAULT_CELL_SIZE, DEFAULT_DEBOUNCE_MS,
        DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_OUTPUT_DIR, DEFAULT_UNITS_PER_METER,
        ENV_OUTPUT_DIR,
    },
    error::{PlannerError, Result},
    grid::OccupancyGrid,
    lamp::LampProfile,
    plan::PlanOptions,
    toggle::ToggleGate,
};
use serde::{Deserialize, Serialize};
use std::{
    env, fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub area: AreaConfig,
    pub lamp: LampProfile,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: u32,       // [unit]
    pub units_per_meter: f64, // m -> unit
    pub debounce_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_COLS,
            rows: DEFAULT_GRID_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            units_per_meter: DEFAULT_UNITS_PER_METER,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Selected area: a mask file, or a centered rectangle
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AreaConfig {
    pub width: usize,
    pub height: usize,
    pub mask: Option<PathBuf>,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_AREA_WIDTH,
            height: DEFAULT_AREA_HEIGHT,
            mask: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    pub refine: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Svg,
    #[default]
    All,
}

impl OutputFormat {
    pub fn includes(self, other: OutputFormat) -> bool {
        self == OutputFormat::All || self == other
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Svg => "svg",
            OutputFormat::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "svg" => Ok(OutputFormat::Svg),
            "all" => Ok(OutputFormat::All),
            other => Err(format!(
                "unknown output format '{other}'. Must be 'csv', 'json', 'svg' or 'all'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::All,
        }
    }
}

impl Config {
    /// Read, apply the environment override and validate.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// `LAMP_PLANNER_OUTPUT_DIR` replaces `[output] dir` when set and non-blank.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = env::var(ENV_OUTPUT_DIR)
            && !dir.trim().is_empty()
        {
            let path = PathBuf::from(dir);
            if path.exists() && !path.is_dir() {
                return Err(PlannerError::Config(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            self.output.dir = path;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if grid.cols == 0 || grid.rows == 0 {
            return Err(PlannerError::Config(format!(
                "grid must have at least one cell, got {}x{}",
                grid.cols, grid.rows
            )));
        }
        if grid.cell_size == 0 {
            return Err(PlannerError::Config("cell_size must be positive".to_string()));
        }
        if !grid.units_per_meter.is_finite() || grid.units_per_meter <= 0.0 {
            return Err(PlannerError::Config(format!(
                "units_per_meter must be positive, got {}",
                grid.units_per_meter
            )));
        }
        if self.area.mask.is_none() && (self.area.width == 0 || self.area.height == 0) {
            return Err(PlannerError::Config(format!(
                "area must be at least 1x1, got {}x{}",
                self.area.width, self.area.height
            )));
        }

        self.lamp.validate()
    }

    /// Grid with the configured selection applied.
    pub fn build_grid(&self) -> Result<OccupancyGrid> {
        let mut grid = OccupancyGrid::new(self.grid.cols, self.grid.rows, self.grid.cell_size);
        match &self.area.mask {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    PlannerError::Config(format!(
                        "Failed to read mask file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                grid.load_mask(&text)?;
            }
            None => grid.select_centered_area(self.area.width, self.area.height),
        }
        Ok(grid)
    }

    /// Debounced toggle collaborator for pointer-driven editing.
    ///
    /// Used by interactive front ends; the CLI never toggles cells.
    pub fn toggle_gate(&self) -> ToggleGate {
        ToggleGate::new(Duration::from_millis(self.grid.debounce_ms))
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            units_per_meter: self.grid.units_per_meter,
            refine: self.solver.refine,
        }
    }
}
