/// Grid settings
pub const DEFAULT_GRID_COLS: usize = 50;
pub const DEFAULT_GRID_ROWS: usize = 50;
pub const DEFAULT_CELL_SIZE: u32 = 20; // units per cell edge (1 cell = 1 m^2)

/// unit conversion m -> unit
pub const DEFAULT_UNITS_PER_METER: f64 = 20.0;

/// Pointer toggling
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Initial selected area (cells), centered in the grid
pub const DEFAULT_AREA_WIDTH: usize = 10;
pub const DEFAULT_AREA_HEIGHT: usize = 10;

/// Lamp profile defaults [m]
pub const DEFAULT_FRAME_WIDTH_M: f64 = 0.1;
pub const DEFAULT_FRAME_HEIGHT_M: f64 = 1.0;
pub const DEFAULT_LIGHT_WIDTH_M: f64 = 1.0;
pub const DEFAULT_LIGHT_HEIGHT_M: f64 = 1.5;

/// Environment variable overriding `[output] dir`
pub const ENV_OUTPUT_DIR: &str = "LAMP_PLANNER_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "plans";

/// Selection mask characters
pub const MASK_SELECTED: [char; 2] = ['#', 'x'];
pub const MASK_FREE: char = '.';
