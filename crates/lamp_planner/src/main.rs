use anyhow::{Context, Result};
use clap::Parser;
use lamp_planner::{
    Config, Orientation, OutputFormat, export, plan_lighting,
    visualization::{RenderOptions, export_svg},
};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Place lamps so their light covers a selected area", long_about = None)]
struct Args {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Selection mask file ('#'/'x' selected, '.' free)
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Width of the centered selected area [cells]
    #[arg(long, conflicts_with = "mask")]
    width: Option<usize>,

    /// Height of the centered selected area [cells]
    #[arg(long, conflicts_with = "mask")]
    height: Option<usize>,

    /// Lamp orientation: vertical | horizontal
    #[arg(short, long)]
    orientation: Option<String>,

    /// Move lamps back so fixtures stay inside the selected area
    #[arg(short, long)]
    refine: bool,

    /// Output directory
    #[arg(short = 'd', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Output format: csv | json | svg | all
    #[arg(short, long)]
    format: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let mut config = Config::default();
            config.apply_env()?;
            config
        }
    };

    if let Some(mask) = &args.mask {
        config.area.mask = Some(mask.clone());
    }
    if let Some(width) = args.width {
        config.area.width = width;
        config.area.mask = None;
    }
    if let Some(height) = args.height {
        config.area.height = height;
        config.area.mask = None;
    }
    if let Some(orientation) = &args.orientation {
        config.lamp.orientation = orientation
            .parse::<Orientation>()
            .map_err(anyhow::Error::msg)?;
    }
    if args.refine {
        config.solver.refine = true;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(format) = &args.format {
        config.output.format = format
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let config = load_config(&args)?;
    debug!("{config:#?}");

    let grid = config.build_grid()?;
    if grid.selected_count() == 0 {
        warn!("No cells selected; nothing to plan.");
        return Ok(());
    }

    info!("=== Lamp Placement ===");
    info!("Grid: {}x{} cells of {} units", grid.cols(), grid.rows(), grid.cell_size());
    info!("Selected cells: {}", grid.selected_count());
    info!(
        "Lamp: frame {}x{} m, light {}x{} m, {}",
        config.lamp.frame_width,
        config.lamp.frame_height,
        config.lamp.light_width,
        config.lamp.light_height,
        config.lamp.orientation
    );
    info!("Refine: {}", config.solver.refine);

    let plan = plan_lighting(&grid, &config.lamp, &config.plan_options());
    info!("Lamps placed: {}", plan.lamp_count());
    if !plan.unresolved.is_empty() {
        warn!("Cells without a free sample: {:?}", plan.unresolved);
    }

    let dir = &config.output.dir;
    let format = config.output.format;
    let stem = export::output_stem();
    if format.includes(OutputFormat::Csv) {
        let path = export::export_csv(&plan, dir, &stem)?;
        info!("Placements saved to: {}", path.display());
    }
    if format.includes(OutputFormat::Json) {
        let path = export::export_json(&plan, dir, &stem)?;
        info!("Plan saved to: {}", path.display());
    }
    if format.includes(OutputFormat::Svg) {
        let path = export_svg(&grid, &plan, &RenderOptions::default(), dir, &stem)?;
        info!("Drawing saved to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_mask_conflicts_with_area_size() {
        let err = Args::try_parse_from(["lamp_planner", "--mask", "area.txt", "--width", "4"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = Args::try_parse_from(["lamp_planner", "-m", "area.txt", "--height", "4"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_area_size_overrides_config() {
        let args =
            Args::try_parse_from(["lamp_planner", "--width", "3", "--height", "2", "-r"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!((config.area.width, config.area.height), (3, 2));
        assert!(config.area.mask.is_none());
        assert!(config.solver.refine);

        let args = Args::try_parse_from(["lamp_planner", "--mask", "area.txt"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.area.mask, Some(PathBuf::from("area.txt")));
    }
}
