use crate::{
    error::{PlannerError, Result},
    plan::LightingPlan,
};
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const CSV_HEADER: [&str; 5] = ["Index", "LightX", "LightY", "LampX", "LampY"];

/// File stem shared by every artifact of one run
pub fn output_stem() -> String {
    format!("lamp_plan_{}", Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

/// Create `dir` and open `dir/file_name` for writing.
pub(crate) fn create_output(dir: &Path, file_name: &str) -> Result<(PathBuf, BufWriter<File>)> {
    std::fs::create_dir_all(dir).map_err(|e| PlannerError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|e| PlannerError::CreateFile {
        path: path.clone(),
        source: e,
    })?;
    Ok((path, BufWriter::new(file)))
}

/// One row per placement, in placement order.
pub fn write_csv<W: Write>(plan: &LightingPlan, writer: W) -> Result<()> {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder.terminator(Terminator::CRLF);
    }
    let mut wtr = builder.from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for (i, p) in plan.placements.iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            p.light_anchor.x.to_string(),
            p.light_anchor.y.to_string(),
            p.lamp_anchor.x.to_string(),
            p.lamp_anchor.y.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(plan: &LightingPlan, dir: &Path, stem: &str) -> Result<PathBuf> {
    let (path, writer) = create_output(dir, &format!("{stem}.csv"))?;
    write_csv(plan, writer)?;
    Ok(path)
}

pub fn export_json(plan: &LightingPlan, dir: &Path, stem: &str) -> Result<PathBuf> {
    let (path, mut writer) = create_output(dir, &format!("{stem}.json"))?;
    serde_json::to_writer_pretty(&mut writer, plan)?;
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::OccupancyGrid,
        lamp::LampProfile,
        plan::{PlanOptions, plan_lighting},
    };
    use tempfile::TempDir;

    fn single_cell_plan() -> LightingPlan {
        let mut grid = OccupancyGrid::new(50, 50, 20);
        grid.select_centered_area(1, 1);
        plan_lighting(&grid, &LampProfile::default(), &PlanOptions::default())
    }

    #[test]
    fn test_write_csv_rows() {
        let plan = single_cell_plan();
        let mut buf = Vec::new();
        write_csv(&plan, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Index,LightX,LightY,LampX,LampY");
        // single cell centered at (24, 24)
        assert_eq!(lines[1], "0,480,480,489,485");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_export_csv_and_json() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested");
        let plan = single_cell_plan();

        let csv_path = export_csv(&plan, &out, "plan").unwrap();
        assert_eq!(csv_path, out.join("plan.csv"));
        assert!(csv_path.exists());

        let json_path = export_json(&plan, &out, "plan").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["placements"].as_array().unwrap().len(), 1);
        assert_eq!(value["profile"]["orientation"], "vertical");
        assert_eq!(value["light"]["height"], 30.0);
    }

    #[test]
    fn test_output_stem_format() {
        let stem = output_stem();
        assert!(stem.starts_with("lamp_plan_"));
        assert_eq!(stem.len(), "lamp_plan_".len() + "2024-01-01_00-00-00".len());
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = export_csv(&single_cell_plan(), &blocker, "plan").unwrap_err();
        assert!(matches!(err, PlannerError::CreateDir { .. }));
    }
}
