use crate::{
    error::Result,
    export::create_output,
    geometry::Rect,
    grid::OccupancyGrid,
    plan::LightingPlan,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// SVG drawing options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub scale_px_per_unit: f64,
    pub margin_px: f64,
    pub show_grid: bool,
    pub cell_padding_px: f64, // inset of the selected-cell fill
    pub grid_stroke: &'static str,
    pub selected_fill: &'static str,
    pub light_fill: &'static str,
    pub light_stroke: &'static str,
    pub fixture_fill: &'static str,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale_px_per_unit: 1.0,
            margin_px: 0.0,
            show_grid: true,
            cell_padding_px: 2.0,
            grid_stroke: "black",
            selected_fill: "lightgrey",
            light_fill: "rgba(255, 255, 0, 0.5)",
            light_stroke: "orange",
            fixture_fill: "black",
        }
    }
}

struct Canvas<'a> {
    opt: &'a RenderOptions,
}

impl Canvas<'_> {
    fn px(&self, v: f64) -> f64 {
        v * self.opt.scale_px_per_unit
    }

    fn rect<W: Write>(&self, w: &mut W, r: &Rect, inset: f64, style: &str) -> Result<()> {
        let m = self.opt.margin_px;
        writeln!(
            w,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {style}/>"#,
            m + self.px(r.origin.x) + inset,
            m + self.px(r.origin.y) + inset,
            (self.px(r.extent.width) - 2.0 * inset).max(0.0),
            (self.px(r.extent.height) - 2.0 * inset).max(0.0),
        )?;
        Ok(())
    }
}

/// Grid, selection, translucent light footprints and fixture bars.
pub fn render_svg<W: Write>(
    grid: &OccupancyGrid,
    plan: &LightingPlan,
    opt: &RenderOptions,
    w: &mut W,
) -> Result<()> {
    let canvas = Canvas { opt };
    let size = f64::from(grid.cell_size());
    let width = 2.0 * opt.margin_px + canvas.px(grid.cols() as f64 * size);
    let height = 2.0 * opt.margin_px + canvas.px(grid.rows() as f64 * size);

    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    )?;
    writeln!(w, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

    for cell in grid.cells() {
        if opt.show_grid {
            let style = format!(r#"fill="none" stroke="{}" stroke-width="1""#, opt.grid_stroke);
            canvas.rect(w, &cell.rect(), 0.0, &style)?;
        }
        if cell.selected {
            let style = format!(r#"fill="{}""#, opt.selected_fill);
            canvas.rect(w, &cell.rect(), opt.cell_padding_px, &style)?;
        }
    }

    let light_style = format!(
        r#"fill="{}" stroke="{}" stroke-width="1""#,
        opt.light_fill, opt.light_stroke
    );
    let fixture_style = format!(r#"fill="{}""#, opt.fixture_fill);
    for p in &plan.placements {
        canvas.rect(w, &Rect::new(p.light_anchor, plan.light), 0.0, &light_style)?;
        canvas.rect(w, &Rect::new(p.lamp_anchor, plan.fixture), 0.0, &fixture_style)?;
    }

    writeln!(w, "</svg>")?;
    Ok(())
}

pub fn export_svg(
    grid: &OccupancyGrid,
    plan: &LightingPlan,
    opt: &RenderOptions,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let (path, mut writer) = create_output(dir, &format!("{stem}.svg"))?;
    render_svg(grid, plan, opt, &mut writer)?;
    writer.flush()?;
    Ok(path)
}
