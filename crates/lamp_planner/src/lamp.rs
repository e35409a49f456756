use crate::{
    constants::{
        DEFAULT_FRAME_HEIGHT_M, DEFAULT_FRAME_WIDTH_M, DEFAULT_LIGHT_HEIGHT_M,
        DEFAULT_LIGHT_WIDTH_M,
    },
    error::{PlannerError, Result},
    geometry::{Extent, Orientation, Point, Rect},
};
use serde::{Deserialize, Serialize};

/// Fixture geometry in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LampProfile {
    pub frame_width: f64,
    pub frame_height: f64,
    pub light_width: f64,
    pub light_height: f64,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Default for LampProfile {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH_M,
            frame_height: DEFAULT_FRAME_HEIGHT_M,
            light_width: DEFAULT_LIGHT_WIDTH_M,
            light_height: DEFAULT_LIGHT_HEIGHT_M,
            orientation: Orientation::Vertical,
        }
    }
}

impl LampProfile {
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Convert to unit space with axes already mapped for the orientation.
    pub fn scaled(&self, units_per_meter: f64) -> ScaledProfile {
        let light = Extent::new(self.light_width, self.light_height);
        let fixture = Extent::new(self.frame_width, self.frame_height);
        ScaledProfile {
            light: self.orientation.orient(scale(light, units_per_meter)),
            fixture: self.orientation.orient(scale(fixture, units_per_meter)),
            orientation: self.orientation,
        }
    }

    /// Reject profiles the planner would turn into degenerate placements.
    ///
    /// The solver does not call this; callers validate before planning.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("frame_width", self.frame_width),
            ("frame_height", self.frame_height),
            ("light_width", self.light_width),
            ("light_height", self.light_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::InvalidProfile {
                    message: format!("{name} must be a positive number, got {value}"),
                });
            }
        }
        if self.frame_width > self.light_width || self.frame_height > self.light_height {
            return Err(PlannerError::InvalidProfile {
                message: format!(
                    "fixture {}x{} m does not fit inside its light footprint {}x{} m",
                    self.frame_width, self.frame_height, self.light_width, self.light_height
                ),
            });
        }
        Ok(())
    }
}

fn scale(extent: Extent, units_per_meter: f64) -> Extent {
    Extent::new(extent.width * units_per_meter, extent.height * units_per_meter)
}

/// Lamp profile in grid units, extents mapped onto x/y
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledProfile {
    pub light: Extent,
    pub fixture: Extent,
    pub orientation: Orientation,
}

impl ScaledProfile {
    pub fn light_rect(&self, light_anchor: Point) -> Rect {
        Rect::new(light_anchor, self.light)
    }

    pub fn fixture_rect(&self, lamp_anchor: Point) -> Rect {
        Rect::new(lamp_anchor, self.fixture)
    }

    /// Top-left of the fixture, centered inside the light footprint.
    pub fn lamp_anchor(&self, light_anchor: Point) -> Point {
        light_anchor.offset(
            (self.light.width - self.fixture.width) / 2.0,
            (self.light.height - self.fixture.height) / 2.0,
        )
    }

    pub fn place(&self, light_anchor: Point) -> LightPlacement {
        LightPlacement {
            light_anchor,
            lamp_anchor: self.lamp_anchor(light_anchor),
        }
    }
}

/// One placed lamp: light footprint anchor and the derived fixture anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPlacement {
    pub light_anchor: Point,
    pub lamp_anchor: Point,
}
