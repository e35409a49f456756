//! Unit-space primitives shared by the solver and the refiner.
//!
//! All bounds checks are inclusive on both ends: a point lying exactly on an
//! edge is inside. Adjacent rectangles therefore both contain their shared
//! edge.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Continuous coordinate in grid units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width (x) and height (y) of a rectangle in grid units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Lamp mounting direction.
///
/// `Vertical` maps the profile's width to x and height to y; `Horizontal`
/// rotates the footprint by 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Map a profile extent (width, height) onto the x/y axes.
    pub fn orient(self, extent: Extent) -> Extent {
        match self {
            Orientation::Vertical => extent,
            Orientation::Horizontal => extent.swapped(),
        }
    }

    /// Axis along which the fixture's long side runs.
    pub fn primary_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::Y,
            Orientation::Horizontal => Axis::X,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            other => Err(format!(
                "unknown orientation '{other}'. Must be 'vertical' or 'horizontal'"
            )),
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub extent: Extent,
}

impl Rect {
    pub fn new(origin: Point, extent: Extent) -> Self {
        Self { origin, extent }
    }

    /// Rectangle at `anchor` whose profile extent is rotated by `orientation`.
    pub fn oriented(anchor: Point, extent: Extent, orientation: Orientation) -> Self {
        Self::new(anchor, orientation.orient(extent))
    }

    pub fn square(origin: Point, size: f64) -> Self {
        Self::new(origin, Extent::new(size, size))
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.extent.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.extent.height
    }

    /// Far edge coordinate along `axis`.
    pub fn far_edge(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    /// Inclusive on all four edges.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.right() && p.y >= self.origin.y && p.y <= self.bottom()
    }

    /// top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.origin;
        [
            Point::new(x, y),
            Point::new(self.right(), y),
            Point::new(x, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// True if any corner of `self` lies inside `other`.
    pub fn any_corner_in(&self, other: &Rect) -> bool {
        self.corners().iter().any(|&c| other.contains(c))
    }

    /// Unit-step samples, x outer / y inner.
    ///
    /// Samples start at the origin and stay strictly below the far edges, so a
    /// 20x20 cell at (0, 0) yields x, y in 0..=19.
    pub fn unit_points(&self) -> impl Iterator<Item = Point> + '_ {
        unit_steps(self.origin.x, self.extent.width).flat_map(move |x| {
            unit_steps(self.origin.y, self.extent.height).map(move |y| Point::new(x, y))
        })
    }

    /// Unit-step samples, y outer / x inner.
    pub fn unit_points_by_row(&self) -> impl Iterator<Item = Point> + '_ {
        unit_steps(self.origin.y, self.extent.height).flat_map(move |y| {
            unit_steps(self.origin.x, self.extent.width).map(move |x| Point::new(x, y))
        })
    }
}

fn unit_steps(start: f64, len: f64) -> impl Iterator<Item = f64> {
    let end = start + len;
    (0u64..)
        .map(move |i| start + i as f64)
        .take_while(move |&v| v < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::square(Point::new(20.0, 20.0), 20.0);
        assert!(r.contains(Point::new(20.0, 20.0)));
        assert!(r.contains(Point::new(40.0, 40.0)));
        assert!(r.contains(Point::new(40.0, 20.0)));
        assert!(!r.contains(Point::new(40.5, 30.0)));
        assert!(!r.contains(Point::new(19.0, 30.0)));
    }

    #[test]
    fn test_shared_edge_belongs_to_both() {
        let left = Rect::square(Point::new(0.0, 0.0), 20.0);
        let right = Rect::square(Point::new(20.0, 0.0), 20.0);
        let edge = Point::new(20.0, 10.0);
        assert!(left.contains(edge));
        assert!(right.contains(edge));
    }

    #[test]
    fn test_oriented_swaps_extent() {
        let extent = Extent::new(20.0, 30.0);
        let v = Rect::oriented(Point::default(), extent, Orientation::Vertical);
        let h = Rect::oriented(Point::default(), extent, Orientation::Horizontal);
        assert_eq!(v.extent, Extent::new(20.0, 30.0));
        assert_eq!(h.extent, Extent::new(30.0, 20.0));
        assert!(v.contains(Point::new(10.0, 30.0)));
        assert!(!h.contains(Point::new(10.0, 30.0)));
        assert!(h.contains(Point::new(30.0, 10.0)));
    }

    #[test]
    fn test_primary_axis() {
        assert_eq!(Orientation::Vertical.primary_axis(), Axis::Y);
        assert_eq!(Orientation::Horizontal.primary_axis(), Axis::X);
        let r = Rect::new(Point::new(5.0, 7.0), Extent::new(2.0, 20.0));
        assert_eq!(r.far_edge(Axis::X), 7.0);
        assert_eq!(r.far_edge(Axis::Y), 27.0);
    }

    #[test]
    fn test_corners_order() {
        let r = Rect::new(Point::new(1.0, 2.0), Extent::new(3.0, 4.0));
        assert_eq!(
            r.corners(),
            [
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(1.0, 6.0),
                Point::new(4.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_any_corner_in() {
        let cell = Rect::square(Point::new(0.0, 0.0), 20.0);
        let overhang = Rect::new(Point::new(9.0, 5.0), Extent::new(2.0, 20.0));
        let outside = Rect::new(Point::new(25.0, 25.0), Extent::new(2.0, 2.0));
        assert!(overhang.any_corner_in(&cell));
        assert!(!outside.any_corner_in(&cell));
    }

    #[test]
    fn test_unit_points_scan_order() {
        let r = Rect::new(Point::new(0.0, 0.0), Extent::new(2.0, 3.0));
        let cols: Vec<_> = r.unit_points().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            cols,
            vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]
        );
        let rows: Vec<_> = r.unit_points_by_row().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            rows,
            vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 2.0), (1.0, 2.0)]
        );
    }

    #[test]
    fn test_unit_points_fractional_origin() {
        let r = Rect::new(Point::new(0.5, 0.0), Extent::new(2.0, 1.0));
        let xs: Vec<_> = r.unit_points().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.5, 1.5]);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!(" horizontal ".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert!("diagonal".parse::<Orientation>().is_err());
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
        assert_eq!(Orientation::Vertical.flipped(), Orientation::Horizontal);
    }
}
