use super::Mesh;
use crate::error::ViewSpotError;

use std::fmt;
use std::ops::{Add, Div};

/// Default size (in SVG user units) of the square that display coordinates are scaled into
pub const DISPLAY_EXTENT: f64 = 500.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Point in 2D Space
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The centroid of three Points
    pub fn centroid(points: [&Self; 3]) -> Self {
        (*points[0] + *points[1] + *points[2]) / 3.0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, divis: f64) -> Self {
        Self::new(self.x / divis, self.y / divis)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {:.10}, y: {:.10})", self.x, self.y)
    }
}

/// Map `value` from `[min, max]` onto `[0, 1]`
///
/// No special handling is done for `min == max`: the result is whatever IEEE-754 division gives
/// (`NaN` when `value == min`, `±inf` otherwise). Use [`Range::normalize`] for a total mapping.
#[inline]
pub fn normalize(min: f64, max: f64, value: f64) -> f64 {
    (value - min) / (max - min)
}

/// The minimum and maximum of a collection of samples
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Find the extrema of `samples` with a single linear scan
    ///
    /// Returns `EmptyInput` if there are no samples. `what` names the samples in that error.
    pub fn from_samples<I>(samples: I, what: &'static str) -> Result<Self, ViewSpotError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut samples = samples.into_iter();
        let first = samples.next().ok_or(ViewSpotError::EmptyInput(what))?;

        Ok(samples.fold(Self { min: first, max: first }, |range, s| Self {
            min: if s < range.min { s } else { range.min },
            max: if s > range.max { s } else { range.max },
        }))
    }

    /// `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// true if every sample had the same value
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Map `value` into `[0, 1]` relative to this range
    ///
    /// A degenerate range maps every value to `0.0`
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            normalize(self.min, self.max, value)
        }
    }

    /// Map `value` into `[0, extent]` relative to this range
    pub fn scale(&self, value: f64, extent: f64) -> f64 {
        self.normalize(value) * extent
    }
}

/// The x and y extents of a set of Nodes
///
/// Each axis is scaled independently, so a mesh always fills the whole display square.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub x: Range,
    pub y: Range,
}

impl Bounds {
    pub fn of_nodes(mesh: &Mesh) -> Result<Self, ViewSpotError> {
        Ok(Self {
            x: Range::from_samples(mesh.nodes.iter().map(|n| n.coords.x), "nodes")?,
            y: Range::from_samples(mesh.nodes.iter().map(|n| n.coords.y), "nodes")?,
        })
    }

    /// Map a Point in real space into the `[0, extent]` display square
    pub fn to_display(&self, p: &Point, extent: f64) -> Point {
        Point::new(self.x.scale(p.x, extent), self.y.scale(p.y, extent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_endpoints() {
        let range = Range::from_samples([3.5, -2.0, 7.25, 0.0], "values").unwrap();
        assert_eq!(range.min, -2.0);
        assert_eq!(range.max, 7.25);

        assert_eq!(normalize(range.min, range.max, range.min), 0.0);
        assert_eq!(normalize(range.min, range.max, range.max), 1.0);
        assert!((range.normalize(2.625) - 0.5).abs() < 1e-14);
        assert!((range.scale(2.625, DISPLAY_EXTENT) - 250.0).abs() < 1e-10);
    }

    #[test]
    fn single_sample() {
        let range = Range::from_samples([4.0], "values").unwrap();
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(4.0), 0.0);
        assert!(normalize(range.min, range.max, 4.0).is_nan());
        assert!(normalize(range.min, range.max, 5.0).is_infinite());
    }

    #[test]
    fn empty_samples() {
        let err = Range::from_samples(Vec::<f64>::new(), "values").unwrap_err();
        assert!(matches!(err, ViewSpotError::EmptyInput("values")));
    }

    #[test]
    fn centroid() {
        let [a, b, c] = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        ];
        assert_eq!(Point::centroid([&a, &b, &c]), Point::new(1.0, 1.0));
    }
}
