//! Perpendicular distance to an infinite line.

use crate::error::GeometryError;
use crate::point::{Point, Result};

/// Infinite line through two anchors, stored as an origin and a unit
/// direction.
///
/// # Examples
/// ```
/// use geograph_core::{GeometryError, LineDistance, Point};
///
/// let line = LineDistance::new(&Point::try_from([0.0, 0.0])?, &Point::try_from([1.0, 0.0])?)?;
/// assert_eq!(line.distance(&Point::try_from([0.5, -0.5])?)?, 0.5);
/// # Ok::<(), GeometryError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LineDistance {
    origin: Point,
    direction: Point,
}

impl LineDistance {
    /// Builds the line through `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when the anchors disagree
    /// on dimension and [`GeometryError::DegenerateLine`] when they coincide.
    pub fn new(a: &Point, b: &Point) -> Result<Self> {
        let direction = anchor_offset(a, b)?
            .normalize()
            .ok_or(GeometryError::DegenerateLine)?;
        Ok(Self {
            origin: a.clone(),
            direction,
        })
    }

    /// Returns the first anchor.
    #[must_use]
    pub fn origin(&self) -> &Point {
        &self.origin
    }

    /// Returns the unit direction from the first anchor towards the second.
    #[must_use]
    pub fn direction(&self) -> &Point {
        &self.direction
    }

    /// Returns the distance from `point` to the line.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when `point` does not
    /// match the anchors and [`GeometryError::NonFinite`] when `point` lies
    /// too far from the origin for its offset to be represented.
    pub fn distance(&self, point: &Point) -> Result<f64> {
        let offset = point.try_sub(&self.origin)?;
        let along = offset.dot(&self.direction)?;
        let perpendicular = offset.try_sub(&self.direction.scale(along)?)?;
        Ok(perpendicular.norm())
    }
}

/// `b - a`, falling back to half the difference when the full one overflows.
/// Only the direction is used, so the factor is irrelevant.
fn anchor_offset(a: &Point, b: &Point) -> Result<Point> {
    match b.try_sub(a) {
        Err(GeometryError::NonFinite { .. }) => b.scale(0.5)?.try_sub(&a.scale(0.5)?),
        other => other,
    }
}
