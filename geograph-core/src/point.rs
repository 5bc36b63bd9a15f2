//! Coordinate primitives for the proximity graph.
//!
//! A [`Point`] is an immutable, fixed-length sequence of finite `f64`
//! coordinates. Construction validates dimensionality and finiteness so the
//! arithmetic below only has to guard against mixing dimensions.

use core::fmt;

use crate::error::GeometryError;

/// Convenient alias for point arithmetic.
pub type Result<T> = core::result::Result<T, GeometryError>;

/// A point in n-dimensional Euclidean space.
///
/// # Examples
/// ```
/// use geograph_core::{GeometryError, Point};
///
/// let a = Point::new(vec![0.0, 0.0])?;
/// let b = Point::try_from([3.0, 4.0])?;
/// assert_eq!(a.distance(&b)?, 5.0);
/// assert_eq!(b.dimension(), 2);
/// # Ok::<(), GeometryError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coords: Vec<f64>,
}

impl Point {
    /// Validates and constructs a [`Point`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDimension`] when no coordinates are given
    /// and [`GeometryError::NonFinite`] when a coordinate is NaN or infinite.
    pub fn new(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let coords = coords.into();
        if coords.is_empty() {
            return Err(GeometryError::ZeroDimension);
        }
        if let Some((index, value)) = coords
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(GeometryError::NonFinite { index, value });
        }
        Ok(Self { coords })
    }

    /// Returns the number of coordinates.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Returns the coordinates in order.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Ensures `other` shares this point's dimension.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when the dimensions differ.
    pub fn ensure_same_dimension(&self, other: &Self) -> Result<()> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(GeometryError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            })
        }
    }

    /// Component-wise difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when the dimensions differ
    /// and [`GeometryError::NonFinite`] when a difference overflows.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.ensure_same_dimension(other)?;
        Self::new(
            self.coords
                .iter()
                .zip(&other.coords)
                .map(|(l, r)| l - r)
                .collect::<Vec<_>>(),
        )
    }

    /// Multiplies every coordinate by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] when a product is NaN or infinite.
    pub fn scale(&self, factor: f64) -> Result<Self> {
        Self::new(
            self.coords
                .iter()
                .map(|value| value * factor)
                .collect::<Vec<_>>(),
        )
    }

    /// Returns the unit vector pointing the same way, or `None` for the
    /// origin.
    ///
    /// Coordinates are divided by the largest magnitude first so neither
    /// huge nor tiny vectors lose their direction.
    #[must_use]
    pub fn normalize(&self) -> Option<Self> {
        let largest = max_magnitude(&self.coords);
        if largest == 0.0 {
            return None;
        }
        let rescaled: Vec<f64> = self.coords.iter().map(|value| value / largest).collect();
        let length = sum_of_squares(&rescaled).sqrt();
        Some(Self {
            coords: rescaled.into_iter().map(|value| value / length).collect(),
        })
    }

    /// Dot product of two points viewed as vectors.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when the dimensions differ.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.ensure_same_dimension(other)?;
        Ok(self.coords.iter().zip(&other.coords).map(|(l, r)| l * r).sum())
    }

    /// Euclidean norm of the point viewed as a vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        scaled_length(&self.coords)
    }

    /// Euclidean distance between two points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when the dimensions differ.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        self.ensure_same_dimension(other)?;
        let diffs: Vec<f64> = self
            .coords
            .iter()
            .zip(&other.coords)
            .map(|(l, r)| l - r)
            .collect();
        Ok(scaled_length(&diffs))
    }
}

fn max_magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, value| acc.max(value.abs()))
}

fn sum_of_squares(values: &[f64]) -> f64 {
    values.iter().map(|value| value * value).sum()
}

// Every rescaled term lies in [-1, 1], so squaring cannot overflow or vanish.
fn scaled_length(values: &[f64]) -> f64 {
    let largest = max_magnitude(values);
    if largest == 0.0 || !largest.is_finite() {
        return largest;
    }
    let rescaled: Vec<f64> = values.iter().map(|value| value / largest).collect();
    largest * sum_of_squares(&rescaled).sqrt()
}

impl TryFrom<Vec<f64>> for Point {
    type Error = GeometryError;

    fn try_from(coords: Vec<f64>) -> Result<Self> {
        Self::new(coords)
    }
}

impl<const N: usize> TryFrom<[f64; N]> for Point {
    type Error = GeometryError;

    fn try_from(coords: [f64; N]) -> Result<Self> {
        Self::new(coords.to_vec())
    }
}

/// Formats coordinates separated by commas, e.g. `0.25,-0.5`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.coords.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
