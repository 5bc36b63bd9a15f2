//! Uniform point sampling inside an axis-aligned box.

use rand::{
    Rng,
    distributions::{Distribution, Uniform},
};

use crate::{
    error::{GeometryError, SimulationError},
    point::Point,
};

/// Samples points whose coordinates are independent and uniform in
/// `[low, high)`.
#[derive(Clone, Debug)]
pub struct UniformBox {
    low: f64,
    high: f64,
    dimension: usize,
    distribution: Uniform<f64>,
}

impl UniformBox {
    /// Creates a sampler over the cube `[low, high)^dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ZeroDimension`] for a zero dimension,
    /// [`SimulationError::InvalidFloatParameter`] for non-finite bounds and
    /// [`SimulationError::EmptySamplingBox`] when `low >= high`.
    ///
    /// # Examples
    /// ```
    /// use geograph_core::UniformBox;
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let sampler = UniformBox::new(-0.5, 0.5, 3).expect("box is valid");
    /// let point = sampler.sample(&mut SmallRng::seed_from_u64(1)).expect("point is finite");
    /// assert_eq!(point.dimension(), 3);
    /// ```
    pub fn new(low: f64, high: f64, dimension: usize) -> Result<Self, SimulationError> {
        if dimension == 0 {
            return Err(SimulationError::ZeroDimension);
        }
        if !low.is_finite() {
            return Err(SimulationError::InvalidFloatParameter { parameter: "low" });
        }
        if !high.is_finite() {
            return Err(SimulationError::InvalidFloatParameter { parameter: "high" });
        }
        if low >= high {
            return Err(SimulationError::EmptySamplingBox { low, high });
        }
        if !(high - low).is_finite() {
            return Err(SimulationError::InvalidFloatParameter { parameter: "high" });
        }
        Ok(Self {
            low,
            high,
            dimension,
            distribution: Uniform::new(low, high),
        })
    }

    /// Lower bound of every coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn low(&self) -> f64 { self.low }

    /// Exclusive upper bound of every coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn high(&self) -> f64 { self.high }

    /// Dimension of sampled points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimension(&self) -> usize { self.dimension }

    /// Draws one point from `rng`.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from point validation; sampled
    /// coordinates are always finite, so this only fails if the box was
    /// corrupted.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point, GeometryError> {
        let coords: Vec<f64> = (0..self.dimension)
            .map(|_| self.distribution.sample(rng))
            .collect();
        Point::new(coords)
    }
}
