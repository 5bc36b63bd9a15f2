//! Error types for the geograph core library.
//!
//! Defines the error enums exposed by the public API together with stable,
//! machine-readable codes for logging surfaces.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised by point construction and point arithmetic.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Points must have at least one coordinate.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("coordinate {index} is not finite: {value}")]
    NonFinite {
        /// Position of the offending coordinate.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// Two points with different dimensions were combined.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension required by the receiver.
        expected: usize,
        /// Dimension of the supplied point.
        actual: usize,
    },
    /// A line was requested through two coincident anchors.
    #[error("line anchors coincide; direction is undefined")]
    DegenerateLine,
}

define_error_codes! {
    /// Stable codes describing [`GeometryError`] variants.
    enum GeometryErrorCode for GeometryError {
        /// Points must have at least one coordinate.
        ZeroDimension => ZeroDimension => "GEOMETRY_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "GEOMETRY_NON_FINITE",
        /// Two points with different dimensions were combined.
        DimensionMismatch => DimensionMismatch { .. } => "GEOMETRY_DIMENSION_MISMATCH",
        /// A line was requested through two coincident anchors.
        DegenerateLine => DegenerateLine => "GEOMETRY_DEGENERATE_LINE",
    }
}

/// Errors raised by [`crate::ProximityGraph`] and the computations built on it.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// Graphs must be built over points with at least one coordinate.
    #[error("graph dimension must be at least 1")]
    ZeroDimension,
    /// Thresholds must be strictly positive and not NaN.
    #[error("threshold must be positive (got {value})")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },
    /// Shrinking may only lower the threshold.
    #[error("cannot shrink to {requested}: exceeds the insertion threshold {current}")]
    ThresholdIncrease {
        /// Insertion threshold stored on the graph.
        current: f64,
        /// Threshold passed to `shrink`.
        requested: f64,
    },
    /// A vertex id did not refer to a vertex of the graph.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The invalid vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A query needed a nearest vertex but the graph has none.
    #[error("graph contains no vertices")]
    EmptyGraph,
    /// A path was requested to a vertex the source cannot reach.
    #[error("vertex {to} is unreachable from vertex {from}")]
    NoPath {
        /// Source of the shortest-path tree.
        from: usize,
        /// Requested destination.
        to: usize,
    },
    /// A structural invariant of the graph does not hold.
    #[error("graph invariant `{invariant}` violated: {message}")]
    InvariantViolation {
        /// Name of the violated invariant.
        invariant: &'static str,
        /// Description of the first violation found.
        message: String,
    },
    /// Point arithmetic failed.
    #[error("geometry error: {source}")]
    Geometry {
        /// Underlying geometry failure.
        #[from]
        source: GeometryError,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Graphs must be built over points with at least one coordinate.
        ZeroDimension => ZeroDimension => "GRAPH_ZERO_DIMENSION",
        /// Thresholds must be strictly positive and not NaN.
        InvalidThreshold => InvalidThreshold { .. } => "GRAPH_INVALID_THRESHOLD",
        /// Shrinking may only lower the threshold.
        ThresholdIncrease => ThresholdIncrease { .. } => "GRAPH_THRESHOLD_INCREASE",
        /// A vertex id did not refer to a vertex of the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
        /// A query needed a nearest vertex but the graph has none.
        EmptyGraph => EmptyGraph => "GRAPH_EMPTY",
        /// A path was requested to a vertex the source cannot reach.
        NoPath => NoPath { .. } => "GRAPH_NO_PATH",
        /// A structural invariant of the graph does not hold.
        InvariantViolation => InvariantViolation { .. } => "GRAPH_INVARIANT_VIOLATION",
        /// Point arithmetic failed.
        GeometryFailure => Geometry { .. } => "GRAPH_GEOMETRY_FAILURE",
    }
}

impl GraphError {
    /// Retrieve the inner [`GeometryErrorCode`] when the failure came from
    /// point arithmetic.
    #[must_use]
    pub const fn geometry_code(&self) -> Option<GeometryErrorCode> {
        match self {
            Self::Geometry { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Errors raised while configuring or running a growth simulation.
#[cfg(feature = "simulation")]
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// The sampling interval must be at least one insertion.
    #[error("sampling interval must be at least 1")]
    ZeroInterval,
    /// The warm-up count must be at least one insertion.
    #[error("warm-up count must be at least 1")]
    ZeroWarmup,
    /// At least one trial must be requested.
    #[error("trial count must be at least 1")]
    ZeroTrials,
    /// No samples can be taken when warm-up consumes every insertion.
    #[error("warm-up count {warmup} must be below the vertex count {vertex_count}")]
    WarmupExceedsVertexCount {
        /// Requested warm-up count.
        warmup: usize,
        /// Requested vertex count.
        vertex_count: usize,
    },
    /// A floating-point parameter was non-finite or out of range.
    #[error("parameter `{parameter}` must be finite and positive")]
    InvalidFloatParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The sampling box has no volume.
    #[error("sampling box is empty: low={low}, high={high}")]
    EmptySamplingBox {
        /// Lower bound of every coordinate.
        low: f64,
        /// Upper bound of every coordinate.
        high: f64,
    },
    /// Sampled points must have at least one coordinate.
    #[error("sampling dimension must be at least 1")]
    ZeroDimension,
    /// A graph operation failed while the simulation was running.
    #[error("graph operation failed: {source}")]
    Graph {
        /// Underlying graph failure.
        #[from]
        source: GraphError,
    },
}

#[cfg(feature = "simulation")]
define_error_codes! {
    /// Stable codes describing [`SimulationError`] variants.
    enum SimulationErrorCode for SimulationError {
        /// The sampling interval must be at least one insertion.
        ZeroInterval => ZeroInterval => "SIMULATION_ZERO_INTERVAL",
        /// The warm-up count must be at least one insertion.
        ZeroWarmup => ZeroWarmup => "SIMULATION_ZERO_WARMUP",
        /// At least one trial must be requested.
        ZeroTrials => ZeroTrials => "SIMULATION_ZERO_TRIALS",
        /// Warm-up consumes every insertion.
        WarmupExceedsVertexCount => WarmupExceedsVertexCount { .. } => "SIMULATION_WARMUP_EXCEEDS_VERTEX_COUNT",
        /// A floating-point parameter was non-finite or out of range.
        InvalidFloatParameter => InvalidFloatParameter { .. } => "SIMULATION_INVALID_FLOAT_PARAMETER",
        /// The sampling box has no volume.
        EmptySamplingBox => EmptySamplingBox { .. } => "SIMULATION_EMPTY_SAMPLING_BOX",
        /// Sampled points must have at least one coordinate.
        ZeroDimension => ZeroDimension => "SIMULATION_ZERO_DIMENSION",
        /// A graph operation failed while the simulation was running.
        GraphFailure => Graph { .. } => "SIMULATION_GRAPH_FAILURE",
    }
}

#[cfg(feature = "simulation")]
impl SimulationError {
    /// Retrieve the inner [`GraphErrorCode`] when the failure came from the
    /// graph kernel.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the graph API.
pub type Result<T> = core::result::Result<T, GraphError>;
