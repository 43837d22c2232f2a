use thiserror::Error;

/// Errors raised while configuring a B-Spline curve or surface.
///
/// Evaluation itself never fails: degenerate geometry (zero-length tangents,
/// singular parametrizations, coincident knots) propagates NaN/Inf through
/// the returned values instead of erroring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("control point set is empty")]
    EmptyControlPoints,

    #[error("{count} control points cannot support degree {degree}")]
    TooFewControlPoints { count: usize, degree: usize },

    #[error("expected {expected} knots, got {actual}")]
    KnotCountMismatch { expected: usize, actual: usize },

    #[error("knot vector is not non-decreasing at index {index}")]
    UnsortedKnots { index: usize },

    #[error("control point grid rows have unequal lengths")]
    RaggedControlGrid,
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
