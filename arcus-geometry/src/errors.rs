use crate::*;
use thiserror::Error;

/// Error handler for [`Error`](./enum.Error.html)
pub type Result<T> = std::result::Result<T, Error>;

/// Geometrical errors
///
/// Every failure of the kernel is surfaced to the caller through one of the
/// variants below; the kernel never recovers locally. Variants carry the
/// values needed for the message, and the message itself is formatted lazily
/// on [`Display`](std::fmt::Display), so the failure path allocates nothing.
#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// Control points of dimension zero cannot describe a curve.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// assert_eq!(
    ///     BSplineCurve::try_new(knot_vec, vec![], 0),
    ///     Err(Error::ZeroDimension),
    /// );
    /// ```
    #[error("The dimension of control points must be at least one.")]
    ZeroDimension,
    /// The degree of a B-spline curve must be smaller than the number of its
    /// control points.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// assert_eq!(
    ///     BSplineCurve::try_with_style(2, 1, 2, KnotStyle::Clamped),
    ///     Err(Error::TooLargeDegree(2, 2)),
    /// );
    /// ```
    #[error("The degree ({0}) must be smaller than the number of control points ({1}).")]
    TooLargeDegree(usize, usize),
    /// The evaluation parameter lies outside the domain of the curve.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// let line = BSplineCurve::new(KnotVec::bezier_knot(1), vec![0.0, 1.0], 1);
    /// assert_eq!(line.try_eval(1.5), Err(Error::UndefinedKnot(1.5)));
    /// ```
    #[error("The knot ({0}) is undefined: it lies outside the domain of the curve.")]
    UndefinedKnot(Real),
    /// No knot value may occur more often than the order of the curve.
    #[error("The multiplicity of a knot ({0}) must not exceed the order of the curve ({1}).")]
    TooLargeMultiplicity(usize, usize),
    /// Knot vectors are non-decreasing sequences.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// assert_eq!(
    ///     KnotVec::try_from(vec![1.0, 3.0, 0.0, 2.0]),
    ///     Err(Error::DecreasingKnotVector),
    /// );
    /// ```
    #[error("This knot vector is decreasing.")]
    DecreasingKnotVector,
    /// The number of knots does not match the number of control points and
    /// the degree: `num_knots == num_control_points + degree + 1` must hold.
    #[error("The knot vector has the wrong length.
the expected number of knots: {0}
the actual number of knots: {1}")]
    InvalidKnotCount(usize, usize),
    /// Knot vectors longer than [`MAX_NUM_KNOTS`] cannot be resolved by the
    /// fuzzy knot equality and are rejected.
    #[error("The knot vector has {0} knots, which exceeds the supported maximum.")]
    TooManyKnots(usize),
    /// A curve that is discontinuous at an internal knot has no derivative
    /// there unless the flanking control points coincide.
    #[error("The curve is discontinuous at the knot ({0}) and cannot be derived.")]
    Underivable(Real),
    /// The length of the control-point buffer must be a positive multiple of
    /// the dimension.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// assert_eq!(
    ///     BSplineCurve::try_new(knot_vec, vec![0.0, 1.0, 2.0], 2),
    ///     Err(Error::ControlPointsDimensionMismatch(3, 2)),
    /// );
    /// ```
    #[error("The length of the control-point buffer ({0}) is not a positive multiple of the dimension ({1}).")]
    ControlPointsDimensionMismatch(usize, usize),
    /// Reading or writing a file failed before any parsing took place.
    #[error("I/O failure: {0}")]
    Io(String),
    /// The byte sequence is not a valid JSON representation of a curve.
    #[error("Parse failure: {0}")]
    ParseFailure(String),
    /// An index addressed a knot, control point, or coordinate that does not
    /// exist.
    #[error("The index ({0}) is out of range ({1}).")]
    IndexOutOfRange(usize, usize),
    /// An iterative search exhausted its iteration budget without finding a
    /// satisfying result.
    #[error("No result could be found within the iteration budget.")]
    NoResult,
    /// The number of points handed to a constructor does not fit the
    /// requested configuration.
    #[error("The number of points ({0}) does not fit the requested configuration.")]
    InvalidPointCount(usize),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error { Error::Io(error.to_string()) }
}

#[test]
#[rustfmt::skip]
fn print_messages() {
    use std::io::Write;
    let stderr = &mut std::io::stderr();
    writeln!(stderr, "****** test of the expressions of error messages ******\n").unwrap();
    writeln!(stderr, "{}\n", Error::ZeroDimension).unwrap();
    writeln!(stderr, "{}\n", Error::TooLargeDegree(3, 3)).unwrap();
    writeln!(stderr, "{}\n", Error::UndefinedKnot(1.5)).unwrap();
    writeln!(stderr, "{}\n", Error::TooLargeMultiplicity(4, 3)).unwrap();
    writeln!(stderr, "{}\n", Error::DecreasingKnotVector).unwrap();
    writeln!(stderr, "{}\n", Error::InvalidKnotCount(8, 7)).unwrap();
    writeln!(stderr, "{}\n", Error::TooManyKnots(10_001)).unwrap();
    writeln!(stderr, "{}\n", Error::Underivable(0.5)).unwrap();
    writeln!(stderr, "{}\n", Error::ControlPointsDimensionMismatch(3, 2)).unwrap();
    writeln!(stderr, "{}\n", Error::Io("file not found".to_string())).unwrap();
    writeln!(stderr, "{}\n", Error::ParseFailure("expected a number".to_string())).unwrap();
    writeln!(stderr, "{}\n", Error::IndexOutOfRange(7, 7)).unwrap();
    writeln!(stderr, "{}\n", Error::NoResult).unwrap();
    writeln!(stderr, "{}\n", Error::InvalidPointCount(5)).unwrap();
    writeln!(stderr, "*******************************************************").unwrap();
}
