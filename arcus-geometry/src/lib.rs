//! # Overview
//! `arcus-geometry` is the B-spline algebra kernel of the `arcus` workspace:
//! construction, De Boor evaluation, and shape-preserving transformation of
//! B-spline curves of arbitrary dimension, including the NURBS
//! (homogeneous-coordinate) and Bezier special cases.
//!
//! Control points are stored in one contiguous buffer, interleaved by
//! coordinate, so the same code path serves planar curves, space curves, and
//! homogeneous NURBS alike.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

use serde::{Deserialize, Serialize};

/// re-export `arcus_base`
pub mod base {
    pub use arcus_base::tolerance::*;
    pub use arcus_base::Real;
    pub use arcus_base::{assert_near, prop_assert_near};
}
pub use base::*;
pub use errors::Error;

/// knot vector
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KnotVec(Vec<Real>);

/// B-spline curve of arbitrary dimension.
///
/// The control polygon is one interleaved scalar buffer; a NURBS of spatial
/// dimension `d` stores each control point as `(w·x₀, …, w·x_{d−1}, w)` with
/// `dimension == d + 1`, and every operation of this crate is weight-aware
/// for free. Projecting back to Euclidean coordinates is up to the caller.
/// # Examples
/// ```
/// use arcus_geometry::*;
///
/// // quadratic NURBS representation of the unit circle: the control points
/// // are 2D homogeneous, i.e. (w * x, w * y, w) with dimension 3.
/// let knot_vec = KnotVec::try_from(
///     vec![0.0, 0.0, 0.0, 0.25, 0.25, 0.5, 0.5, 0.75, 0.75, 1.0, 1.0, 1.0]
/// ).unwrap();
/// let ctrl_pts = vec![
///     0.0, -2.0, 2.0,
///     1.0, -1.0, 1.0,
///     1.0, 0.0, 1.0,
///     1.0, 1.0, 1.0,
///     0.0, 2.0, 2.0,
///     -1.0, 1.0, 1.0,
///     -1.0, 0.0, 1.0,
///     -1.0, -1.0, 1.0,
///     0.0, -2.0, 2.0,
/// ];
/// let circle = BSplineCurve::new(knot_vec, ctrl_pts, 3);
///
/// const N: usize = 100; // sample size in test
/// for i in 0..N {
///     let t = 1.0 / (N as Real) * (i as Real);
///     let pt = circle.eval(t);
///     let (x, y, w) = (pt.result()[0], pt.result()[1], pt.result()[2]);
///     assert_near!((x / w) * (x / w) + (y / w) * (y / w), 1.0);
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "crate::jsonio::CurveRecord",
    into = "crate::jsonio::CurveRecord"
)]
pub struct BSplineCurve {
    knot_vec: KnotVec,
    control_points: Vec<Real>, // interleaved by coordinate
    dimension: usize,
}

/// Knot-vector generation styles for [`BSplineCurve::try_with_style`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KnotStyle {
    /// Uniformly spaced knots across `[0, 1]` without end-point clamping;
    /// the domain is a strict subset of `[0, 1]`.
    Opened,
    /// Uniformly spaced knots with both ends clamped; the curve interpolates
    /// its first and last control point.
    Clamped,
    /// Uniformly spaced knots where every knot has multiplicity equal to the
    /// order of the curve: a chain of independent Bezier segments.
    Beziers,
}

/// The triangular table of affine blends produced by De Boor evaluation.
///
/// Owns every intermediate point of the recursion together with the span
/// index, the knot multiplicity, and the number of insertion steps. The
/// result is one point, or two exactly when the curve is discontinuous at an
/// internal knot of full multiplicity.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DeBoorNet {
    knot: Real,
    index: usize,
    multiplicity: usize,
    insertions: usize,
    dimension: usize,
    points: Vec<Real>, // every retained level, interleaved by coordinate
    result_offset: usize,
    num_result: usize,
}

/// Error handler for [`Error`](./errors/enum.Error.html)
pub type Result<T> = std::result::Result<T, crate::errors::Error>;

#[doc(hidden)]
pub mod bspcurve;
#[doc(hidden)]
pub mod deboornet;
/// Enumerates `Error`.
pub mod errors;
#[doc(hidden)]
pub mod interpolate;
#[doc(hidden)]
pub mod jsonio;
#[doc(hidden)]
pub mod knot_vec;
