use crate::Real;

/// Maximum admissible number of knots in a single knot vector.
///
/// Coupled with [`KNOT_EPSILON`]: `KNOT_EPSILON * MAX_NUM_KNOTS ≈ 1`, so that
/// adjacent representable knots in the default `[0, 1]` domain remain
/// distinguishable. Changing one constant requires changing the other.
pub const MAX_NUM_KNOTS: usize = 10_000;

/// Fuzzy equality threshold on knot space.
///
/// Every span search, multiplicity count, and insertion-idempotence check
/// goes through [`knots_equal`]; direct float equality on knots is forbidden
/// in the whole package.
pub const KNOT_EPSILON: Real = 1.0e-4;

/// Default tolerance on control-point space.
#[cfg(not(feature = "single-precision"))]
pub const POINT_EPSILON: Real = 1.0e-5;

/// Default tolerance on control-point space.
#[cfg(feature = "single-precision")]
pub const POINT_EPSILON: Real = 1.0e-3;

/// Returns whether two scalars coincide on knot space.
/// # Examples
/// ```
/// use arcus_base::tolerance::*;
/// assert!(knots_equal(0.25, 0.25 + 1.0e-5));
/// assert!(!knots_equal(0.25, 0.2501));
/// ```
#[inline(always)]
pub fn knots_equal(x: Real, y: Real) -> bool { (x - y).abs() < KNOT_EPSILON }

/// The Euclidean distance of two points of the same dimension.
/// # Examples
/// ```
/// use arcus_base::tolerance::distance;
/// assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
#[inline(always)]
pub fn distance(a: &[Real], b: &[Real]) -> Real {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<Real>()
        .sqrt()
}

/// The multiplicative inverse of `delta`, or zero when `delta` is too small
/// to be a usable divisor.
#[inline(always)]
pub fn inv_or_zero(delta: Real) -> Real {
    if delta.abs() < KNOT_EPSILON {
        0.0
    } else {
        1.0 / delta
    }
}

/// Defines the fuzzy comparison on control-point space in the whole package.
pub trait Tolerance {
    /// The "distance" is at most [`POINT_EPSILON`].
    fn near(&self, other: &Self) -> bool;
}

impl Tolerance for Real {
    #[inline(always)]
    fn near(&self, other: &Self) -> bool { (self - other).abs() <= POINT_EPSILON }
}

impl Tolerance for [Real] {
    #[inline(always)]
    fn near(&self, other: &Self) -> bool { distance(self, other) <= POINT_EPSILON }
}

impl Tolerance for &[Real] {
    #[inline(always)]
    fn near(&self, other: &Self) -> bool { <[Real]>::near(self, other) }
}

/// Asserts that `left.near(&right)` (using `Tolerance`).
#[macro_export]
macro_rules! assert_near {
    ($left: expr, $right: expr $(,)?) => {{
        let (left, right) = ($left, $right);
        assert!(
            $crate::tolerance::Tolerance::near(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?},\nright: {right:?}",
        )
    }};
    ($left: expr, $right: expr, $($arg: tt)+) => {{
        let (left, right) = ($left, $right);
        assert!(
            $crate::tolerance::Tolerance::near(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?},\nright: {right:?}: {}",
            format_args!($($arg)+),
        )
    }};
}

/// Similar to `assert_near!`, but returns a test failure instead of panicking
/// if the condition fails.
#[macro_export]
macro_rules! prop_assert_near {
    ($left: expr, $right: expr $(,)?) => {{
        let (left, right) = ($left, $right);
        prop_assert!(
            $crate::tolerance::Tolerance::near(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?},\nright: {right:?}",
        )
    }};
    ($left: expr, $right: expr, $($arg: tt)+) => {{
        let (left, right) = ($left, $right);
        prop_assert!(
            $crate::tolerance::Tolerance::near(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?}, right: {right:?}: {}",
            format_args!($($arg)+),
        )
    }};
}

#[test]
#[should_panic]
fn assert_near_without_msg() { assert_near!(1.0, 2.0) }

#[test]
#[should_panic]
fn assert_near_with_msg() { assert_near!(1.0, 2.0, "{}", "test OK") }

#[test]
fn knot_equality_is_strictly_below_epsilon() {
    assert!(knots_equal(0.0, KNOT_EPSILON / 2.0));
    assert!(!knots_equal(0.0, KNOT_EPSILON));
    assert!(knots_equal(1.0, 1.0));
}

#[test]
fn inv_or_zero_guards_degenerate_spans() {
    assert_eq!(inv_or_zero(0.0), 0.0);
    assert_eq!(inv_or_zero(KNOT_EPSILON / 2.0), 0.0);
    assert_eq!(inv_or_zero(2.0), 0.5);
}

#[test]
fn epsilons_are_coupled() {
    assert_near!(KNOT_EPSILON * MAX_NUM_KNOTS as Real, 1.0);
}
