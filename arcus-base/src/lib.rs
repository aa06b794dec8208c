//! Basic scalar configuration and numeric primitives shared by the whole
//! `arcus` workspace: the `Real` scalar, the paired epsilon constants, fuzzy
//! knot equality, Euclidean distance, and the tolerance assertion macros.

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

/// Setting tolerance
pub mod tolerance;

/// The scalar type of the whole workspace. `f64` by default; the
/// `single-precision` feature switches every buffer, constant, and
/// computation to `f32`.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// The scalar type of the whole workspace. `f64` by default; the
/// `single-precision` feature switches every buffer, constant, and
/// computation to `f32`.
#[cfg(feature = "single-precision")]
pub type Real = f32;
