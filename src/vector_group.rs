//! Normalization of groups of vectors.
//!
//! Scaling every vector in a group by the same factor keeps the shape of a commanded motion
//! intact. Scaling each vector separately would distort it, e.g. a drivetrain asked to
//! translate and rotate at the same time would translate in the wrong direction once one of
//! its wheels saturated.

extern crate nalgebra as na;

use na::Vector2;

use crate::units::{Unit, Vector2U};

#[cfg(test)]
#[path = "vector_group_tests.rs"]
mod vector_group_tests;

/// Returns the largest magnitude in the group, or zero for an empty group.
pub fn max_magnitude(vectors: &[Vector2<f64>]) -> f64 {
    vectors.iter().map(|v| v.norm()).fold(0.0, f64::max)
}

/// Scales the group so that the largest vector has unit length.
///
/// When every vector has zero length the result contains NaN components, which callers
/// are expected to replace.
pub fn normalize_group(vectors: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let max = max_magnitude(vectors);
    vectors.iter().map(|v| v / max).collect()
}

/// Scales the group down so that the largest vector has unit length, but only if that
/// vector is longer than unit length. Otherwise the group is returned unchanged.
pub fn normalize_group_if_saturated(vectors: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let max = max_magnitude(vectors);
    if max > 1.0 {
        vectors.iter().map(|v| v / max).collect()
    } else {
        vectors.to_vec()
    }
}

/// Scales a group of unit-typed vectors so that the largest one has unit length. The
/// result is unitless.
///
/// When every vector has zero length the result contains NaN components, which callers
/// are expected to replace.
pub fn normalize_group_units<U: Unit>(vectors: &[Vector2U<U>]) -> Vec<Vector2<f64>> {
    let base: Vec<Vector2<f64>> = vectors.iter().map(|v| v.to_base()).collect();
    normalize_group(&base)
}
