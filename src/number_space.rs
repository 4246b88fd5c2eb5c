//! Defines the periodic number space that headings of a steered wheel live in.
//!
//! A periodic space has finite boundaries and wraps around, i.e. from the lower boundary
//! you can either pass through all the numbers in the space to reach the upper boundary,
//! or you can step backwards and end up at the upper boundary directly. This is what
//! allows a swerve module to take the short way round when it changes direction.

use std::f64::consts::PI;

#[cfg(test)]
#[path = "number_space_tests.rs"]
mod number_space_tests;

/// Defines a periodic number space that wraps around at its boundaries.
pub(crate) struct PeriodicBoundedCircularSpace {
    range_size: f64,
}

impl PeriodicBoundedCircularSpace {
    /// Creates a new periodic space that is 2 PI in size.
    pub(crate) fn new_with_two_pi_range() -> PeriodicBoundedCircularSpace {
        PeriodicBoundedCircularSpace {
            range_size: 2.0 * PI,
        }
    }

    /// Returns the signed distance with the smallest magnitude between two values.
    ///
    /// The result lies in (-size / 2, size / 2].
    ///
    /// ## Parameters
    ///
    /// * `start` - The starting value.
    /// * `end` - The ending value
    pub(crate) fn smallest_distance_between_values(&self, start: f64, end: f64) -> f64 {
        let diff = self.wrap(end - start);
        if diff > 0.5 * self.range_size {
            diff - self.range_size
        } else {
            diff
        }
    }

    /// Returns the positive offset of `value` from zero, reduced into [0, size).
    fn wrap(&self, value: f64) -> f64 {
        let wrapped = value.rem_euclid(self.range_size);

        // rem_euclid may round up to the divisor for tiny negative inputs
        if wrapped >= self.range_size {
            wrapped - self.range_size
        } else {
            wrapped
        }
    }
}
