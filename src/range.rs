//! Defines closed ranges that are used to coerce actuator commands.

use std::fmt::Debug;

use crate::{units::Unit, Error};

#[cfg(test)]
#[path = "range_tests.rs"]
mod range_tests;

/// Defines a value type that can be bounded by an [ActuatorRange].
pub trait RangeValue: Copy + Debug + PartialOrd {
    /// Returns the value as a plain number. Used for error reporting.
    fn as_f64(&self) -> f64;
}

impl RangeValue for f64 {
    fn as_f64(&self) -> f64 {
        *self
    }
}

impl<U: Unit> RangeValue for U {
    fn as_f64(&self) -> f64 {
        self.value()
    }
}

/// A closed interval [low, high] over a value type.
///
/// Actuators use ranges to silently coerce commands into what the mechanism
/// can achieve, e.g. open-loop power is coerced into [-1.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActuatorRange<T: RangeValue> {
    low: T,
    high: T,
}

impl<T: RangeValue> ActuatorRange<T> {
    /// Coerces the value into the range.
    ///
    /// A value that is not a number is returned unchanged.
    pub fn coerce(&self, value: T) -> T {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }

    /// Returns the upper bound of the range.
    pub fn high(&self) -> T {
        self.high
    }

    /// Returns the lower bound of the range.
    pub fn low(&self) -> T {
        self.low
    }

    /// Creates a new range.
    ///
    /// ## Parameters
    ///
    /// * 'low' - The lower bound of the range
    /// * 'high' - The upper bound of the range
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidRange] - Returned when 'low' is larger than 'high' or when
    ///   either bound is not a number.
    pub fn new(low: T, high: T) -> Result<Self, Error> {
        // NaN bounds fail this comparison as well
        if !(low <= high) {
            return Err(Error::InvalidRange {
                low: low.as_f64(),
                high: high.as_f64(),
            });
        }

        Ok(Self { low, high })
    }
}

impl ActuatorRange<f64> {
    /// Returns the default open-loop power range of [-1.0, 1.0].
    pub fn power() -> Self {
        Self {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl<U: Unit> ActuatorRange<U> {
    /// Returns a range that covers all values of the unit.
    pub fn unbounded() -> Self {
        Self {
            low: U::from_value(f64::NEG_INFINITY),
            high: U::from_value(f64::INFINITY),
        }
    }
}

impl Default for ActuatorRange<f64> {
    fn default() -> Self {
        Self::power()
    }
}
