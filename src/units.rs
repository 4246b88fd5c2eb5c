//! Defines unit-typed physical quantities and 2D vectors of those quantities.
//!
//! Each quantity is a thin wrapper around an `f64` stored in SI units. The wrappers
//! exist so that the type system keeps lengths, velocities and angles apart, e.g. a
//! drive actuator is a `VelocityActuator<Length, Velocity>` while a steer actuator is
//! a `PositionActuator<Angle>`.
//!
//! Unitless vectors, e.g. open-loop power vectors, are plain [nalgebra::Vector2] values.

extern crate nalgebra as na;

use std::{
    fmt::{Debug, Display},
    ops::{Add, Div, Mul, Neg, Sub},
};

use na::{Rotation2, Vector2};

use crate::number_space::PeriodicBoundedCircularSpace;

#[cfg(test)]
#[path = "units_tests.rs"]
mod units_tests;

/// The number of meters in an inch.
const METERS_PER_INCH: f64 = 0.0254;

/// Defines the behaviour shared by all unit-typed quantities.
///
/// The ratio between two values of the same unit is a plain `f64`, which is how
/// physical values are turned into sensor units and back again.
pub trait Unit:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Creates a quantity from a value in the base SI unit.
    fn from_value(value: f64) -> Self;

    /// Returns the value of the quantity in the base SI unit.
    fn value(&self) -> f64;

    /// Returns the zero quantity.
    fn zero() -> Self {
        Self::from_value(0.0)
    }

    /// Returns the absolute value of the quantity.
    fn abs(&self) -> Self {
        Self::from_value(self.value().abs())
    }

    /// Returns the unitless ratio of the current quantity to the given quantity.
    fn ratio(&self, other: Self) -> f64 {
        self.value() / other.value()
    }

    /// Returns a value indicating if the quantity is not a number.
    fn is_nan(&self) -> bool {
        self.value().is_nan()
    }
}

macro_rules! unit_type {
    ($(#[$meta:meta])* $name:ident, $symbol:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
        pub struct $name(f64);

        impl Unit for $name {
            fn from_value(value: f64) -> Self {
                Self(value)
            }

            fn value(&self) -> f64 {
                self.0
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $symbol)
            }
        }
    };
}

unit_type!(
    /// A linear distance, stored in meters.
    Length,
    "m"
);

unit_type!(
    /// A linear velocity, stored in meters per second.
    Velocity,
    "m/s"
);

unit_type!(
    /// An angle, stored in radians. Positive angles are counter-clockwise.
    Angle,
    "rad"
);

unit_type!(
    /// An angular velocity, stored in radians per second. Positive values are counter-clockwise.
    AngularVelocity,
    "rad/s"
);

impl Length {
    /// Creates a length from a value in inches.
    pub fn inches(value: f64) -> Self {
        Self(value * METERS_PER_INCH)
    }

    /// Returns the length in inches.
    pub fn in_inches(&self) -> f64 {
        self.0 / METERS_PER_INCH
    }

    /// Returns the length in meters.
    pub fn in_meters(&self) -> f64 {
        self.0
    }

    /// Creates a length from a value in meters.
    pub fn meters(value: f64) -> Self {
        Self(value)
    }
}

impl Velocity {
    /// Creates a velocity from a value in inches per second.
    pub fn inches_per_second(value: f64) -> Self {
        Self(value * METERS_PER_INCH)
    }

    /// Returns the velocity in inches per second.
    pub fn in_inches_per_second(&self) -> f64 {
        self.0 / METERS_PER_INCH
    }

    /// Returns the velocity in meters per second.
    pub fn in_meters_per_second(&self) -> f64 {
        self.0
    }

    /// Creates a velocity from a value in meters per second.
    pub fn meters_per_second(value: f64) -> Self {
        Self(value)
    }
}

impl Angle {
    /// Half a turn.
    pub const PI: Angle = Angle(std::f64::consts::PI);

    /// A quarter turn.
    pub const PI_BY_TWO: Angle = Angle(std::f64::consts::FRAC_PI_2);

    /// Returns the angle of the vector (x, y) measured from the positive x-axis.
    pub fn atan2(y: f64, x: f64) -> Self {
        Self(y.atan2(x))
    }

    /// Returns the cosine of the angle.
    pub fn cos(&self) -> f64 {
        self.0.cos()
    }

    /// Creates an angle from a value in degrees.
    pub fn degrees(value: f64) -> Self {
        Self(value.to_radians())
    }

    /// Returns the shortest signed angle that takes `other` to `self`.
    ///
    /// The result lies in (-PI, PI].
    pub fn difference(&self, other: Angle) -> Angle {
        let space = PeriodicBoundedCircularSpace::new_with_two_pi_range();
        Angle(space.smallest_distance_between_values(other.0, self.0))
    }

    /// Returns the angle in degrees.
    pub fn in_degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Returns the angle in radians.
    pub fn in_radians(&self) -> f64 {
        self.0
    }

    /// Creates an angle from a value in radians.
    pub fn radians(value: f64) -> Self {
        Self(value)
    }

    /// Returns the sine of the angle.
    pub fn sin(&self) -> f64 {
        self.0.sin()
    }
}

impl AngularVelocity {
    /// Returns the angular velocity in radians per second.
    pub fn in_radians_per_second(&self) -> f64 {
        self.0
    }

    /// Creates an angular velocity from a value in radians per second.
    pub fn radians_per_second(value: f64) -> Self {
        Self(value)
    }
}

/// A 2D vector with components of unit `U`.
///
/// The x-axis points forward relative to the drivetrain and the y-axis points left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2U<U: Unit> {
    x: U,
    y: U,
}

impl<U: Unit> Vector2U<U> {
    /// Returns the angle of the vector measured counter-clockwise from the x-axis.
    pub fn angle(&self) -> Angle {
        Angle::atan2(self.y.value(), self.x.value())
    }

    /// Creates a vector from a unitless vector whose components are multiples of `unit`.
    pub fn from_ratio(ratio: Vector2<f64>, unit: U) -> Self {
        Self {
            x: unit * ratio.x,
            y: unit * ratio.y,
        }
    }

    /// Creates a vector from a magnitude and an angle.
    pub fn from_polar(magnitude: U, angle: Angle) -> Self {
        Self {
            x: magnitude * angle.cos(),
            y: magnitude * angle.sin(),
        }
    }

    /// Returns a value indicating if either component is not a number.
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns the length of the vector.
    pub fn magnitude(&self) -> U {
        U::from_value(self.x.value().hypot(self.y.value()))
    }

    /// Creates a new vector from its components.
    pub fn new(x: U, y: U) -> Self {
        Self { x, y }
    }

    /// Returns the unitless vector expressing the components as multiples of `unit`.
    pub fn ratio(&self, unit: U) -> Vector2<f64> {
        Vector2::new(self.x.ratio(unit), self.y.ratio(unit))
    }

    /// Returns the vector rotated counter-clockwise by the given angle.
    pub fn rotate(&self, angle: Angle) -> Self {
        let rotated =
            Rotation2::new(angle.in_radians()) * Vector2::new(self.x.value(), self.y.value());
        Self {
            x: U::from_value(rotated.x),
            y: U::from_value(rotated.y),
        }
    }

    /// Returns the raw vector in base SI units.
    pub fn to_base(&self) -> Vector2<f64> {
        Vector2::new(self.x.value(), self.y.value())
    }

    /// Returns the x-component of the vector.
    pub fn x(&self) -> U {
        self.x
    }

    /// Returns the y-component of the vector.
    pub fn y(&self) -> U {
        self.y
    }

    /// Returns the zero vector.
    pub fn zero() -> Self {
        Self {
            x: U::zero(),
            y: U::zero(),
        }
    }
}

impl<U: Unit> Default for Vector2U<U> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<U: Unit> Add for Vector2U<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<U: Unit> Sub for Vector2U<U> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<U: Unit> Neg for Vector2U<U> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<U: Unit> Mul<f64> for Vector2U<U> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<U: Unit> Div<f64> for Vector2U<U> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

/// Returns the unitless polar vector with the given magnitude and angle.
pub fn polar(magnitude: f64, angle: Angle) -> Vector2<f64> {
    Vector2::new(magnitude * angle.cos(), magnitude * angle.sin())
}
