//! Signal shaping functions for module and joystick commands.

extern crate nalgebra as na;

use na::Vector2;

use crate::units::{polar, Angle};

#[cfg(test)]
#[path = "shaping_tests.rs"]
mod shaping_tests;

/// Remaps a linear input in [-1.0, 1.0] onto an exponential curve, the way RC transmitters
/// apply 'expo' to their sticks.
///
/// A positive adjustment flattens the curve around zero (more resolution at low inputs),
/// a negative adjustment flattens it around the end points. An adjustment of zero is linear.
/// The end points -1.0, 0.0 and 1.0 always map onto themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expo {
    adjustment: f64,
}

impl Expo {
    /// Returns the adjustment, in [-1.0, 1.0].
    pub fn adjustment(&self) -> f64 {
        self.adjustment
    }

    /// Creates a new curve. The adjustment is coerced into [-1.0, 1.0].
    pub fn new(adjustment: f64) -> Self {
        Self {
            adjustment: adjustment.clamp(-1.0, 1.0),
        }
    }

    /// Sets the adjustment. The value is coerced into [-1.0, 1.0].
    pub fn set_adjustment(&mut self, adjustment: f64) {
        self.adjustment = adjustment.clamp(-1.0, 1.0);
    }

    /// Applies the curve. The input is coerced into [-1.0, 1.0].
    pub fn update(&self, input: f64) -> f64 {
        let x = input.clamp(-1.0, 1.0);
        if self.adjustment > 0.0 {
            return cubic(self.adjustment, x);
        }

        // Mirror the cubic so that it is flat at the end of the range instead of at zero
        let (offset_x, offset_y) = if x > 0.0 { (-1.0, 1.0) } else { (1.0, -1.0) };
        cubic(-self.adjustment, x + offset_x) + offset_y
    }
}

impl Default for Expo {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn cubic(adjustment: f64, x: f64) -> f64 {
    (1.0 - adjustment) * x + adjustment * x * x * x
}

/// A circular deadzone for 2D inputs such as joystick translation vectors.
///
/// Inputs whose distance from the centre is inside the deadzone map onto the dead output.
/// Inputs outside are rescaled so that the edge of the deadzone maps onto the centre and
/// the operating radius maps onto itself, which keeps the full output range available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorDeadzone {
    center: Vector2<f64>,
    radius: f64,
    deadzone: f64,
    dead_output: f64,
}

impl VectorDeadzone {
    /// Creates a deadzone around the origin with an operating radius of 1.0 and a dead
    /// output of zero.
    pub fn new(deadzone: f64) -> Self {
        Self::with_parameters(Vector2::zeros(), 1.0, deadzone, 0.0)
    }

    /// Applies the deadzone to the input.
    pub fn update(&self, input: Vector2<f64>) -> Vector2<f64> {
        let relative = input - self.center;
        let magnitude = relative.norm();
        let angle = Angle::atan2(relative.y, relative.x);

        let shaped = if magnitude < self.deadzone {
            self.dead_output
        } else {
            (magnitude - self.deadzone) * self.radius / (self.radius - self.deadzone)
        };

        polar(shaped, angle) + self.center
    }

    /// Creates a deadzone.
    ///
    /// ## Parameters
    ///
    /// * 'center' - The centre of the operating area
    /// * 'radius' - The distance between the centre and the edge of the operating area
    /// * 'deadzone' - The distance between the centre and the edge of the deadzone
    /// * 'dead_output' - The magnitude that is output while inside the deadzone
    pub fn with_parameters(
        center: Vector2<f64>,
        radius: f64,
        deadzone: f64,
        dead_output: f64,
    ) -> Self {
        Self {
            center,
            radius,
            deadzone,
            dead_output,
        }
    }
}
