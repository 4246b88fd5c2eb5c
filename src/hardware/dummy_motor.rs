//! Defines a hardware adapter for mechanisms that are intentionally absent.

use super::motor_interface::{HardwareMotor, HardwarePositionMotor, HardwareVelocityMotor};

#[cfg(test)]
#[path = "dummy_motor_tests.rs"]
mod dummy_motor_tests;

/// A null-object hardware adapter.
///
/// Every control mode is accepted and the last closed-loop goal is reported back as
/// the measured value, as if the mechanism reached its goal instantly. No hardware
/// is ever touched.
#[derive(Clone, Debug, Default)]
pub struct DummyMotor {
    position_su: f64,
    velocity_sups: f64,
}

impl DummyMotor {
    /// Creates a new [DummyMotor] at position zero and at rest.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HardwareMotor for DummyMotor {
    fn set_open_loop(&mut self, _power: f64) {}

    fn stop(&mut self) {}
}

impl HardwarePositionMotor for DummyMotor {
    fn position_su(&self) -> f64 {
        self.position_su
    }

    fn set_position_closed_loop(&mut self, position_su: f64, _feedforward: Option<f64>) -> bool {
        self.position_su = position_su;
        true
    }
}

impl HardwareVelocityMotor for DummyMotor {
    fn set_acceleration_su(&mut self, _acceleration_sups: f64) {}

    fn set_max_velocity_su(&mut self, _max_velocity_sups: f64) {}

    fn set_velocity_closed_loop(&mut self, velocity_sups: f64, _feedforward: Option<f64>) -> bool {
        self.velocity_sups = velocity_sups;
        true
    }

    fn velocity_sups(&self) -> f64 {
        self.velocity_sups
    }
}
