use tracing::debug;

use crate::{hardware::motor_interface::HardwareMotor, range::ActuatorRange};

#[cfg(test)]
#[path = "motor_tests.rs"]
mod motor_tests;

/// The default neutral deadband. Effectively only filters out an exact zero.
pub const DEFAULT_NEUTRAL_DEADBAND: f64 = 1.0e-9;

/// Defines the open-loop capabilities shared by all actuators.
///
/// None of the operations fail. Commands that are out of range are coerced into the
/// power range, commands inside the neutral deadband become a stop and commands sent to a
/// disabled actuator stop the actuator instead.
pub trait MotorActuator {
    /// Returns the power that was last applied in open loop. Zero after a stop.
    fn current_power(&self) -> f64;

    /// Stops the actuator and latches it in the disabled state.
    fn disable(&mut self);

    /// Clears the disabled latch.
    fn enable(&mut self);

    /// Returns a value indicating whether the actuator is disabled.
    fn is_disabled(&self) -> bool;

    /// Returns the power magnitude below which open-loop commands are treated as a stop.
    fn neutral_deadband(&self) -> f64;

    /// Returns the range that open-loop power is coerced into.
    fn power_range(&self) -> ActuatorRange<f64>;

    /// Sets the power magnitude below which open-loop commands are treated as a stop.
    fn set_neutral_deadband(&mut self, neutral_deadband: f64);

    /// Applies an open-loop power to the actuator.
    ///
    /// ## Parameters
    ///
    /// * 'power' - The requested power. Coerced into [MotorActuator::power_range].
    fn set_open_loop(&mut self, power: f64);

    /// Removes all power from the actuator.
    fn stop(&mut self);
}

/// An open-loop actuator wrapped around a hardware adapter.
pub struct Motor<H: HardwareMotor> {
    hardware: H,
    power_range: ActuatorRange<f64>,
    disabled: bool,
    current_power: f64,
    neutral_deadband: f64,
}

impl<H: HardwareMotor> Motor<H> {
    /// Returns the hardware adapter.
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Returns the hardware adapter for mutation.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Creates a new [Motor] with the default power range of [-1.0, 1.0].
    ///
    /// ## Parameters
    ///
    /// * 'hardware' - The hardware adapter that drives the physical motor.
    pub fn new(hardware: H) -> Self {
        Self::with_power_range(hardware, ActuatorRange::power())
    }

    /// Creates a new [Motor] with the given power range.
    ///
    /// ## Parameters
    ///
    /// * 'hardware' - The hardware adapter that drives the physical motor.
    /// * 'power_range' - The range that open-loop commands are coerced into.
    pub fn with_power_range(hardware: H, power_range: ActuatorRange<f64>) -> Self {
        Self {
            hardware,
            power_range,
            disabled: false,
            current_power: 0.0,
            neutral_deadband: DEFAULT_NEUTRAL_DEADBAND,
        }
    }
}

impl<H: HardwareMotor> MotorActuator for Motor<H> {
    fn current_power(&self) -> f64 {
        self.current_power
    }

    fn disable(&mut self) {
        self.stop();
        self.disabled = true;
        debug!("Actuator disabled");
    }

    fn enable(&mut self) {
        self.disabled = false;
        debug!("Actuator enabled");
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn neutral_deadband(&self) -> f64 {
        self.neutral_deadband
    }

    fn power_range(&self) -> ActuatorRange<f64> {
        self.power_range
    }

    fn set_neutral_deadband(&mut self, neutral_deadband: f64) {
        self.neutral_deadband = neutral_deadband;
    }

    fn set_open_loop(&mut self, power: f64) {
        if self.disabled {
            self.stop();
            return;
        }

        // Written so that NaN also ends up as a stop
        if !(power.abs() >= self.neutral_deadband) {
            self.stop();
            return;
        }

        self.current_power = self.power_range.coerce(power);
        self.hardware.set_open_loop(self.current_power);
    }

    fn stop(&mut self) {
        self.current_power = 0.0;
        self.hardware.stop();
    }
}
