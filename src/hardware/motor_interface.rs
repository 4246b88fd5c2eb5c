//! Defines the interfaces that hardware adapters implement.
//!
//! Adapters work in raw sensor units. Converting to and from physical units, clamping,
//! deadbands and disabling are all handled by the types in [crate::actuators], which
//! means an adapter only has to forward commands to its motor controller.

/// Defines the interface for hardware that can be driven with an open-loop power.
pub trait HardwareMotor {
    /// Applies the given power to the motor.
    ///
    /// ## Parameters
    ///
    /// * 'power' - The power to apply. Already coerced into the power range of the actuator.
    fn set_open_loop(&mut self, power: f64);

    /// Removes all power from the motor. Closed-loop controllers are expected to hold
    /// their last position goal.
    fn stop(&mut self);
}

/// Defines the interface for hardware that can track a position goal.
pub trait HardwarePositionMotor: HardwareMotor {
    /// Returns the current position of the motor in sensor units.
    fn position_su(&self) -> f64;

    /// Puts the motor into closed-loop position control.
    ///
    /// ## Parameters
    ///
    /// * 'position_su' - The position goal in sensor units.
    /// * 'feedforward' - An optional arbitrary feedforward term that is added to the
    ///   output of the closed-loop controller.
    ///
    /// ## Returns
    ///
    /// A value indicating whether the hardware supports this control mode.
    fn set_position_closed_loop(&mut self, position_su: f64, feedforward: Option<f64>) -> bool;
}

/// Defines the interface for hardware that can track a velocity goal.
pub trait HardwareVelocityMotor: HardwarePositionMotor {
    /// Sets the acceleration used by motion profiling, in sensor units per second.
    fn set_acceleration_su(&mut self, acceleration_sups: f64);

    /// Sets the maximum velocity used by motion profiling, in sensor units per second.
    fn set_max_velocity_su(&mut self, max_velocity_sups: f64);

    /// Puts the motor into closed-loop velocity control.
    ///
    /// ## Parameters
    ///
    /// * 'velocity_sups' - The velocity goal in sensor units per second.
    /// * 'feedforward' - An optional arbitrary feedforward term that is added to the
    ///   output of the closed-loop controller.
    ///
    /// ## Returns
    ///
    /// A value indicating whether the hardware supports this control mode.
    fn set_velocity_closed_loop(&mut self, velocity_sups: f64, feedforward: Option<f64>) -> bool;

    /// Returns the current velocity of the motor in sensor units per second.
    fn velocity_sups(&self) -> f64;
}
