use tracing::{debug, warn};

use crate::{
    hardware::motor_interface::HardwarePositionMotor,
    range::ActuatorRange,
    units::Unit,
};

use super::motor::{Motor, MotorActuator};

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;

/// Defines closed-loop position control in the physical unit `P`.
pub trait PositionActuator<P: Unit>: MotorActuator {
    /// Redefines the position offset so that the current sensor reading maps to the
    /// given physical position. Used to home a mechanism without touching the sensor.
    fn calibrate_offset(&mut self, physical_position: P);

    /// Returns the last committed position goal, or `None` if no goal was ever committed.
    fn goal_position(&self) -> Option<P>;

    /// Returns the current physical position.
    fn position(&self) -> P;

    /// Returns the difference between the goal position and the current position.
    fn position_error(&self) -> Option<P> {
        self.goal_position().map(|goal| goal - self.position())
    }

    /// Returns the range that position goals are coerced into.
    fn positional_range(&self) -> ActuatorRange<P>;

    /// Puts the actuator into closed-loop position control.
    ///
    /// ## Parameters
    ///
    /// * 'position' - The position goal. Coerced into [PositionActuator::positional_range].
    ///
    /// ## Returns
    ///
    /// `false` if the actuator is disabled or the hardware doesn't support the request.
    fn set_position_closed_loop(&mut self, position: P) -> bool;

    /// Puts the actuator into closed-loop position control with an arbitrary feedforward
    /// term.
    ///
    /// ## Parameters
    ///
    /// * 'position' - The position goal. Coerced into [PositionActuator::positional_range].
    /// * 'feedforward' - The feedforward that is added to the closed-loop output.
    ///
    /// ## Returns
    ///
    /// `false` if the actuator is disabled or the hardware doesn't support the request.
    fn set_position_closed_loop_with_feedforward(&mut self, position: P, feedforward: f64)
        -> bool;
}

/// A position controlled actuator.
///
/// Physical positions relate to sensor positions via
/// `position = sensor_position * unit_per_sensor_unit + offset`.
pub struct PositionMotor<P: Unit, H: HardwarePositionMotor> {
    motor: Motor<H>,
    unit_per_sensor_unit: P,
    positional_offset: P,
    positional_range: ActuatorRange<P>,
    goal_position: Option<P>,
}

impl<P: Unit, H: HardwarePositionMotor> PositionMotor<P, H> {
    /// Commits the goal and forwards it to the hardware.
    fn commit_goal(&mut self, position: P, feedforward: Option<f64>) -> bool {
        if self.motor.is_disabled() {
            self.motor.stop();
            return false;
        }

        if position.is_nan() {
            warn!("Ignoring a position goal that is not a number");
            self.motor.stop();
            return false;
        }

        let goal = self.positional_range.coerce(position);
        self.goal_position = Some(goal);

        let position_su = self.position_to_sensor_units(goal);
        self.motor
            .hardware_mut()
            .set_position_closed_loop(position_su, feedforward)
    }

    /// Returns the hardware adapter.
    pub fn hardware(&self) -> &H {
        self.motor.hardware()
    }

    /// Returns the hardware adapter for mutation.
    pub fn hardware_mut(&mut self) -> &mut H {
        self.motor.hardware_mut()
    }

    /// Creates a new [PositionMotor].
    ///
    /// ## Parameters
    ///
    /// * 'motor' - The open-loop motor that owns the hardware adapter.
    /// * 'unit_per_sensor_unit' - The physical distance covered by one sensor unit.
    /// * 'starting_position_offset' - The physical position at sensor position zero.
    /// * 'positional_range' - The range that position goals are coerced into.
    pub fn new(
        motor: Motor<H>,
        unit_per_sensor_unit: P,
        starting_position_offset: P,
        positional_range: ActuatorRange<P>,
    ) -> Self {
        Self {
            motor,
            unit_per_sensor_unit,
            positional_offset: starting_position_offset,
            positional_range,
            goal_position: None,
        }
    }

    /// Returns the physical position offset that is added to the scaled sensor position.
    pub fn positional_offset(&self) -> P {
        self.positional_offset
    }

    /// Converts a physical position into sensor units.
    pub fn position_to_sensor_units(&self, position: P) -> f64 {
        (position - self.positional_offset).ratio(self.unit_per_sensor_unit)
    }

    /// Returns the scaled position without applying the offset.
    pub fn raw_position(&self) -> P {
        self.unit_per_sensor_unit * self.motor.hardware().position_su()
    }

    /// Returns the physical distance covered by one sensor unit.
    pub fn unit_per_sensor_unit(&self) -> P {
        self.unit_per_sensor_unit
    }
}

impl<P: Unit, H: HardwarePositionMotor> MotorActuator for PositionMotor<P, H> {
    fn current_power(&self) -> f64 {
        self.motor.current_power()
    }

    fn disable(&mut self) {
        self.motor.disable();
    }

    fn enable(&mut self) {
        self.motor.enable();
    }

    fn is_disabled(&self) -> bool {
        self.motor.is_disabled()
    }

    fn neutral_deadband(&self) -> f64 {
        self.motor.neutral_deadband()
    }

    fn power_range(&self) -> ActuatorRange<f64> {
        self.motor.power_range()
    }

    fn set_neutral_deadband(&mut self, neutral_deadband: f64) {
        self.motor.set_neutral_deadband(neutral_deadband);
    }

    fn set_open_loop(&mut self, power: f64) {
        self.motor.set_open_loop(power);
    }

    fn stop(&mut self) {
        self.motor.stop();
    }
}

impl<P: Unit, H: HardwarePositionMotor> PositionActuator<P> for PositionMotor<P, H> {
    fn calibrate_offset(&mut self, physical_position: P) {
        self.positional_offset = physical_position - self.raw_position();
        debug!(
            offset = ?self.positional_offset,
            "Calibrated position offset"
        );
    }

    fn goal_position(&self) -> Option<P> {
        self.goal_position
    }

    fn position(&self) -> P {
        self.raw_position() + self.positional_offset
    }

    fn positional_range(&self) -> ActuatorRange<P> {
        self.positional_range
    }

    fn set_position_closed_loop(&mut self, position: P) -> bool {
        self.commit_goal(position, None)
    }

    fn set_position_closed_loop_with_feedforward(
        &mut self,
        position: P,
        feedforward: f64,
    ) -> bool {
        self.commit_goal(position, Some(feedforward))
    }
}
