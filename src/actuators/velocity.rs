use float_cmp::{ApproxEq, F64Margin};
use tracing::{trace, warn};

use crate::{
    hardware::motor_interface::HardwareVelocityMotor,
    range::ActuatorRange,
    units::Unit,
};

use super::{
    motor::MotorActuator,
    position::{PositionActuator, PositionMotor},
};

#[cfg(test)]
#[path = "velocity_tests.rs"]
mod velocity_tests;

/// Defines closed-loop velocity control for an actuator whose position is measured in `P`
/// and whose velocity is measured in `V`.
pub trait VelocityActuator<P: Unit, V: Unit>: PositionActuator<P> {
    /// Returns the last committed velocity goal, or `None` if no goal was ever committed.
    fn goal_velocity(&self) -> Option<V>;

    /// Sets the motion profile acceleration. Calls with the value that is already applied
    /// don't reach the hardware.
    fn set_acceleration(&mut self, acceleration: V);

    /// Sets the motion profile cruise velocity. Calls with the value that is already applied
    /// don't reach the hardware.
    fn set_max_velocity(&mut self, max_velocity: V);

    /// Puts the actuator into closed-loop velocity control.
    ///
    /// ## Parameters
    ///
    /// * 'velocity' - The velocity goal. Coerced into [VelocityActuator::velocity_range].
    ///
    /// ## Returns
    ///
    /// `false` if the actuator is disabled or the hardware doesn't support the request.
    fn set_velocity_closed_loop(&mut self, velocity: V) -> bool;

    /// Puts the actuator into closed-loop velocity control with an arbitrary feedforward
    /// term.
    ///
    /// ## Returns
    ///
    /// `false` if the actuator is disabled or the hardware doesn't support the request.
    fn set_velocity_closed_loop_with_feedforward(&mut self, velocity: V, feedforward: f64)
        -> bool;

    /// Returns the current velocity.
    fn velocity(&self) -> V;

    /// Returns the difference between the goal velocity and the current velocity.
    fn velocity_error(&self) -> Option<V> {
        self.goal_velocity().map(|goal| goal - self.velocity())
    }

    /// Returns the range that velocity goals are coerced into.
    fn velocity_range(&self) -> ActuatorRange<V>;
}

/// A velocity controlled actuator. Position control and open-loop control are delegated
/// to the [PositionMotor] it owns.
pub struct VelocityMotor<P: Unit, V: Unit, H: HardwareVelocityMotor> {
    position: PositionMotor<P, H>,
    velocity_unit_per_sensor_unit: V,
    velocity_range: ActuatorRange<V>,
    goal_velocity: Option<V>,

    /// The motion profile acceleration that was last sent to the hardware
    applied_acceleration: Option<V>,

    /// The motion profile cruise velocity that was last sent to the hardware
    applied_max_velocity: Option<V>,
}

/// Returns a value indicating whether the new value differs from the one that was
/// last sent to the hardware.
fn needs_update<V: Unit>(applied: Option<V>, value: V) -> bool {
    match applied {
        Some(a) => !a.value().approx_eq(value.value(), F64Margin::default()),
        None => true,
    }
}

impl<P: Unit, V: Unit, H: HardwareVelocityMotor> VelocityMotor<P, V, H> {
    /// Commits the goal and forwards it to the hardware.
    fn commit_goal(&mut self, velocity: V, feedforward: Option<f64>) -> bool {
        if self.position.is_disabled() {
            self.position.stop();
            return false;
        }

        if velocity.is_nan() {
            warn!("Ignoring a velocity goal that is not a number");
            self.position.stop();
            return false;
        }

        let goal = self.velocity_range.coerce(velocity);
        self.goal_velocity = Some(goal);

        let velocity_sups = self.velocity_to_sensor_units(goal);
        self.position
            .hardware_mut()
            .set_velocity_closed_loop(velocity_sups, feedforward)
    }

    /// Returns the hardware adapter.
    pub fn hardware(&self) -> &H {
        self.position.hardware()
    }

    /// Returns the hardware adapter for mutation.
    pub fn hardware_mut(&mut self) -> &mut H {
        self.position.hardware_mut()
    }

    /// Creates a new [VelocityMotor].
    ///
    /// ## Parameters
    ///
    /// * 'position' - The position actuator that owns the hardware adapter.
    /// * 'velocity_unit_per_sensor_unit' - The physical velocity of one sensor unit per second.
    /// * 'velocity_range' - The range that velocity goals are coerced into.
    pub fn new(
        position: PositionMotor<P, H>,
        velocity_unit_per_sensor_unit: V,
        velocity_range: ActuatorRange<V>,
    ) -> Self {
        Self {
            position,
            velocity_unit_per_sensor_unit,
            velocity_range,
            goal_velocity: None,
            applied_acceleration: None,
            applied_max_velocity: None,
        }
    }

    /// Converts a physical velocity into sensor units per second.
    pub fn velocity_to_sensor_units(&self, velocity: V) -> f64 {
        velocity.ratio(self.velocity_unit_per_sensor_unit)
    }
}

impl<P: Unit, V: Unit, H: HardwareVelocityMotor> MotorActuator for VelocityMotor<P, V, H> {
    fn current_power(&self) -> f64 {
        self.position.current_power()
    }

    fn disable(&mut self) {
        self.position.disable();
    }

    fn enable(&mut self) {
        self.position.enable();
    }

    fn is_disabled(&self) -> bool {
        self.position.is_disabled()
    }

    fn neutral_deadband(&self) -> f64 {
        self.position.neutral_deadband()
    }

    fn power_range(&self) -> ActuatorRange<f64> {
        self.position.power_range()
    }

    fn set_neutral_deadband(&mut self, neutral_deadband: f64) {
        self.position.set_neutral_deadband(neutral_deadband);
    }

    fn set_open_loop(&mut self, power: f64) {
        self.position.set_open_loop(power);
    }

    fn stop(&mut self) {
        self.position.stop();
    }
}

impl<P: Unit, V: Unit, H: HardwareVelocityMotor> PositionActuator<P> for VelocityMotor<P, V, H> {
    fn calibrate_offset(&mut self, physical_position: P) {
        self.position.calibrate_offset(physical_position);
    }

    fn goal_position(&self) -> Option<P> {
        self.position.goal_position()
    }

    fn position(&self) -> P {
        self.position.position()
    }

    fn positional_range(&self) -> ActuatorRange<P> {
        self.position.positional_range()
    }

    fn set_position_closed_loop(&mut self, position: P) -> bool {
        self.position.set_position_closed_loop(position)
    }

    fn set_position_closed_loop_with_feedforward(
        &mut self,
        position: P,
        feedforward: f64,
    ) -> bool {
        self.position
            .set_position_closed_loop_with_feedforward(position, feedforward)
    }
}

impl<P: Unit, V: Unit, H: HardwareVelocityMotor> VelocityActuator<P, V>
    for VelocityMotor<P, V, H>
{
    fn goal_velocity(&self) -> Option<V> {
        self.goal_velocity
    }

    fn set_acceleration(&mut self, acceleration: V) {
        if !needs_update(self.applied_acceleration, acceleration) {
            return;
        }

        let acceleration_sups = self.velocity_to_sensor_units(acceleration);
        self.position
            .hardware_mut()
            .set_acceleration_su(acceleration_sups);
        self.applied_acceleration = Some(acceleration);
        trace!(?acceleration, "Applied motion profile acceleration");
    }

    fn set_max_velocity(&mut self, max_velocity: V) {
        if !needs_update(self.applied_max_velocity, max_velocity) {
            return;
        }

        let max_velocity_sups = self.velocity_to_sensor_units(max_velocity);
        self.position
            .hardware_mut()
            .set_max_velocity_su(max_velocity_sups);
        self.applied_max_velocity = Some(max_velocity);
        trace!(?max_velocity, "Applied motion profile cruise velocity");
    }

    fn set_velocity_closed_loop(&mut self, velocity: V) -> bool {
        self.commit_goal(velocity, None)
    }

    fn set_velocity_closed_loop_with_feedforward(
        &mut self,
        velocity: V,
        feedforward: f64,
    ) -> bool {
        self.commit_goal(velocity, Some(feedforward))
    }

    fn velocity(&self) -> V {
        self.velocity_unit_per_sensor_unit * self.position.hardware().velocity_sups()
    }

    fn velocity_range(&self) -> ActuatorRange<V> {
        self.velocity_range
    }
}
