//! Constructors for actuators that stand in for absent mechanisms.

use crate::{hardware::dummy_motor::DummyMotor, range::ActuatorRange, units::Unit};

use super::{motor::Motor, position::PositionMotor, velocity::VelocityMotor};

#[cfg(test)]
#[path = "dummy_tests.rs"]
mod dummy_tests;

/// Creates a position actuator that is backed by a [DummyMotor].
///
/// ## Parameters
///
/// * 'unit_per_sensor_unit' - The physical distance covered by one sensor unit.
pub fn dummy_position_actuator<P: Unit>(unit_per_sensor_unit: P) -> PositionMotor<P, DummyMotor> {
    PositionMotor::new(
        Motor::new(DummyMotor::new()),
        unit_per_sensor_unit,
        P::zero(),
        ActuatorRange::unbounded(),
    )
}

/// Creates a velocity actuator that is backed by a [DummyMotor].
///
/// ## Parameters
///
/// * 'unit_per_sensor_unit' - The physical distance covered by one sensor unit.
/// * 'velocity_unit_per_sensor_unit' - The physical velocity of one sensor unit per second.
pub fn dummy_velocity_actuator<P: Unit, V: Unit>(
    unit_per_sensor_unit: P,
    velocity_unit_per_sensor_unit: V,
) -> VelocityMotor<P, V, DummyMotor> {
    VelocityMotor::new(
        dummy_position_actuator(unit_per_sensor_unit),
        velocity_unit_per_sensor_unit,
        ActuatorRange::unbounded(),
    )
}
