//! Defines the capability hierarchy for controllable mechanisms.
//!
//! There are three nested capability levels, each a strict superset of the previous one:
//!
//! * [motor::MotorActuator] - open-loop power with a neutral deadband and a disable latch.
//! * [position::PositionActuator] - adds closed-loop position control in a physical unit.
//! * [velocity::VelocityActuator] - adds closed-loop velocity control and motion profile
//!   parameters.
//!
//! The implementations are composed rather than inherited: a [velocity::VelocityMotor]
//! has a [position::PositionMotor] which has a [motor::Motor] which owns the hardware
//! adapter.

/// Provides actuators for mechanisms that are intentionally absent
pub mod dummy;

/// Defines open-loop control of a motor
pub mod motor;

/// Defines closed-loop position control
pub mod position;

/// Defines closed-loop velocity control
pub mod velocity;
