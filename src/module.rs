//! A single swerve module: one drive actuator and one steer actuator mounted at a fixed
//! position on the drivetrain.

extern crate nalgebra as na;

use na::Vector2;
use tracing::{trace, warn};

use crate::{
    actuators::{motor::MotorActuator, position::PositionActuator, velocity::VelocityActuator},
    config::SwerveModuleConfig,
    shaping::Expo,
    units::{Angle, Length, Unit, Vector2U, Velocity},
};

#[cfg(test)]
#[path = "module_tests.rs"]
mod module_tests;

/// The sensor readings of a module at a given moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleState {
    /// The measured heading of the wheel
    pub steer_angle: Angle,

    /// The distance the wheel has rolled since the drive sensor was zeroed
    pub drive_position: Length,

    /// The measured rolling velocity of the wheel
    pub drive_velocity: Velocity,
}

/// The heading a steer actuator should turn to, and whether the drive has to run
/// backwards to move in the requested direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringTarget {
    /// The heading goal for the steer actuator. Lies within a quarter turn of the current
    /// heading.
    pub target: Angle,

    /// Set when the wheel steers to the opposite of the requested heading
    pub inverted: bool,
}

/// Determines how to steer a wheel from the `current` heading so that it rolls along the
/// `goal` heading.
///
/// A wheel rolling backwards along the opposite heading moves in the same direction as a
/// wheel rolling forwards along the goal heading. So whenever the goal is more than a quarter
/// turn away, the wheel turns to the opposite heading instead and the drive is inverted. No
/// request ever turns the wheel more than a quarter turn.
///
/// The target is expressed relative to `current`, which keeps continuously rotating steer
/// mechanisms from being sent around the long way when `current` has wound up past a full
/// turn.
pub fn optimize_steering(goal: Angle, current: Angle) -> SteeringTarget {
    let amount_to_turn = goal.difference(current);
    let target = current + amount_to_turn;

    if amount_to_turn.abs() > Angle::PI_BY_TWO {
        let target = if amount_to_turn > Angle::zero() {
            target - Angle::PI
        } else {
            target + Angle::PI
        };

        SteeringTarget {
            target,
            inverted: true,
        }
    } else {
        SteeringTarget {
            target,
            inverted: false,
        }
    }
}

/// Controls a single swerve module.
pub struct SwerveModule {
    name: String,

    /// The mounting position relative to the drivetrain origin
    position: Vector2U<Length>,

    drive: Box<dyn VelocityActuator<Length, Velocity>>,
    steer: Box<dyn PositionActuator<Angle>>,

    /// The drive position at the last forward kinematics call
    previous_drive_position: Option<Length>,

    /// Scales the drive output by how well the wheel is aligned with its heading goal
    cosine_expo: Expo,

    config: SwerveModuleConfig,
}

impl SwerveModule {
    /// Returns the factor the drive output is scaled by while the wheel is still turning
    /// towards its heading goal.
    fn alignment_scale(&self) -> f64 {
        match self.steer.position_error() {
            Some(error) => self.cosine_expo.update(error.cos()),
            None => 1.0,
        }
    }

    /// Redefines the steer offset so that the current steer sensor reading maps onto
    /// the given heading.
    pub fn calibrate_steer(&mut self, physical_angle: Angle) {
        self.steer.calibrate_offset(physical_angle);
    }

    /// Returns the module configuration.
    pub fn config(&self) -> &SwerveModuleConfig {
        &self.config
    }

    /// Returns the drive actuator.
    pub fn drive(&self) -> &dyn VelocityActuator<Length, Velocity> {
        self.drive.as_ref()
    }

    /// Returns the drive actuator for mutation.
    pub fn drive_mut(&mut self) -> &mut dyn VelocityActuator<Length, Velocity> {
        self.drive.as_mut()
    }

    /// Returns the neutral deadband of the drive actuator.
    pub fn drive_neutral_deadband(&self) -> f64 {
        self.drive.neutral_deadband()
    }

    /// Returns the distance the wheel has rolled.
    pub fn drive_position(&self) -> Length {
        self.drive.position()
    }

    /// Returns the rolling velocity of the wheel.
    pub fn drive_velocity(&self) -> Velocity {
        self.drive.velocity()
    }

    /// Returns the displacement of the module since the previous call, in the drivetrain
    /// frame.
    ///
    /// Each call consumes the displacement it reports, so a second call without any
    /// movement in between returns a zero vector. The first call only records the
    /// starting position and returns a zero vector.
    pub fn forward_kinematics(&mut self) -> Vector2U<Length> {
        let current = self.drive.position();
        let previous = self.previous_drive_position.replace(current);

        let distance = match previous {
            Some(p) => current - p,
            None => Length::zero(),
        };

        Vector2U::from_polar(distance, self.steer.position())
    }

    /// Returns the current sensor readings of the module.
    pub fn module_state(&self) -> ModuleState {
        ModuleState {
            steer_angle: self.steer_angle(),
            drive_position: self.drive_position(),
            drive_velocity: self.drive_velocity(),
        }
    }

    /// Returns the name of the module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a new module with the default configuration.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the module, used in log messages
    /// * 'position' - The mounting position relative to the drivetrain origin
    /// * 'drive' - The actuator that rolls the wheel
    /// * 'steer' - The actuator that turns the wheel
    pub fn new(
        name: impl Into<String>,
        position: Vector2U<Length>,
        drive: Box<dyn VelocityActuator<Length, Velocity>>,
        steer: Box<dyn PositionActuator<Angle>>,
    ) -> Self {
        Self::with_config(name, position, drive, steer, SwerveModuleConfig::default())
    }

    /// Returns the mounting position relative to the drivetrain origin.
    pub fn position(&self) -> Vector2U<Length> {
        self.position
    }

    /// Applies open-loop power to both actuators without any steering optimization.
    /// Intended for diagnostics and calibration.
    pub fn set_both_open_loop(&mut self, drive_power: f64, steer_power: f64) {
        self.drive.set_open_loop(drive_power);
        self.steer.set_open_loop(steer_power);
    }

    /// Sets the neutral deadband of the drive actuator.
    pub fn set_drive_neutral_deadband(&mut self, neutral_deadband: f64) {
        self.drive.set_neutral_deadband(neutral_deadband);
    }

    /// Drives the module with open-loop power along the direction of the vector.
    ///
    /// The magnitude of the vector is the drive power. It is reduced while the wheel is
    /// still turning towards the new heading. Vectors inside the power deadband stop the
    /// module. If the steer actuator refuses the new heading the drive is stopped.
    pub fn set_open_loop(&mut self, vector: Vector2<f64>) {
        let magnitude = vector.norm();
        if !(magnitude > self.config.power_deadband) {
            self.stop();
            return;
        }

        let Some(inverted) = self.set_steer_angle(Angle::atan2(vector.y, vector.x)) else {
            self.drive.stop();
            return;
        };
        let power = if inverted { -magnitude } else { magnitude };
        let power = power * self.alignment_scale();

        trace!(module = %self.name, power, "Module open-loop");
        self.drive.set_open_loop(power);
    }

    /// Applies open-loop drive power and steers straight to the given heading without
    /// steering optimization. Intended for diagnostics and calibration.
    pub fn set_open_loop_with_angle(&mut self, power: f64, steer_angle: Angle) {
        let current = self.steer.position();
        self.steer
            .set_position_closed_loop(current + steer_angle.difference(current));
        self.drive.set_open_loop(power);
    }

    /// Drives the module with closed-loop velocity along the direction of the vector.
    ///
    /// Vectors inside the velocity deadband stop the module. If the steer actuator refuses
    /// the new heading the drive is stopped.
    pub fn set_velocity_closed_loop(&mut self, vector: Vector2U<Velocity>) {
        let magnitude = vector.magnitude();
        if !(magnitude > self.config.velocity_deadband()) {
            self.stop();
            return;
        }

        let Some(inverted) = self.set_steer_angle(vector.angle()) else {
            self.drive.stop();
            return;
        };
        let velocity = if inverted { -magnitude } else { magnitude };
        let velocity = velocity * self.alignment_scale();

        trace!(module = %self.name, ?velocity, "Module closed-loop velocity");
        self.drive.set_velocity_closed_loop(velocity);
    }

    /// Steers towards the goal heading and returns a value indicating whether the drive
    /// has to be inverted, or `None` if the steer actuator refused the heading.
    fn set_steer_angle(&mut self, goal: Angle) -> Option<bool> {
        let steering = optimize_steering(goal, self.steer.position());
        if !self.steer.set_position_closed_loop(steering.target) {
            warn!(module = %self.name, "Steer actuator refused the heading. Stopping the drive.");
            return None;
        }

        Some(steering.inverted)
    }

    /// Returns the steer actuator.
    pub fn steer(&self) -> &dyn PositionActuator<Angle> {
        self.steer.as_ref()
    }

    /// Returns the measured heading of the wheel.
    pub fn steer_angle(&self) -> Angle {
        self.steer.position()
    }

    /// Returns the closed-loop error of the steer actuator, or `None` if the steer
    /// actuator was never given a heading.
    pub fn steer_angle_error(&self) -> Option<Angle> {
        self.steer.position_error()
    }

    /// Returns the steer actuator for mutation.
    pub fn steer_mut(&mut self) -> &mut dyn PositionActuator<Angle> {
        self.steer.as_mut()
    }

    /// Stops both actuators. A steer actuator under closed-loop control keeps holding its
    /// last heading if its hardware does so.
    pub fn stop(&mut self) {
        self.drive.stop();
        self.steer.stop();
    }

    /// Returns the measured velocity of the module as a vector in the drivetrain frame.
    pub fn velocity_vector(&self) -> Vector2U<Velocity> {
        Vector2U::from_polar(self.drive.velocity(), self.steer.position())
    }

    /// Creates a new module.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the module, used in log messages
    /// * 'position' - The mounting position relative to the drivetrain origin
    /// * 'drive' - The actuator that rolls the wheel
    /// * 'steer' - The actuator that turns the wheel
    /// * 'config' - The module tuning values
    pub fn with_config(
        name: impl Into<String>,
        position: Vector2U<Length>,
        drive: Box<dyn VelocityActuator<Length, Velocity>>,
        steer: Box<dyn PositionActuator<Angle>>,
        config: SwerveModuleConfig,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            drive,
            steer,
            previous_drive_position: None,
            cosine_expo: Expo::new(config.cosine_expo),
            config,
        }
    }
}
