//! The drivetrain: an ordered set of swerve modules that is commanded and observed as a
//! single rigid body.
//!
//! The order of the modules is fixed at construction. Every list of per-module vectors,
//! both those produced by the inverse kinematics and those passed in by callers, is matched
//! to the modules in that order.

extern crate nalgebra as na;

use na::Vector2;
use tracing::{debug, trace, warn};

use crate::{
    actuators::{motor::MotorActuator, position::PositionActuator},
    config::SwerveDriveConfig,
    module::{optimize_steering, ModuleState, SwerveModule},
    units::{Angle, AngularVelocity, Length, Unit, Vector2U, Velocity},
    vector_group::{normalize_group_if_saturated, normalize_group_units},
    Error,
};

#[cfg(test)]
#[path = "drive_tests.rs"]
mod drive_tests;

/// A whole-body open-loop motion request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyCommand {
    /// The unitless translation, where a magnitude of 1.0 is full power
    pub translation: Vector2<f64>,

    /// The unitless rotation power. Positive values rotate counter-clockwise.
    pub rotation: f64,

    /// The point to rotate about, relative to the drivetrain origin. `None` rotates about
    /// the origin.
    pub center_of_rotation: Option<Vector2U<Length>>,
}

impl BodyCommand {
    /// Creates a command that translates and rotates about the drivetrain origin.
    pub fn new(translation: Vector2<f64>, rotation: f64) -> Self {
        Self {
            translation,
            rotation,
            center_of_rotation: None,
        }
    }

    /// Returns the command rotating about the given point instead.
    pub fn with_center_of_rotation(self, center: Vector2U<Length>) -> Self {
        Self {
            center_of_rotation: Some(center),
            ..self
        }
    }
}

/// Defines how the modules are lined up when the drivetrain brakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrakeMethod {
    /// Each wheel rolls towards the drivetrain origin, so pushing the drivetrain in any
    /// direction has to scrub at least two wheels sideways.
    #[default]
    TreadToCenter,

    /// Each axle points at the drivetrain origin, which resists rotation.
    AxlesToCenter,
}

/// Controls a set of swerve modules as a single drivetrain.
pub struct SwerveDrive {
    modules: Vec<SwerveModule>,
    config: SwerveDriveConfig,
}

impl SwerveDrive {
    /// Applies a whole-body open-loop command.
    pub fn apply(&mut self, command: BodyCommand) {
        let center = command.center_of_rotation.unwrap_or_default();
        let module_vectors =
            self.inverse_kinematics(command.translation, command.rotation, center);

        trace!(?command, "Applying body command");
        self.dispatch_open_loop(&module_vectors);
    }

    /// Lines up the modules so that the drivetrain resists being pushed, and stops the
    /// drive actuators.
    pub fn brake(&mut self, method: BrakeMethod) {
        let offset = match method {
            BrakeMethod::TreadToCenter => Angle::zero(),
            BrakeMethod::AxlesToCenter => Angle::PI_BY_TWO,
        };

        for module in self.modules.iter_mut() {
            let heading = module.position().angle() + offset;

            // Either end of the wheel may face the origin, so take the shorter turn
            let steering = optimize_steering(heading, module.steer_angle());

            module.drive_mut().stop();
            module.steer_mut().set_position_closed_loop(steering.target);
        }

        debug!(?method, "Braking");
    }

    /// Returns the drivetrain configuration.
    pub fn config(&self) -> &SwerveDriveConfig {
        &self.config
    }

    /// Dispatches one open-loop vector to each module. The caller guarantees the lengths
    /// match.
    fn dispatch_open_loop(&mut self, module_vectors: &[Vector2<f64>]) {
        for (module, vector) in self.modules.iter_mut().zip(module_vectors) {
            module.set_open_loop(*vector);
        }
    }

    /// Returns the displacement of the drivetrain since the previous call, in the
    /// drivetrain frame.
    ///
    /// Every module reports its own displacement. A module that moved further than the
    /// configured maximum is assumed to be slipping or misreading and is left out of the
    /// average. If every module is left out the displacement is zero.
    pub fn forward_kinematics(&mut self) -> Vector2U<Length> {
        let max_displacement = self.config.max_module_displacement();

        let mut sum = Vector2U::zero();
        let mut accepted = 0;
        for module in self.modules.iter_mut() {
            let displacement = module.forward_kinematics();
            if displacement.magnitude() < max_displacement {
                sum = sum + displacement;
                accepted += 1;
            } else {
                warn!(
                    module = module.name(),
                    displacement = ?displacement.magnitude(),
                    "Ignoring module displacement that exceeds the maximum"
                );
            }
        }

        if accepted == 0 {
            return Vector2U::zero();
        }

        sum / accepted as f64
    }

    /// Computes the open-loop vector for every module that produces the given body motion.
    ///
    /// Every module gets a rotational component perpendicular to the line between the
    /// centre of rotation and the module. The module furthest from the centre gets a
    /// rotational component with magnitude `rotation`, the others proportionally less.
    /// The translation is added to every module. If any resulting vector is longer than
    /// unit length the whole set is scaled down together so the motion keeps its shape.
    ///
    /// ## Parameters
    ///
    /// * 'translation' - The unitless translation
    /// * 'rotation' - The unitless rotation power. Positive values rotate counter-clockwise.
    /// * 'center_of_rotation' - The point to rotate about, relative to the drivetrain origin
    ///
    /// ## Returns
    ///
    /// One vector per module, in module order.
    pub fn inverse_kinematics(
        &self,
        translation: Vector2<f64>,
        rotation: f64,
        center_of_rotation: Vector2U<Length>,
    ) -> Vec<Vector2<f64>> {
        let offsets: Vec<Vector2U<Length>> = self
            .modules
            .iter()
            .map(|m| center_of_rotation - m.position())
            .collect();

        let epsilon = self.config.translation_epsilon;
        let add_translation = translation.x.abs() > epsilon || translation.y.abs() > epsilon;

        let module_vectors: Vec<Vector2<f64>> = normalize_group_units(&offsets)
            .into_iter()
            .map(|offset| {
                // Every module sits on the centre of rotation
                if offset.x.is_nan() || offset.y.is_nan() {
                    return Vector2::zeros();
                }

                // Rotate by -90 degrees
                Vector2::new(offset.y, -offset.x) * rotation
            })
            .map(|v| if add_translation { v + translation } else { v })
            .collect();

        normalize_group_if_saturated(&module_vectors)
    }

    /// Returns the modules in module order.
    pub fn modules(&self) -> &[SwerveModule] {
        &self.modules
    }

    /// Returns the modules in module order for mutation.
    pub fn modules_mut(&mut self) -> &mut [SwerveModule] {
        &mut self.modules
    }

    /// Returns the sensor readings of every module, in module order.
    pub fn module_states(&self) -> Vec<ModuleState> {
        self.modules.iter().map(|m| m.module_state()).collect()
    }

    /// Creates a new drivetrain.
    ///
    /// ## Parameters
    ///
    /// * 'modules' - The modules. Their order is the order of every per-module vector list.
    /// * 'config' - The drivetrain tuning values
    ///
    /// ## Errors
    ///
    /// * [Error::NoModules] - Returned when `modules` is empty.
    /// * [Error::InvalidConfiguration] - Returned when `config` fails
    ///   [SwerveDriveConfig::validate].
    pub fn new(modules: Vec<SwerveModule>, config: SwerveDriveConfig) -> Result<Self, Error> {
        if modules.is_empty() {
            return Err(Error::NoModules);
        }

        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejecting swerve drive configuration");
            return Err(e);
        }

        debug!(
            modules = ?modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
            "Created swerve drive"
        );

        Ok(Self { modules, config })
    }

    /// Rotates the drivetrain open-loop about the given point without translating.
    pub fn rotate_open_loop(&mut self, center_of_rotation: Vector2U<Length>, power: f64) {
        let module_vectors = self.inverse_kinematics(Vector2::zeros(), power, center_of_rotation);
        self.dispatch_open_loop(&module_vectors);
    }

    /// Sends one open-loop vector to each module, in module order.
    ///
    /// ## Errors
    ///
    /// Returns [Error::ModuleCountMismatch] without commanding any module if the number of
    /// vectors doesn't match the number of modules.
    pub fn set_modules_open_loop(&mut self, module_vectors: &[Vector2<f64>]) -> Result<(), Error> {
        if module_vectors.len() != self.modules.len() {
            warn!(
                expected = self.modules.len(),
                actual = module_vectors.len(),
                "Ignoring module commands for the wrong number of modules"
            );
            return Err(Error::ModuleCountMismatch {
                expected: self.modules.len(),
                actual: module_vectors.len(),
            });
        }

        self.dispatch_open_loop(module_vectors);
        Ok(())
    }

    /// Translates and rotates the drivetrain open-loop about its origin.
    pub fn set_open_loop(&mut self, translation: Vector2<f64>, rotation: f64) {
        self.apply(BodyCommand::new(translation, rotation));
    }

    /// Drives the drivetrain with closed-loop velocity.
    ///
    /// Each module is commanded to `translation + rotation × (module − center)`. If any module
    /// would have to exceed the configured maximum module velocity, every module velocity is
    /// scaled down by the same factor.
    ///
    /// ## Parameters
    ///
    /// * 'translation' - The velocity of the drivetrain
    /// * 'rotation' - The angular velocity of the drivetrain. Positive values rotate
    ///   counter-clockwise.
    /// * 'center_of_rotation' - The point to rotate about, relative to the drivetrain origin
    pub fn set_velocity_closed_loop(
        &mut self,
        translation: Vector2U<Velocity>,
        rotation: AngularVelocity,
        center_of_rotation: Vector2U<Length>,
    ) {
        let max_velocity = self.config.max_module_velocity();
        let omega = rotation.in_radians_per_second();

        let ratios: Vec<Vector2<f64>> = self
            .modules
            .iter()
            .map(|m| {
                let r = (m.position() - center_of_rotation).to_base();
                let tangential = Vector2::new(-r.y, r.x) * omega;
                translation.to_base() + tangential
            })
            .map(|v| v / max_velocity.value())
            .collect();

        for (module, ratio) in self
            .modules
            .iter_mut()
            .zip(normalize_group_if_saturated(&ratios))
        {
            module.set_velocity_closed_loop(Vector2U::from_ratio(ratio, max_velocity));
        }
    }

    /// Stops every module.
    pub fn stop(&mut self) {
        for module in self.modules.iter_mut() {
            module.stop();
        }
    }

    /// Returns the average measured velocity of the modules, in the drivetrain frame.
    pub fn velocity_vector(&self) -> Vector2U<Velocity> {
        let sum = self
            .modules
            .iter()
            .fold(Vector2U::zero(), |sum, m| sum + m.velocity_vector());

        sum / self.modules.len() as f64
    }
}
