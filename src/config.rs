//! Tuning values for modules and drivetrains.
//!
//! The structures deserialize from any serde format. Missing fields take their default
//! value, so a configuration file only needs to name the values it changes.

use serde::Deserialize;

use crate::{
    units::{Length, Velocity},
    Error,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// Tuning values for a single swerve module.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SwerveModuleConfig {
    /// Open-loop vectors with a magnitude at or below this value stop the module
    pub power_deadband: f64,

    /// Closed-loop velocity vectors with a magnitude at or below this value stop the module
    pub velocity_deadband_inches_per_second: f64,

    /// The expo adjustment applied to the cosine of the steer error before it scales the
    /// drive output. 1.0 gives a cubic curve.
    pub cosine_expo: f64,
}

impl SwerveModuleConfig {
    /// Returns the closed-loop velocity deadband.
    pub fn velocity_deadband(&self) -> Velocity {
        Velocity::inches_per_second(self.velocity_deadband_inches_per_second)
    }
}

impl Default for SwerveModuleConfig {
    fn default() -> Self {
        Self {
            power_deadband: 0.001,
            velocity_deadband_inches_per_second: 0.1,
            cosine_expo: 1.0,
        }
    }
}

/// Tuning values for a drivetrain.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SwerveDriveConfig {
    /// A module that reports a larger displacement than this in a single tick is treated as
    /// slipping or glitching and is left out of the forward kinematics
    pub max_module_displacement_inches: f64,

    /// The fastest a module can drive. Closed-loop body commands are scaled down so that no
    /// module is asked to go faster.
    pub max_module_velocity_meters_per_second: f64,

    /// Translation components with a magnitude at or below this value are ignored by the
    /// inverse kinematics
    pub translation_epsilon: f64,
}

impl SwerveDriveConfig {
    /// Returns the largest per-tick module displacement that forward kinematics accepts.
    pub fn max_module_displacement(&self) -> Length {
        Length::inches(self.max_module_displacement_inches)
    }

    /// Returns the fastest a module can drive.
    pub fn max_module_velocity(&self) -> Velocity {
        Velocity::meters_per_second(self.max_module_velocity_meters_per_second)
    }

    /// Checks that the values describe a drivetrain that can be controlled.
    ///
    /// ## Errors
    ///
    /// Returns [Error::InvalidConfiguration] for the first value that is out of range:
    ///
    /// * 'max_module_displacement_inches' - Must be larger than zero
    /// * 'max_module_velocity_meters_per_second' - Must be larger than zero
    /// * 'translation_epsilon' - Must not be negative
    pub fn validate(&self) -> Result<(), Error> {
        // The negated comparisons reject NaN as well
        if !(self.max_module_displacement_inches > 0.0) {
            return Err(Error::InvalidConfiguration {
                field: "max_module_displacement_inches",
                value: self.max_module_displacement_inches,
            });
        }

        if !(self.max_module_velocity_meters_per_second > 0.0) {
            return Err(Error::InvalidConfiguration {
                field: "max_module_velocity_meters_per_second",
                value: self.max_module_velocity_meters_per_second,
            });
        }

        if !(self.translation_epsilon >= 0.0) {
            return Err(Error::InvalidConfiguration {
                field: "translation_epsilon",
                value: self.translation_epsilon,
            });
        }

        Ok(())
    }
}

impl Default for SwerveDriveConfig {
    fn default() -> Self {
        Self {
            max_module_displacement_inches: 30.0,
            max_module_velocity_meters_per_second: 4.5,
            translation_epsilon: 1.0e-9,
        }
    }
}
