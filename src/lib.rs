#![warn(missing_docs)]

//! Kinematics and actuator control for swerve (independently steered and driven wheel)
//! drivetrains.
//!
//! The crate is layered bottom-up:
//!
//! * [units] provides unit-typed quantities and angle wrapping.
//! * [hardware] defines the seam that hardware adapters implement, in raw sensor units.
//! * [actuators] turns a hardware adapter into an open-loop, position or velocity
//!   controlled actuator with deadband, disable and clamping behaviour.
//! * [module] controls a single swerve module (one drive and one steer actuator).
//! * [drive] aggregates the modules into a drivetrain and provides the inverse and
//!   forward kinematics.

use thiserror::Error;

/// Defines the capability hierarchy for controllable mechanisms
pub mod actuators;

/// Defines the configuration structures for modules and drivetrains
pub mod config;

/// Provides the multi-module drivetrain
pub mod drive;

/// Defines the interfaces for hardware adapters
pub mod hardware;

/// Provides the single swerve module controller
pub mod module;

mod number_space;

/// Defines closed ranges used to clamp actuator commands
pub mod range;

/// Provides signal shaping functions for commands
pub mod shaping;

/// Defines unit-typed quantities and vectors
pub mod units;

/// Provides normalization of groups of vectors
pub mod vector_group;

/// Defines the different errors for the swerve drive crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Returned when a range is created with a lower bound that is larger than the upper bound
    /// or with a bound that is not a number.
    #[error("The range [{low}, {high}] is not a valid range.")]
    InvalidRange {
        /// The lower bound of the range
        low: f64,

        /// The upper bound of the range
        high: f64,
    },

    /// Returned when a configuration value is outside the range the drivetrain can work
    /// with.
    #[error("The configuration value {field} = {value} is not valid.")]
    InvalidConfiguration {
        /// The name of the configuration field
        field: &'static str,

        /// The rejected value
        value: f64,
    },

    /// Returned when a drivetrain is created without any modules.
    #[error("A swerve drive needs at least one module.")]
    NoModules,

    /// Returned when a set of module commands doesn't match the number of modules
    /// in the drivetrain.
    #[error("Expected {expected} module commands but got {actual}.")]
    ModuleCountMismatch {
        /// The number of modules in the drivetrain
        expected: usize,

        /// The number of commands that were provided
        actual: usize,
    },
}
