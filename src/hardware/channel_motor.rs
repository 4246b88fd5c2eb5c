//! Defines a hardware adapter that forwards motor commands to a hardware thread.
//!
//! The control loop must never block on the motor bus, so commands are pushed onto an
//! unbounded channel and feedback samples are read from a second channel. Whatever owns
//! the other end of the channels (a CAN bus driver, a simulator) processes commands at
//! its own pace and publishes [MotorFeedback] whenever it has new sensor data.

use std::cell::Cell;

use crossbeam_channel::{Receiver, Sender};
use tracing::warn;

use super::motor_interface::{HardwareMotor, HardwarePositionMotor, HardwareVelocityMotor};

#[cfg(test)]
#[path = "channel_motor_tests.rs"]
mod channel_motor_tests;

/// Defines the commands that are sent to the hardware thread. All values are in
/// sensor units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotorCommand {
    /// Remove all power from the motor.
    Stop,

    /// Apply the given open-loop power.
    OpenLoop {
        /// The power in [-1.0, 1.0]
        power: f64,
    },

    /// Track the given position.
    Position {
        /// The position goal in sensor units
        position_su: f64,

        /// The optional arbitrary feedforward
        feedforward: Option<f64>,
    },

    /// Track the given velocity.
    Velocity {
        /// The velocity goal in sensor units per second
        velocity_sups: f64,

        /// The optional arbitrary feedforward
        feedforward: Option<f64>,
    },

    /// Change the motion profile acceleration.
    Acceleration {
        /// The acceleration in sensor units per second
        acceleration_sups: f64,
    },

    /// Change the motion profile cruise velocity.
    MaxVelocity {
        /// The maximum velocity in sensor units per second
        max_velocity_sups: f64,
    },
}

/// A sensor sample published by the hardware thread.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotorFeedback {
    /// The position of the motor in sensor units
    pub position_su: f64,

    /// The velocity of the motor in sensor units per second
    pub velocity_sups: f64,
}

/// The hardware side of a [ChannelMotor].
pub struct MotorChannels {
    /// Receives the commands sent by the [ChannelMotor]
    pub commands: Receiver<MotorCommand>,

    /// Publishes sensor samples to the [ChannelMotor]
    pub feedback: Sender<MotorFeedback>,
}

/// A hardware adapter that forwards every command over a channel.
pub struct ChannelMotor {
    /// The channel sender that is used to send commands to the hardware thread
    command_sender: Sender<MotorCommand>,

    /// The channel receiver that delivers sensor samples from the hardware thread
    feedback_receiver: Receiver<MotorFeedback>,

    /// The most recent sensor sample. Updated whenever the sensor values are read.
    latest_feedback: Cell<MotorFeedback>,
}

impl ChannelMotor {
    /// Creates a new [ChannelMotor] together with the channels for the hardware thread.
    pub fn create() -> (Self, MotorChannels) {
        let (command_sender, command_receiver) = crossbeam_channel::unbounded();
        let (feedback_sender, feedback_receiver) = crossbeam_channel::unbounded();

        (
            Self::new(command_sender, feedback_receiver),
            MotorChannels {
                commands: command_receiver,
                feedback: feedback_sender,
            },
        )
    }

    /// Returns the most recent sensor sample, draining any samples that arrived since
    /// the last read.
    #[cfg_attr(test, mutants::skip)] // Draining an empty channel and a stale one look the same
    pub fn feedback(&self) -> MotorFeedback {
        if let Some(sample) = self.feedback_receiver.try_iter().last() {
            self.latest_feedback.set(sample);
        }

        self.latest_feedback.get()
    }

    /// Creates a new [ChannelMotor] from existing channel ends.
    ///
    /// ## Parameters
    ///
    /// * 'command_sender' - The sender used to push commands to the hardware thread
    /// * 'feedback_receiver' - The receiver on which the hardware thread publishes sensor samples
    pub fn new(
        command_sender: Sender<MotorCommand>,
        feedback_receiver: Receiver<MotorFeedback>,
    ) -> Self {
        Self {
            command_sender,
            feedback_receiver,
            latest_feedback: Cell::new(MotorFeedback::default()),
        }
    }

    /// Sends the command and returns a value indicating whether the hardware thread
    /// is still listening.
    fn send(&self, command: MotorCommand) -> bool {
        match self.command_sender.send(command) {
            Ok(()) => true,
            Err(_) => {
                warn!(?command, "Motor hardware channel is disconnected. Dropping command.");
                false
            }
        }
    }
}

impl HardwareMotor for ChannelMotor {
    fn set_open_loop(&mut self, power: f64) {
        self.send(MotorCommand::OpenLoop { power });
    }

    fn stop(&mut self) {
        self.send(MotorCommand::Stop);
    }
}

impl HardwarePositionMotor for ChannelMotor {
    fn position_su(&self) -> f64 {
        self.feedback().position_su
    }

    fn set_position_closed_loop(&mut self, position_su: f64, feedforward: Option<f64>) -> bool {
        self.send(MotorCommand::Position {
            position_su,
            feedforward,
        })
    }
}

impl HardwareVelocityMotor for ChannelMotor {
    fn set_acceleration_su(&mut self, acceleration_sups: f64) {
        self.send(MotorCommand::Acceleration { acceleration_sups });
    }

    fn set_max_velocity_su(&mut self, max_velocity_sups: f64) {
        self.send(MotorCommand::MaxVelocity { max_velocity_sups });
    }

    fn set_velocity_closed_loop(&mut self, velocity_sups: f64, feedforward: Option<f64>) -> bool {
        self.send(MotorCommand::Velocity {
            velocity_sups,
            feedforward,
        })
    }

    fn velocity_sups(&self) -> f64 {
        self.feedback().velocity_sups
    }
}
