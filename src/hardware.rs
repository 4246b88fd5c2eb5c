/// Provides a hardware adapter that talks to a hardware thread over channels
pub mod channel_motor;

/// Provides a hardware adapter that doesn't touch any hardware
pub mod dummy_motor;

/// Defines the interface for motor hardware
pub mod motor_interface;
