//! HAL traits and error types.
//!
//! This module defines:
//! - `Actuator` - one motor with an integrated position sensor
//! - `InputDevice` - the operator joystick
//! - `HalDriver` - a pluggable hardware backend owning both motors and the stick
//! - `HalError` - error types for driver lifecycle operations
//! - `DriverFactory` - factory function type used by the driver registry

use crate::control::mode::RobotMode;
use crate::hal::config::HardwareConfig;
use crate::hal::types::{Side, StickSample};
use std::time::Duration;
use thiserror::Error;

/// Error types for HAL operations.
///
/// Only lifecycle operations (`init`, `shutdown`, driver lookup) can fail.
/// Per-tick actuator and input calls are infallible by contract.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// A motor controller with an integrated relative position sensor.
pub trait Actuator: Send {
    /// Command a normalized output in [-1, 1].
    fn set_command(&mut self, value: f64);

    /// Accumulated sensor position [counts], signed, no wraparound.
    fn position(&self) -> i64;

    /// Redefine the current sensor position as `value`.
    fn reset_position(&mut self, value: i64);

    /// Last commanded output.
    fn command(&self) -> f64;
}

/// Operator joystick. Axis values are pre-clamped to [-1, 1].
pub trait InputDevice: Send {
    /// Forward/backward axis.
    fn forward_axis(&self) -> f64;

    /// Turn axis.
    fn turn_axis(&self) -> f64;

    /// Read both axes.
    fn sample(&self) -> StickSample {
        StickSample::new(self.forward_axis(), self.turn_axis())
    }
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn HalDriver>;

/// Trait defining the interface for HAL drivers.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the cycle loop starts
/// 2. `mode_changed()` - Called after every mode entry
/// 3. `cycle()` - Called once per tick, before the control logic runs
/// 4. `shutdown()` - Called when the control unit is stopping
pub trait HalDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Initialize the driver with hardware configuration.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if initialization cannot complete.
    fn init(&mut self, config: &HardwareConfig) -> Result<(), HalError>;

    /// Advance the hardware by one tick.
    ///
    /// Reads sensors and the joystick (or simulates them) so the control
    /// logic sees fresh values. `dt` is the elapsed time since the last cycle.
    fn cycle(&mut self, dt: Duration);

    /// Motor on the given side.
    fn actuator(&mut self, side: Side) -> &mut dyn Actuator;

    /// Operator input device.
    fn input(&self) -> &dyn InputDevice;

    /// Notified after the robot enters a new mode.
    ///
    /// Default implementation does nothing.
    fn mode_changed(&mut self, _mode: RobotMode) {
        // Default: no-op
    }

    /// Graceful shutdown of the driver. Outputs must be left at zero.
    fn shutdown(&mut self) -> Result<(), HalError>;
}
