//! Simulated drive motor.
//!
//! The shaft speed ramps toward `command * counts_per_second` no faster than
//! `max_acceleration`, then `position += velocity * dt`. Sub-count motion
//! accumulates in an `f64` and the sensor reports it rounded.

use std::time::Duration;
use tracing::trace;
use tread_common::hal::driver::Actuator;
use tread_common::hal::types::sanitize_command;

/// Motor simulator with an integrated relative encoder.
#[derive(Debug, Clone)]
pub struct SimulatedMotor {
    /// Bus id, for log context only.
    id: u8,
    /// Encoder counts per second at full output.
    counts_per_second: f64,
    /// Acceleration limit [counts/s²].
    max_acceleration: f64,
    /// Shaft speed [counts/s].
    velocity: f64,
    /// Accumulated position [counts].
    position: f64,
    /// Last accepted command.
    command: f64,
}

impl SimulatedMotor {
    /// Create a stopped motor at position 0.
    pub fn new(id: u8, counts_per_second: f64, max_acceleration: f64) -> Self {
        Self {
            id,
            counts_per_second,
            max_acceleration,
            velocity: 0.0,
            position: 0.0,
            command: 0.0,
        }
    }

    /// Bus id.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Exact (unrounded) position [counts].
    pub fn exact_position(&self) -> f64 {
        self.position
    }

    /// Shaft speed [counts/s].
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Integrate the current command over `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let dt_s = dt.as_secs_f64();
        let target_velocity = self.command * self.counts_per_second;
        let max_change = self.max_acceleration * dt_s;
        self.velocity += (target_velocity - self.velocity).clamp(-max_change, max_change);
        self.position += self.velocity * dt_s;
        trace!(
            "motor {} advanced to {:.1} at {:.0} counts/s (cmd {:.3})",
            self.id, self.position, self.velocity, self.command
        );
    }
}

impl Actuator for SimulatedMotor {
    fn set_command(&mut self, value: f64) {
        self.command = sanitize_command(value);
    }

    fn position(&self) -> i64 {
        self.position.round() as i64
    }

    fn reset_position(&mut self, value: i64) {
        self.position = value as f64;
    }

    fn command(&self) -> f64 {
        self.command
    }
}
