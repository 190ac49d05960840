//! HAL value types exchanged between drivers and the control core.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Chassis side of a drive motor.
///
/// The right motor is axis 1 (direct sign convention); the left motor is
/// axis 2, mounted facing the other way and therefore mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Axis 1.
    Right,
    /// Axis 2 (mirrored).
    Left,
}

impl Side {
    /// Both sides, axis 1 first.
    pub const BOTH: [Self; 2] = [Self::Right, Self::Left];
}

/// One joystick reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickSample {
    /// Forward/backward axis in [-1, 1].
    pub forward: f64,
    /// Turn (twist) axis in [-1, 1].
    pub turn: f64,
}

impl StickSample {
    /// Centered stick.
    pub const CENTER: Self = Self {
        forward: 0.0,
        turn: 0.0,
    };

    /// Create a sample.
    pub const fn new(forward: f64, turn: f64) -> Self {
        Self { forward, turn }
    }
}

/// Bring an actuator command into the valid [-1, 1] range.
///
/// Non-finite values become 0. Both cases are logged since they indicate a
/// caller bug.
#[inline]
pub fn sanitize_command(value: f64) -> f64 {
    if !value.is_finite() {
        warn!("Non-finite actuator command {value}, using 0");
        return 0.0;
    }
    if !(-1.0..=1.0).contains(&value) {
        warn!("Actuator command {value} outside [-1, 1], clamping");
        return value.clamp(-1.0, 1.0);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_valid_values() {
        assert_eq!(sanitize_command(0.1), 0.1);
        assert_eq!(sanitize_command(-1.0), -1.0);
        assert_eq!(sanitize_command(0.0), 0.0);
    }

    #[test]
    fn sanitize_clamps_and_zeroes() {
        assert_eq!(sanitize_command(1.7), 1.0);
        assert_eq!(sanitize_command(-3.0), -1.0);
        assert_eq!(sanitize_command(f64::NAN), 0.0);
        assert_eq!(sanitize_command(f64::NEG_INFINITY), 0.0);
    }
}
