//! System-wide constants for the Tread workspace.
//!
//! Single source of truth for every default. Config structs fall back to
//! these values when a field is omitted from TOML.

/// Default control period in microseconds (200 Hz).
pub const DEFAULT_PERIOD_US: u64 = 5_000;

/// Upper bound accepted for the control period (1 s).
pub const MAX_PERIOD_US: u64 = 1_000_000;

/// Autonomous position target [encoder counts].
pub const DEFAULT_SEEK_TARGET: i64 = 10_000;

/// Fixed bang-bang output magnitude while seeking.
pub const DEFAULT_SEEK_OUTPUT: f64 = 0.1;

/// Fraction of the target at which the setpoint flips back to zero.
pub const DEFAULT_TOGGLE_FRACTION: f64 = 0.95;

/// Stick-to-output gain of the teleop mixer.
pub const DEFAULT_DRIVE_GAIN: f64 = 0.2;

/// Maximum per-tick change of a teleop channel.
pub const DEFAULT_MAX_STEP: f64 = 0.1;

/// CAN id of the right (axis 1) motor.
pub const DEFAULT_RIGHT_MOTOR_ID: u8 = 1;

/// CAN id of the left (axis 2, mirrored) motor.
pub const DEFAULT_LEFT_MOTOR_ID: u8 = 3;

/// Driver station joystick port.
pub const DEFAULT_JOYSTICK_PORT: u8 = 0;

/// Value written to the sensor at startup to verify the read-back path.
pub const SENSOR_PROBE_COUNTS: i64 = 100;

/// Encoder counts per second at full output (2048 CPR at 6380 rpm).
pub const DEFAULT_COUNTS_PER_SECOND: f64 = 2048.0 * 6380.0 / 60.0;

/// Simulated motor acceleration limit [counts/s²]: 0.22 s from rest to full speed.
pub const DEFAULT_MAX_ACCELERATION: f64 = 1_000_000.0;

/// Default config file path of the control unit binary.
pub const DEFAULT_CONFIG_PATH: &str = "config/tread.toml";

/// Default driver name.
pub const DEFAULT_DRIVER: &str = "simulation";
