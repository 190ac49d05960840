//! Controller parameter sets (`[autonomous]` and `[teleop]` TOML sections).

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, check_range};
use crate::consts::{
    DEFAULT_DRIVE_GAIN, DEFAULT_MAX_STEP, DEFAULT_SEEK_OUTPUT, DEFAULT_SEEK_TARGET,
    DEFAULT_TOGGLE_FRACTION,
};

/// Parameters of the autonomous bang-bang position seeker.
///
/// # TOML Example
///
/// ```toml
/// [autonomous]
/// target = 10000
/// output = 0.1
/// toggle_fraction = 0.95
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionSeekParams {
    /// Far setpoint [encoder counts]; the near setpoint is always 0.
    pub target: i64,
    /// Output magnitude commanded while away from the setpoint.
    pub output: f64,
    /// Fraction of the setpoint at which it flips back to 0.
    pub toggle_fraction: f64,
}

impl Default for PositionSeekParams {
    fn default() -> Self {
        Self {
            target: DEFAULT_SEEK_TARGET,
            output: DEFAULT_SEEK_OUTPUT,
            toggle_fraction: DEFAULT_TOGGLE_FRACTION,
        }
    }
}

impl PositionSeekParams {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "autonomous.target must be positive, got {}",
                self.target
            )));
        }
        check_range("autonomous.output", self.output, 0.0, 1.0)?;
        check_range("autonomous.toggle_fraction", self.toggle_fraction, 0.0, 1.0)
    }
}

/// Parameters of the teleop differential mixer.
///
/// # TOML Example
///
/// ```toml
/// [teleop]
/// gain = 0.2
/// max_step = 0.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveMixerParams {
    /// Stick-to-output gain applied to `forward ± turn`.
    pub gain: f64,
    /// Largest change of a channel between consecutive ticks.
    pub max_step: f64,
}

impl Default for DriveMixerParams {
    fn default() -> Self {
        Self {
            gain: DEFAULT_DRIVE_GAIN,
            max_step: DEFAULT_MAX_STEP,
        }
    }
}

impl DriveMixerParams {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("teleop.gain", self.gain, 0.0, 1.0)?;
        check_range("teleop.max_step", self.max_step, 0.0, 2.0)
    }
}
