//! Hardware configuration (`[hardware]` TOML section).
//!
//! # TOML Example
//!
//! ```toml
//! [hardware]
//! driver = "simulation"
//! right_motor_id = 1
//! left_motor_id = 3
//! joystick_port = 0
//!
//! [hardware.simulation]
//! counts_per_second = 217770.0
//! max_acceleration = 1000000.0
//!
//! [[hardware.simulation.stick]]
//! duration_ms = 2000
//! forward = 1.0
//! turn = 0.0
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, check_range};
use crate::consts::{
    DEFAULT_COUNTS_PER_SECOND, DEFAULT_DRIVER, DEFAULT_JOYSTICK_PORT, DEFAULT_LEFT_MOTOR_ID,
    DEFAULT_MAX_ACCELERATION, DEFAULT_RIGHT_MOTOR_ID,
};

/// Hardware wiring and driver selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Registered driver name.
    pub driver: String,
    /// Bus id of the right (axis 1) motor controller.
    pub right_motor_id: u8,
    /// Bus id of the left (axis 2) motor controller.
    pub left_motor_id: u8,
    /// Joystick port on the operator console.
    pub joystick_port: u8,
    /// Simulation driver settings; ignored by hardware drivers.
    pub simulation: SimulationConfig,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            right_motor_id: DEFAULT_RIGHT_MOTOR_ID,
            left_motor_id: DEFAULT_LEFT_MOTOR_ID,
            joystick_port: DEFAULT_JOYSTICK_PORT,
            simulation: SimulationConfig::default(),
        }
    }
}

impl HardwareConfig {
    /// Validate wiring and simulation settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "hardware.driver cannot be empty".to_string(),
            ));
        }
        if self.right_motor_id == self.left_motor_id {
            return Err(ConfigError::ValidationError(format!(
                "right and left motors share bus id {}",
                self.right_motor_id
            )));
        }
        self.simulation.validate()
    }
}

/// Simulation driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Encoder counts per second at full (1.0) output.
    pub counts_per_second: f64,
    /// Shaft acceleration limit [counts/s²].
    pub max_acceleration: f64,
    /// Scripted joystick segments, played in order, then centered.
    pub stick: Vec<StickSegment>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            counts_per_second: DEFAULT_COUNTS_PER_SECOND,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            stick: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Validate physics constants and the stick script.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "hardware.simulation.counts_per_second",
            self.counts_per_second,
            0.0,
            f64::MAX,
        )?;
        check_range(
            "hardware.simulation.max_acceleration",
            self.max_acceleration,
            0.0,
            f64::MAX,
        )?;
        for (idx, segment) in self.stick.iter().enumerate() {
            segment.validate().map_err(|e| match e {
                ConfigError::ValidationError(msg) => {
                    ConfigError::ValidationError(format!("stick segment {idx}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// One held joystick position of the simulated operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickSegment {
    /// How long the position is held [ms].
    pub duration_ms: u64,
    /// Forward axis in [-1, 1].
    #[serde(default)]
    pub forward: f64,
    /// Turn axis in [-1, 1].
    #[serde(default)]
    pub turn: f64,
}

impl StickSegment {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("forward", self.forward), ("turn", self.turn)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} = {value} outside [-1, 1]"
                )));
            }
        }
        Ok(())
    }
}
