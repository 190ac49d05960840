//! Control unit configuration: one TOML file, validated after parsing.
//!
//! ```toml
//! [shared]
//! service_name = "tread-01"
//!
//! [cycle]
//! period_us = 5000
//!
//! [[schedule]]
//! mode = "autonomous"
//! duration_ms = 15000
//!
//! [[schedule]]
//! mode = "teleop"
//! duration_ms = 135000
//! ```
//!
//! Every section except `[shared]` may be omitted.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tread_common::config::{ConfigError, ConfigLoader, SharedConfig};
use tread_common::consts::{DEFAULT_PERIOD_US, MAX_PERIOD_US};
use tread_common::control::config::{DriveMixerParams, PositionSeekParams};
use tread_common::control::mode::RobotMode;
use tread_common::hal::config::HardwareConfig;

/// Default CPU core for the cycle thread (`rt` feature only).
pub const DEFAULT_CPU_CORE: usize = 1;

/// Default SCHED_FIFO priority (`rt` feature only).
pub const DEFAULT_RT_PRIORITY: i32 = 80;

/// Autonomous period of a match [ms].
pub const AUTONOMOUS_PERIOD_MS: u64 = 15_000;

/// Teleop period of a match [ms].
pub const TELEOP_PERIOD_MS: u64 = 135_000;

// ─── Cycle ──────────────────────────────────────────────────────────

/// Periodic scheduler settings (`[cycle]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Control period [µs].
    pub period_us: u64,
    /// CPU core the cycle thread is pinned to.
    pub cpu_core: usize,
    /// SCHED_FIFO priority, 1..=99.
    pub rt_priority: i32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            period_us: DEFAULT_PERIOD_US,
            cpu_core: DEFAULT_CPU_CORE,
            rt_priority: DEFAULT_RT_PRIORITY,
        }
    }
}

impl CycleConfig {
    /// Control period as Duration.
    #[inline]
    pub const fn period(&self) -> Duration {
        Duration::from_micros(self.period_us)
    }

    /// Validate bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_us == 0 || self.period_us > MAX_PERIOD_US {
            return Err(ConfigError::ValidationError(format!(
                "cycle.period_us must be in 1..={MAX_PERIOD_US}, got {}",
                self.period_us
            )));
        }
        if !(1..=99).contains(&self.rt_priority) {
            return Err(ConfigError::ValidationError(format!(
                "cycle.rt_priority must be in 1..=99, got {}",
                self.rt_priority
            )));
        }
        Ok(())
    }
}

// ─── Schedule ───────────────────────────────────────────────────────

/// One scheduler phase: a mode held for a fixed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePhase {
    /// Mode active during the phase.
    pub mode: RobotMode,
    /// Phase length [ms].
    pub duration_ms: u64,
}

impl SchedulePhase {
    /// Phase from mode and length.
    pub const fn new(mode: RobotMode, duration_ms: u64) -> Self {
        Self { mode, duration_ms }
    }

    /// Phase length as Duration.
    #[inline]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A match: autonomous, then teleop.
pub fn default_schedule() -> Vec<SchedulePhase> {
    vec![
        SchedulePhase::new(RobotMode::Autonomous, AUTONOMOUS_PERIOD_MS),
        SchedulePhase::new(RobotMode::Teleop, TELEOP_PERIOD_MS),
    ]
}

// ─── Root ───────────────────────────────────────────────────────────

/// Complete control unit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlUnitConfig {
    /// Log level and instance name.
    pub shared: SharedConfig,
    /// Scheduler period and RT settings.
    #[serde(default)]
    pub cycle: CycleConfig,
    /// Driver selection and wiring.
    #[serde(default)]
    pub hardware: HardwareConfig,
    /// Position seeker parameters.
    #[serde(default)]
    pub autonomous: PositionSeekParams,
    /// Drive mixer parameters.
    #[serde(default)]
    pub teleop: DriveMixerParams,
    /// Phases run in order by the scheduler.
    #[serde(default = "default_schedule")]
    pub schedule: Vec<SchedulePhase>,
}

impl ControlUnitConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.cycle.validate()?;
        self.hardware.validate()?;
        self.autonomous.validate()?;
        self.teleop.validate()?;

        if self.schedule.is_empty() {
            return Err(ConfigError::ValidationError(
                "schedule must contain at least one phase".to_string(),
            ));
        }
        if let Some(idx) = self.schedule.iter().position(|p| p.duration_ms == 0) {
            return Err(ConfigError::ValidationError(format!(
                "schedule phase {idx} has zero duration"
            )));
        }
        Ok(())
    }

    /// Control period as Duration.
    #[inline]
    pub fn period(&self) -> Duration {
        self.cycle.period()
    }

    /// Total length of the schedule.
    pub fn schedule_duration(&self) -> Duration {
        self.schedule.iter().map(SchedulePhase::duration).sum()
    }
}

/// Load and validate the control unit configuration.
pub fn load_config(path: &Path) -> Result<ControlUnitConfig, ConfigError> {
    let config = ControlUnitConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a configuration from a TOML string.
pub fn load_config_from_str(content: &str) -> Result<ControlUnitConfig, ConfigError> {
    let config = ControlUnitConfig::from_toml(content)?;
    config.validate()?;
    Ok(config)
}
