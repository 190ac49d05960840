//! Prelude module for common re-exports.
//!
//! ```rust
//! use tread_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Controllers ────────────────────────────────────────────────────
pub use crate::control::config::{DriveMixerParams, PositionSeekParams};
pub use crate::control::mode::RobotMode;

// ─── Hardware ───────────────────────────────────────────────────────
pub use crate::hal::config::{HardwareConfig, SimulationConfig, StickSegment};
pub use crate::hal::driver::{Actuator, HalDriver, HalError, InputDevice};
pub use crate::hal::types::{Side, StickSample};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::DEFAULT_PERIOD_US;
