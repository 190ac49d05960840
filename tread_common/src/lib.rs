//! Tread Common Library
//!
//! Shared constants, configuration loading and hardware traits for all Tread
//! workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - System-wide constants (defaults for every tunable)
//! - [`control`] - Controller parameters and the robot mode enum
//! - [`hal`] - Actuator / input device traits, driver trait and hardware config
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use tread_common::prelude::*;
//!
//! let seek = PositionSeekParams::default();
//! assert_eq!(seek.target, 10_000);
//! ```

pub mod config;
pub mod consts;
pub mod control;
pub mod hal;
pub mod prelude;
