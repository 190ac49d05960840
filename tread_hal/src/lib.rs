//! # Tread HAL Library
//!
//! Hardware Abstraction Layer drivers for the Tread drive controller.
//! Drivers implement the `HalDriver` trait defined in `tread_common::hal::driver`
//! and own the two drive motors plus the operator joystick.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver lookup by configured name
//! - [`drivers`] - HAL driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    tread_hal                             │
//! │  ┌──────────────────┐        ┌────────────────────────┐  │
//! │  │ DriverRegistry   │──────► │ HalDriver (trait obj)  │  │
//! │  │ "simulation" ... │        │  right / left Actuator │  │
//! │  └──────────────────┘        │  InputDevice           │  │
//! │                              └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

// Re-export key types for convenience
pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::simulation::SimulationDriver;
