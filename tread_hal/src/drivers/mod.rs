//! HAL driver implementations.
//!
//! - [`simulation`] - Software simulation driver for development and testing
//!
//! A new backend implements `tread_common::hal::driver::HalDriver` in its own
//! submodule and gets an entry in [`BUILTIN_DRIVERS`].

pub mod simulation;

use tread_common::hal::driver::DriverFactory;

/// Built-in drivers, keyed by the name used in `hardware.driver`.
pub const BUILTIN_DRIVERS: &[(&str, DriverFactory)] =
    &[(simulation::DRIVER_NAME, simulation::create_driver)];
