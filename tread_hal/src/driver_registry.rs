//! Driver lookup by name.
//!
//! The control unit names its backend in `hardware.driver`; the registry
//! turns that name into a fresh, uninitialized `HalDriver`.

use tread_common::hal::driver::{DriverFactory, HalDriver, HalError};

use crate::drivers::BUILTIN_DRIVERS;

/// Name-keyed table of driver factories.
pub struct DriverRegistry {
    factories: &'static [(&'static str, DriverFactory)],
}

impl DriverRegistry {
    /// Registry over every built-in driver.
    pub fn with_builtin() -> Self {
        Self {
            factories: BUILTIN_DRIVERS,
        }
    }

    /// Create a driver instance by name.
    ///
    /// # Errors
    /// Returns `HalError::DriverNotFound` for an unknown name.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn HalDriver>, HalError> {
        self.factories
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| HalError::DriverNotFound(name.to_string()))
    }
}
