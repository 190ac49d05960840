//! Simulation driver module.
//!
//! Software-emulated drive motors and a scripted operator joystick for
//! development and testing without physical hardware.

mod driver;
mod joystick;
mod motor;

pub use driver::SimulationDriver;
pub use joystick::ScriptedJoystick;
pub use motor::SimulatedMotor;

use tread_common::hal::driver::HalDriver;

/// Registry name of the simulation driver.
pub const DRIVER_NAME: &str = "simulation";

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn HalDriver> {
    Box::new(SimulationDriver::new())
}
