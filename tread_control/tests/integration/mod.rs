mod autonomous;
mod config_file;
mod slew_bound;
mod teleop;

use tread_common::control::config::{DriveMixerParams, PositionSeekParams};
use tread_common::hal::config::HardwareConfig;
use tread_control::robot::Robot;
use tread_hal::DriverRegistry;

/// Robot over an initialized simulation driver.
pub fn sim_robot(hardware: &HardwareConfig) -> Robot {
    let registry = DriverRegistry::with_builtin();
    let mut driver = registry.create_driver("simulation").unwrap();
    driver.init(hardware).unwrap();
    Robot::new(
        driver,
        PositionSeekParams::default(),
        DriveMixerParams::default(),
    )
}
