//! Integration test: config file → driver → robot → full schedule run.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tread_common::config::{ConfigError, LogLevel};
use tread_common::control::mode::RobotMode;
use tread_common::hal::types::Side;
use tread_control::config::{SchedulePhase, load_config};
use tread_control::cycle::{CycleRunner, Pacing, RunOutcome};
use tread_control::robot::Robot;
use tread_hal::DriverRegistry;

const SHORT_MATCH: &str = r#"
[shared]
log_level = "debug"
service_name = "tread-it"

[cycle]
period_us = 10000

[[hardware.simulation.stick]]
duration_ms = 50
forward = 0.5
turn = 0.5

[autonomous]
target = 500

[[schedule]]
mode = "autonomous"
duration_ms = 200

[[schedule]]
mode = "teleop"
duration_ms = 100
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn bundled_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/tread.toml");
    let config = load_config(&path).unwrap();
    assert_eq!(config.cycle.period_us, 5_000);
    assert_eq!(config.schedule.len(), 2);
    assert_eq!(config.schedule[0].mode, RobotMode::Autonomous);
    assert_eq!(config.hardware.right_motor_id, 1);
    assert_eq!(config.hardware.left_motor_id, 3);
}

#[test]
fn serialized_config_loads_back() {
    let file = write_config(SHORT_MATCH);
    let config = load_config(file.path()).unwrap();

    let text = toml::to_string(&config).unwrap();
    let again = load_config(write_config(&text).path()).unwrap();
    assert_eq!(again.shared.log_level, LogLevel::Debug);
    assert_eq!(again.shared.service_name, "tread-it");
    assert_eq!(again.cycle, config.cycle);
    assert_eq!(again.hardware, config.hardware);
    assert_eq!(again.autonomous, config.autonomous);
    assert_eq!(again.teleop, config.teleop);
    assert_eq!(again.schedule, config.schedule);
}

#[test]
fn invalid_file_is_rejected() {
    let file = write_config("[shared]\nservice_name = \"\"\n");
    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::ValidationError(_))
    ));

    let file = write_config("[shared\nservice_name = 1");
    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn short_match_runs_to_completion() {
    let file = write_config(SHORT_MATCH);
    let config = load_config(file.path()).unwrap();

    let registry = DriverRegistry::with_builtin();
    let mut driver = registry.create_driver(&config.hardware.driver).unwrap();
    driver.init(&config.hardware).unwrap();
    let mut robot = Robot::new(driver, config.autonomous, config.teleop);
    robot.init();

    let mut runner = CycleRunner::new(
        robot,
        config.schedule.clone(),
        config.period(),
        Pacing::Unpaced,
    );
    assert_eq!(runner.run().unwrap(), RunOutcome::Completed);
    assert_eq!(runner.stats().cycle_count, 30);
    assert_eq!(runner.robot().mode(), RobotMode::Disabled);

    let mut robot = runner.into_robot();
    for side in Side::BOTH {
        assert_eq!(robot.driver_mut().actuator(side).command(), 0.0);
    }
    assert!(robot.shutdown().is_ok());
}

#[test]
fn single_phase_schedule() {
    let file = write_config(SHORT_MATCH);
    let mut config = load_config(file.path()).unwrap();
    config.schedule = vec![SchedulePhase::new(RobotMode::Teleop, 35)];

    let registry = DriverRegistry::with_builtin();
    let mut driver = registry.create_driver("simulation").unwrap();
    driver.init(&config.hardware).unwrap();
    let robot = Robot::new(driver, config.autonomous, config.teleop);

    let period = config.period();
    let mut runner = CycleRunner::new(robot, config.schedule, period, Pacing::Unpaced);
    assert_eq!(runner.run().unwrap(), RunOutcome::Completed);
    // 35 ms at 10 ms rounds up to 4 ticks.
    assert_eq!(runner.stats().cycle_count, 4);
}
