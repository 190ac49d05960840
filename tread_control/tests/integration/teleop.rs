//! Integration test: teleop drive from the scripted stick.

use std::time::Duration;

use tread_common::control::mode::RobotMode;
use tread_common::hal::config::{HardwareConfig, StickSegment};
use tread_common::hal::types::Side;
use tread_control::control::{WheelCommand, Wheels};
use tread_control::cycle::{CycleRunner, Pacing};

use super::sim_robot;

const PERIOD: Duration = Duration::from_millis(5);

/// Full forward for 100 ms (19 ticks see it), then centered.
fn forward_burst() -> HardwareConfig {
    let mut hardware = HardwareConfig::default();
    hardware.simulation.stick = vec![StickSegment {
        duration_ms: 100,
        forward: 1.0,
        turn: 0.0,
    }];
    hardware
}

fn commands(runner: &mut CycleRunner, ticks: usize) -> Vec<WheelCommand> {
    (0..ticks).map(|_| runner.step().commands).collect()
}

#[test]
fn ramps_up_holds_and_ramps_down() {
    let mut runner = CycleRunner::new(sim_robot(&forward_burst()), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Teleop);

    let cmds = commands(&mut runner, 22);
    assert_eq!(cmds[0], Wheels::new(0.1, -0.1));
    assert_eq!(cmds[1], Wheels::new(0.2, -0.2));
    for cmd in &cmds[2..19] {
        assert_eq!(*cmd, Wheels::new(0.2, -0.2));
    }
    assert_eq!(cmds[19], Wheels::new(0.1, -0.1));
    assert_eq!(cmds[20], WheelCommand::ZERO);
    assert_eq!(cmds[21], WheelCommand::ZERO);
}

#[test]
fn commands_reach_the_motors() {
    let mut runner = CycleRunner::new(sim_robot(&forward_burst()), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Teleop);
    commands(&mut runner, 10);

    let robot = runner.robot_mut();
    assert_eq!(robot.driver_mut().actuator(Side::Right).command(), 0.2);
    assert_eq!(robot.driver_mut().actuator(Side::Left).command(), -0.2);
    // Mirrored mounting: both wheels roll the same way, encoders disagree.
    let positions = robot.positions();
    assert!(positions.right > 0);
    assert!(positions.left < 0);
}

#[test]
fn teleop_after_autonomous_starts_from_rest() {
    let mut runner = CycleRunner::new(sim_robot(&forward_burst()), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Autonomous);
    commands(&mut runner, 50);

    runner.robot_mut().set_mode(RobotMode::Teleop);
    assert_eq!(
        runner.robot().drive_state().map(|s| s.previous()),
        Some(WheelCommand::ZERO)
    );
    let first = runner.step().commands;
    assert_eq!(first, Wheels::new(0.1, -0.1));
}

#[test]
fn reentering_teleop_restarts_script_and_ramp() {
    let mut runner = CycleRunner::new(sim_robot(&forward_burst()), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Teleop);
    commands(&mut runner, 40);
    assert_eq!(runner.robot().drive_state().map(|s| s.previous()), Some(WheelCommand::ZERO));

    runner.robot_mut().set_mode(RobotMode::Disabled);
    runner.robot_mut().set_mode(RobotMode::Teleop);
    let cmds = commands(&mut runner, 2);
    assert_eq!(cmds, vec![Wheels::new(0.1, -0.1), Wheels::new(0.2, -0.2)]);
}

#[test]
fn disabled_between_modes_outputs_zero() {
    let mut runner = CycleRunner::new(sim_robot(&forward_burst()), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Teleop);
    commands(&mut runner, 5);

    runner.robot_mut().set_mode(RobotMode::Disabled);
    for cmd in commands(&mut runner, 5) {
        assert_eq!(cmd, WheelCommand::ZERO);
    }
    let robot = runner.robot_mut();
    assert_eq!(robot.driver_mut().actuator(Side::Right).command(), 0.0);
    assert_eq!(robot.driver_mut().actuator(Side::Left).command(), 0.0);
}
