//! Integration test: autonomous oscillation over the simulation driver.

use std::time::Duration;

use tread_common::consts::SENSOR_PROBE_COUNTS;
use tread_common::control::mode::RobotMode;
use tread_common::hal::config::HardwareConfig;
use tread_control::control::Wheels;
use tread_control::cycle::{CycleRunner, Pacing};

use super::sim_robot;

const PERIOD: Duration = Duration::from_millis(5);

#[test]
fn enter_after_probe_zeroes_sensors() {
    let mut robot = sim_robot(&HardwareConfig::default());
    assert_eq!(robot.init(), SENSOR_PROBE_COUNTS);

    assert!(robot.set_mode(RobotMode::Autonomous).is_ok());
    assert_eq!(robot.positions(), Wheels::splat(0));
    assert_eq!(
        robot.seek_state().map(|s| s.setpoints()),
        Some(Wheels::splat(10_000))
    );
}

#[test]
fn oscillation_stays_bounded_for_a_full_autonomous_period() {
    let mut runner = CycleRunner::new(
        sim_robot(&HardwareConfig::default()),
        Vec::new(),
        PERIOD,
        Pacing::Unpaced,
    );
    runner.robot_mut().set_mode(RobotMode::Autonomous);

    let mut flips_to_zero = 0;
    let mut last_setpoint = 10_000;
    let (mut min_right, mut max_right) = (i64::MAX, i64::MIN);

    // 15 s at 200 Hz.
    for _ in 0..3_000 {
        let report = runner.step();
        let pos = report.positions;
        min_right = min_right.min(pos.right);
        max_right = max_right.max(pos.right);

        for out in [report.commands.right, report.commands.left] {
            assert!(out == 0.1 || out == -0.1 || out == 0.0, "unexpected {out}");
        }

        let setpoint = runner
            .robot()
            .seek_state()
            .map(|s| s.setpoints().right)
            .unwrap();
        assert!(setpoint == 0 || setpoint == 10_000);
        if last_setpoint == 10_000 && setpoint == 0 {
            flips_to_zero += 1;
        }
        last_setpoint = setpoint;
    }

    // Overshoot past the toggle points comes from the motor's deceleration.
    assert!(max_right >= 9_500 && max_right < 10_000, "max {max_right}");
    assert!(min_right < 0 && min_right > -500, "min {min_right}");
    assert!(flips_to_zero >= 10, "only {flips_to_zero} oscillations");
}

#[test]
fn mirrored_axis_tracks_axis_one_in_mirror_image() {
    let mut runner = CycleRunner::new(
        sim_robot(&HardwareConfig::default()),
        Vec::new(),
        PERIOD,
        Pacing::Unpaced,
    );
    runner.robot_mut().set_mode(RobotMode::Autonomous);

    for _ in 0..1_000 {
        let report = runner.step();
        assert_eq!(report.positions.left, -report.positions.right);
        assert_eq!(report.commands.left, -report.commands.right);
    }
}

#[test]
fn reentering_autonomous_restarts_from_zero() {
    let mut runner = CycleRunner::new(
        sim_robot(&HardwareConfig::default()),
        Vec::new(),
        PERIOD,
        Pacing::Unpaced,
    );
    let robot = runner.robot_mut();
    robot.set_mode(RobotMode::Autonomous);
    for _ in 0..100 {
        runner.step();
    }
    assert!(runner.robot_mut().positions().right > 5_000);

    let robot = runner.robot_mut();
    robot.set_mode(RobotMode::Disabled);
    robot.set_mode(RobotMode::Autonomous);
    assert_eq!(robot.positions(), Wheels::splat(0));
    assert_eq!(
        robot.seek_state().map(|s| s.setpoints()),
        Some(Wheels::splat(10_000))
    );
}

#[test]
fn ideal_motor_parks_on_zero_after_first_excursion() {
    // No inertia: the way back retraces the way out count for count, lands
    // exactly on 0 with setpoint 0 and holds there.
    let mut hardware = HardwareConfig::default();
    hardware.simulation.max_acceleration = f64::MAX;
    let mut runner = CycleRunner::new(sim_robot(&hardware), Vec::new(), PERIOD, Pacing::Unpaced);
    runner.robot_mut().set_mode(RobotMode::Autonomous);

    let mut peak = 0;
    let mut last = None;
    for _ in 0..600 {
        let report = runner.step();
        peak = peak.max(report.positions.right);
        last = Some(report);
    }
    let last = last.unwrap();

    assert!(peak >= 9_500);
    assert_eq!(last.positions, Wheels::splat(0));
    assert_eq!(last.commands, Wheels::splat(0.0));
    assert_eq!(
        runner.robot().seek_state().map(|s| s.setpoints()),
        Some(Wheels::splat(0))
    );
}
