//! Property tests of the teleop mixer over arbitrary stick sequences.

use proptest::prelude::*;
use tread_common::control::config::DriveMixerParams;
use tread_common::hal::types::StickSample;
use tread_control::control::WheelCommand;
use tread_control::control::slew_drive::{DriveState, mix};

const EPS: f64 = 1e-9;

fn stick() -> impl Strategy<Value = StickSample> {
    (-1.0..=1.0_f64, -1.0..=1.0_f64).prop_map(|(forward, turn)| StickSample::new(forward, turn))
}

fn params() -> impl Strategy<Value = DriveMixerParams> {
    (0.01..=1.0_f64, 0.01..=0.5_f64).prop_map(|(gain, max_step)| DriveMixerParams { gain, max_step })
}

proptest! {
    #[test]
    fn per_tick_change_never_exceeds_max_step(
        samples in prop::collection::vec(stick(), 1..200),
    ) {
        let p = DriveMixerParams::default();
        let mut state = DriveState::enter();
        let mut prev = WheelCommand::ZERO;
        for sample in samples {
            let cmd = state.tick(&p, sample);
            prop_assert!((cmd.right - prev.right).abs() <= p.max_step + EPS);
            prop_assert!((cmd.left - prev.left).abs() <= p.max_step + EPS);
            prev = cmd;
        }
    }

    #[test]
    fn slew_bound_holds_for_any_tuning(
        p in params(),
        samples in prop::collection::vec(stick(), 1..100),
    ) {
        let mut state = DriveState::enter();
        let mut prev = WheelCommand::ZERO;
        for sample in samples {
            let cmd = state.tick(&p, sample);
            prop_assert!((cmd.right - prev.right).abs() <= p.max_step + EPS);
            prop_assert!((cmd.left - prev.left).abs() <= p.max_step + EPS);
            prop_assert!(cmd.right.abs() <= 2.0 * p.gain + EPS);
            prop_assert!(cmd.left.abs() <= 2.0 * p.gain + EPS);
            prev = cmd;
        }
    }

    #[test]
    fn small_moves_reach_target_exactly(
        samples in prop::collection::vec(stick(), 1..100),
    ) {
        let p = DriveMixerParams::default();
        let mut state = DriveState::enter();
        for sample in samples {
            let prev = state.previous();
            let target = mix(sample, p.gain);
            let cmd = state.tick(&p, sample);
            if (target.right - prev.right).abs() <= p.max_step {
                prop_assert_eq!(cmd.right, target.right);
            }
            if (target.left - prev.left).abs() <= p.max_step {
                prop_assert_eq!(cmd.left, target.left);
            }
        }
    }

    #[test]
    fn held_stick_settles_on_target(sample in stick()) {
        let p = DriveMixerParams::default();
        let mut state = DriveState::enter();
        // |target| <= 0.4, so five steps of 0.1 always suffice.
        let mut cmd = WheelCommand::ZERO;
        for _ in 0..5 {
            cmd = state.tick(&p, sample);
        }
        prop_assert_eq!(cmd, mix(sample, p.gain));
    }
}
