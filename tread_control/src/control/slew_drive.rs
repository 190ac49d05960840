//! Slew-limited differential drive mixer for teleop.
//!
//! The stick's forward and turn axes are mixed into right/left targets:
//!
//! - right = (forward + turn) * gain
//! - left  = (forward - turn) * -gain
//!
//! The left motor is mounted mirrored, hence the negated gain. Each channel
//! then moves at most `max_step` away from the value commanded on the
//! previous tick. A channel whose target is within `max_step` gets the target
//! exactly.

use tread_common::control::config::DriveMixerParams;
use tread_common::hal::types::StickSample;

use super::{WheelCommand, Wheels};

/// Mix a stick sample into unlimited right/left targets.
#[inline]
pub fn mix(sample: StickSample, gain: f64) -> WheelCommand {
    Wheels {
        right: (sample.forward + sample.turn) * gain,
        left: (sample.forward - sample.turn) * -gain,
    }
}

/// Bound the move from `previous` toward `target` to `max_step`.
#[inline]
pub fn slew_limit(target: f64, previous: f64, max_step: f64) -> f64 {
    let delta = target - previous;
    if delta > max_step {
        previous + max_step
    } else if delta < -max_step {
        previous - max_step
    } else {
        target
    }
}

/// Persistent mixer state: the commands issued on the previous tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveState {
    previous: WheelCommand,
}

impl DriveState {
    /// Fresh state on teleop entry: both channels at rest.
    pub fn enter() -> Self {
        Self {
            previous: WheelCommand::ZERO,
        }
    }

    /// Commands issued on the previous tick.
    #[inline]
    pub fn previous(&self) -> WheelCommand {
        self.previous
    }

    /// Run one tick and return the (possibly limited) commands.
    pub fn tick(&mut self, params: &DriveMixerParams, sample: StickSample) -> WheelCommand {
        let target = mix(sample, params.gain);
        let previous = self.previous;
        let command =
            target.map(|side, t| slew_limit(t, previous.get(side), params.max_step));
        self.previous = command;
        command
    }
}

impl Default for DriveState {
    fn default() -> Self {
        Self::enter()
    }
}
