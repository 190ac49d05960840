//! Autonomous dual-axis bang-bang position seeker.
//!
//! Each axis drives at a fixed output toward its setpoint. The setpoint
//! toggles between `target` and 0: it drops to 0 once the position reaches
//! `toggle_fraction * target`, and returns to `target` once the position
//! goes below zero. The result is a continuous low-speed oscillation over
//! `[0, target]` on axis 1 and `[-target, 0]` on the mirrored axis 2.
//!
//! The output decision of a tick always uses the setpoint from *before*
//! that tick's toggle.

use std::cmp::Ordering;

use tracing::debug;
use tread_common::control::config::PositionSeekParams;
use tread_common::hal::types::Side;

use super::{WheelCommand, Wheels};

/// Sign convention of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Positive output moves toward positive counts.
    Direct,
    /// Actuator faces the other way: positions and outputs are negated.
    Mirrored,
}

impl AxisOrientation {
    /// Orientation of the motor on `side`.
    #[inline]
    pub const fn of(side: Side) -> Self {
        match side {
            Side::Right => Self::Direct,
            Side::Left => Self::Mirrored,
        }
    }

    #[inline]
    const fn sign(self) -> f64 {
        match self {
            Self::Direct => 1.0,
            Self::Mirrored => -1.0,
        }
    }

    /// Position expressed in the direct convention.
    #[inline]
    const fn normalize(self, position: i64) -> i64 {
        match self {
            Self::Direct => position,
            Self::Mirrored => position.saturating_neg(),
        }
    }
}

/// Result of one axis evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep {
    /// Output to command this tick.
    pub output: f64,
    /// Setpoint to use on the next tick.
    pub setpoint: i64,
}

/// Evaluate one axis for one tick.
///
/// Output is `+output` below the setpoint, `-output` above it and 0 exactly
/// on it (negated for a mirrored axis). Then the toggle: at or past
/// `toggle_fraction * setpoint` the setpoint becomes 0; otherwise, at or
/// below zero it becomes `target`; otherwise it is kept.
///
/// With a setpoint of 0 the first toggle branch holds for every position
/// `>= 0`, so the flip back to `target` happens only once the position is
/// strictly negative.
pub fn seek_step(
    params: &PositionSeekParams,
    orientation: AxisOrientation,
    position: i64,
    setpoint: i64,
) -> SeekStep {
    let pos = orientation.normalize(position);
    let sign = orientation.sign();

    let output = match pos.cmp(&setpoint) {
        Ordering::Less => sign * params.output,
        Ordering::Greater => -sign * params.output,
        Ordering::Equal => 0.0,
    };

    let setpoint = if pos as f64 >= params.toggle_fraction * setpoint as f64 {
        0
    } else if pos <= 0 {
        params.target
    } else {
        setpoint
    };

    SeekStep { output, setpoint }
}

/// Persistent state of the position seeker, created on autonomous entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSeekState {
    setpoints: Wheels<i64>,
}

impl PositionSeekState {
    /// Fresh state: both setpoints at `target`.
    ///
    /// The caller is responsible for zeroing the position sensors.
    pub fn enter(params: &PositionSeekParams) -> Self {
        Self {
            setpoints: Wheels::splat(params.target),
        }
    }

    /// Current setpoints, in each axis's own convention before mirroring.
    #[inline]
    pub fn setpoints(&self) -> Wheels<i64> {
        self.setpoints
    }

    /// Run one tick on both axes and return the outputs to command.
    pub fn tick(&mut self, params: &PositionSeekParams, positions: Wheels<i64>) -> WheelCommand {
        let steps = positions.map(|side, position| {
            seek_step(
                params,
                AxisOrientation::of(side),
                position,
                self.setpoints.get(side),
            )
        });

        for side in Side::BOTH {
            let (old, new) = (self.setpoints.get(side), steps.get(side).setpoint);
            if old != new {
                debug!(
                    "{side:?} setpoint {old} -> {new} at position {}",
                    positions.get(side)
                );
            }
        }

        self.setpoints = steps.map(|_, step| step.setpoint);
        steps.map(|_, step| step.output)
    }
}
