//! Robot: mode dispatch and hardware I/O around the pure controllers.
//!
//! The active controller's state lives in a tagged union, so autonomous and
//! teleop state can never be alive at the same time. Entering a mode builds
//! that mode's state from scratch; leaving it drops the state.

use tracing::{info, trace, warn};
use tread_common::consts::SENSOR_PROBE_COUNTS;
use tread_common::control::config::{DriveMixerParams, PositionSeekParams};
use tread_common::control::mode::RobotMode;
use tread_common::hal::driver::{HalDriver, HalError};
use tread_common::hal::types::Side;

use crate::control::position_seek::PositionSeekState;
use crate::control::slew_drive::DriveState;
use crate::control::{WheelCommand, Wheels};
use crate::state::machine::{ModeMachine, TransitionResult};

/// State owned by the active mode.
#[derive(Debug, Clone)]
enum ActiveController {
    Disabled,
    Autonomous(PositionSeekState),
    Teleop(DriveState),
}

/// What one tick read and commanded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Mode that ran the tick.
    pub mode: RobotMode,
    /// Sensor positions read at the start of the tick.
    pub positions: Wheels<i64>,
    /// Outputs commanded at the end of the tick.
    pub commands: WheelCommand,
}

/// Two-motor drive base.
pub struct Robot {
    driver: Box<dyn HalDriver>,
    machine: ModeMachine,
    controller: ActiveController,
    seek: PositionSeekParams,
    mixer: DriveMixerParams,
}

impl Robot {
    /// Wrap an initialized driver. Starts Disabled.
    pub fn new(
        driver: Box<dyn HalDriver>,
        seek: PositionSeekParams,
        mixer: DriveMixerParams,
    ) -> Self {
        Self {
            driver,
            machine: ModeMachine::new(),
            controller: ActiveController::Disabled,
            seek,
            mixer,
        }
    }

    /// Startup check of the right motor's sensor path.
    ///
    /// Writes [`SENSOR_PROBE_COUNTS`] to the sensor, reads it back and
    /// returns the read-back value; a mismatch is logged, not fatal.
    /// Both outputs are left at zero.
    pub fn init(&mut self) -> i64 {
        self.command(WheelCommand::ZERO);

        let right = self.driver.actuator(Side::Right);
        right.reset_position(SENSOR_PROBE_COUNTS);
        let readback = right.position();
        if readback == SENSOR_PROBE_COUNTS {
            info!("Sensor probe OK: wrote {SENSOR_PROBE_COUNTS}, read {readback}");
        } else {
            warn!("Sensor probe mismatch: wrote {SENSOR_PROBE_COUNTS}, read {readback}");
        }
        readback
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> RobotMode {
        self.machine.mode()
    }

    /// Switch to `mode`, running its entry action.
    ///
    /// - Disabled: outputs to zero.
    /// - Autonomous: both sensors zeroed, both setpoints at target.
    /// - Teleop: slew history zeroed.
    ///
    /// Requesting the active mode is rejected and changes nothing.
    pub fn set_mode(&mut self, mode: RobotMode) -> TransitionResult {
        let result = self.machine.request(mode);
        let TransitionResult::Ok { from, to } = result else {
            return result;
        };

        self.controller = match to {
            RobotMode::Disabled => {
                self.command(WheelCommand::ZERO);
                ActiveController::Disabled
            }
            RobotMode::Autonomous => {
                for side in Side::BOTH {
                    self.driver.actuator(side).reset_position(0);
                }
                ActiveController::Autonomous(PositionSeekState::enter(&self.seek))
            }
            RobotMode::Teleop => ActiveController::Teleop(DriveState::enter()),
        };
        self.driver.mode_changed(to);
        info!("Mode {from} -> {to}");
        result
    }

    /// Run one control tick of the active mode.
    pub fn tick(&mut self) -> TickReport {
        let positions = self.positions();
        let commands = match &mut self.controller {
            ActiveController::Disabled => WheelCommand::ZERO,
            ActiveController::Autonomous(state) => state.tick(&self.seek, positions),
            ActiveController::Teleop(state) => {
                let sample = self.driver.input().sample();
                state.tick(&self.mixer, sample)
            }
        };
        self.command(commands);

        let report = TickReport {
            mode: self.machine.mode(),
            positions,
            commands,
        };
        trace!(
            "{}: pos=({}, {}) cmd=({:.3}, {:.3})",
            report.mode, positions.right, positions.left, commands.right, commands.left
        );
        report
    }

    /// Current sensor positions.
    pub fn positions(&mut self) -> Wheels<i64> {
        Wheels::new(
            self.driver.actuator(Side::Right).position(),
            self.driver.actuator(Side::Left).position(),
        )
    }

    /// Autonomous state, if autonomous is active.
    pub fn seek_state(&self) -> Option<&PositionSeekState> {
        match &self.controller {
            ActiveController::Autonomous(state) => Some(state),
            _ => None,
        }
    }

    /// Teleop state, if teleop is active.
    pub fn drive_state(&self) -> Option<&DriveState> {
        match &self.controller {
            ActiveController::Teleop(state) => Some(state),
            _ => None,
        }
    }

    /// Hardware driver.
    pub fn driver(&self) -> &dyn HalDriver {
        self.driver.as_ref()
    }

    /// Hardware driver, mutably (the cycle runner advances it every tick).
    pub fn driver_mut(&mut self) -> &mut dyn HalDriver {
        self.driver.as_mut()
    }

    /// Disable and shut the driver down.
    pub fn shutdown(mut self) -> Result<(), HalError> {
        if self.mode() != RobotMode::Disabled {
            self.set_mode(RobotMode::Disabled);
        }
        self.driver.shutdown()
    }

    fn command(&mut self, commands: WheelCommand) {
        for side in Side::BOTH {
            self.driver.actuator(side).set_command(commands.get(side));
        }
    }
}
