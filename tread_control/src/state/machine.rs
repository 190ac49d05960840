//! Robot mode state machine.
//!
//! Disabled ↔ Autonomous ↔ Teleop, every pair reachable. The scheduler
//! requests a mode; a request for the mode already active is rejected so that
//! the mode's `enter` never runs twice in a row.

use tread_common::control::mode::RobotMode;

/// Result of a mode transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition succeeded: previous and new mode.
    Ok {
        /// Mode that was left.
        from: RobotMode,
        /// Mode that is now active.
        to: RobotMode,
    },
    /// Transition rejected: reason.
    Rejected(&'static str),
}

impl TransitionResult {
    /// Whether the transition happened.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Mode manager holding the current mode.
#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    mode: RobotMode,
    transitions: u64,
}

impl ModeMachine {
    /// Create a new machine in Disabled.
    pub const fn new() -> Self {
        Self {
            mode: RobotMode::Disabled,
            transitions: 0,
        }
    }

    /// Current mode.
    #[inline]
    pub const fn mode(&self) -> RobotMode {
        self.mode
    }

    /// Number of successful transitions so far.
    #[inline]
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Attempt to switch to `requested`.
    pub fn request(&mut self, requested: RobotMode) -> TransitionResult {
        if requested == self.mode {
            return TransitionResult::Rejected(already_active_reason(requested));
        }
        let from = self.mode;
        self.mode = requested;
        self.transitions += 1;
        TransitionResult::Ok {
            from,
            to: requested,
        }
    }
}

fn already_active_reason(mode: RobotMode) -> &'static str {
    match mode {
        RobotMode::Disabled => "Disabled: already disabled",
        RobotMode::Autonomous => "Autonomous: already running, enter would reset setpoints",
        RobotMode::Teleop => "Teleop: already running, enter would reset slew state",
    }
}
