//! Robot operating mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode selected by the scheduler.
///
/// Exactly one mode is active at a time; each mode owns its controller
/// state exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum RobotMode {
    /// Outputs held at zero.
    #[default]
    Disabled = 0,
    /// Position-seeking oscillation on both axes.
    Autonomous = 1,
    /// Operator drive through the slew-limited mixer.
    Teleop = 2,
}

impl RobotMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 3] = [Self::Disabled, Self::Autonomous, Self::Teleop];

    /// Lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Autonomous => "autonomous",
            Self::Teleop => "teleop",
        }
    }
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_disabled() {
        assert_eq!(RobotMode::default(), RobotMode::Disabled);
    }

    #[test]
    fn serde_names_match_display() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: RobotMode,
        }
        for mode in RobotMode::ALL {
            let parsed: Wrapper = toml::from_str(&format!("mode = \"{mode}\"")).unwrap();
            assert_eq!(parsed.mode, mode);
        }
    }
}
