//! Mode state machine root.
//!
//! The scheduler selects one of `{Disabled, Autonomous, Teleop}`; the
//! machine decides whether that request is a real transition.

pub mod machine;
