//! Controller parameters and the robot mode shared by every crate.

pub mod config;
pub mod mode;
