//! # Tread Control Unit Library
//!
//! Fixed-period control logic for a two-motor drive base. Each tick runs the
//! controller of exactly one mode:
//!
//! 1. **Disabled**: both outputs held at zero.
//! 2. **Autonomous**: dual-axis bang-bang position seeking with setpoints
//!    that toggle between 0 and the target ([`control::position_seek`]).
//! 3. **Teleop**: differential mixing of the operator stick with per-tick
//!    slew limiting ([`control::slew_drive`]).
//!
//! Controllers are pure: they take the sensor/stick reading plus their own
//! state and return wheel commands. [`robot::Robot`] performs the hardware
//! I/O around them and [`cycle::CycleRunner`] calls it at a fixed period.

pub mod config;
pub mod control;
pub mod cycle;
pub mod robot;
pub mod state;
