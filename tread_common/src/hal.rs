//! Hardware abstraction traits, value types and configuration.
//!
//! The control core only ever talks to hardware through the [`driver`]
//! traits; concrete drivers live in `tread_hal`.

pub mod config;
pub mod driver;
pub mod types;
