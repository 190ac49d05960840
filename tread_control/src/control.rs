//! Control engine root.
//!
//! Both controllers are pure functions of (reading, own state) and return a
//! [`Wheels`] pair of commands. Hardware access stays in [`crate::robot`].

pub mod position_seek;
pub mod slew_drive;

use tread_common::hal::types::Side;

/// A value per drive side. Right is axis 1, left is axis 2 (mirrored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wheels<T> {
    /// Right / axis 1.
    pub right: T,
    /// Left / axis 2.
    pub left: T,
}

impl<T: Copy> Wheels<T> {
    /// Pair from explicit values.
    #[inline]
    pub const fn new(right: T, left: T) -> Self {
        Self { right, left }
    }

    /// Same value on both sides.
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self {
            right: value,
            left: value,
        }
    }

    /// Value for `side`.
    #[inline]
    pub fn get(&self, side: Side) -> T {
        match side {
            Side::Right => self.right,
            Side::Left => self.left,
        }
    }

    /// Apply `f` to both sides.
    #[inline]
    pub fn map<U: Copy>(self, mut f: impl FnMut(Side, T) -> U) -> Wheels<U> {
        Wheels {
            right: f(Side::Right, self.right),
            left: f(Side::Left, self.left),
        }
    }
}

/// Commanded outputs, one per motor.
pub type WheelCommand = Wheels<f64>;

impl WheelCommand {
    /// Both motors stopped.
    pub const ZERO: Self = Self::splat(0.0);
}
