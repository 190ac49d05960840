//! Scripted operator joystick.
//!
//! Plays a list of [`StickSegment`]s in order, each held for its duration,
//! then returns to center for good.

use std::time::Duration;
use tracing::debug;
use tread_common::hal::config::StickSegment;
use tread_common::hal::driver::InputDevice;
use tread_common::hal::types::StickSample;

/// Joystick replaying a fixed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedJoystick {
    segments: Vec<StickSegment>,
    /// Index of the segment being held; `segments.len()` once finished.
    index: usize,
    /// Time spent in the current segment.
    elapsed: Duration,
    current: StickSample,
}

impl ScriptedJoystick {
    /// Create a joystick positioned at the start of `segments`.
    pub fn new(segments: Vec<StickSegment>) -> Self {
        let mut stick = Self {
            segments,
            ..Default::default()
        };
        stick.restart();
        stick
    }

    /// Rewind to the first segment.
    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
        self.skip_finished();
    }

    /// Whether every segment has been played.
    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }

    /// Advance the script clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt;
        let before = self.index;
        self.skip_finished();
        if self.index != before {
            debug!(
                "Stick script at segment {}/{}: {:?}",
                self.index,
                self.segments.len(),
                self.current
            );
        }
    }

    /// Move past every segment whose duration has fully elapsed.
    fn skip_finished(&mut self) {
        while let Some(segment) = self.segments.get(self.index) {
            let hold = Duration::from_millis(segment.duration_ms);
            if self.elapsed < hold {
                break;
            }
            self.elapsed -= hold;
            self.index += 1;
        }
        self.current = self
            .segments
            .get(self.index)
            .map(|s| StickSample::new(s.forward, s.turn))
            .unwrap_or(StickSample::CENTER);
    }
}

impl InputDevice for ScriptedJoystick {
    fn forward_axis(&self) -> f64 {
        self.current.forward
    }

    fn turn_axis(&self) -> f64 {
        self.current.turn
    }
}
