//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `HalDriver` trait with two
//! [`SimulatedMotor`]s and a [`ScriptedJoystick`]. The stick script restarts
//! every time teleop is entered, so a scripted operator always starts driving
//! at the beginning of the teleop period.

use super::joystick::ScriptedJoystick;
use super::motor::SimulatedMotor;
use std::time::Duration;
use tracing::{debug, info};
use tread_common::consts::{
    DEFAULT_COUNTS_PER_SECOND, DEFAULT_LEFT_MOTOR_ID, DEFAULT_MAX_ACCELERATION,
    DEFAULT_RIGHT_MOTOR_ID,
};
use tread_common::control::mode::RobotMode;
use tread_common::hal::config::HardwareConfig;
use tread_common::hal::driver::{Actuator, HalDriver, HalError, InputDevice};
use tread_common::hal::types::Side;

/// Simulation driver implementing the HalDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Initialized flag
    initialized: bool,
    /// Right (axis 1) motor
    right: SimulatedMotor,
    /// Left (axis 2) motor
    left: SimulatedMotor,
    /// Operator stick
    stick: ScriptedJoystick,
    /// Total simulated time
    sim_time: Duration,
}

impl SimulationDriver {
    /// Create a new simulation driver with default wiring and no stick script.
    pub fn new() -> Self {
        Self {
            name: super::DRIVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
            initialized: false,
            right: SimulatedMotor::new(
                DEFAULT_RIGHT_MOTOR_ID,
                DEFAULT_COUNTS_PER_SECOND,
                DEFAULT_MAX_ACCELERATION,
            ),
            left: SimulatedMotor::new(
                DEFAULT_LEFT_MOTOR_ID,
                DEFAULT_COUNTS_PER_SECOND,
                DEFAULT_MAX_ACCELERATION,
            ),
            stick: ScriptedJoystick::default(),
            sim_time: Duration::ZERO,
        }
    }

    /// Whether `init()` has completed and `shutdown()` has not.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Total simulated time since `init()`.
    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    /// Motor simulator on the given side.
    pub fn motor(&self, side: Side) -> &SimulatedMotor {
        match side {
            Side::Right => &self.right,
            Side::Left => &self.left,
        }
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HalDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, config: &HardwareConfig) -> Result<(), HalError> {
        config
            .validate()
            .map_err(|e| HalError::ConfigError(e.to_string()))?;

        let sim = &config.simulation;
        info!(
            "Initializing simulation driver: right motor {}, left motor {}, stick port {}, {:.0} counts/s, {:.0} counts/s², {} stick segments",
            config.right_motor_id,
            config.left_motor_id,
            config.joystick_port,
            sim.counts_per_second,
            sim.max_acceleration,
            sim.stick.len()
        );

        self.right = SimulatedMotor::new(
            config.right_motor_id,
            sim.counts_per_second,
            sim.max_acceleration,
        );
        self.left = SimulatedMotor::new(
            config.left_motor_id,
            sim.counts_per_second,
            sim.max_acceleration,
        );
        self.stick = ScriptedJoystick::new(sim.stick.clone());
        self.sim_time = Duration::ZERO;
        self.initialized = true;
        Ok(())
    }

    fn cycle(&mut self, dt: Duration) {
        self.right.advance(dt);
        self.left.advance(dt);
        self.stick.advance(dt);
        self.sim_time += dt;
    }

    fn actuator(&mut self, side: Side) -> &mut dyn Actuator {
        match side {
            Side::Right => &mut self.right,
            Side::Left => &mut self.left,
        }
    }

    fn input(&self) -> &dyn InputDevice {
        &self.stick
    }

    fn mode_changed(&mut self, mode: RobotMode) {
        if mode == RobotMode::Teleop {
            debug!("Teleop entered, restarting stick script");
            self.stick.restart();
        }
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        info!(
            "Shutting down simulation driver after {:.3}s simulated (right={}, left={})",
            self.sim_time.as_secs_f64(),
            self.right.position(),
            self.left.position()
        );
        self.right.set_command(0.0);
        self.left.set_command(0.0);
        self.initialized = false;
        Ok(())
    }
}
