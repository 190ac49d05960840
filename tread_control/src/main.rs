//! # Tread Control Unit
//!
//! Loads the control unit TOML, creates the configured HAL driver, runs the
//! sensor probe and then plays the schedule (a match by default) at the
//! configured period. Ctrl-C stops the run, disables the robot and shuts the
//! driver down.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tread_common::config::LogLevel;
use tread_common::consts::DEFAULT_CONFIG_PATH;
use tread_common::control::mode::RobotMode;
use tread_control::config::{
    AUTONOMOUS_PERIOD_MS, ControlUnitConfig, SchedulePhase, TELEOP_PERIOD_MS, load_config,
};
use tread_control::cycle::{CycleRunner, Pacing, RunOutcome, rt_setup};
use tread_control::robot::Robot;
use tread_hal::DriverRegistry;

/// Tread Control Unit: periodic two-motor drive control
#[derive(Parser, Debug)]
#[command(name = "tread_control")]
#[command(version)]
#[command(about = "Fixed-period drive controller: autonomous position seeking and teleop")]
struct Args {
    /// Path to the control unit configuration TOML.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Run a single mode instead of the configured schedule.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Length of the `--mode` phase [ms] (default: the mode's match period).
    #[arg(long, requires = "mode")]
    duration_ms: Option<u64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Autonomous,
    Teleop,
}

impl ModeArg {
    fn phase(self, duration_ms: Option<u64>) -> SchedulePhase {
        let (mode, default_ms) = match self {
            Self::Autonomous => (RobotMode::Autonomous, AUTONOMOUS_PERIOD_MS),
            Self::Teleop => (RobotMode::Teleop, TELEOP_PERIOD_MS),
        };
        SchedulePhase::new(mode, duration_ms.unwrap_or(default_ms))
    }
}

fn main() {
    let args = Args::parse();
    let loaded = load_config(&args.config);

    let log_level = match &loaded {
        Ok(config) => config.shared.log_level,
        Err(_) => LogLevel::Info,
    };
    setup_tracing(&args, log_level);

    info!("Tread Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Tread Control Unit shutdown complete");
}

fn run(args: &Args, mut config: ControlUnitConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(mode) = args.mode {
        let phase = mode.phase(args.duration_ms);
        if phase.duration_ms == 0 {
            return Err("--duration-ms must be greater than zero".into());
        }
        config.schedule = vec![phase];
    }

    info!(
        "Config OK: service={}, period={}µs, driver={}, {} phase(s) / {:.1}s",
        config.shared.service_name,
        config.cycle.period_us,
        config.hardware.driver,
        config.schedule.len(),
        config.schedule_duration().as_secs_f64(),
    );

    // HAL driver from the registry.
    let registry = DriverRegistry::with_builtin();
    let mut driver = registry.create_driver(&config.hardware.driver)?;
    driver.init(&config.hardware)?;
    info!("Driver '{}' v{} initialized", driver.name(), driver.version());

    let mut robot = Robot::new(driver, config.autonomous, config.teleop);
    robot.init();

    rt_setup(config.cycle.cpu_core, config.cycle.rt_priority)?;

    let mut runner = CycleRunner::new(
        robot,
        config.schedule.clone(),
        config.period(),
        Pacing::RealTime,
    );

    // Setup signal handler for graceful shutdown.
    let running = runner.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    info!("Entering control loop");
    let outcome = runner.run()?;
    match outcome {
        RunOutcome::Completed => info!("Schedule completed"),
        RunOutcome::Interrupted => info!("Schedule interrupted"),
    }

    let stats = runner.stats();
    info!(
        "Cycle stats: {} ticks, min={}ns avg={}ns max={}ns, {} overruns",
        stats.cycle_count,
        if stats.cycle_count == 0 { 0 } else { stats.min_cycle_ns },
        stats.avg_cycle_ns(),
        stats.max_cycle_ns,
        stats.overruns
    );

    runner.into_robot().shutdown()?;
    Ok(())
}

/// Effective log level: `-v` raises anything quieter than debug to debug.
fn effective_level(verbose: bool, configured: LogLevel) -> LogLevel {
    if verbose && configured > LogLevel::Debug {
        LogLevel::Debug
    } else {
        configured
    }
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
///
/// `RUST_LOG` directives take precedence over the computed level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = effective_level(args.verbose, log_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
