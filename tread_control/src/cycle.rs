//! Periodic scheduler: runs the configured schedule at a fixed period.
//!
//! For each phase the runner requests the phase's mode (running its entry
//! action), then ticks for the phase's duration. One tick is:
//!
//! 1. `driver.cycle(period)`: hardware (or simulation) advances one period.
//! 2. `robot.tick()`: read sensors, run the active controller, command.
//!
//! The nominal period is passed as `dt` so a simulated run is deterministic
//! regardless of wall-clock jitter. The runner always finishes in Disabled.
//!
//! ## RT Setup (`rt` feature)
//! 1. `mlockall(MCL_CURRENT | MCL_FUTURE)`
//! 2. Prefault stack pages.
//! 3. `sched_setaffinity` to the configured core.
//! 4. `sched_setscheduler(SCHED_FIFO, priority)`.
//!
//! With `rt`, pacing uses `clock_nanosleep(TIMER_ABSTIME)` on
//! `CLOCK_MONOTONIC`; otherwise `std::thread::sleep` toward an absolute
//! deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};
use tread_common::control::mode::RobotMode;
use tread_common::hal::driver::HalError;

use crate::config::SchedulePhase;
use crate::robot::{Robot, TickReport};
use crate::state::machine::TransitionResult;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStats {
    /// Total ticks executed.
    pub cycle_count: u64,
    /// Last tick duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum tick duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum tick duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u64,
    /// Ticks that took longer than the period.
    pub overruns: u64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a tick duration. Returns `true` if it overran `budget_ns`.
    #[inline]
    pub fn record(&mut self, duration_ns: u64, budget_ns: u64) -> bool {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
        let overrun = duration_ns > budget_ns;
        if overrun {
            self.overruns += 1;
        }
        overrun
    }

    /// Average tick time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        self.sum_cycle_ns.checked_div(self.cycle_count).unwrap_or(0)
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors during RT setup, pacing or shutdown.
#[derive(Debug, Error)]
pub enum CycleError {
    /// RT system call failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),

    /// Hardware driver failure.
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),
}

// ─── RT Setup ───────────────────────────────────────────────────────

#[cfg(feature = "rt")]
fn rt_mlockall() -> Result<(), CycleError> {
    use nix::sys::mman::{MlockallFlags, mlockall};
    mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
        .map_err(|e| CycleError::RtSetup(format!("mlockall failed: {e}")))
}

/// Touch stack pages so the first ticks do not page-fault.
#[cfg(feature = "rt")]
fn prefault_stack() {
    let buf = [0xFF_u8; 256 * 1024];
    std::hint::black_box(&buf);
}

#[cfg(feature = "rt")]
fn rt_set_affinity(cpu: usize) -> Result<(), CycleError> {
    use nix::sched::{CpuSet, sched_setaffinity};
    use nix::unistd::Pid;

    let mut cpuset = CpuSet::new();
    cpuset
        .set(cpu)
        .map_err(|e| CycleError::RtSetup(format!("CpuSet::set({cpu}) failed: {e}")))?;
    sched_setaffinity(Pid::from_raw(0), &cpuset)
        .map_err(|e| CycleError::RtSetup(format!("sched_setaffinity failed: {e}")))
}

#[cfg(feature = "rt")]
fn rt_set_scheduler(priority: i32) -> Result<(), CycleError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    // SAFETY: `param` is a valid sched_param for the duration of the call.
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(CycleError::RtSetup(format!(
            "sched_setscheduler(SCHED_FIFO, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

/// Perform the RT setup sequence. Call before [`CycleRunner::run`].
///
/// No-op without the `rt` feature.
#[cfg(feature = "rt")]
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), CycleError> {
    rt_mlockall()?;
    prefault_stack();
    rt_set_affinity(cpu_core)?;
    rt_set_scheduler(rt_priority)?;
    info!("RT setup complete (cpu_core={cpu_core}, priority={rt_priority})");
    Ok(())
}

/// Perform the RT setup sequence. Call before [`CycleRunner::run`].
///
/// No-op without the `rt` feature.
#[cfg(not(feature = "rt"))]
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), CycleError> {
    debug!("RT setup skipped (cpu_core={cpu_core}, priority={rt_priority}): rt feature disabled");
    Ok(())
}

// ─── Pacing ─────────────────────────────────────────────────────────

/// How ticks are spaced in wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep so that ticks start one period apart.
    RealTime,
    /// Run ticks back to back (simulation, tests).
    Unpaced,
}

#[cfg(feature = "rt")]
struct Pacer {
    next_wake: nix::sys::time::TimeSpec,
    period_ns: i64,
}

#[cfg(feature = "rt")]
impl Pacer {
    fn start(period: Duration) -> Result<Self, CycleError> {
        use nix::time::{ClockId, clock_gettime};
        let next_wake = clock_gettime(ClockId::CLOCK_MONOTONIC)
            .map_err(|e| CycleError::RtSetup(format!("clock_gettime: {e}")))?;
        Ok(Self {
            next_wake,
            period_ns: i64::try_from(period.as_nanos()).unwrap_or(i64::MAX),
        })
    }

    fn wait(&mut self) -> Result<(), CycleError> {
        use nix::time::{ClockId, ClockNanosleepFlags, clock_nanosleep};
        self.next_wake = timespec_add_ns(self.next_wake, self.period_ns);
        clock_nanosleep(
            ClockId::CLOCK_MONOTONIC,
            ClockNanosleepFlags::TIMER_ABSTIME,
            &self.next_wake,
        )
        .map_err(|e| CycleError::RtSetup(format!("clock_nanosleep: {e}")))?;
        Ok(())
    }
}

/// Add nanoseconds to a TimeSpec.
#[cfg(feature = "rt")]
fn timespec_add_ns(ts: nix::sys::time::TimeSpec, ns: i64) -> nix::sys::time::TimeSpec {
    let mut secs = ts.tv_sec();
    let mut nanos = ts.tv_nsec() + ns;
    while nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    nix::sys::time::TimeSpec::new(secs, nanos)
}

#[cfg(not(feature = "rt"))]
struct Pacer {
    next_wake: Instant,
    period: Duration,
}

#[cfg(not(feature = "rt"))]
impl Pacer {
    fn start(period: Duration) -> Result<Self, CycleError> {
        Ok(Self {
            next_wake: Instant::now(),
            period,
        })
    }

    fn wait(&mut self) -> Result<(), CycleError> {
        self.next_wake += self.period;
        let now = Instant::now();
        match self.next_wake.checked_duration_since(now) {
            Some(remaining) => std::thread::sleep(remaining),
            // More than a period behind: resynchronize instead of bursting.
            None if now - self.next_wake > self.period => self.next_wake = now,
            None => {}
        }
        Ok(())
    }
}

/// Number of ticks covering `duration` at `period`, rounded up.
pub fn phase_ticks(duration: Duration, period: Duration) -> u64 {
    let period_ns = period.as_nanos().max(1);
    let ticks = duration.as_nanos().div_ceil(period_ns);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every phase ran to its end.
    Completed,
    /// The running flag was cleared.
    Interrupted,
}

/// The periodic scheduler.
pub struct CycleRunner {
    robot: Robot,
    schedule: Vec<SchedulePhase>,
    period: Duration,
    budget_ns: u64,
    pacing: Pacing,
    running: Arc<AtomicBool>,
    stats: CycleStats,
}

impl CycleRunner {
    /// Create a runner over `robot` for the given schedule and period.
    pub fn new(
        robot: Robot,
        schedule: Vec<SchedulePhase>,
        period: Duration,
        pacing: Pacing,
    ) -> Self {
        Self {
            robot,
            schedule,
            period,
            budget_ns: u64::try_from(period.as_nanos()).unwrap_or(u64::MAX),
            pacing,
            running: Arc::new(AtomicBool::new(true)),
            stats: CycleStats::new(),
        }
    }

    /// Shared flag; clearing it stops [`run`](Self::run) before the next tick.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Control period.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Timing statistics so far.
    #[inline]
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// The robot being driven.
    #[inline]
    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// The robot being driven, mutably.
    #[inline]
    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    /// Execute one tick: advance hardware by one period, then run the robot.
    pub fn step(&mut self) -> TickReport {
        let start = Instant::now();
        self.robot.driver_mut().cycle(self.period);
        let report = self.robot.tick();
        let elapsed_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        if self.stats.record(elapsed_ns, self.budget_ns) {
            warn!(
                "Cycle overrun #{}: {}ns > {}ns budget",
                self.stats.overruns, elapsed_ns, self.budget_ns
            );
        }
        report
    }

    /// Run every phase of the schedule, then disable.
    pub fn run(&mut self) -> Result<RunOutcome, CycleError> {
        let mut pacer = match self.pacing {
            Pacing::RealTime => Some(Pacer::start(self.period)?),
            Pacing::Unpaced => None,
        };
        let phase_count = self.schedule.len();
        let mut outcome = RunOutcome::Completed;

        'phases: for idx in 0..phase_count {
            let phase = self.schedule[idx];
            if !self.running.load(Ordering::SeqCst) {
                outcome = RunOutcome::Interrupted;
                break;
            }

            if let TransitionResult::Rejected(reason) = self.robot.set_mode(phase.mode) {
                debug!("Phase {} keeps current mode: {reason}", idx + 1);
            }
            let ticks = phase_ticks(phase.duration(), self.period);
            info!(
                "Phase {}/{}: {} for {} ms ({} ticks)",
                idx + 1,
                phase_count,
                phase.mode,
                phase.duration_ms,
                ticks
            );

            for _ in 0..ticks {
                if !self.running.load(Ordering::SeqCst) {
                    outcome = RunOutcome::Interrupted;
                    break 'phases;
                }
                self.step();
                if let Some(pacer) = pacer.as_mut() {
                    pacer.wait()?;
                }
            }
        }

        if self.robot.mode() != RobotMode::Disabled {
            self.robot.set_mode(RobotMode::Disabled);
        }
        Ok(outcome)
    }

    /// Take the robot back, e.g. to shut it down.
    pub fn into_robot(self) -> Robot {
        self.robot
    }
}
