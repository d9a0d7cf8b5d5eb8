//! Bencher - The Timing Primitive
//!
//! Runs an operation a fixed number of times and reports the total wall-clock
//! time. Errors returned by the operation and panics raised inside it are
//! converted to an unavailable outcome, so one misbehaving container cannot
//! abort the run.

use crate::measurement::MeasurementOutcome;
use std::any::Any;
use std::fmt::Display;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Default repetition count per operation
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Deadline is checked once every 1024 iterations.
const DEADLINE_POLL_MASK: u64 = 0x3FF;

/// Repetition settings shared by every operation in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Number of repetitions per operation
    pub iterations: u64,
    /// Optional wall-clock budget per operation
    pub deadline: Option<Duration>,
}

impl TimingConfig {
    /// Fixed repetition count, no deadline
    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            deadline: None,
        }
    }

    /// Attach a per-operation deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Text carried by a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Fixed-repetition timer.
///
/// Unlike a sampling benchmark loop there is no warmup and no statistics:
/// every call returns one total elapsed time for exactly `iterations` runs.
#[derive(Debug, Clone)]
pub struct Bencher {
    config: TimingConfig,
}

impl Bencher {
    /// Create a Bencher; an iteration count of zero is clamped to one
    pub fn new(config: TimingConfig) -> Self {
        Self {
            config: TimingConfig {
                iterations: config.iterations.max(1),
                ..config
            },
        }
    }

    /// Repetitions performed by each call
    pub fn iterations(&self) -> u64 {
        self.config.iterations
    }

    /// Time `routine` with no setup.
    #[inline]
    pub fn iter<T, E, F>(&self, mut routine: F) -> MeasurementOutcome
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
    {
        self.iter_with_setup(|| Ok::<_, E>(()), |_| routine())
    }

    /// Run `setup` once (not timed), then time `routine` against its output.
    ///
    /// The setup value is the binding context the routine operates on, e.g.
    /// a live container instance.
    pub fn iter_with_setup<I, T, E, S, F>(&self, setup: S, mut routine: F) -> MeasurementOutcome
    where
        E: Display,
        S: FnOnce() -> Result<I, E>,
        F: FnMut(&mut I) -> Result<T, E>,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut input = match setup() {
                Ok(input) => input,
                Err(e) => return MeasurementOutcome::failed(format!("setup failed: {}", e)),
            };
            self.run_timed(&mut input, &mut routine)
        }));

        match result {
            Ok(outcome) => outcome,
            Err(panic) => {
                MeasurementOutcome::failed(format!("panicked: {}", panic_message(panic.as_ref())))
            }
        }
    }

    fn run_timed<I, T, E, F>(&self, input: &mut I, routine: &mut F) -> MeasurementOutcome
    where
        E: Display,
        F: FnMut(&mut I) -> Result<T, E>,
    {
        let start = Instant::now();

        for i in 0..self.config.iterations {
            match routine(black_box(&mut *input)) {
                Ok(value) => {
                    black_box(value);
                }
                Err(e) => return MeasurementOutcome::failed(e.to_string()),
            }

            if i & DEADLINE_POLL_MASK == 0 && self.past_deadline(start.elapsed()) {
                return MeasurementOutcome::TimedOut;
            }
        }

        let elapsed = start.elapsed();
        if self.past_deadline(elapsed) {
            return MeasurementOutcome::TimedOut;
        }
        MeasurementOutcome::measured(elapsed)
    }

    fn past_deadline(&self, elapsed: Duration) -> bool {
        self.config.deadline.is_some_and(|deadline| elapsed > deadline)
    }
}
