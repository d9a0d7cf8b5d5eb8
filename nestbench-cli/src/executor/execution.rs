//! Benchmark Execution
//!
//! Implementations run one after another. For each one the runner times Init,
//! builds a single long-lived instance, then times the reads and finally the
//! writes against that instance, so both reads observe the initial value.

use indicatif::{ProgressBar, ProgressStyle};
use nestbench_core::{
    Bencher, DOT_WRITE_VALUE, Implementation, Instance, KEY_WRITE_VALUE, MeasurementOutcome,
    MeasurementResult, NestedDocument, Operation, TimingConfig, panic_message,
};
use nestbench_report::ReportRow;
use std::panic::{self, AssertUnwindSafe};

/// Configuration for benchmark execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Repetitions and optional deadline per operation
    pub timing: TimingConfig,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

/// Runs the operation matrix
#[derive(Debug)]
pub struct Runner {
    config: ExecutionConfig,
    bencher: Bencher,
}

impl Runner {
    /// Create a runner
    pub fn new(config: ExecutionConfig) -> Self {
        let bencher = Bencher::new(config.timing);
        Self { config, bencher }
    }

    /// Repetitions actually performed per operation
    pub fn iterations(&self) -> u64 {
        self.bencher.iterations()
    }

    /// Measure every implementation, returning rows in input order
    pub fn execute(
        &self,
        implementations: &[&Implementation],
        document: &NestedDocument,
    ) -> Vec<ReportRow> {
        let pb = if self.config.show_progress {
            ProgressBar::new(implementations.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut rows = Vec::with_capacity(implementations.len());
        for implementation in implementations {
            pb.set_message(implementation.name());
            rows.push(self.measure(implementation, document));
            pb.inc(1);
        }

        pb.finish_and_clear();
        rows
    }

    /// Time all five operations for one implementation.
    ///
    /// The returned row always holds exactly one result per operation, in
    /// [`Operation::ALL`] order.
    pub fn measure(&self, implementation: &Implementation, document: &NestedDocument) -> ReportRow {
        let name = implementation.name();
        let mut results = Vec::with_capacity(Operation::ALL.len());

        let init = self.bencher.iter(|| implementation.initialize(document));
        results.push(self.record(name, Operation::Init, init));

        let mut instance = build_instance(implementation, document);
        if let Err(reason) = &instance {
            tracing::debug!(name, %reason, "no instance; access operations unavailable");
        }

        for op in Operation::ALL.into_iter().filter(|op| *op != Operation::Init) {
            let outcome = if !implementation.descriptor().supports(op) {
                MeasurementOutcome::Unsupported
            } else {
                match instance.as_mut() {
                    Ok(instance) => self.time_access(implementation, instance, op),
                    Err(reason) => MeasurementOutcome::failed(reason.clone()),
                }
            };
            results.push(self.record(name, op, outcome));
        }

        let measured = results.iter().filter(|r| r.outcome.is_available()).count();
        tracing::info!(name, measured, "implementation complete");

        ReportRow {
            name: name.to_string(),
            results,
        }
    }

    fn time_access(
        &self,
        implementation: &Implementation,
        instance: &mut Instance,
        op: Operation,
    ) -> MeasurementOutcome {
        match op {
            // Init never touches the long-lived instance
            Operation::Init => MeasurementOutcome::Unsupported,
            Operation::ReadKey => self.bencher.iter(|| implementation.read_key(instance)),
            Operation::ReadDot => self.bencher.iter(|| implementation.read_dot(instance)),
            Operation::WriteKey => self
                .bencher
                .iter(|| implementation.write_key(instance, KEY_WRITE_VALUE)),
            Operation::WriteDot => self
                .bencher
                .iter(|| implementation.write_dot(instance, DOT_WRITE_VALUE)),
        }
    }

    fn record(&self, name: &str, op: Operation, outcome: MeasurementOutcome) -> MeasurementResult {
        match &outcome {
            MeasurementOutcome::Failed { message } => {
                tracing::debug!(name, operation = %op, %message, "measurement failed");
            }
            MeasurementOutcome::TimedOut => {
                tracing::debug!(name, operation = %op, "measurement timed out");
            }
            _ => {}
        }
        MeasurementResult::new(op, outcome)
    }
}

fn build_instance(implementation: &Implementation, document: &NestedDocument) -> Result<Instance, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| implementation.construct(document))) {
        Ok(Ok(instance)) => Ok(instance),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic) => Err(format!(
            "constructor panicked: {}",
            panic_message(panic.as_ref())
        )),
    }
}
