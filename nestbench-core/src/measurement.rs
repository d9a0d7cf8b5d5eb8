//! Measurement Model
//!
//! One `MeasurementResult` per (implementation, operation) cell. Anything other
//! than `Measured` renders as "N/A" in reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Benchmarked operation, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Construct a container from the fixed document
    Init,
    /// Nested read through key-style access
    ReadKey,
    /// Nested read through dot-style access
    ReadDot,
    /// Nested write through key-style access
    WriteKey,
    /// Nested write through dot-style access
    WriteDot,
}

impl Operation {
    /// All operations in the fixed evaluation order.
    pub const ALL: [Operation; 5] = [
        Operation::Init,
        Operation::ReadKey,
        Operation::ReadDot,
        Operation::WriteKey,
        Operation::WriteDot,
    ];

    /// Column label used in table output
    pub fn label(self) -> &'static str {
        match self {
            Operation::Init => "Init",
            Operation::ReadKey => "Read(K)",
            Operation::ReadDot => "Read(D)",
            Operation::WriteKey => "Write(K)",
            Operation::WriteDot => "Write(D)",
        }
    }

    /// Whether the operation goes through key-style access
    pub fn is_key(self) -> bool {
        matches!(self, Operation::ReadKey | Operation::WriteKey)
    }

    /// Whether the operation goes through dot-style access
    pub fn is_dot(self) -> bool {
        matches!(self, Operation::ReadDot | Operation::WriteDot)
    }

    /// Whether the operation mutates the shared instance
    pub fn is_write(self) -> bool {
        matches!(self, Operation::WriteKey | Operation::WriteDot)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of timing one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeasurementOutcome {
    /// Total wall-clock time for all repetitions
    Measured {
        /// Elapsed seconds
        elapsed_seconds: f64,
    },
    /// The implementation does not declare the capability
    Unsupported,
    /// The operation returned an error or panicked
    Failed {
        /// Error or panic message
        message: String,
    },
    /// The per-operation deadline expired
    TimedOut,
}

impl MeasurementOutcome {
    /// Build a measured outcome from a duration
    pub fn measured(elapsed: Duration) -> Self {
        MeasurementOutcome::Measured {
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    /// Build a failed outcome
    pub fn failed(message: impl Into<String>) -> Self {
        MeasurementOutcome::Failed {
            message: message.into(),
        }
    }

    /// Elapsed seconds, or `None` when the measurement is unavailable
    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self {
            MeasurementOutcome::Measured { elapsed_seconds } => Some(*elapsed_seconds),
            _ => None,
        }
    }

    /// Whether a timing was recorded
    pub fn is_available(&self) -> bool {
        self.elapsed_seconds().is_some()
    }
}

/// A single cell of the result matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Which operation was timed
    pub operation: Operation,
    /// What happened
    #[serde(flatten)]
    pub outcome: MeasurementOutcome,
}

impl MeasurementResult {
    /// Pair an operation with its outcome
    pub fn new(operation: Operation, outcome: MeasurementOutcome) -> Self {
        Self { operation, outcome }
    }

    /// Elapsed seconds, or `None` for N/A
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.outcome.elapsed_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_order() {
        let labels: Vec<_> = Operation::ALL.iter().map(|op| op.label()).collect();
        assert_eq!(labels, ["Init", "Read(K)", "Read(D)", "Write(K)", "Write(D)"]);
    }

    #[test]
    fn test_capability_partition() {
        for op in Operation::ALL {
            let families = [op == Operation::Init, op.is_key(), op.is_dot()];
            assert_eq!(families.iter().filter(|f| **f).count(), 1, "{op}");
        }
    }

    #[test]
    fn test_unavailable_outcomes_have_no_elapsed() {
        assert_eq!(MeasurementOutcome::Unsupported.elapsed_seconds(), None);
        assert_eq!(MeasurementOutcome::TimedOut.elapsed_seconds(), None);
        assert_eq!(MeasurementOutcome::failed("boom").elapsed_seconds(), None);

        let measured = MeasurementOutcome::measured(Duration::from_millis(1500));
        assert_eq!(measured.elapsed_seconds(), Some(1.5));
    }
}
