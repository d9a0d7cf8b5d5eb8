//! Report Data Structures

use chrono::{DateTime, Utc};
use nestbench_core::{MeasurementResult, Operation};
use serde::{Deserialize, Serialize};

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One row per active implementation, in registry order
    pub rows: Vec<ReportRow>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// Compiler the harness was built with
    pub toolchain: String,
    /// When the run started
    pub timestamp: DateTime<Utc>,
    /// Repetitions per operation
    pub iterations: u64,
    /// Per-operation deadline, if any
    pub deadline_seconds: Option<f64>,
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
}

/// Measurements for one implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Implementation display name
    pub name: String,
    /// One result per operation, in [`Operation::ALL`] order
    pub results: Vec<MeasurementResult>,
}

impl ReportRow {
    /// Result for `operation`, if recorded
    pub fn get(&self, operation: Operation) -> Option<&MeasurementResult> {
        self.results.iter().find(|r| r.operation == operation)
    }

    /// Elapsed seconds for `operation`, `None` when unavailable
    pub fn elapsed_seconds(&self, operation: Operation) -> Option<f64> {
        self.get(operation).and_then(MeasurementResult::elapsed_seconds)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures;
    use nestbench_core::Operation;

    #[test]
    fn test_row_lookup() {
        let row = fixtures::row("HashMap", [Some(1.0), Some(2.0), None, Some(3.0), None]);

        assert_eq!(row.elapsed_seconds(Operation::ReadKey), Some(2.0));
        assert_eq!(row.elapsed_seconds(Operation::ReadDot), None);
        assert!(row.get(Operation::WriteDot).is_some());
    }
}
