//! Run Metadata Collection

use chrono::Utc;
use nestbench_core::TimingConfig;
use nestbench_report::{Report, ReportMeta, ReportRow};

/// Compiler version captured at build time
fn toolchain() -> &'static str {
    option_env!("NESTBENCH_RUSTC_VERSION").unwrap_or("unknown")
}

/// Build report metadata for a run with `timing`
pub fn build_report_meta(timing: &TimingConfig) -> ReportMeta {
    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        toolchain: toolchain().to_string(),
        timestamp: Utc::now(),
        iterations: timing.iterations,
        deadline_seconds: timing.deadline.map(|d| d.as_secs_f64()),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

/// Assemble the final report
pub fn build_report(rows: Vec<ReportRow>, timing: &TimingConfig) -> Report {
    Report {
        meta: build_report_meta(timing),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_meta_records_timing() {
        let timing = TimingConfig::new(42).with_deadline(Duration::from_millis(250));
        let meta = build_report_meta(&timing);

        assert_eq!(meta.iterations, 42);
        assert_eq!(meta.deadline_seconds, Some(0.25));
        assert_eq!(meta.os, std::env::consts::OS);
        assert!(!meta.toolchain.is_empty());
    }
}
