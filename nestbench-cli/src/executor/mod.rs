//! Benchmark Executor
//!
//! Drives every active implementation through the fixed operation sequence
//! and turns the outcomes into a report.
//!
//! ```text
//! Registry::activate()
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Init, then reads, then writes on one instance
//! └──────┬──────┘
//!        │  Vec<ReportRow>
//!        ▼
//! ┌─────────────┐
//! │  metadata   │  Toolchain, timestamp, platform
//! └──────┬──────┘
//!        │
//!        ▼
//!      Report
//! ```

mod execution;
mod metadata;

pub use execution::{ExecutionConfig, Runner};
pub use metadata::{build_report, build_report_meta};
