#![warn(missing_docs)]
//! # nestbench
//!
//! Comparative micro-benchmarks for nested-mapping containers.
//!
//! Every registered container is built from the same three-level document
//! `{level1: {level2: {level3: 100}}}` and timed on five operations:
//! - **Init**: construction from the document
//! - **Read(K)** / **Write(K)**: key-style access, `map["level1"]["level2"]["level3"]`
//! - **Read(D)** / **Write(D)**: dot-style access, `obj.level1.level2.level3`
//!
//! Operations a container does not support, and operations that fail, show
//! up as `N/A` instead of aborting the run.
//!
//! ## Adding a container
//!
//! ```ignore
//! use nestbench::prelude::*;
//!
//! fn construct(doc: &NestedDocument) -> Result<MyMap, AccessError> { /* ... */ }
//! fn read(map: &MyMap) -> Result<i64, AccessError> { /* ... */ }
//! fn write(map: &mut MyMap, value: i64) -> Result<(), AccessError> { /* ... */ }
//!
//! let mut registry = nestbench::default_registry()?;
//! registry.register(
//!     Implementation::builder("MyMap", "MyMap::new(doc)", construct)
//!         .key_access(read, write)
//!         .build(),
//! )?;
//! ```

// Re-export core types
pub use nestbench_core::{
    AccessError, Bencher, DEFAULT_ITERATIONS, DOT_WRITE_VALUE, Implementation,
    ImplementationBuilder, ImplementationDescriptor, Instance, KEY_WRITE_VALUE,
    MeasurementOutcome, MeasurementResult, NestedDocument, Node, Operation, Registry,
    RegistryError, TimingConfig,
};

// Re-export containers
pub use nestbench_containers::{
    BTreeDoc, BTreeValue, DotMap, DotValue, HashDoc, HashValue, Level1, Level2, Typed, baseline,
    default_registry,
};

// Re-export reporting
pub use nestbench_report::{
    NOT_AVAILABLE, OutputFormat, Report, ReportMeta, ReportRow, format_table,
    generate_csv_report, generate_json_report,
};

// Re-export runner
pub use nestbench_cli::{ExecutionConfig, NestConfig, Runner, build_report};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AccessError, Implementation, NestedDocument, Operation, Registry, Runner, TimingConfig,
    };
}

/// Run the nestbench CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     nestbench::run()
/// }
/// ```
pub use nestbench_cli::run;
