#![warn(missing_docs)]
//! nestbench Core - Harness Runtime
//!
//! This crate provides the pieces every benchmark run is built from:
//! - `NestedDocument`, the fixed three-level input shared by all containers
//! - `Registry` / `Implementation`, the capability matrix with typed operations
//! - `Bencher`, the fixed-repetition timing primitive that never propagates failures
//! - `Operation` / `MeasurementResult`, the per-cell result model

mod bencher;
mod document;
mod measurement;
mod registry;

pub use bencher::{Bencher, DEFAULT_ITERATIONS, TimingConfig, panic_message};
pub use document::{NestedDocument, Node};
pub use measurement::{MeasurementOutcome, MeasurementResult, Operation};
pub use registry::{
    AccessError, Implementation, ImplementationBuilder, ImplementationDescriptor, Instance,
    Registry, RegistryError,
};

/// Value written by the key-style write operation.
pub const KEY_WRITE_VALUE: i64 = 200;

/// Value written by the dot-style write operation.
pub const DOT_WRITE_VALUE: i64 = 300;
