//! Integration tests for nestbench
//!
//! End-to-end behavior of registry, runner and report formatting.

use nestbench::{
    AccessError, ExecutionConfig, Implementation, MeasurementOutcome, NestedDocument,
    NOT_AVAILABLE, Operation, Registry, ReportRow, Runner, TimingConfig, build_report,
    baseline, default_registry, format_table,
};
use std::sync::atomic::{AtomicI64, Ordering};

fn runner(iterations: u64) -> Runner {
    Runner::new(ExecutionConfig {
        timing: TimingConfig::new(iterations),
        show_progress: false,
    })
}

fn run_registry(registry: &Registry, iterations: u64) -> Vec<ReportRow> {
    let active = registry.activate();
    runner(iterations).execute(&active, &NestedDocument::fixed())
}

/// Availability of each cell, in operation order
fn pattern(row: &ReportRow) -> Vec<bool> {
    row.results.iter().map(|r| r.outcome.is_available()).collect()
}

fn table_cells(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

#[test]
fn test_every_row_has_five_ordered_results() {
    let rows = run_registry(&default_registry().unwrap(), 10);

    assert!(!rows.is_empty());
    for row in &rows {
        let ops: Vec<_> = row.results.iter().map(|r| r.operation).collect();
        assert_eq!(ops, Operation::ALL, "{}", row.name);
    }
}

#[test]
fn test_capabilities_decide_na_cells() {
    let registry = default_registry().unwrap();
    let rows = run_registry(&registry, 10);

    for row in &rows {
        let descriptor = registry.capabilities(&row.name).unwrap();
        for result in &row.results {
            if !descriptor.supports(result.operation) {
                assert_eq!(result.outcome, MeasurementOutcome::Unsupported, "{}", row.name);
            } else {
                assert!(result.outcome.is_available(), "{} {}", row.name, result.operation);
            }
        }
    }
}

#[test]
fn test_key_only_container_reports_na_for_dot() {
    let rows = run_registry(&default_registry().unwrap(), 10);
    let hashmap = rows.iter().find(|r| r.name == "HashMap").unwrap();

    assert_eq!(pattern(hashmap), [true, true, false, true, false]);
}

#[test]
fn test_dot_only_container_reports_na_for_key() {
    let rows = run_registry(&default_registry().unwrap(), 10);
    let typed = rows.iter().find(|r| r.name == "Typed").unwrap();

    assert_eq!(pattern(typed), [true, false, true, false, true]);
}

#[test]
fn test_runs_are_structurally_idempotent() {
    let registry = default_registry().unwrap();
    let first = run_registry(&registry, 5);
    let second = run_registry(&registry, 5);

    let shape = |rows: &[ReportRow]| -> Vec<(String, Vec<bool>)> {
        rows.iter().map(|r| (r.name.clone(), pattern(r))).collect()
    };
    assert_eq!(shape(&first), shape(&second));
}

#[test]
fn test_hashmap_only_table() {
    let mut registry = Registry::new();
    registry.register(baseline()).unwrap();
    let descriptor = registry.capabilities("HashMap").unwrap();
    assert!(descriptor.supports_key && !descriptor.supports_dot);

    let timing = TimingConfig::new(100);
    let rows = run_registry(&registry, timing.iterations);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    for op in [Operation::Init, Operation::ReadKey, Operation::WriteKey] {
        assert!(row.elapsed_seconds(op).unwrap() > 0.0, "{op}");
    }

    let table = format_table(&build_report(rows, &timing));
    let lines: Vec<_> = table.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Rust Ver.: "));
    assert_eq!(lines[1], "Epoch: 100");
    let cells = table_cells(lines[4]);
    assert_eq!(cells[0], "HashMap");
    assert_ne!(cells[1], NOT_AVAILABLE);
    assert_ne!(cells[2], NOT_AVAILABLE);
    assert_eq!(cells[3], NOT_AVAILABLE);
    assert_ne!(cells[4], NOT_AVAILABLE);
    assert_eq!(cells[5], NOT_AVAILABLE);
}

#[test]
fn test_failing_constructor_yields_all_na_row() {
    let mut registry = Registry::new();
    registry
        .register(
            Implementation::builder::<NestedDocument>("Broken", "Broken(doc)", |_| {
                Err(AccessError::Construction("rejected".to_string()))
            })
            .key_access(|doc| doc.leaf(), |_, _| Ok(()))
            .dot_access(|doc| doc.leaf(), |_, _| Ok(()))
            .build(),
        )
        .unwrap();

    let timing = TimingConfig::new(10);
    let rows = run_registry(&registry, timing.iterations);
    assert_eq!(rows.len(), 1);
    assert_eq!(pattern(&rows[0]), [false; 5]);

    let table = format_table(&build_report(rows, &timing));
    let cells = table_cells(table.lines().nth(4).unwrap());
    assert_eq!(cells, ["Broken", "N/A", "N/A", "N/A", "N/A", "N/A"]);
}

static FIRST_READ: AtomicI64 = AtomicI64::new(i64::MIN);
static LAST_WRITE: AtomicI64 = AtomicI64::new(i64::MIN);

#[derive(Debug)]
struct Recorder(i64);

#[test]
fn test_reads_precede_writes() {
    let implementation = Implementation::builder::<Recorder>("Recorder", "Recorder(doc)", |doc| {
        doc.leaf().map(Recorder)
    })
    .key_access(
        |r: &Recorder| {
            let _ = FIRST_READ.compare_exchange(i64::MIN, r.0, Ordering::SeqCst, Ordering::SeqCst);
            Ok(r.0)
        },
        |r: &mut Recorder, value| {
            r.0 = value;
            LAST_WRITE.store(value, Ordering::SeqCst);
            Ok(())
        },
    )
    .build();

    let row = runner(3).measure(&implementation, &NestedDocument::fixed());

    assert_eq!(pattern(&row), [true, true, false, true, false]);
    assert_eq!(FIRST_READ.load(Ordering::SeqCst), 100);
    assert_eq!(LAST_WRITE.load(Ordering::SeqCst), 200);
}

#[test]
fn test_writes_persist_on_registered_containers() {
    let registry = default_registry().unwrap();
    let document = NestedDocument::fixed();

    for implementation in registry.activate() {
        let descriptor = implementation.descriptor();
        if !descriptor.supports_key {
            continue;
        }
        let mut instance = implementation.construct(&document).unwrap();
        assert_eq!(implementation.read_key(&instance).unwrap(), 100);
        implementation.write_key(&mut instance, 200).unwrap();
        assert_eq!(implementation.read_key(&instance).unwrap(), 200, "{}", descriptor.name);
    }
}

#[test]
fn test_single_iteration_run() {
    let rows = run_registry(&default_registry().unwrap(), 1);
    let hashmap = rows.iter().find(|r| r.name == "HashMap").unwrap();

    let init = hashmap.elapsed_seconds(Operation::Init).unwrap();
    assert!(init >= 0.0);
}

#[test]
fn test_unavailable_implementation_is_skipped() {
    let mut registry = Registry::new();
    registry
        .register(Implementation::unavailable("Missing", "Missing(doc)", true, true))
        .unwrap();
    registry
        .register(
            Implementation::builder::<i64>("Present", "Present(doc)", |doc| doc.leaf())
                .dot_access(|v: &i64| Ok(*v), |v: &mut i64, new| {
                    *v = new;
                    Ok(())
                })
                .build(),
        )
        .unwrap();

    let rows = run_registry(&registry, 5);
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Present"]);
}
