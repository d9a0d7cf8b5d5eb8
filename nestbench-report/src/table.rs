//! Human-readable table output

use crate::report::{Report, ReportRow};
use nestbench_core::Operation;

/// Cell text for an unavailable measurement
pub const NOT_AVAILABLE: &str = "N/A";

const NAME_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 8;
const RULE_WIDTH: usize = 70;

/// Render the header block and one fixed-width line per implementation.
///
/// Times are total seconds for all repetitions with five decimals.
pub fn format_table(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("Rust Ver.: {}\n", report.meta.toolchain));
    output.push_str(&format!("Epoch: {}\n", report.meta.iterations));

    output.push_str(&format!("{:<NAME_WIDTH$}", "Library"));
    for op in Operation::ALL {
        output.push_str(&format!(" | {:<VALUE_WIDTH$}", op.label()));
    }
    output.push('\n');
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for row in &report.rows {
        output.push_str(&format_row(row));
        output.push('\n');
    }

    output
}

fn format_row(row: &ReportRow) -> String {
    let mut line = format!("{:<NAME_WIDTH$}", row.name);
    for op in Operation::ALL {
        line.push_str(&format!(" | {:<VALUE_WIDTH$}", format_cell(row.elapsed_seconds(op))));
    }
    line
}

fn format_cell(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) => format!("{:.5}", s),
        None => NOT_AVAILABLE.to_string(),
    }
}
