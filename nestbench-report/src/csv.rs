//! CSV Output

use crate::report::Report;
use crate::table::NOT_AVAILABLE;
use nestbench_core::Operation;

/// Generate CSV: one header line, one line per implementation.
///
/// Cells hold elapsed seconds at full precision or `N/A`.
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from("library");
    for op in Operation::ALL {
        output.push(',');
        output.push_str(op.label());
    }
    output.push('\n');

    for row in &report.rows {
        output.push_str(&escape_csv(&row.name));
        for op in Operation::ALL {
            output.push(',');
            match row.elapsed_seconds(op) {
                Some(seconds) => output.push_str(&seconds.to_string()),
                None => output.push_str(NOT_AVAILABLE),
            }
        }
        output.push('\n');
    }

    output
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
