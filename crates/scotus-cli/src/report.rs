//! Human-readable run summary printed to stdout.

use scotus_core::Outcome;

use crate::update::UpdateReport;

/// Lines describing what a run changed, in the order they should be printed.
pub fn summary_lines(report: &UpdateReport) -> Vec<String> {
    let rec = &report.reconciliation;
    let mut lines = match rec.outcome {
        Outcome::Unchanged => vec!["No changes detected.".to_string()],
        Outcome::Changed => {
            let mut lines = vec![format!("Updated {} cases.", rec.dataset.cases.len())];
            lines.extend(rec.changes.iter().map(|change| format!("  {change}")));
            lines
        }
    };
    if !report.written {
        lines.push("Dry run: dataset not written.".to_string());
    }
    lines
}
