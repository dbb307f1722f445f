//! The row loop: header skip, per-line evaluation, sink dispatch, and the
//! cumulative run summary.

use std::path::Path;

use log::debug;

use crate::{
    row::{self, RawLine, ValidationOutcome},
    sink::{IngestResult, UserSink},
};

/// Cumulative accounting for one run. `total_lines` counts data rows only;
/// the header line is excluded. After the loop,
/// `success_count + error_count == total_lines`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_lines: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub dry_run: bool,
}

impl RunSummary {
    fn record_success(&mut self) {
        self.total_lines += 1;
        self.success_count += 1;
    }

    fn record_error(&mut self) {
        self.total_lines += 1;
        self.error_count += 1;
    }
}

/// Processes every data line against the sink and prints the running report.
/// The first line is the header and is skipped unvalidated. Row failures are
/// recorded and the loop continues; nothing in here is fatal.
pub async fn process_lines<S: UserSink>(
    path: &Path,
    lines: &[RawLine],
    sink: &mut S,
    dry_run: bool,
) -> RunSummary {
    let mut summary = RunSummary {
        dry_run,
        ..RunSummary::default()
    };

    println!("Processing CSV file: {}", path.display());
    if dry_run {
        println!("DRY RUN MODE");
    }

    let mut rows = lines.iter();
    if let Some(header) = rows.next() {
        println!("Skipping header row: {}", header.text);
    }

    for raw in rows {
        match row::evaluate(raw) {
            ValidationOutcome::Rejected { line, reason } => {
                println!("Error on line {line}: {reason}");
                summary.record_error();
            }
            ValidationOutcome::Valid(user) => match sink.ingest(&user).await {
                IngestResult::DryRunPreview => {
                    println!(
                        "Dry run line {} would insert: {} {} ({})",
                        raw.number, user.name, user.surname, user.email
                    );
                    summary.record_success();
                }
                IngestResult::Inserted => {
                    println!(
                        "Success on line {}: inserted {} {} ({})",
                        raw.number, user.name, user.surname, user.email
                    );
                    summary.record_success();
                }
                IngestResult::DuplicateSkipped => {
                    println!(
                        "Error on line {}: duplicate email '{}'",
                        raw.number, user.email
                    );
                    summary.record_error();
                }
                IngestResult::DatabaseError(message) => {
                    println!("Error on line {}: database error: {}", raw.number, message);
                    summary.record_error();
                }
            },
        }
    }

    debug!(
        "processed {} data row(s): {} ok, {} failed",
        summary.total_lines, summary.success_count, summary.error_count
    );
    report(&summary);
    summary
}

fn report(summary: &RunSummary) {
    println!("Processing complete:");
    println!("Total data rows: {}", summary.total_lines);
    println!("Successful records: {}", summary.success_count);
    println!("Error records: {}", summary.error_count);
    if summary.dry_run {
        println!("Mode: DRY RUN (no data inserted)");
    }
}
