//! Final result aggregation.

use std::collections::BTreeMap;

use lote_model::{ErrorCategory, ImportResult, RowIssue};

use crate::committer::CommitOutcome;

/// Builds the batch result from the commit tally, the per-row errors
/// collected before commit, and the duplicate count.
///
/// The summary message must distinguish three states the operator cares
/// about (fully imported to the server, partially imported, and saved
/// locally pending reconciliation) because collapsing them would hide
/// data-loss risk.
pub fn aggregate(
    outcome: CommitOutcome,
    row_errors: Vec<RowIssue>,
    duplicates: usize,
) -> ImportResult {
    let imported = outcome.imported();
    let (remote, local) = (outcome.remote, outcome.local);

    let mut all_errors: Vec<RowIssue> = row_errors;
    all_errors.extend(outcome.failures);
    all_errors.sort_by_key(|issue| issue.row_index);
    let failed_rows = all_errors.len();

    let mut message = if imported == 0 {
        match dominant_category(&all_errors) {
            Some(category) => format!(
                "no records imported: {failed_rows} row(s) failed, mostly {}",
                category.description()
            ),
            None => "no records imported".to_string(),
        }
    } else if remote == 0 {
        format!(
            "saved locally, not yet in the database: {local} record(s) queued for sync"
        )
    } else if local == 0 && failed_rows == 0 {
        format!("{remote} record(s) imported")
    } else if local > 0 {
        format!(
            "partial import: {remote} record(s) on the server, {local} saved locally pending sync"
        )
    } else {
        format!("partial import: {remote} record(s) imported, {failed_rows} row(s) failed")
    };
    if duplicates > 0 {
        message.push_str(&format!(", {duplicates} duplicate(s) skipped"));
    }
    if imported > 0 && failed_rows > 0 && local > 0 {
        message.push_str(&format!(", {failed_rows} row(s) failed"));
    }

    ImportResult {
        success: imported > 0,
        imported,
        errors: all_errors.iter().map(RowIssue::user_message).collect(),
        message,
    }
}

fn dominant_category(errors: &[RowIssue]) -> Option<ErrorCategory> {
    let mut counts: BTreeMap<ErrorCategory, usize> = BTreeMap::new();
    for issue in errors {
        *counts.entry(issue.category).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(category, _)| category)
}
