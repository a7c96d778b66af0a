use crate::analysis::diff::diff;
use crate::analysis::tenure::{convictions, quick_flips_removed};
use crate::domain::payload::DailyIngest;
use crate::domain::report::DailyReport;
use crate::domain::state::TenureState;
use crate::error::Result;
use crate::storage::StateStore;

/// Records today's snapshot into `state` and assembles the daily report.
///
/// The previous snapshot is the one under the greatest date key recorded
/// before today's write; on a same-day re-run that is today's own snapshot.
pub fn ingest(state: &mut TenureState, today: &DailyIngest) -> DailyReport {
    let previous: Vec<String> = state
        .latest_snapshot()
        .map(|(_, tickers)| tickers.to_vec())
        .unwrap_or_default();

    state.record_snapshot(&today.date, &today.tickers);

    let changes = diff(&previous, &today.tickers);
    let quick_flips = quick_flips_removed(state, &changes.removed);

    DailyReport {
        date: today.date.clone(),
        added: changes.added,
        removed: changes.removed,
        convictions: convictions(state),
        quick_flips,
    }
}

/// Load, ingest, and (unless `persist` is false) save.
pub fn run(store: &dyn StateStore, today: &DailyIngest, persist: bool) -> Result<DailyReport> {
    let mut state = store.load()?;
    let report = ingest(&mut state, today);

    if persist {
        store.save(&state)?;
    }

    tracing::info!(
        date = %report.date,
        added = report.added.len(),
        removed = report.removed.len(),
        convictions = report.convictions.len(),
        quick_flips = report.quick_flips.len(),
        persisted = persist,
        "daily holdings ingested"
    );
    Ok(report)
}
