use crate::analysis::rollup::build_weekly;
use crate::domain::report::WeeklyReport;
use crate::error::Result;
use crate::storage::StateStore;

/// Read-only over the store. `Ok(None)` means there is no history yet.
pub fn run(store: &dyn StateStore) -> Result<Option<WeeklyReport>> {
    let state = store.load()?;

    let Some(report) = build_weekly(&state) else {
        tracing::info!("no holdings recorded yet; skipping weekly rollup");
        return Ok(None);
    };

    tracing::info!(
        week_start = %report.week_start,
        week_end = %report.week_end,
        radar = report.radar.len(),
        convictions = report.convictions.len(),
        quick_flips = report.quick_flips.len(),
        "weekly rollup built"
    );
    Ok(Some(report))
}
