use crate::analysis::diff::diff;
use crate::analysis::tenure::{convictions, quick_flips_exited};
use crate::domain::report::{RadarEntry, Tenured, Transition, WatchlistEntry, WeeklyReport};
use crate::domain::state::TenureState;
use crate::time::shift_date_key;

pub const QUICK_FLIP_REASON: &str = "recent quick flip";

/// Days subtracted from the week end to label the week start.
const WEEK_LABEL_SPAN_DAYS: i64 = 6;

/// Builds the weekly rollup, or `None` when no snapshot has been recorded.
///
/// The radar covers every consecutive pair of recorded days, not only the
/// labelled week.
pub fn build_weekly(state: &TenureState) -> Option<WeeklyReport> {
    let week_end = state.latest_date()?.to_string();
    let week_start = week_start_label(&week_end);

    let radar = radar(state);
    let convictions = convictions(state);
    let quick_flips = quick_flips_exited(state, &week_end);
    let watchlist = watchlist(&radar, &quick_flips);

    Some(WeeklyReport {
        week_start,
        week_end,
        radar,
        convictions,
        quick_flips,
        sector_pulse: Vec::new(),
        watchlist,
    })
}

pub fn week_start_label(week_end: &str) -> String {
    match shift_date_key(week_end, -WEEK_LABEL_SPAN_DAYS) {
        Some(start) => start,
        None => {
            tracing::warn!(week_end, "week end is not a valid date; using it as week start");
            week_end.to_string()
        }
    }
}

/// One entry per (ticker, day) transition, in date order; within a day the
/// additions come first, each group sorted by ticker.
pub fn radar(state: &TenureState) -> Vec<RadarEntry> {
    let days: Vec<(&String, &Vec<String>)> = state.holdings_by_day.iter().collect();

    let mut out = Vec::new();
    for pair in days.windows(2) {
        let (_, previous) = pair[0];
        let (date, current) = pair[1];
        let d = diff(previous, current);
        out.extend(
            d.added
                .into_iter()
                .map(|t| RadarEntry::new(t, date.as_str(), Transition::Surfaced)),
        );
        out.extend(
            d.removed
                .into_iter()
                .map(|t| RadarEntry::new(t, date.as_str(), Transition::RotatedOut)),
        );
    }
    out
}

/// Radar entries followed by quick flips. A ticker may appear more than once.
pub fn watchlist(radar: &[RadarEntry], quick_flips: &[Tenured]) -> Vec<WatchlistEntry> {
    radar
        .iter()
        .map(|r| WatchlistEntry {
            ticker: r.ticker.clone(),
            reason: r.note.clone(),
        })
        .chain(quick_flips.iter().map(|q| WatchlistEntry {
            ticker: q.ticker.clone(),
            reason: QUICK_FLIP_REASON.to_string(),
        }))
        .collect()
}
