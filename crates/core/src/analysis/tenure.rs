//! Tenure arithmetic and the conviction / quick-flip classifications.

use crate::domain::report::Tenured;
use crate::domain::state::TenureState;
use crate::time::parse_date_key;

/// Minimum tenure, inclusive, for a conviction holding.
pub const CONVICTION_MIN_DAYS: i64 = 15;
/// Maximum tenure, inclusive, for an exited holding to count as a quick flip.
pub const QUICK_FLIP_MAX_DAYS: i64 = 10;

/// Whole days between two date keys.
///
/// `Unparsed` is the soft fallback for missing or malformed dates; it counts
/// as zero days so a corrupt entry cannot abort classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tenure {
    Days(i64),
    Unparsed,
}

impl Tenure {
    pub fn between(from: &str, to: &str) -> Self {
        match (parse_date_key(from), parse_date_key(to)) {
            (Some(a), Some(b)) => Tenure::Days((b - a).num_days()),
            _ => Tenure::Unparsed,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Tenure::Days(d) => d,
            Tenure::Unparsed => 0,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Tenure::Unparsed)
    }
}

pub fn tenor_days(from: &str, to: &str) -> i64 {
    Tenure::between(from, to).days()
}

/// Tenure from first to last sighting of `ticker`.
pub fn ticker_tenure(state: &TenureState, ticker: &str) -> Tenure {
    let first = state.first_seen.get(ticker).map(String::as_str).unwrap_or("");
    let last = state.last_seen.get(ticker).map(String::as_str).unwrap_or("");
    let tenure = Tenure::between(first, last);
    if tenure.is_fallback() {
        tracing::debug!(ticker, first, last, "unparseable seen dates; tenure counted as 0 days");
    }
    tenure
}

/// Every ticker ever seen whose tenure reaches [`CONVICTION_MIN_DAYS`],
/// longest first, ties by ticker.
pub fn convictions(state: &TenureState) -> Vec<Tenured> {
    let mut out: Vec<Tenured> = state
        .first_seen
        .keys()
        .filter_map(|ticker| {
            let days = ticker_tenure(state, ticker).days();
            (days >= CONVICTION_MIN_DAYS).then(|| Tenured {
                ticker: ticker.clone(),
                days,
            })
        })
        .collect();
    out.sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.ticker.cmp(&b.ticker)));
    out
}

/// Daily rule: tickers removed today with a short tenure. Keeps the order of
/// `removed`.
pub fn quick_flips_removed(state: &TenureState, removed: &[String]) -> Vec<Tenured> {
    removed
        .iter()
        .filter_map(|ticker| short_tenure(state, ticker))
        .collect()
}

/// Weekly rule: any ticker not held on `latest_date` with a short tenure,
/// sorted by ticker.
pub fn quick_flips_exited(state: &TenureState, latest_date: &str) -> Vec<Tenured> {
    state
        .first_seen
        .keys()
        .filter(|ticker| {
            let last = state.last_seen.get(*ticker).map(String::as_str).unwrap_or("");
            last < latest_date
        })
        .filter_map(|ticker| short_tenure(state, ticker))
        .collect()
}

fn short_tenure(state: &TenureState, ticker: &str) -> Option<Tenured> {
    let days = ticker_tenure(state, ticker).days();
    (days <= QUICK_FLIP_MAX_DAYS).then(|| Tenured {
        ticker: ticker.to_string(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(seen: &[(&str, &str, &str)]) -> TenureState {
        let mut st = TenureState::default();
        for (ticker, first, last) in seen {
            st.first_seen.insert(ticker.to_string(), first.to_string());
            st.last_seen.insert(ticker.to_string(), last.to_string());
        }
        st
    }

    #[test]
    fn conviction_boundary_is_inclusive() {
        assert_eq!(tenor_days("2024-01-01", "2024-01-16"), CONVICTION_MIN_DAYS);
        assert_eq!(tenor_days("2024-01-01", "2024-01-01"), 0);
        assert_eq!(tenor_days("2024-02-28", "2024-03-01"), 2);
    }

    #[test]
    fn unparseable_dates_fall_back_to_zero() {
        assert_eq!(Tenure::between("2024-01-01", "soon"), Tenure::Unparsed);
        assert_eq!(Tenure::between("", "2024-01-01"), Tenure::Unparsed);
        assert_eq!(tenor_days("garbage", "2024-01-16"), 0);
        assert!(!Tenure::between("2024-01-01", "2024-01-02").is_fallback());
    }

    #[test]
    fn unpadded_or_space_padded_dates_are_unparsed() {
        assert_eq!(Tenure::between("2024-1-1", "2024-1-16"), Tenure::Unparsed);
        assert_eq!(Tenure::between(" 2024-01-01", "2024-01-16 "), Tenure::Unparsed);
        assert_eq!(tenor_days("2024-1-1", "2024-01-16"), 0);
    }

    #[test]
    fn fourteen_days_is_not_a_conviction() {
        let st = state_with(&[
            ("AAA", "2024-01-01", "2024-01-15"),
            ("BBB", "2024-01-01", "2024-01-16"),
        ]);
        let got = convictions(&st);
        assert_eq!(got, vec![Tenured { ticker: "BBB".to_string(), days: 15 }]);
    }

    #[test]
    fn quick_flip_boundary_is_inclusive_for_both_rules() {
        let st = state_with(&[
            ("AAA", "2024-01-01", "2024-01-11"),
            ("BBB", "2024-01-01", "2024-01-12"),
        ]);
        let removed = vec!["AAA".to_string(), "BBB".to_string()];
        let expected = vec![Tenured { ticker: "AAA".to_string(), days: QUICK_FLIP_MAX_DAYS }];

        assert_eq!(quick_flips_removed(&st, &removed), expected);
        assert_eq!(quick_flips_exited(&st, "2024-01-16"), expected);
    }

    #[test]
    fn convictions_include_currently_held_and_sort_by_tenure() {
        let st = state_with(&[
            ("AAA", "2024-01-01", "2024-01-16"),
            ("BBB", "2024-01-01", "2024-02-01"),
            ("CCC", "2024-01-10", "2024-01-16"),
            ("DDD", "2024-01-01", "2024-01-16"),
        ]);
        let got = convictions(&st);
        let tickers: Vec<_> = got.iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BBB", "AAA", "DDD"]);
        assert_eq!(got[0].days, 31);
    }

    #[test]
    fn daily_quick_flips_only_consider_removed() {
        let st = state_with(&[
            ("AAA", "2024-01-01", "2024-01-16"),
            ("BBB", "2024-01-10", "2024-01-15"),
            ("CCC", "2024-01-15", "2024-01-15"),
            ("DDD", "2024-01-14", "2024-01-16"),
        ]);
        let removed = vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()];
        let got = quick_flips_removed(&st, &removed);
        assert_eq!(
            got,
            vec![
                Tenured { ticker: "BBB".to_string(), days: 5 },
                Tenured { ticker: "CCC".to_string(), days: 0 },
            ]
        );
    }

    #[test]
    fn weekly_quick_flips_skip_currently_held() {
        let st = state_with(&[
            ("AAA", "2024-01-10", "2024-01-16"),
            ("BBB", "2024-01-10", "2024-01-12"),
            ("CCC", "2024-01-01", "2024-01-12"),
            ("DDD", "2024-01-12", "2024-01-12"),
        ]);
        let got = quick_flips_exited(&st, "2024-01-16");
        let tickers: Vec<_> = got.iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BBB", "DDD"]);
    }

    #[test]
    fn missing_last_seen_counts_as_exited_zero_day_flip() {
        let mut st = TenureState::default();
        st.first_seen.insert("AAA".to_string(), "2024-01-01".to_string());
        assert_eq!(ticker_tenure(&st, "AAA"), Tenure::Unparsed);
        assert_eq!(quick_flips_exited(&st, "2024-01-16")[0].days, 0);
        assert!(convictions(&st).is_empty());
    }
}
