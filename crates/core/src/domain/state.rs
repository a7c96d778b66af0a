use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Persisted holdings history plus per-ticker first/last-seen bookkeeping.
///
/// Date keys are `YYYY-MM-DD` strings so that ordered map iteration is
/// chronological. `first_seen`/`last_seen` are maintained incrementally by
/// [`TenureState::record_snapshot`] and must always agree with
/// [`TenureState::recompute_seen`] when days are recorded in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureState {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub holdings_by_day: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_seen: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_seen: BTreeMap<String, String>,
}

/// First/last-seen maps derived from history alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenDates {
    pub first_seen: BTreeMap<String, String>,
    pub last_seen: BTreeMap<String, String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TenureState {
    pub fn is_empty(&self) -> bool {
        self.holdings_by_day.is_empty()
    }

    /// Greatest date key with a recorded snapshot.
    pub fn latest_date(&self) -> Option<&str> {
        self.holdings_by_day.keys().next_back().map(String::as_str)
    }

    pub fn latest_snapshot(&self) -> Option<(&str, &[String])> {
        self.holdings_by_day
            .iter()
            .next_back()
            .map(|(date, tickers)| (date.as_str(), tickers.as_slice()))
    }

    pub fn snapshot(&self, date: &str) -> Option<&[String]> {
        self.holdings_by_day.get(date).map(Vec::as_slice)
    }

    /// Stores `tickers` as the snapshot for `date`, replacing any snapshot
    /// already recorded for that day. `first_seen` is write-once; `last_seen`
    /// is overwritten for every ticker present.
    pub fn record_snapshot<I, S>(&mut self, date: &str, tickers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = tickers
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect();

        for ticker in &unique {
            self.first_seen
                .entry(ticker.clone())
                .or_insert_with(|| date.to_string());
            self.last_seen.insert(ticker.clone(), date.to_string());
        }

        self.holdings_by_day
            .insert(date.to_string(), unique.into_iter().collect());
    }

    pub fn recompute_seen(&self) -> SeenDates {
        let mut out = SeenDates::default();
        for (date, tickers) in &self.holdings_by_day {
            for ticker in tickers {
                out.first_seen
                    .entry(ticker.clone())
                    .or_insert_with(|| date.clone());
                out.last_seen.insert(ticker.clone(), date.clone());
            }
        }
        out
    }

    pub fn seen_is_consistent(&self) -> bool {
        let derived = self.recompute_seen();
        derived.first_seen == self.first_seen && derived.last_seen == self.last_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn first_run_records_both_dates() {
        let mut st = TenureState::default();
        st.record_snapshot("2024-03-01", ["BBB", "AAA"]);

        assert_eq!(st.snapshot("2024-03-01").unwrap(), ["AAA", "BBB"]);
        assert_eq!(st.first_seen["AAA"], "2024-03-01");
        assert_eq!(st.last_seen["BBB"], "2024-03-01");
        assert!(st.seen_is_consistent());
    }

    #[test]
    fn rerun_for_same_day_is_idempotent() {
        let mut st = TenureState::default();
        st.record_snapshot("2024-03-01", ["AAA"]);
        st.record_snapshot("2024-03-02", ["AAA", "BBB"]);
        let before = st.clone();

        st.record_snapshot("2024-03-02", ["AAA", "BBB"]);
        assert_eq!(st, before);
    }

    #[test]
    fn first_seen_survives_gap_and_reappearance() {
        let mut st = TenureState::default();
        st.record_snapshot("2024-03-01", ["AAA"]);
        st.record_snapshot("2024-03-02", ["BBB"]);
        st.record_snapshot("2024-03-05", ["AAA"]);

        assert_eq!(st.first_seen["AAA"], "2024-03-01");
        assert_eq!(st.last_seen["AAA"], "2024-03-05");
        assert_eq!(st.last_seen["BBB"], "2024-03-02");
        assert!(st.seen_is_consistent());
    }

    #[test]
    fn latest_date_is_greatest_key() {
        let mut st = TenureState::default();
        assert_eq!(st.latest_date(), None);
        st.record_snapshot("2024-03-05", ["AAA"]);
        st.record_snapshot("2024-02-28", ["BBB"]);
        assert_eq!(st.latest_date(), Some("2024-03-05"));
        assert_eq!(st.latest_snapshot().unwrap().1, ["AAA"]);
    }

    #[test]
    fn decodes_missing_and_null_maps_as_empty() {
        let st: TenureState = serde_json::from_value(json!({
            "holdings_by_day": {"2024-03-01": ["AAA"]},
            "first_seen": null
        }))
        .unwrap();
        assert!(st.first_seen.is_empty());
        assert!(st.last_seen.is_empty());
        assert_eq!(st.holdings_by_day.len(), 1);
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let mut st = TenureState::default();
        st.record_snapshot("2024-03-01", ["AAA"]);
        let v = serde_json::to_value(&st).unwrap();
        assert_eq!(
            v,
            json!({
                "holdings_by_day": {"2024-03-01": ["AAA"]},
                "first_seen": {"AAA": "2024-03-01"},
                "last_seen": {"AAA": "2024-03-01"}
            })
        );
    }

    fn day_key(offset: u32) -> String {
        crate::time::shift_date_key("2024-01-01", i64::from(offset)).unwrap()
    }

    proptest! {
        #[test]
        fn incremental_bookkeeping_matches_recomputation(
            days in prop::collection::vec(
                prop::collection::btree_set("[A-H]", 0..5),
                1..20,
            )
        ) {
            let mut st = TenureState::default();
            for (i, tickers) in days.iter().enumerate() {
                st.record_snapshot(&day_key(i as u32), tickers);
            }
            prop_assert!(st.seen_is_consistent());

            for (ticker, last) in &st.last_seen {
                let expected = days
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.contains(ticker))
                    .map(|(i, _)| day_key(i as u32))
                    .last()
                    .unwrap();
                prop_assert_eq!(last, &expected);
            }
        }

        #[test]
        fn first_seen_never_changes_once_set(
            days in prop::collection::vec(
                prop::collection::btree_set("[A-H]", 0..5),
                1..20,
            )
        ) {
            let mut st = TenureState::default();
            let mut pinned = BTreeMap::new();
            for (i, tickers) in days.iter().enumerate() {
                st.record_snapshot(&day_key(i as u32), tickers);
                for (ticker, first) in &st.first_seen {
                    let prior = pinned.entry(ticker.clone()).or_insert_with(|| first.clone());
                    prop_assert_eq!(&*prior, first);
                }
            }
        }
    }
}
