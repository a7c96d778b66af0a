use serde::Serialize;

// Field names are PascalCase because the newsletter templates address them
// that way (`{{#each Convictions}}{{Ticker}}{{/each}}`).

/// A ticker together with its observed tenure in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tenured {
    pub ticker: String,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyReport {
    pub date: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub convictions: Vec<Tenured>,
    pub quick_flips: Vec<Tenured>,
}

impl DailyReport {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Surfaced,
    RotatedOut,
}

impl Transition {
    pub fn note(self) -> &'static str {
        match self {
            Transition::Surfaced => "surfaced this week",
            Transition::RotatedOut => "rotated out this week",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RadarEntry {
    pub ticker: String,
    /// Day on which the transition was observed.
    pub date: String,
    pub transition: Transition,
    pub note: String,
}

impl RadarEntry {
    pub fn new(ticker: impl Into<String>, date: impl Into<String>, transition: Transition) -> Self {
        Self {
            ticker: ticker.into(),
            date: date.into(),
            transition,
            note: transition.note().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectorNote {
    pub sector: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WatchlistEntry {
    pub ticker: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeeklyReport {
    pub week_start: String,
    pub week_end: String,
    pub radar: Vec<RadarEntry>,
    pub convictions: Vec<Tenured>,
    pub quick_flips: Vec<Tenured>,
    /// Reserved for sector enrichment; always empty for now.
    pub sector_pulse: Vec<SectorNote>,
    pub watchlist: Vec<WatchlistEntry>,
}
