use std::collections::BTreeSet;

/// Set difference between two holdings snapshots, each side sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingsDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl HoldingsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `added = current - previous`, `removed = previous - current`.
///
/// Input order and duplicates do not matter.
pub fn diff<P, C>(previous: P, current: C) -> HoldingsDiff
where
    P: IntoIterator,
    P::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let previous: BTreeSet<String> = previous
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect();
    let current: BTreeSet<String> = current
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect();

    HoldingsDiff {
        added: current.difference(&previous).cloned().collect(),
        removed: previous.difference(&current).cloned().collect(),
    }
}
