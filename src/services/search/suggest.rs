//! Autocomplete labels extracted from matching rows.

use sea_orm::FromQueryResult;
use std::collections::HashSet;

use crate::constants::search::MAX_SUGGESTIONS;

/// The label-bearing columns of one candidate row, in label order.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromQueryResult)]
pub struct SuggestionRow {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

impl SuggestionRow {
    /// Non-blank labels in name, city, address order. The address has its
    /// runs of whitespace collapsed, since absent parts leave gaps.
    fn labels(self) -> impl Iterator<Item = String> {
        let address = self
            .address
            .map(|a| a.split_whitespace().collect::<Vec<_>>().join(" "));

        [self.name, self.city, address]
            .into_iter()
            .flatten()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
    }
}

/// Requested count clamped to `1..=MAX_SUGGESTIONS`, `default` when absent.
#[must_use]
pub fn clamp_limit(requested: Option<u64>, default: u64) -> u64 {
    requested.unwrap_or(default).clamp(1, MAX_SUGGESTIONS)
}

/// Flattens candidate rows into unique labels, those containing `query`
/// first, each group keeping row order, truncated to `limit`.
pub fn rank_suggestions<I>(rows: I, query: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = SuggestionRow>,
{
    let needle = query.trim().to_lowercase();
    let mut seen = HashSet::new();

    let (direct, indirect): (Vec<String>, Vec<String>) = rows
        .into_iter()
        .flat_map(SuggestionRow::labels)
        .filter(|label| seen.insert(label.clone()))
        .partition(|label| label.to_lowercase().contains(&needle));

    direct.into_iter().chain(indirect).take(limit).collect()
}
