// src/checker/stats.rs
// =============================================================================
// Summary numbers for a list of links.
//
// - total:  how many links were found
// - unique: how many different hrefs (exact string match, no normalization)
// - broken: how many links failed validation; only known after validating
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;

use super::link::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broken: Option<usize>,
}

/// Computes [`Stats`] for `links`. `broken` is only filled in when the
/// links went through validation.
pub fn summarize(links: &[Link], validated: bool) -> Stats {
    let unique: HashSet<&str> = links.iter().map(|l| l.href.as_str()).collect();

    let broken = validated.then(|| {
        links
            .iter()
            .filter(|l| l.is_ok() != Some(true))
            .count()
    });

    Stats {
        total: links.len(),
        unique: unique.len(),
        broken,
    }
}
