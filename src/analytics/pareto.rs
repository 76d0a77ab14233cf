//! 链接热度的帕累托分析

use std::collections::HashMap;

use serde::Serialize;

use super::JoinedClick;
use super::metrics::sorted_desc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRow {
    pub rank: usize,
    pub short_code: String,
    pub clicks: usize,
    pub cumulative_clicks: usize,
    pub cumulative_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pareto {
    pub rows: Vec<ParetoRow>,
    /// Share of clicks held by the top 20% of codes (rounded up).
    pub top_fifth_share: f64,
}

/// Codes ranked by clicks, most clicked first, ties by code.
pub fn pareto(rows: &[JoinedClick]) -> Pareto {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.event.short_code.as_str()).or_default() += 1;
    }
    let total = rows.len();

    let mut cumulative = 0;
    let ranked: Vec<ParetoRow> = sorted_desc(counts)
        .into_iter()
        .enumerate()
        .map(|(idx, (code, clicks))| {
            cumulative += clicks;
            ParetoRow {
                rank: idx + 1,
                short_code: code.to_string(),
                clicks,
                cumulative_clicks: cumulative,
                cumulative_share: cumulative as f64 / total as f64,
            }
        })
        .collect();

    let top_count = ranked.len().div_ceil(5);
    let top_fifth_share = top_count
        .checked_sub(1)
        .and_then(|idx| ranked.get(idx))
        .map(|row| row.cumulative_share)
        .unwrap_or(0.0);

    Pareto {
        rows: ranked,
        top_fifth_share,
    }
}
