use serde::Serialize;
use tracing::debug;

use super::JoinedClick;
use super::features::{CorrelationMatrix, FeatureRow, correlation_matrix, preview};
use super::metrics::{
    APDEX_THRESHOLD_MS, Apdex, CountryShare, Headline, Heatmap, HourlyLoad, PlatformAgents,
    apdex, country_distribution, headline, hourly_load, top_user_agents, weekday_heatmap,
};
use super::pareto::{Pareto, pareto};
use crate::config::Platform;

/// Row filter. An empty list places no restriction on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub platforms: Vec<Platform>,
    pub statuses: Vec<u16>,
}

impl Filter {
    pub fn matches(&self, row: &JoinedClick) -> bool {
        (self.platforms.is_empty() || self.platforms.contains(&row.event.platform))
            && (self.statuses.is_empty() || self.statuses.contains(&row.event.status_code))
    }

    pub fn apply(&self, rows: Vec<JoinedClick>) -> Vec<JoinedClick> {
        let before = rows.len();
        let kept: Vec<JoinedClick> = rows.into_iter().filter(|row| self.matches(row)).collect();
        debug!("Filter kept {} of {} rows", kept.len(), before);
        kept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinCoverage {
    pub matched: usize,
    /// Events whose short code has no catalog entry.
    pub unmatched: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub headline: Headline,
    pub apdex: Apdex,
    pub countries: Vec<CountryShare>,
    pub user_agents: Vec<PlatformAgents>,
    pub hourly: Vec<HourlyLoad>,
    pub heatmap: Heatmap,
    pub features: Vec<FeatureRow>,
    pub correlation: CorrelationMatrix,
    pub pareto: Pareto,
    pub join: JoinCoverage,
}

/// Compute every report section over already filtered rows.
///
/// `top` bounds the user agent leaderboard and the feature preview.
pub fn build_report(rows: &[JoinedClick], top: usize) -> Report {
    let unmatched = rows.iter().filter(|row| row.link.is_none()).count();

    Report {
        headline: headline(rows),
        apdex: apdex(rows, APDEX_THRESHOLD_MS),
        countries: country_distribution(rows),
        user_agents: top_user_agents(rows, top),
        hourly: hourly_load(rows),
        heatmap: weekday_heatmap(rows),
        features: preview(rows, top),
        correlation: correlation_matrix(rows),
        pareto: pareto(rows),
        join: JoinCoverage {
            matched: rows.len() - unmatched,
            unmatched,
        },
    }
}
