//! 聚合指标

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;

use super::JoinedClick;
use crate::config::Platform;
use crate::utils::time::csv_datetime;

/// Apdex 阈值 T（毫秒）
pub const APDEX_THRESHOLD_MS: u32 = 500;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub total_requests: usize,
    /// `None` when there are no rows.
    pub mean_latency_ms: Option<f64>,
    /// Percentage of rows with status >= 400.
    pub error_rate: f64,
    pub unique_ips: usize,
}

pub fn headline(rows: &[JoinedClick]) -> Headline {
    let total = rows.len();
    let errors = rows.iter().filter(|r| r.event.status_code >= 400).count();
    let unique_ips = rows
        .iter()
        .map(|r| r.event.ip_address)
        .collect::<HashSet<_>>()
        .len();

    Headline {
        total_requests: total,
        mean_latency_ms: mean(rows.iter().map(|r| r.event.latency_ms)),
        error_rate: if total == 0 {
            0.0
        } else {
            errors as f64 / total as f64 * 100.0
        },
        unique_ips,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Apdex {
    pub threshold_ms: u32,
    pub satisfied: usize,
    pub tolerating: usize,
    pub frustrated: usize,
    pub score: f64,
}

/// Satisfied below `threshold`, tolerating in `[threshold, 4 * threshold)`.
pub fn apdex(rows: &[JoinedClick], threshold_ms: u32) -> Apdex {
    let limit = threshold_ms.saturating_mul(4);
    let mut satisfied = 0;
    let mut tolerating = 0;
    for row in rows {
        let latency = row.event.latency_ms;
        if latency < threshold_ms {
            satisfied += 1;
        } else if latency < limit {
            tolerating += 1;
        }
    }
    let total = rows.len();

    Apdex {
        threshold_ms,
        satisfied,
        tolerating,
        frustrated: total - satisfied - tolerating,
        score: if total == 0 {
            0.0
        } else {
            (satisfied as f64 + tolerating as f64 / 2.0) / total as f64
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare {
    pub country_code: String,
    pub count: usize,
    pub share: f64,
}

/// Countries by count, most frequent first.
pub fn country_distribution(rows: &[JoinedClick]) -> Vec<CountryShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.event.country_code.as_str()).or_default() += 1;
    }
    let total = rows.len() as f64;

    sorted_desc(counts)
        .into_iter()
        .map(|(code, count)| CountryShare {
            country_code: code.to_string(),
            count,
            share: count as f64 / total,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCount {
    pub user_agent: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformAgents {
    pub platform: Platform,
    pub total: usize,
    pub agents: Vec<AgentCount>,
}

/// The `top` most frequent user agents overall, broken down by platform.
///
/// Platforms without any of those agents are omitted.
pub fn top_user_agents(rows: &[JoinedClick], top: usize) -> Vec<PlatformAgents> {
    let mut overall: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *overall.entry(row.event.user_agent.as_str()).or_default() += 1;
    }
    let leaders: HashSet<&str> = sorted_desc(overall)
        .into_iter()
        .take(top)
        .map(|(agent, _)| agent)
        .collect();

    Platform::iter()
        .filter_map(|platform| {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for row in rows.iter().filter(|r| r.event.platform == platform) {
                let agent = row.event.user_agent.as_str();
                if leaders.contains(agent) {
                    *counts.entry(agent).or_default() += 1;
                }
            }
            if counts.is_empty() {
                return None;
            }
            let agents: Vec<AgentCount> = sorted_desc(counts)
                .into_iter()
                .map(|(agent, count)| AgentCount {
                    user_agent: agent.to_string(),
                    count,
                })
                .collect();
            Some(PlatformAgents {
                platform,
                total: agents.iter().map(|a| a.count).sum(),
                agents,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyLoad {
    #[serde(with = "csv_datetime")]
    pub hour: DateTime<Utc>,
    pub requests: usize,
    /// `None` for hours without traffic.
    pub mean_latency_ms: Option<f64>,
}

/// Requests and mean latency per clock hour, gaps between the first and last
/// hour included with zero requests.
pub fn hourly_load(rows: &[JoinedClick]) -> Vec<HourlyLoad> {
    let mut buckets: BTreeMap<i64, (usize, u64)> = BTreeMap::new();
    for row in rows {
        let secs = row.event.timestamp.timestamp();
        let bucket = buckets.entry(secs - secs.rem_euclid(3600)).or_default();
        bucket.0 += 1;
        bucket.1 += row.event.latency_ms as u64;
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    (first..=last)
        .step_by(3600)
        .filter_map(|secs| {
            let hour = DateTime::from_timestamp(secs, 0)?;
            let (requests, latency_sum) = buckets.get(&secs).copied().unwrap_or_default();
            Some(HourlyLoad {
                hour,
                requests,
                mean_latency_ms: (requests > 0).then(|| latency_sum as f64 / requests as f64),
            })
        })
        .collect()
}

/// Request counts by weekday (Monday first) and hour of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub days: [&'static str; 7],
    pub counts: [[usize; 24]; 7],
}

impl Heatmap {
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

pub fn weekday_heatmap(rows: &[JoinedClick]) -> Heatmap {
    let mut counts = [[0usize; 24]; 7];
    for row in rows {
        let ts = row.event.timestamp;
        counts[ts.weekday().num_days_from_monday() as usize][ts.hour() as usize] += 1;
    }
    Heatmap {
        days: WEEKDAYS,
        counts,
    }
}

pub(crate) fn mean<I: IntoIterator<Item = u32>>(values: I) -> Option<f64> {
    let (count, sum) = values
        .into_iter()
        .fold((0usize, 0u64), |(n, s), v| (n + 1, s + v as u64));
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Count map sorted by count descending, ties by key ascending.
pub(crate) fn sorted_desc<K: Ord>(counts: HashMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
