use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::info;

use super::Dataset;

/// Observational statistics of a generated dataset.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub catalog_entries: usize,
    pub active_links: usize,
    pub events: usize,
    /// Five most frequent countries with their share of events.
    pub top_countries: Vec<(String, f64)>,
    pub latency_mean_ms: f64,
    pub latency_max_ms: u32,
    pub unique_ips: usize,
    /// Share of events pointing at popular codes.
    pub popular_share: f64,
}

impl GenerationSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let events = &dataset.events.events;
        let total = events.len();

        let mut countries: HashMap<&str, usize> = HashMap::new();
        for event in events {
            *countries.entry(event.country_code.as_str()).or_default() += 1;
        }
        let mut top_countries: Vec<(String, f64)> = countries
            .into_iter()
            .map(|(code, count)| (code.to_string(), share(count, total)))
            .collect();
        top_countries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_countries.truncate(5);

        let latency_sum: u64 = events.iter().map(|e| e.latency_ms as u64).sum();
        let popular: HashSet<&str> = dataset
            .events
            .popular_codes
            .iter()
            .map(String::as_str)
            .collect();
        let popular_hits = events
            .iter()
            .filter(|e| popular.contains(e.short_code.as_str()))
            .count();

        Self {
            catalog_entries: dataset.catalog.len(),
            active_links: dataset.catalog.entries.iter().filter(|e| e.is_active).count(),
            events: total,
            top_countries,
            latency_mean_ms: if total == 0 {
                0.0
            } else {
                latency_sum as f64 / total as f64
            },
            latency_max_ms: events.iter().map(|e| e.latency_ms).max().unwrap_or(0),
            unique_ips: events.iter().map(|e| e.ip_address).collect::<HashSet<_>>().len(),
            popular_share: share(popular_hits, total),
        }
    }

    pub fn log(&self) {
        info!(
            "Catalog: {} links ({} active)",
            self.catalog_entries, self.active_links
        );
        info!(
            "Events: {}, popular share {:.1}%",
            self.events,
            self.popular_share * 100.0
        );
        for (code, share) in &self.top_countries {
            info!("  {} {:.2}%", code, share * 100.0);
        }
        info!(
            "Latency mean {:.1} ms, max {} ms; unique IPs {}",
            self.latency_mean_ms, self.latency_max_ms, self.unique_ips
        );
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
