//! List presets command

use colored::Colorize;
use strum::{EnumMessage, IntoEnumIterator};

use crate::config::{IpStrategy, LatencyShape, Preset, TimestampStrategy};

pub fn list_presets() {
    println!("{}", "Available presets:".bold().green());
    println!();
    for preset in Preset::iter() {
        let params = preset.params();
        let default_marker = if preset == Preset::default() {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", preset.to_string().cyan().bold(), default_marker);
        if let Some(message) = preset.get_message() {
            println!("    {}", message);
        }

        let timestamps = match params.timestamps {
            TimestampStrategy::Uniform => "uniform".to_string(),
            TimestampStrategy::Diurnal { .. } => "diurnal (business hours)".to_string(),
        };
        let latency = match params.latency.shape {
            LatencyShape::Single(p) => format!("lognormal({}, {})", p.mu, p.sigma),
            LatencyShape::Mixture {
                normal,
                lag,
                lag_weight,
            } => format!(
                "mixture {:.0}% lognormal({}, {}) + {:.0}% lognormal({}, {})",
                (1.0 - lag_weight) * 100.0,
                normal.mu,
                normal.sigma,
                lag_weight * 100.0,
                lag.mu,
                lag.sigma
            ),
        };
        let bounds = params
            .latency
            .bounds
            .map(|b| format!(", clipped [{}, {}] ms", b.min_ms, b.max_ms))
            .unwrap_or_default();
        let ips = match params.ip {
            IpStrategy::PerEvent => "fresh per click".to_string(),
            IpStrategy::Pooled { size } => format!("pool of {}", size),
        };

        println!(
            "    {} {} users, {} links, {} clicks over {} days",
            "size:".dimmed(),
            params.num_users,
            params.num_urls,
            params.num_clicks,
            params.window_days
        );
        println!(
            "    {} {} countries, timestamps {}",
            "traffic:".dimmed(),
            params.countries.len(),
            timestamps
        );
        println!("    {} {}{}", "latency:".dimmed(), latency, bounds);
        println!(
            "    {} {}, {} user agents",
            "visitors:".dimmed(),
            ips,
            params.user_agent_pool
        );
        println!();
    }
}
