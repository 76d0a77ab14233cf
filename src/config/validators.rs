//! 生成参数校验
//!
//! All checks run before any random draw so a bad configuration never
//! produces partial output.

use super::presets::{GenerationParams, IpStrategy, LatencyShape, LogNormalParams, TimestampStrategy};
use crate::errors::{ClickgenError, Result};
use crate::generator::fake::SHORT_CODE_SPACE;

/// Upper bound on `window_days` and `retention_days`.
pub const MAX_SPAN_DAYS: i64 = 36_500;

fn positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(ClickgenError::validation(format!(
            "{} must be a positive integer",
            name
        )));
    }
    Ok(())
}

fn probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ClickgenError::validation(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn weights<T>(name: &str, table: &[(T, f64)]) -> Result<()> {
    if table.is_empty() {
        return Err(ClickgenError::validation(format!("{} table is empty", name)));
    }
    if table.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(ClickgenError::validation(format!(
            "{} weights must be finite and non-negative",
            name
        )));
    }
    if table.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
        return Err(ClickgenError::validation(format!(
            "{} weights sum to zero",
            name
        )));
    }
    Ok(())
}

fn log_normal(name: &str, p: &LogNormalParams) -> Result<()> {
    if !p.mu.is_finite() || !p.sigma.is_finite() || p.sigma < 0.0 {
        return Err(ClickgenError::validation(format!(
            "{} log-normal needs finite mu and sigma >= 0",
            name
        )));
    }
    Ok(())
}

/// Validate a parameter set.
pub fn validate_params(params: &GenerationParams) -> Result<()> {
    positive("num_users", params.num_users)?;
    positive("num_urls", params.num_urls)?;
    positive("num_clicks", params.num_clicks)?;
    positive("user_agent_pool", params.user_agent_pool)?;

    if !(1..=MAX_SPAN_DAYS).contains(&params.window_days) {
        return Err(ClickgenError::validation(format!(
            "window_days must be within [1, {}], got {}",
            MAX_SPAN_DAYS, params.window_days
        )));
    }
    if !(0..=MAX_SPAN_DAYS).contains(&params.retention_days) {
        return Err(ClickgenError::validation(format!(
            "retention_days must be within [0, {}], got {}",
            MAX_SPAN_DAYS, params.retention_days
        )));
    }
    if params.num_urls as u64 > SHORT_CODE_SPACE {
        return Err(ClickgenError::validation(format!(
            "num_urls {} exceeds the short code space {}",
            params.num_urls, SHORT_CODE_SPACE
        )));
    }

    probability("active_probability", params.active_probability)?;
    probability("popular_share", params.popular_share)?;
    if !(params.popular_fraction > 0.0 && params.popular_fraction < 1.0) {
        return Err(ClickgenError::validation(format!(
            "popular_fraction must be within (0, 1), got {}",
            params.popular_fraction
        )));
    }

    if params.domains.is_empty() {
        return Err(ClickgenError::validation("domain list is empty"));
    }
    weights("country", &params.countries)?;
    weights("referrer", &params.referrers)?;
    weights("platform", &params.platforms)?;
    weights("status code", &params.status_codes)?;

    if let TimestampStrategy::Diurnal { hour_weights } = &params.timestamps {
        let table: Vec<(usize, f64)> = hour_weights.iter().copied().enumerate().collect();
        weights("hour", &table)?;
    }

    match &params.latency.shape {
        LatencyShape::Single(p) => log_normal("latency", p)?,
        LatencyShape::Mixture {
            normal,
            lag,
            lag_weight,
        } => {
            log_normal("normal latency", normal)?;
            log_normal("lag latency", lag)?;
            probability("lag_weight", *lag_weight)?;
        }
    }
    if let Some(bounds) = params.latency.bounds
        && bounds.min_ms > bounds.max_ms
    {
        return Err(ClickgenError::validation(format!(
            "latency bounds inverted: {} > {}",
            bounds.min_ms, bounds.max_ms
        )));
    }

    if let IpStrategy::Pooled { size } = params.ip {
        positive("ip pool size", size)?;
    }

    Ok(())
}
