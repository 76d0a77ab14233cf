//! Click-stream generation
//!
//! Each field is sampled as a whole column, then the columns are zipped into
//! events and sorted by timestamp. Columns whose construction would correlate
//! with position (popular codes first, normal latencies first) are shuffled
//! explicitly before assembly.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::GenerationWindow;
use super::fake;
use super::sampling::{Categorical, log_normal, with_replacement, without_replacement};
use crate::config::{
    GenerationParams, IpStrategy, LatencyModel, LatencyShape, Platform, Referrer,
    TimestampStrategy, validate_params,
};
use crate::errors::{ClickgenError, Result};
use crate::utils::time::csv_datetime;

/// 单次点击事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub event_id: Uuid,
    pub short_code: String,
    #[serde(with = "csv_datetime")]
    pub timestamp: DateTime<Utc>,
    pub ip_address: Ipv4Addr,
    pub user_agent: String,
    pub referrer: Referrer,
    pub country_code: String,
    pub latency_ms: u32,
    pub status_code: u16,
    pub platform: Platform,
}

/// Popular and regular short codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularitySplit {
    pub popular: Vec<String>,
    pub regular: Vec<String>,
}

/// Generated events plus the codes chosen as popular.
#[derive(Debug, Clone)]
pub struct EventStream {
    pub events: Vec<ClickEvent>,
    pub popular_codes: Vec<String>,
}

/// Choose `floor(distinct * fraction)` distinct codes as popular.
///
/// Duplicate codes in the input count once; the regular set keeps the
/// first-occurrence order of what remains.
pub fn split_by_popularity<R: Rng + ?Sized>(
    rng: &mut R,
    short_codes: &[String],
    fraction: f64,
) -> Result<PopularitySplit> {
    let mut seen = HashSet::with_capacity(short_codes.len());
    let distinct: Vec<String> = short_codes
        .iter()
        .filter(|code| seen.insert(code.as_str()))
        .cloned()
        .collect();

    let popular_count = (distinct.len() as f64 * fraction).floor() as usize;
    let popular = without_replacement(rng, &distinct, popular_count)?;

    let popular_set: HashSet<&str> = popular.iter().map(String::as_str).collect();
    let regular = distinct
        .iter()
        .filter(|code| !popular_set.contains(code.as_str()))
        .cloned()
        .collect();

    Ok(PopularitySplit { popular, regular })
}

/// One short code per event: `floor(n * share)` from the popular set, the rest
/// from the regular set, then shuffled.
pub fn skewed_codes<R: Rng + ?Sized>(
    rng: &mut R,
    split: &PopularitySplit,
    n: usize,
    share: f64,
) -> Result<Vec<String>> {
    let popular_events = ((n as f64 * share).floor() as usize).min(n);
    let regular_events = n - popular_events;

    let mut codes = with_replacement(rng, &split.popular, popular_events).map_err(|_| {
        ClickgenError::sampling(format!(
            "{} popular events requested but the popular set is empty",
            popular_events
        ))
    })?;
    let regular = with_replacement(rng, &split.regular, regular_events).map_err(|_| {
        ClickgenError::sampling(format!(
            "{} regular events requested but the regular set is empty",
            regular_events
        ))
    })?;
    codes.extend(regular);
    codes.shuffle(rng);
    Ok(codes)
}

/// Event timestamps per the configured strategy; never before the window
/// start or at/after its end.
pub fn sample_timestamps<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: &TimestampStrategy,
    window: &GenerationWindow,
    n: usize,
) -> Result<Vec<DateTime<Utc>>> {
    match strategy {
        TimestampStrategy::Uniform => Ok((0..n).map(|_| window.random_instant(rng)).collect()),
        TimestampStrategy::Diurnal { hour_weights } => {
            let days = window.whole_days();
            if days <= 0 {
                return Err(ClickgenError::sampling(
                    "diurnal timestamps need a window of at least one day",
                ));
            }
            let hours: Vec<(i64, f64)> = hour_weights
                .iter()
                .enumerate()
                .map(|(hour, weight)| (hour as i64, *weight))
                .collect();
            let hour_dist = Categorical::new(&hours)?;

            Ok((0..n)
                .map(|_| {
                    let day = rng.random_range(0..days);
                    let hour = hour_dist.sample(rng);
                    let minute = rng.random_range(0..60);
                    window.start
                        + Duration::days(day)
                        + Duration::hours(hour)
                        + Duration::minutes(minute)
                })
                .collect())
        }
    }
}

fn to_millis(value: f64) -> u32 {
    // `as` truncates toward zero and saturates, NaN becomes 0
    value as u32
}

/// Latency column: log-normal or two-component mixture, truncated to integer
/// milliseconds and clipped to the bounds if present.
pub fn sample_latencies<R: Rng + ?Sized>(
    rng: &mut R,
    model: &LatencyModel,
    n: usize,
) -> Result<Vec<u32>> {
    let raw = match &model.shape {
        LatencyShape::Single(params) => log_normal(rng, params, n)?,
        LatencyShape::Mixture {
            normal,
            lag,
            lag_weight,
        } => {
            let lag_count = ((n as f64 * lag_weight).floor() as usize).min(n);
            let mut values = log_normal(rng, normal, n - lag_count)?;
            values.extend(log_normal(rng, lag, lag_count)?);
            values.shuffle(rng);
            values
        }
    };

    Ok(raw
        .into_iter()
        .map(to_millis)
        .map(|ms| match model.bounds {
            Some(bounds) => ms.max(bounds.min_ms).min(bounds.max_ms),
            None => ms,
        })
        .collect())
}

/// IP column: fresh addresses, or draws from a pre-generated pool.
pub fn sample_ips<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: IpStrategy,
    n: usize,
) -> Result<Vec<Ipv4Addr>> {
    match strategy {
        IpStrategy::PerEvent => Ok((0..n).map(|_| fake::public_ipv4(rng)).collect()),
        IpStrategy::Pooled { size } => {
            let pool: Vec<Ipv4Addr> = (0..size).map(|_| fake::public_ipv4(rng)).collect();
            with_replacement(rng, &pool, n)
        }
    }
}

/// Generate the click stream for the given catalog codes.
///
/// `params` is validated first, so a bad table fails before any draw.
pub fn generate_events<R: Rng + ?Sized>(
    rng: &mut R,
    short_codes: &[String],
    params: &GenerationParams,
    window: &GenerationWindow,
) -> Result<EventStream> {
    validate_params(params)?;
    let n = params.num_clicks;
    if short_codes.is_empty() {
        return Err(ClickgenError::sampling(
            "cannot generate events for an empty catalog",
        ));
    }

    let countries = Categorical::new(&params.countries)?.sample_n(rng, n);

    let split = split_by_popularity(rng, short_codes, params.popular_fraction)?;
    let codes = skewed_codes(rng, &split, n, params.popular_share)?;
    debug!(
        "Popularity split: {} popular / {} regular codes",
        split.popular.len(),
        split.regular.len()
    );

    let timestamps = sample_timestamps(rng, &params.timestamps, window, n)?;
    let latencies = sample_latencies(rng, &params.latency, n)?;
    let platforms = Categorical::new(&params.platforms)?.sample_n(rng, n);
    let statuses = Categorical::new(&params.status_codes)?.sample_n(rng, n);

    let agent_pool: Vec<String> = (0..params.user_agent_pool)
        .map(|_| fake::user_agent(rng))
        .collect();
    let agents = with_replacement(rng, &agent_pool, n)?;
    let referrers = Categorical::new(&params.referrers)?.sample_n(rng, n);
    let ips = sample_ips(rng, params.ip, n)?;

    let mut events: Vec<ClickEvent> = codes
        .into_iter()
        .zip(timestamps)
        .zip(ips.into_iter().zip(agents))
        .zip(referrers.into_iter().zip(countries))
        .zip(latencies.into_iter().zip(statuses).zip(platforms))
        .map(
            |(
                (((short_code, timestamp), (ip_address, user_agent)), (referrer, country_code)),
                ((latency_ms, status_code), platform),
            )| ClickEvent {
                event_id: fake::uuid(rng),
                short_code,
                timestamp,
                ip_address,
                user_agent,
                referrer,
                country_code,
                latency_ms,
                status_code,
                platform,
            },
        )
        .collect();

    // stable: equal timestamps keep generation order
    events.sort_by_key(|event| event.timestamp);

    Ok(EventStream {
        events,
        popular_codes: split.popular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets::BUSINESS_HOURS;
    use crate::config::{LatencyBounds, LogNormalParams, Preset};
    use chrono::{TimeZone, Timelike};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn window() -> GenerationWindow {
        GenerationWindow::ending_at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(), 30).unwrap()
    }

    fn codes(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("code{:02}", i)).collect()
    }

    #[test]
    fn test_split_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let split = split_by_popularity(&mut rng, &codes(50), 0.2).unwrap();
        assert_eq!(split.popular.len(), 10);
        assert_eq!(split.regular.len(), 40);
        let popular: HashSet<_> = split.popular.iter().collect();
        assert!(split.regular.iter().all(|c| !popular.contains(c)));
    }

    #[test]
    fn test_split_ignores_duplicates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut input = codes(10);
        input.extend(codes(10));
        let split = split_by_popularity(&mut rng, &input, 0.5).unwrap();
        assert_eq!(split.popular.len() + split.regular.len(), 10);
    }

    #[test]
    fn test_skewed_codes_exact_share() {
        let mut rng = StdRng::seed_from_u64(3);
        let split = split_by_popularity(&mut rng, &codes(20), 0.2).unwrap();
        let drawn = skewed_codes(&mut rng, &split, 1000, 0.8).unwrap();
        assert_eq!(drawn.len(), 1000);
        let popular: HashSet<_> = split.popular.iter().collect();
        let hits = drawn.iter().filter(|c| popular.contains(c)).count();
        assert_eq!(hits, 800);
    }

    #[test]
    fn test_skewed_codes_are_shuffled() {
        let mut rng = StdRng::seed_from_u64(4);
        let split = split_by_popularity(&mut rng, &codes(20), 0.2).unwrap();
        let drawn = skewed_codes(&mut rng, &split, 1000, 0.8).unwrap();
        let popular: HashSet<_> = split.popular.iter().collect();
        // the tail would be all-regular without the permutation
        let tail_popular = drawn[800..].iter().filter(|c| popular.contains(c)).count();
        assert!(tail_popular > 100, "tail popular {}", tail_popular);
    }

    #[test]
    fn test_empty_popular_set_is_fatal() {
        let mut rng = StdRng::seed_from_u64(5);
        let split = split_by_popularity(&mut rng, &codes(3), 0.2).unwrap();
        assert!(split.popular.is_empty());
        let err = skewed_codes(&mut rng, &split, 10, 0.8).unwrap_err();
        assert!(matches!(err, ClickgenError::Sampling(_)));
    }

    #[test]
    fn test_uniform_timestamps_in_window() {
        let mut rng = StdRng::seed_from_u64(6);
        let w = window();
        let stamps = sample_timestamps(&mut rng, &TimestampStrategy::Uniform, &w, 5000).unwrap();
        assert!(stamps.iter().all(|t| *t >= w.start && *t < w.end));
    }

    #[test]
    fn test_diurnal_timestamps_follow_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let w = window();
        let strategy = TimestampStrategy::Diurnal {
            hour_weights: BUSINESS_HOURS,
        };
        let stamps = sample_timestamps(&mut rng, &strategy, &w, 20_000).unwrap();
        assert!(stamps.iter().all(|t| *t >= w.start && *t < w.end));
        assert!(stamps.iter().all(|t| t.second() == w.start.second()));

        let offset_hour = |t: &DateTime<Utc>| ((*t - w.start).num_hours() % 24) as usize;
        let night = stamps.iter().filter(|t| offset_hour(t) == 3).count();
        let peak = stamps.iter().filter(|t| offset_hour(t) == 10).count();
        assert!(peak > night * 5, "peak {} night {}", peak, night);
    }

    #[test]
    fn test_mixture_latencies_clipped() {
        let mut rng = StdRng::seed_from_u64(8);
        let model = Preset::Europe.params().latency;
        let values = sample_latencies(&mut rng, &model, 50_000).unwrap();
        assert!(values.iter().all(|v| (5..=3000).contains(v)));
        // the lag component pushes a visible tail past 250ms
        let slow = values.iter().filter(|v| **v > 250).count();
        assert!(slow > 2500, "slow {}", slow);
    }

    #[test]
    fn test_single_latency_unbounded() {
        let mut rng = StdRng::seed_from_u64(9);
        let model = LatencyModel {
            shape: LatencyShape::Single(LogNormalParams { mu: 4.2, sigma: 0.7 }),
            bounds: None,
        };
        let values = sample_latencies(&mut rng, &model, 10_000).unwrap();
        assert_eq!(values.len(), 10_000);
        let mean = values.iter().map(|v| *v as f64).sum::<f64>() / 10_000.0;
        // E[X] = exp(mu + sigma^2 / 2) ~ 85, minus ~0.5 from truncation
        assert!((mean - 84.7).abs() < 4.0, "mean {}", mean);
    }

    #[test]
    fn test_tight_bounds() {
        let mut rng = StdRng::seed_from_u64(10);
        let model = LatencyModel {
            shape: LatencyShape::Single(LogNormalParams { mu: 4.2, sigma: 0.7 }),
            bounds: Some(LatencyBounds {
                min_ms: 60,
                max_ms: 70,
            }),
        };
        let values = sample_latencies(&mut rng, &model, 1000).unwrap();
        assert!(values.iter().all(|v| (60..=70).contains(v)));
    }

    #[test]
    fn test_pooled_ips_bounded_cardinality() {
        let mut rng = StdRng::seed_from_u64(11);
        let ips = sample_ips(&mut rng, IpStrategy::Pooled { size: 25 }, 5000).unwrap();
        let unique: HashSet<_> = ips.iter().collect();
        assert!(unique.len() <= 25);
        assert!(unique.len() > 20);
    }

    #[test]
    fn test_generate_events_sorted_and_referential() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut params = Preset::Global.params();
        params.num_clicks = 2000;
        let catalog_codes = codes(30);
        let stream = generate_events(&mut rng, &catalog_codes, &params, &window()).unwrap();

        assert_eq!(stream.events.len(), 2000);
        assert!(stream.events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        let known: HashSet<_> = catalog_codes.iter().collect();
        assert!(stream.events.iter().all(|e| known.contains(&e.short_code)));
        let ids: HashSet<_> = stream.events.iter().map(|e| e.event_id).collect();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn test_generate_events_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(13);
        let params = Preset::Global.params();
        let err = generate_events(&mut rng, &[], &params, &window()).unwrap_err();
        assert!(matches!(err, ClickgenError::Sampling(_)));
    }

    #[test]
    fn test_generate_events_validates_params() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut params = Preset::Europe.params();
        params.latency.shape = LatencyShape::Single(LogNormalParams { mu: 4.0, sigma: -0.5 });
        let err = generate_events(&mut rng, &codes(10), &params, &window()).unwrap_err();
        assert!(matches!(err, ClickgenError::Validation(_)));

        let mut params = Preset::Global.params();
        params.status_codes.clear();
        assert!(generate_events(&mut rng, &codes(10), &params, &window()).is_err());
    }
}
