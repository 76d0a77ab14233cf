//! 合成数据生成
//!
//! - `catalog`: 短链接目录（用户、创建/过期时间、激活标记）
//! - `events`: 点击流（热度倾斜、地理、时段、延迟、状态码、平台）
//! - `sampling` / `fake`: 共享的采样原语与伪造字段
//!
//! Every entry point takes an explicit RNG; nothing touches a global generator.

pub mod catalog;
pub mod events;
pub mod fake;
pub mod sampling;
mod summary;

pub use catalog::{Catalog, CatalogEntry, generate_catalog};
pub use events::{ClickEvent, EventStream, PopularitySplit, generate_events};
pub use summary::GenerationSummary;

use chrono::{DateTime, Duration, SubsecRound, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::{GenerationConfig, GenerationParams, OutputConfig, validate_params};
use crate::errors::{ClickgenError, Result};
use crate::utils::csv_handler::write_records;

/// The half-open interval `[start, end)` all generated instants fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl GenerationWindow {
    /// Window of `days` days ending at `now`, truncated to whole seconds.
    ///
    /// Fails when the start would fall outside the representable range.
    pub fn ending_at(now: DateTime<Utc>, days: i64) -> Result<Self> {
        let end = now.trunc_subsecs(0);
        let start = TimeDelta::try_days(days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                ClickgenError::validation(format!(
                    "window of {} days before {} is out of range",
                    days, end
                ))
            })?;
        Ok(Self { start, end })
    }

    pub fn total_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn whole_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// Uniform instant at second resolution.
    pub fn random_instant<R: Rng + ?Sized>(&self, rng: &mut R) -> DateTime<Utc> {
        let total = self.total_seconds();
        if total <= 0 {
            return self.start;
        }
        self.start + Duration::seconds(rng.random_range(0..total))
    }
}

/// Catalog and click stream of one run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub events: EventStream,
}

/// Validate `params`, then build the catalog and the click stream from it.
pub fn generate_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GenerationParams,
    window: &GenerationWindow,
) -> Result<Dataset> {
    validate_params(params)?;

    info!("Creating base of users and links...");
    let catalog = generate_catalog(rng, params, window)?;

    info!("Generating click stream ({} records)...", params.num_clicks);
    let events = generate_events(rng, &catalog.short_codes, params, window)?;

    Ok(Dataset { catalog, events })
}

/// Write the catalog and event files; nothing is written unless both
/// generation stages succeeded.
pub fn write_dataset(dataset: &Dataset, output: &OutputConfig) -> Result<()> {
    let catalog_path = output.catalog_path();
    let written = write_records(&dataset.catalog.entries, &catalog_path)?;
    info!("{} created ({} records)", catalog_path.display(), written);

    let events_path = output.events_path();
    let written = write_records(&dataset.events.events, &events_path)?;
    info!("{} created ({} records)", events_path.display(), written);

    Ok(())
}

/// Seeded end-to-end run: generate, write, summarize.
pub fn run(
    generation: &GenerationConfig,
    output: &OutputConfig,
    now: DateTime<Utc>,
) -> Result<GenerationSummary> {
    let params = generation.to_params();
    validate_params(&params)?;
    let window = GenerationWindow::ending_at(now, params.window_days)?;
    let mut rng = StdRng::seed_from_u64(generation.seed);

    info!(
        "Started generation with preset '{}' (seed {}): {} users, {} links, {} clicks",
        generation.preset, generation.seed, params.num_users, params.num_urls, params.num_clicks
    );

    let dataset = generate_dataset(&mut rng, &params, &window)?;
    write_dataset(&dataset, output)?;

    let summary = GenerationSummary::from_dataset(&dataset);
    summary.log();
    Ok(summary)
}
