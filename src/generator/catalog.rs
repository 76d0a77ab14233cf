//! URL catalog generation

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::GenerationWindow;
use super::fake;
use super::sampling::with_replacement;
use crate::config::GenerationParams;
use crate::errors::{ClickgenError, Result};
use crate::utils::csv_handler::title_case_bool;
use crate::utils::time::csv_datetime;

/// 目录中的一条短链接记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub url_id: Uuid,
    pub short_code: String,
    pub original_url: String,
    pub user_id: Uuid,
    #[serde(with = "csv_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "csv_datetime")]
    pub expiration_date: DateTime<Utc>,
    #[serde(with = "title_case_bool")]
    pub is_active: bool,
}

/// Generated catalog plus its short codes in generation order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub short_codes: Vec<String>,
    /// Owner pool the `user_id`s were drawn from
    pub users: Vec<Uuid>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `num_users` fresh owner identifiers.
pub fn user_pool<R: Rng + ?Sized>(rng: &mut R, num_users: usize) -> Vec<Uuid> {
    (0..num_users).map(|_| fake::uuid(rng)).collect()
}

/// Draw a short code not yet in `taken`, and record it.
///
/// Collisions are redrawn so codes stay unique across the catalog.
pub fn unique_short_code<R: Rng + ?Sized>(rng: &mut R, taken: &mut HashSet<String>) -> String {
    loop {
        let code = fake::short_code(rng);
        if taken.insert(code.clone()) {
            return code;
        }
        debug!("Short code collision on {}, redrawing", code);
    }
}

/// Build the URL catalog.
pub fn generate_catalog<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GenerationParams,
    window: &GenerationWindow,
) -> Result<Catalog> {
    if params.num_users == 0 || params.num_urls == 0 {
        return Err(ClickgenError::validation(
            "user and URL counts must be positive integers",
        ));
    }

    let users = user_pool(rng, params.num_users);
    let owners = with_replacement(rng, &users, params.num_urls)?;
    let retention = TimeDelta::try_days(params.retention_days).ok_or_else(|| {
        ClickgenError::validation(format!(
            "retention_days {} is out of range",
            params.retention_days
        ))
    })?;

    let mut taken = HashSet::with_capacity(params.num_urls);
    let mut entries = Vec::with_capacity(params.num_urls);
    let mut short_codes = Vec::with_capacity(params.num_urls);

    for user_id in owners {
        let created_at = window.random_instant(rng);
        let original_url = fake::original_url(rng, &params.domains)
            .ok_or_else(|| ClickgenError::sampling("domain list is empty"))?;
        let short_code = unique_short_code(rng, &mut taken);

        entries.push(CatalogEntry {
            url_id: fake::uuid(rng),
            short_code: short_code.clone(),
            original_url,
            user_id,
            created_at,
            expiration_date: created_at.checked_add_signed(retention).ok_or_else(|| {
                ClickgenError::validation("expiration date is out of range")
            })?,
            is_active: rng.random_bool(params.active_probability),
        });
        short_codes.push(short_code);
    }

    debug!(
        "Generated {} catalog entries for {} users",
        entries.len(),
        params.num_users
    );

    Ok(Catalog {
        entries,
        short_codes,
        users,
    })
}
