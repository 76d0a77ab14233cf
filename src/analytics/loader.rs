//! 数据加载与连接

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{Platform, Referrer};
use crate::errors::{ClickgenError, Result};
use crate::generator::ClickEvent;
use crate::utils::csv_handler::{read_records, title_case_bool};
use crate::utils::time::parse_timestamp;

/// Catalog columns attached to each click by the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMeta {
    pub user_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A click with its catalog metadata, if the code is known.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedClick {
    pub event: ClickEvent,
    pub link: Option<LinkMeta>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    short_code: String,
    user_id: Uuid,
    created_at: String,
    #[serde(with = "title_case_bool")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct EventRow {
    event_id: Uuid,
    short_code: String,
    timestamp: String,
    ip_address: Ipv4Addr,
    user_agent: String,
    referrer: Referrer,
    country_code: String,
    latency_ms: u32,
    status_code: u16,
    platform: Platform,
}

fn parse_row_timestamp(path: &Path, row: usize, raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).map_err(|e| {
        ClickgenError::date_parse(format!("{} row {}: {}", path.display(), row, e.message()))
    })
}

/// Catalog metadata keyed by short code. Later duplicates of a code are ignored.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<HashMap<String, LinkMeta>> {
    let path = path.as_ref();
    let rows: Vec<CatalogRow> = read_records(path)?;

    let mut catalog = HashMap::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let created_at = parse_row_timestamp(path, idx + 2, &row.created_at)?;
        if catalog.contains_key(&row.short_code) {
            warn!("Duplicate short code '{}' in {}", row.short_code, path.display());
            continue;
        }
        catalog.insert(
            row.short_code,
            LinkMeta {
                user_id: row.user_id,
                is_active: row.is_active,
                created_at,
            },
        );
    }

    debug!("Loaded {} catalog entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<ClickEvent>> {
    let path = path.as_ref();
    let rows: Vec<EventRow> = read_records(path)?;

    let events = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(ClickEvent {
                event_id: row.event_id,
                timestamp: parse_row_timestamp(path, idx + 2, &row.timestamp)?,
                short_code: row.short_code,
                ip_address: row.ip_address,
                user_agent: row.user_agent,
                referrer: row.referrer,
                country_code: row.country_code,
                latency_ms: row.latency_ms,
                status_code: row.status_code,
                platform: row.platform,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Left join: every event is kept, unknown codes get `link: None`.
pub fn join(events: Vec<ClickEvent>, catalog: &HashMap<String, LinkMeta>) -> Vec<JoinedClick> {
    events
        .into_iter()
        .map(|event| {
            let link = catalog.get(&event.short_code).cloned();
            JoinedClick { event, link }
        })
        .collect()
}

/// Load both files and join them. Either file missing is an error.
pub fn load_dataset<P: AsRef<Path>, Q: AsRef<Path>>(
    catalog_path: P,
    events_path: Q,
) -> Result<Vec<JoinedClick>> {
    let catalog = load_catalog(catalog_path)?;
    let events = load_events(events_path)?;
    let joined = join(events, &catalog);

    let unmatched = joined.iter().filter(|row| row.link.is_none()).count();
    if unmatched > 0 {
        warn!("{} events reference short codes missing from the catalog", unmatched);
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = "url_id,short_code,original_url,user_id,created_at,expiration_date,is_active
6f1c2a9e-8d34-4b1a-9c57-0a6f3e2d1b4c,abCD12,https://dou.ua/a-b-c,1b4e28ba-2fa1-41d2-883f-0016d3cca427,2025-01-02 03:04:05,2026-01-02 03:04:05,True
0e7d6c5b-4a39-4281-b7f6-5e4d3c2b1a09,xyZW99,https://medium.com/d-e-f,1b4e28ba-2fa1-41d2-883f-0016d3cca427,2025-01-03 00:00:00,2026-01-03 00:00:00,False
";

    const EVENTS: &str = "event_id,short_code,timestamp,ip_address,user_agent,referrer,country_code,latency_ms,status_code,platform
a0a0a0a0-1111-4222-8333-444455556666,abCD12,2025-01-05 10:00:00,8.8.8.8,Mozilla/5.0,Google,UA,120,301,Mobile
b0b0b0b0-1111-4222-8333-444455556666,nope00,2025-01-05 11:00:00,9.9.9.9,Mozilla/5.0,Direct,PL,700,404,Desktop
";

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_and_join() {
        let catalog = temp_csv(CATALOG);
        let events = temp_csv(EVENTS);
        let rows = load_dataset(catalog.path(), events.path()).unwrap();

        assert_eq!(rows.len(), 2);
        let first = rows[0].link.as_ref().unwrap();
        assert!(first.is_active);
        assert_eq!(rows[0].event.platform, Platform::Mobile);
        assert_eq!(rows[0].event.ip_address, Ipv4Addr::new(8, 8, 8, 8));
        assert!(rows[1].link.is_none());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let events = temp_csv(EVENTS);
        let err = load_dataset("/nonexistent/urls_metadata.csv", events.path()).unwrap_err();
        assert!(matches!(err, ClickgenError::NotFound(_)));
        assert!(err.message().contains("urls_metadata.csv"));
    }

    #[test]
    fn test_bad_timestamp_is_date_parse() {
        let broken = EVENTS.replace("2025-01-05 11:00:00", "last tuesday");
        let events = temp_csv(&broken);
        let err = load_events(events.path()).unwrap_err();
        assert!(matches!(err, ClickgenError::DateParse(_)));
        assert!(err.message().contains("row 3"));
    }

    #[test]
    fn test_duplicate_catalog_code_keeps_first() {
        let mut content = CATALOG.to_string();
        content.push_str("11111111-2222-4333-8444-555555555555,abCD12,https://x.com,1b4e28ba-2fa1-41d2-883f-0016d3cca427,2025-02-01 00:00:00,2026-02-01 00:00:00,False\n");
        let catalog = temp_csv(&content);
        let map = load_catalog(catalog.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map["abCD12"].is_active);
    }
}
