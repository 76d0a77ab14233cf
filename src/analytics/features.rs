//! 特征工程：派生特征与相关矩阵

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use strum::{AsRefStr, EnumIter};

use super::JoinedClick;
use crate::config::Platform;
use crate::utils::time::csv_datetime;

/// Hour-of-day bucket: Night 0-6, Morning 7-12, Afternoon 13-18, Evening 19-23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr)]
pub enum PartOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl PartOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=6 => Self::Night,
            7..=12 => Self::Morning,
            13..=18 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Ordinal code in bucket order.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_ref())
    }
}

/// Platform code in alphabetical order of the names.
pub fn platform_code(platform: Platform) -> u8 {
    match platform {
        Platform::Desktop => 0,
        Platform::Mobile => 1,
        Platform::Tablet => 2,
    }
}

pub fn is_weekend(ts: &DateTime<Utc>) -> bool {
    ts.weekday().num_days_from_monday() >= 5
}

pub fn log_latency(latency_ms: u32) -> f64 {
    (latency_ms as f64).ln_1p()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    #[serde(with = "csv_datetime")]
    pub timestamp: DateTime<Utc>,
    pub latency_ms: u32,
    pub log_latency: f64,
    pub is_weekend: bool,
    pub part_of_day: PartOfDay,
    pub country_code: String,
}

impl FeatureRow {
    pub fn from_click(row: &JoinedClick) -> Self {
        let ts = row.event.timestamp;
        Self {
            timestamp: ts,
            latency_ms: row.event.latency_ms,
            log_latency: log_latency(row.event.latency_ms),
            is_weekend: is_weekend(&ts),
            part_of_day: PartOfDay::from_hour(ts.hour()),
            country_code: row.event.country_code.clone(),
        }
    }
}

/// Derived features of the first `limit` rows.
pub fn preview(rows: &[JoinedClick], limit: usize) -> Vec<FeatureRow> {
    rows.iter().take(limit).map(FeatureRow::from_click).collect()
}

pub const CORRELATION_COLUMNS: [&str; 5] = [
    "latency_ms",
    "status_code",
    "is_weekend",
    "part_of_day_code",
    "platform_code",
];

/// Pearson correlation over [`CORRELATION_COLUMNS`].
///
/// A cell is `None` when either column is constant (or there are fewer than
/// two rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: [&'static str; 5],
    pub values: [[Option<f64>; 5]; 5],
}

fn encode(row: &JoinedClick) -> [f64; 5] {
    let ts = row.event.timestamp;
    [
        row.event.latency_ms as f64,
        row.event.status_code as f64,
        if is_weekend(&ts) { 1.0 } else { 0.0 },
        PartOfDay::from_hour(ts.hour()).code() as f64,
        platform_code(row.event.platform) as f64,
    ]
}

pub fn correlation_matrix(rows: &[JoinedClick]) -> CorrelationMatrix {
    let encoded: Vec<[f64; 5]> = rows.iter().map(encode).collect();
    let mut values = [[None; 5]; 5];
    for i in 0..5 {
        for j in i..5 {
            let r = pearson(&encoded, i, j);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        columns: CORRELATION_COLUMNS,
        values,
    }
}

fn pearson(data: &[[f64; 5]], x: usize, y: usize) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let mean_x = data.iter().map(|r| r[x]).sum::<f64>() / n as f64;
    let mean_y = data.iter().map(|r| r[y]).sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for row in data {
        let dx = row[x] - mean_x;
        let dy = row[y] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metrics::test_support::{at, click};

    #[test]
    fn test_part_of_day_boundaries() {
        assert_eq!(PartOfDay::from_hour(0), PartOfDay::Night);
        assert_eq!(PartOfDay::from_hour(6), PartOfDay::Night);
        assert_eq!(PartOfDay::from_hour(7), PartOfDay::Morning);
        assert_eq!(PartOfDay::from_hour(12), PartOfDay::Morning);
        assert_eq!(PartOfDay::from_hour(13), PartOfDay::Afternoon);
        assert_eq!(PartOfDay::from_hour(18), PartOfDay::Afternoon);
        assert_eq!(PartOfDay::from_hour(19), PartOfDay::Evening);
        assert_eq!(PartOfDay::from_hour(23), PartOfDay::Evening);
        assert_eq!(PartOfDay::Evening.code(), 3);
    }

    #[test]
    fn test_weekend_and_log_latency() {
        assert!(!is_weekend(&at(6, 12)));
        assert!(is_weekend(&at(7, 12)));
        assert!(is_weekend(&at(8, 12)));
        assert_eq!(log_latency(0), 0.0);
        assert!((log_latency(99) - 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_preview_limit() {
        let rows = vec![click("a", at(2, 20), 10, 301, Platform::Mobile); 15];
        let preview = preview(&rows, 10);
        assert_eq!(preview.len(), 10);
        assert_eq!(preview[0].part_of_day, PartOfDay::Evening);
    }

    #[test]
    fn test_correlation_diagonal_and_constant_columns() {
        let rows = vec![
            click("a", at(2, 1), 100, 200, Platform::Mobile),
            click("a", at(2, 8), 200, 301, Platform::Desktop),
            click("a", at(7, 14), 300, 404, Platform::Tablet),
        ];
        let m = correlation_matrix(&rows);
        for i in 0..5 {
            assert!((m.values[i][i].unwrap() - 1.0).abs() < 1e-9);
        }
        // latency and status rise together
        assert!(m.values[0][1].unwrap() > 0.9);
        assert_eq!(m.values[0][1], m.values[1][0]);

        let constant = vec![click("a", at(2, 1), 100, 301, Platform::Mobile); 4];
        let m = correlation_matrix(&constant);
        assert_eq!(m.values[0][1], None);
    }
}
