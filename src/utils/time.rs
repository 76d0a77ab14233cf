//! 时间格式工具
//!
//! CSV 文件中的时间统一写为 `YYYY-MM-DD HH:MM:SS`（UTC，无时区后缀）。
//! 读取时同时接受带小数秒的写法和 RFC3339。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{ClickgenError, Result};

pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(CSV_TIMESTAMP_FORMAT).to_string()
}

/// 解析时间字符串，支持：
/// - `2024-03-01 12:00:00` / `2024-03-01 12:00:00.123456`
/// - `2024-03-01T12:00:00`
/// - RFC3339：`2024-03-01T12:00:00Z`
/// - 纯日期：`2024-03-01`（当天零点）
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        && let Some(naive) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(naive.and_utc());
    }

    Err(ClickgenError::date_parse(format!(
        "Unrecognized timestamp: '{}'",
        input
    )))
}

/// serde 适配器，用于 CSV 行中的时间字段
pub mod csv_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }
}
