//! CSV 读写共享逻辑
//!
//! 生成器写出目录与点击流，报告模块读回。所有行类型都通过 serde 序列化。

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::errors::{ClickgenError, Result};

/// 写出记录到 CSV 文件（带表头）
///
/// Parent directories are created as needed.
pub fn write_records<'a, T, I, P>(records: I, path: P) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ClickgenError::file_operation(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        ClickgenError::file_operation(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut csv_writer = WriterBuilder::new().from_writer(BufWriter::new(file));

    let mut written = 0;
    for record in records {
        csv_writer.serialize(record).map_err(|e| {
            ClickgenError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
        written += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ClickgenError::file_operation(format!("Failed to flush CSV: {}", e)))?;

    Ok(written)
}

/// 从 CSV 文件读取全部记录
///
/// A missing file is reported as `NotFound`; any malformed row aborts the read.
pub fn read_records<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(ClickgenError::not_found(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| {
        ClickgenError::file_operation(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<T>().enumerate() {
        let row_num = row_idx + 2; // 1-based，跳过 header
        let record = result.map_err(|e| {
            ClickgenError::serialization(format!(
                "{} row {}: {}",
                path.display(),
                row_num,
                e
            ))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// `True` / `False` 形式的布尔值（与 pandas 导出的格式一致）
pub mod title_case_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean '{}'",
                other
            ))),
        }
    }
}
