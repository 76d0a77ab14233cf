//! 点击流分析
//!
//! 读回生成的两个 CSV 文件，按 `short_code` 左连接，然后计算报告所需的聚合：
//! - `loader`: 读取与连接
//! - `metrics`: 核心指标、Apdex、地理/设备分布、时段负载
//! - `features`: 派生特征与相关矩阵
//! - `pareto`: 链接热度集中度

pub mod features;
pub mod loader;
pub mod metrics;
pub mod pareto;
mod report;

pub use loader::{JoinedClick, LinkMeta, join, load_catalog, load_dataset, load_events};
pub use report::{Filter, Report, build_report};
