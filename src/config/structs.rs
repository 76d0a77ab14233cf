use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::presets::{GenerationParams, Preset};
use crate::errors::Result;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "clickgen.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - generation: 预设、随机种子、数量覆盖
/// - output: 输出目录与文件名
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// ENV 前缀：CLICKGEN，分隔符：__
    /// 示例：CLICKGEN__GENERATION__SEED=7
    ///
    /// An explicitly passed path must exist; the default path is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let required = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("CLICKGEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<StaticConfig>()?;
        if std::path::Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub users: Option<usize>,
    #[serde(default)]
    pub urls: Option<usize>,
    #[serde(default)]
    pub clicks: Option<usize>,
    #[serde(default)]
    pub window_days: Option<i64>,
}

impl GenerationConfig {
    /// Preset parameters with the configured count overrides applied.
    pub fn to_params(&self) -> GenerationParams {
        let mut params = self.preset.params();
        if let Some(users) = self.users {
            params.num_users = users;
        }
        if let Some(urls) = self.urls {
            params.num_urls = urls;
        }
        if let Some(clicks) = self.clicks {
            params.num_clicks = clicks;
        }
        if let Some(days) = self.window_days {
            params.window_days = days;
        }
        params
    }
}

/// 输出文件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
    #[serde(default = "default_events_file")]
    pub events_file: String,
}

impl OutputConfig {
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.catalog_file)
    }

    pub fn events_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.events_file)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_seed() -> u64 {
    42
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_catalog_file() -> String {
    "urls_metadata.csv".to_string()
}

fn default_events_file() -> String {
    "clicks_stream.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

// ============================================================
// Default implementations
// ============================================================

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            seed: default_seed(),
            users: None,
            urls: None,
            clicks: None,
            window_days: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            catalog_file: default_catalog_file(),
            events_file: default_events_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
