//! Named generation presets
//!
//! A [`Preset`] expands into a complete [`GenerationParams`]. The two presets
//! share one generator; only the distributions differ.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumMessage};

/// 可选的数据生成预设
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumIter,
    AsRefStr,
    EnumMessage,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    #[default]
    #[strum(
        message = "Worldwide traffic, uniform timestamps, single log-normal latency, fresh IP per click"
    )]
    Global,
    #[strum(
        message = "European traffic, business-hours peaks, clipped latency mixture, pooled visitor IPs"
    )]
    Europe,
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Europe => write!(f, "europe"),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "europe" | "eu" => Ok(Self::Europe),
            _ => Err(format!("Invalid preset: '{}'. Valid: global, europe", s)),
        }
    }
}

/// Device class of a click.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr,
)]
pub enum Platform {
    Mobile,
    Desktop,
    Tablet,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            _ => Err(format!(
                "Invalid platform: '{}'. Valid: Mobile, Desktop, Tablet",
                s
            )),
        }
    }
}

/// Traffic source of a click.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr,
)]
pub enum Referrer {
    Google,
    Facebook,
    Direct,
    Twitter,
    Instagram,
}

impl std::fmt::Display for Referrer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Parameters of one log-normal component (of the underlying normal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogNormalParams {
    pub mu: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LatencyShape {
    Single(LogNormalParams),
    /// Two components drawn separately, concatenated, then shuffled.
    Mixture {
        normal: LogNormalParams,
        lag: LogNormalParams,
        lag_weight: f64,
    },
}

/// Inclusive clipping range for latency values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyBounds {
    pub min_ms: u32,
    pub max_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyModel {
    pub shape: LatencyShape,
    pub bounds: Option<LatencyBounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimestampStrategy {
    /// Uniform offset in seconds across the whole window.
    Uniform,
    /// Uniform day, weighted hour of day, uniform minute.
    Diurnal { hour_weights: [f64; 24] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpStrategy {
    /// A fresh address per click (unbounded cardinality).
    PerEvent,
    /// Addresses drawn with replacement from a fixed pool.
    Pooled { size: usize },
}

/// Everything a generation run needs, besides the RNG and the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub num_users: usize,
    pub num_urls: usize,
    pub num_clicks: usize,
    pub window_days: i64,
    pub retention_days: i64,
    pub active_probability: f64,
    pub domains: Vec<String>,
    pub countries: Vec<(String, f64)>,
    pub popular_fraction: f64,
    pub popular_share: f64,
    pub timestamps: TimestampStrategy,
    pub latency: LatencyModel,
    pub ip: IpStrategy,
    pub user_agent_pool: usize,
    pub referrers: Vec<(Referrer, f64)>,
    pub platforms: Vec<(Platform, f64)>,
    pub status_codes: Vec<(u16, f64)>,
}

pub const DEFAULT_USERS: usize = 150;
pub const DEFAULT_URLS: usize = 1000;
pub const DEFAULT_CLICKS: usize = 200_000;
pub const DEFAULT_WINDOW_DAYS: i64 = 90;
pub const RETENTION_DAYS: i64 = 365;

const DOMAINS: [&str; 8] = [
    "github.com",
    "google.com",
    "medium.com",
    "youtube.com",
    "aws.amazon.com",
    "dou.ua",
    "rozetka.com.ua",
    "stackoverflow.com",
];

const GLOBAL_COUNTRIES: [(&str, f64); 21] = [
    ("UA", 0.45),
    ("PL", 0.10),
    ("US", 0.10),
    ("DE", 0.08),
    ("GB", 0.05),
    ("NL", 0.04),
    ("CA", 0.03),
    ("FR", 0.03),
    ("ES", 0.02),
    ("IT", 0.02),
    ("TR", 0.01),
    ("IN", 0.01),
    ("JP", 0.01),
    ("BR", 0.01),
    ("AU", 0.01),
    ("CN", 0.005),
    ("SE", 0.005),
    ("NO", 0.005),
    ("FI", 0.005),
    ("MX", 0.005),
    ("KZ", 0.005),
];

const EUROPE_COUNTRIES: [(&str, f64); 20] = [
    ("UA", 0.30),
    ("PL", 0.15),
    ("DE", 0.12),
    ("GB", 0.08),
    ("FR", 0.06),
    ("NL", 0.05),
    ("IT", 0.04),
    ("ES", 0.04),
    ("CZ", 0.03),
    ("RO", 0.03),
    ("SE", 0.02),
    ("AT", 0.02),
    ("BE", 0.02),
    ("LT", 0.01),
    ("LV", 0.01),
    ("EE", 0.01),
    ("FI", 0.01),
    ("NO", 0.01),
    ("DK", 0.01),
    ("PT", 0.01),
];

/// Quiet nights, a morning ramp, and two business-hours peaks.
pub const BUSINESS_HOURS: [f64; 24] = [
    0.010, 0.005, 0.005, 0.005, 0.005, 0.010, // 00-05
    0.020, 0.040, 0.060, 0.080, 0.080, 0.070, // 06-11
    0.060, 0.070, 0.080, 0.080, 0.070, 0.060, // 12-17
    0.050, 0.050, 0.040, 0.030, 0.020, 0.015, // 18-23
];

fn country_table(table: &[(&str, f64)]) -> Vec<(String, f64)> {
    table
        .iter()
        .map(|(code, weight)| (code.to_string(), *weight))
        .collect()
}

fn uniform_referrers() -> Vec<(Referrer, f64)> {
    use strum::IntoEnumIterator;
    Referrer::iter().map(|r| (r, 1.0)).collect()
}

impl Preset {
    /// Expand the preset into its full parameter set.
    pub fn params(self) -> GenerationParams {
        let platforms = vec![
            (Platform::Mobile, 0.55),
            (Platform::Desktop, 0.40),
            (Platform::Tablet, 0.05),
        ];
        let status_codes: Vec<(u16, f64)> = vec![(200, 0.05), (301, 0.90), (404, 0.04), (500, 0.01)];
        let domains = DOMAINS.iter().map(|d| d.to_string()).collect();

        match self {
            Preset::Global => GenerationParams {
                num_users: DEFAULT_USERS,
                num_urls: DEFAULT_URLS,
                num_clicks: DEFAULT_CLICKS,
                window_days: DEFAULT_WINDOW_DAYS,
                retention_days: RETENTION_DAYS,
                active_probability: 0.90,
                domains,
                countries: country_table(&GLOBAL_COUNTRIES),
                popular_fraction: 0.2,
                popular_share: 0.8,
                timestamps: TimestampStrategy::Uniform,
                latency: LatencyModel {
                    shape: LatencyShape::Single(LogNormalParams {
                        mu: 4.2,
                        sigma: 0.7,
                    }),
                    bounds: None,
                },
                ip: IpStrategy::PerEvent,
                user_agent_pool: 100,
                referrers: uniform_referrers(),
                platforms,
                status_codes,
            },
            Preset::Europe => GenerationParams {
                num_users: DEFAULT_USERS,
                num_urls: DEFAULT_URLS,
                num_clicks: DEFAULT_CLICKS,
                window_days: DEFAULT_WINDOW_DAYS,
                retention_days: RETENTION_DAYS,
                active_probability: 0.95,
                domains,
                countries: country_table(&EUROPE_COUNTRIES),
                popular_fraction: 0.2,
                popular_share: 0.8,
                timestamps: TimestampStrategy::Diurnal {
                    hour_weights: BUSINESS_HOURS,
                },
                latency: LatencyModel {
                    shape: LatencyShape::Mixture {
                        normal: LogNormalParams {
                            mu: 4.0,
                            sigma: 0.5,
                        },
                        lag: LogNormalParams {
                            mu: 6.0,
                            sigma: 0.6,
                        },
                        lag_weight: 0.1,
                    },
                    bounds: Some(LatencyBounds {
                        min_ms: 5,
                        max_ms: 3000,
                    }),
                },
                ip: IpStrategy::Pooled { size: 35_000 },
                user_agent_pool: 50,
                referrers: uniform_referrers(),
                platforms,
                status_codes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("global".parse::<Preset>(), Ok(Preset::Global));
        assert_eq!("Europe".parse::<Preset>(), Ok(Preset::Europe));
        assert_eq!("eu".parse::<Preset>(), Ok(Preset::Europe));
        assert!("mars".parse::<Preset>().is_err());
    }

    #[test]
    fn test_preset_display_matches_serde_name() {
        for preset in Preset::iter() {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset));
            assert_eq!(preset.as_ref(), preset.to_string());
        }
    }

    #[test]
    fn test_presets_have_descriptions() {
        for preset in Preset::iter() {
            assert!(preset.get_message().is_some());
        }
    }

    #[test]
    fn test_global_preset_country_table() {
        let params = Preset::Global.params();
        assert_eq!(params.countries.len(), 21);
        assert_eq!(params.countries[0], ("UA".to_string(), 0.45));
        assert_eq!(params.ip, IpStrategy::PerEvent);
        assert!(params.latency.bounds.is_none());
    }

    #[test]
    fn test_europe_preset_is_bounded_and_pooled() {
        let params = Preset::Europe.params();
        assert_eq!(
            params.latency.bounds,
            Some(LatencyBounds {
                min_ms: 5,
                max_ms: 3000
            })
        );
        assert_eq!(params.ip, IpStrategy::Pooled { size: 35_000 });
        assert!(matches!(
            params.timestamps,
            TimestampStrategy::Diurnal { .. }
        ));
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("mobile".parse::<Platform>(), Ok(Platform::Mobile));
        assert_eq!("Desktop".parse::<Platform>(), Ok(Platform::Desktop));
        assert!("watch".parse::<Platform>().is_err());
    }
}
