pub mod presets;
mod structs;
pub mod validators;

pub use presets::{
    GenerationParams, IpStrategy, LatencyBounds, LatencyModel, LatencyShape, LogNormalParams,
    Platform, Preset, Referrer, TimestampStrategy,
};
pub use structs::*;
pub use validators::validate_params;
