//! CLI command implementations

mod config_gen;
mod generate;
mod presets;
mod report;

pub use config_gen::config_generate;
pub use generate::run_generate;
pub use presets::list_presets;
pub use report::{ReportArgs, run_report};
