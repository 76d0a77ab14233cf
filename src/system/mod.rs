//! System-level modules
//!
//! Process setup shared by every command (currently logging).

pub mod logging;

pub use logging::init_logging;
