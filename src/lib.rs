//! clickgen - synthetic data for URL-shortener analytics
//!
//! Generates a catalog of shortened URLs and a click stream against it, and
//! analyses the generated files.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `generator`: catalog and click-stream generation
//! - `analytics`: loading, joining and aggregating the generated files
//! - `config`: presets, static configuration, validation
//! - `interfaces`: command-line interface
//! - `system`: logging setup
//! - `utils`: CSV, time and IP helpers

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod system;
pub mod utils;
