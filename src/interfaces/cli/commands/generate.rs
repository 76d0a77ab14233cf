//! Generate dataset command

use chrono::Utc;
use colored::Colorize;

use crate::config::{GenerationConfig, OutputConfig};
use crate::generator;
use crate::interfaces::cli::CliError;

pub fn run_generate(generation: &GenerationConfig, output: &OutputConfig) -> Result<(), CliError> {
    println!(
        "{} preset {} (seed {})",
        "Generating dataset...".yellow(),
        generation.preset.to_string().cyan(),
        generation.seed
    );

    let summary = generator::run(generation, output, Utc::now())?;

    println!(
        "  {} {} ({} links, {} active)",
        "✓".green(),
        output.catalog_path().display().to_string().blue(),
        summary.catalog_entries,
        summary.active_links
    );
    println!(
        "  {} {} ({} events)",
        "✓".green(),
        output.events_path().display().to_string().blue(),
        summary.events
    );
    println!();
    println!("{}", "Top countries:".bold());
    for (code, share) in &summary.top_countries {
        println!("  {:<4} {:>6.2}%", code.cyan(), share * 100.0);
    }
    println!(
        "{} popular share {:.1}%, mean latency {:.1} ms, {} unique IPs",
        "ℹ".bold().blue(),
        summary.popular_share * 100.0,
        summary.latency_mean_ms,
        summary.unique_ips.to_string().green()
    );
    Ok(())
}
