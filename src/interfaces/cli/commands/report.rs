//! Report command: load the generated files, filter, print the analysis

use std::path::PathBuf;

use colored::Colorize;

use crate::analytics::{Filter, Report, build_report, load_dataset};
use crate::config::Platform;
use crate::interfaces::cli::CliError;

#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub catalog: PathBuf,
    pub events: PathBuf,
    pub platforms: Vec<Platform>,
    pub statuses: Vec<u16>,
    pub top: usize,
    pub json: bool,
}

pub fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let rows = load_dataset(&args.catalog, &args.events)?;
    let filter = Filter {
        platforms: args.platforms,
        statuses: args.statuses,
    };
    let rows = filter.apply(rows);
    let report = build_report(&rows, args.top);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::CommandError(format!("Failed to encode report: {}", e)))?;
        println!("{}", json);
    } else {
        print_report(&report, args.top);
    }
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().green());
}

fn print_report(report: &Report, top: usize) {
    let h = &report.headline;
    section("Overview");
    println!("  {:<16} {}", "Total requests", h.total_requests.to_string().cyan());
    println!(
        "  {:<16} {}",
        "Mean latency",
        h.mean_latency_ms
            .map(|ms| format!("{:.1} ms", ms))
            .unwrap_or_else(|| "-".to_string())
            .cyan()
    );
    println!("  {:<16} {}", "Error rate", format!("{:.2}%", h.error_rate).cyan());
    println!("  {:<16} {}", "Unique IPs", h.unique_ips.to_string().cyan());

    if h.total_requests == 0 {
        println!();
        println!("{} No events match the filter", "ℹ".bold().blue());
        return;
    }

    let a = &report.apdex;
    let score = format!("{:.3}", a.score);
    let score = if a.score >= 0.94 {
        score.green()
    } else if a.score >= 0.7 {
        score.yellow()
    } else {
        score.red()
    };
    section(&format!("Apdex (T = {} ms)", a.threshold_ms));
    println!(
        "  score {}  satisfied {}  tolerating {}  frustrated {}",
        score, a.satisfied, a.tolerating, a.frustrated
    );

    section("Countries");
    for country in report.countries.iter().take(top) {
        println!(
            "  {:<4} {:>8} {:>7.2}%",
            country.country_code.cyan(),
            country.count,
            country.share * 100.0
        );
    }
    if report.countries.len() > top {
        println!(
            "  {}",
            format!("... {} more", report.countries.len() - top).dimmed()
        );
    }

    section(&format!("Platform -> top {} user agents", top));
    for group in &report.user_agents {
        println!("  {} ({})", group.platform.to_string().cyan().bold(), group.total);
        for agent in &group.agents {
            println!("    {:>7}  {}", agent.count, agent.user_agent.dimmed());
        }
    }

    section("Weekday x hour (requests)");
    let max = report.heatmap.max().max(1);
    const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
    println!("       {}", (0..24).map(|h| format!("{:<2}", h % 10)).collect::<String>().dimmed());
    for (day, counts) in report.heatmap.days.iter().zip(&report.heatmap.counts) {
        let cells: String = counts
            .iter()
            .map(|c| {
                let shade = SHADES[(c * (SHADES.len() - 1)).div_ceil(max)];
                format!("{}{}", shade, shade)
            })
            .collect();
        println!("  {:<4} {}", day, cells);
    }

    let busiest = report.hourly.iter().max_by_key(|h| h.requests);
    section("Hourly load");
    println!("  {} hours covered", report.hourly.len());
    if let Some(peak) = busiest {
        println!(
            "  peak {} with {} requests (mean {:.1} ms)",
            peak.hour.format("%Y-%m-%d %H:00").to_string().cyan(),
            peak.requests,
            peak.mean_latency_ms.unwrap_or_default()
        );
    }

    section("Feature preview");
    println!(
        "  {}",
        format!(
            "{:<20} {:>8} {:>8} {:>8} {:<10} {}",
            "timestamp", "latency", "log", "weekend", "part", "country"
        )
        .dimmed()
    );
    for row in &report.features {
        println!(
            "  {:<20} {:>8} {:>8.3} {:>8} {:<10} {}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.latency_ms,
            row.log_latency,
            row.is_weekend,
            row.part_of_day,
            row.country_code
        );
    }

    section("Correlation");
    let columns = &report.correlation.columns;
    println!(
        "  {:<17}{}",
        "",
        columns
            .iter()
            .map(|c| format!("{:>17}", c))
            .collect::<String>()
            .dimmed()
    );
    for (name, values) in columns.iter().zip(&report.correlation.values) {
        let cells: String = values
            .iter()
            .map(|v| match v {
                Some(r) => format!("{:>17.3}", r),
                None => format!("{:>17}", "-"),
            })
            .collect();
        println!("  {:<17}{}", name, cells);
    }

    let p = &report.pareto;
    section("Pareto");
    for row in p.rows.iter().take(top) {
        println!(
            "  #{:<4} {:<8} {:>7} clicks  {:>6.2}% cumulative",
            row.rank,
            row.short_code.cyan(),
            row.clicks,
            row.cumulative_share * 100.0
        );
    }
    println!(
        "{} top 20% of links hold {} of clicks",
        "ℹ".bold().blue(),
        format!("{:.1}%", p.top_fifth_share * 100.0).green()
    );

    let j = &report.join;
    if j.unmatched > 0 {
        println!(
            "{} {} events reference unknown short codes",
            "⚠".bold().yellow(),
            j.unmatched.to_string().yellow()
        );
    } else {
        println!("{} all {} events matched the catalog", "✓".green(), j.matched);
    }
}
