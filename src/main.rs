use anyhow::Context;
use clap::Parser;
use tracing::debug;

use clickgen::cli::Cli;
use clickgen::config::StaticConfig;
use clickgen::interfaces::cli::run_cli_command;
use clickgen::system::init_logging;

fn main() {
    if let Err(e) = run() {
        // 库层错误已自带彩色格式
        match e.downcast_ref::<clickgen::interfaces::cli::CliError>() {
            Some(cli_err) => eprintln!("{}", cli_err.format_colored()),
            None => match e.downcast_ref::<clickgen::errors::ClickgenError>() {
                Some(err) => eprintln!("{}", err.format_colored()),
                None => eprintln!("{:#}", e),
            },
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = StaticConfig::load(cli.config.as_deref())?;
    let _guard = init_logging(&config.logging).context("logging setup failed")?;
    debug!("Configuration: {:?}", config);

    run_cli_command(cli.command, &config)?;
    Ok(())
}
