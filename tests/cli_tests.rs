#![cfg(feature = "cli")]

use clap::Parser;
use clickgen::cli::{Cli, Commands, ConfigCommands};
use clickgen::config::{Platform, Preset, StaticConfig};
use clickgen::interfaces::cli::run_cli_command;
use tempfile::TempDir;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["clickgen", "generate"]).unwrap();
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Generate {
                preset,
                seed,
                users,
                urls,
                clicks,
                out_dir,
            } => {
                assert!(preset.is_none());
                assert!(seed.is_none());
                assert!(users.is_none() && urls.is_none() && clicks.is_none());
                assert!(out_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "clickgen", "-c", "my.toml", "generate", "--preset", "europe", "--seed", "9",
            "--clicks", "500", "--out-dir", "data",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("my.toml"));
        match cli.command {
            Commands::Generate {
                preset,
                seed,
                clicks,
                out_dir,
                ..
            } => {
                assert_eq!(preset, Some(Preset::Europe));
                assert_eq!(seed, Some(9));
                assert_eq!(clicks, Some(500));
                assert_eq!(out_dir.as_deref(), Some("data"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_report_repeatable_filters() {
        let cli = Cli::try_parse_from([
            "clickgen", "report", "--platform", "mobile", "--platform", "Tablet", "--status",
            "404", "--status", "500", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                platforms,
                statuses,
                top,
                json,
                ..
            } => {
                assert_eq!(platforms, vec![Platform::Mobile, Platform::Tablet]);
                assert_eq!(statuses, vec![404, 500]);
                assert_eq!(top, 10);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_config_generate() {
        let cli = Cli::try_parse_from(["clickgen", "config", "generate", "out.toml", "--force"])
            .unwrap();
        match cli.command {
            Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            } => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["clickgen", "generate", "--preset", "mars"]).is_err());
        assert!(Cli::try_parse_from(["clickgen", "report", "--platform", "watch"]).is_err());
        assert!(Cli::try_parse_from(["clickgen", "generate", "--clicks", "-5"]).is_err());
        assert!(Cli::try_parse_from(["clickgen"]).is_err());
    }
}

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn test_generate_then_report() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let config = StaticConfig::default();

        let cli = Cli::try_parse_from([
            "clickgen", "generate", "--users", "10", "--urls", "60", "--clicks", "3000",
            "--out-dir", &out,
        ])
        .unwrap();
        run_cli_command(cli.command, &config).unwrap();
        assert!(dir.path().join("urls_metadata.csv").exists());
        assert!(dir.path().join("clicks_stream.csv").exists());

        let catalog = dir.path().join("urls_metadata.csv").to_string_lossy().to_string();
        let events = dir.path().join("clicks_stream.csv").to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "clickgen", "report", "--catalog", &catalog, "--events", &events, "--json",
        ])
        .unwrap();
        run_cli_command(cli.command, &config).unwrap();
    }

    #[test]
    fn test_report_on_missing_files_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = StaticConfig::default();
        config.output.dir = dir.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["clickgen", "report"]).unwrap();
        let err = run_cli_command(cli.command, &config).unwrap_err();
        assert!(err.to_string().contains("File Not Found"));
    }
}
