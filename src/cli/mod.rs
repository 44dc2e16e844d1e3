mod report;

pub use report::{render_json, render_text, ReportArgs};

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::services::{DataLoaderService, FileSource, RandomUserSource, RecordSource};
use crate::types::Result;

/// Fetch a batch of demo users and chart who they are
#[derive(Parser)]
#[command(name = "userstats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the batch comes from (overrides the config file)
#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Number of users to fetch
    #[arg(short = 'n', long, global = true)]
    results: Option<u32>,

    /// Nationality filter, comma-separated (e.g. br,us)
    #[arg(long, value_delimiter = ',', global = true)]
    nat: Vec<String>,

    /// Seed for a reproducible batch
    #[arg(long, global = true)]
    seed: Option<String>,

    /// Read a saved randomuser.me payload instead of fetching
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    /// Path to config file (default: ~/.userstats/config.json)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print the statistics to stdout
    Report(ReportArgs),
}

impl SourceArgs {
    fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the file config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(results) = self.results {
            config.results = results;
        }
        if !self.nat.is_empty() {
            config.nationalities = self.nat.clone();
        }
        if let Some(seed) = &self.seed {
            config.seed = Some(seed.clone());
        }
        config
    }

    fn build_source(&self, config: &Config) -> Result<Arc<dyn RecordSource>> {
        let source: Arc<dyn RecordSource> = match &self.input {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(RandomUserSource::new(config)?),
        };
        Ok(source)
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = self.source.load_config()?;
        let tui = matches!(self.command, None | Some(Commands::Tui));
        crate::logging::init(self.verbose, &config.log_level, tui);
        debug!(?config, "configuration loaded");

        let loader = DataLoaderService::new(self.source.build_source(&config)?);

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(loader),
            Some(Commands::Report(args)) => Ok(args.run(&loader)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["userstats"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.source.input.is_none());
    }

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::try_parse_from(["userstats", "report"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportArgs { json: false }))
        ));
    }

    #[test]
    fn test_cli_parse_report_json() {
        let cli = Cli::try_parse_from(["userstats", "report", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportArgs { json: true }))
        ));
    }

    #[test]
    fn test_cli_parse_global_source_flags() {
        let cli = Cli::try_parse_from([
            "userstats", "report", "-n", "50", "--nat", "br,us", "--seed", "abc", "-v",
        ])
        .unwrap();
        assert_eq!(cli.source.results, Some(50));
        assert_eq!(cli.source.nat, vec!["br", "us"]);
        assert_eq!(cli.source.seed.as_deref(), Some("abc"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let args = SourceArgs {
            results: Some(10),
            nat: vec!["fr".into()],
            seed: Some("s".into()),
            ..SourceArgs::default()
        };
        let config = args.apply(Config {
            results: 99,
            nationalities: vec!["de".into()],
            ..Config::default()
        });

        assert_eq!(config.results, 10);
        assert_eq!(config.nationalities, vec!["fr"]);
        assert_eq!(config.seed.as_deref(), Some("s"));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let file_config = Config {
            results: 99,
            nationalities: vec!["de".into()],
            ..Config::default()
        };
        let config = SourceArgs::default().apply(file_config.clone());
        assert_eq!(config, file_config);
    }

    #[test]
    fn test_input_selects_file_source() {
        let args = SourceArgs {
            input: Some(PathBuf::from("saved.json")),
            ..SourceArgs::default()
        };
        let source = args.build_source(&Config::default()).unwrap();
        assert_eq!(source.name(), "saved.json");

        let source = SourceArgs::default()
            .build_source(&Config::default())
            .unwrap();
        assert_eq!(source.name(), "randomuser.me");
    }
}
