use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use forecast_core::{DecodeOptions, Flag, Forecast, UnknownTokenPolicy, codec};
use inquire::{Confirm, Select};
use std::{fs, path::{Path, PathBuf}};
use tracing::info;

use crate::{config::Config, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Inspect saved forecast responses")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively choose decoding and display preferences.
    Configure,

    /// Summarize a saved forecast response.
    Inspect {
        /// Path to a JSON response body.
        file: PathBuf,

        /// Fail on unrecognized enumeration tokens.
        #[arg(long)]
        strict: bool,
    },

    /// Decode a saved response and write it back with only mapped fields.
    Normalize {
        /// Path to a JSON response body.
        file: PathBuf,

        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on unrecognized enumeration tokens.
        #[arg(long)]
        strict: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Inspect { file, strict } => {
                let mut forecast = read_forecast(&file, &config.decode_options(strict))?;
                forecast.set_feels_like(config.feels_like);

                print!("{}", report::render(&forecast, Utc::now()));
                Ok(())
            }
            Command::Normalize { file, output, strict } => {
                let forecast = read_forecast(&file, &config.decode_options(strict))?;
                let mut text = codec::to_string_pretty(&forecast);
                text.push('\n');

                match output {
                    Some(path) => {
                        fs::write(&path, text)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        info!(path = %path.display(), "wrote normalized response");
                    }
                    None => print!("{text}"),
                }
                Ok(())
            }
        }
    }
}

fn read_forecast(path: &Path, options: &DecodeOptions) -> Result<Forecast> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    codec::from_slice_with(&bytes, options)
        .with_context(|| format!("Failed to decode forecast response: {}", path.display()))
}

fn configure(mut config: Config) -> Result<()> {
    let policies = UnknownTokenPolicy::all().to_vec();
    let cursor = policies
        .iter()
        .position(|policy| *policy == config.unknown_tokens)
        .unwrap_or_default();

    config.unknown_tokens =
        Select::new("Unrecognized icon, precipitation or unit tokens:", policies)
            .with_starting_cursor(cursor)
            .with_help_message("preserve keeps the raw token, reject fails the decode")
            .prompt()?;

    config.feels_like = Confirm::new("Report apparent (\"feels like\") temperatures?")
        .with_default(config.feels_like)
        .prompt()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    if config.feels_like != Flag::DEFAULT_FEELS_LIKE {
        println!("Actual temperatures will be reported.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_normalize_with_output() {
        let args = ["forecast", "-vv", "normalize", "in.json", "-o", "out.json", "--strict"];
        let cli = Cli::try_parse_from(args).expect("arguments should parse");

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Normalize { file, output, strict } => {
                assert_eq!(file, PathBuf::from("in.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn read_forecast_reports_missing_file() {
        let path = Path::new("/nonexistent/forecast.json");
        let err = read_forecast(path, &DecodeOptions::default()).unwrap_err();

        assert!(err.to_string().contains("Failed to read /nonexistent/forecast.json"));
    }
}
