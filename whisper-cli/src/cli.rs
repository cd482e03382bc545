use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use log::debug;
use whisper_core::{
    Config, UnitGroup, WeatherError, WeatherFetcher, WeatherSnapshot, fetch_snapshot,
    fetcher_from_config,
};

use crate::display::Report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "whisper", version, about = "Weather forecasts for any location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key and preferred units.
    Configure,

    /// Show weather for a location.
    Show {
        /// Address or location name, e.g. "Conway, AR".
        location: String,

        /// Unit group for this lookup (us, metric, uk, base).
        #[arg(long)]
        units: Option<UnitGroup>,

        /// Print the snapshot as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },

    /// Look up locations one after another until an empty input.
    Search {
        /// Unit group for these lookups (us, metric, uk, base).
        #[arg(long)]
        units: Option<UnitGroup>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units, json } => {
                let config = load_config(units)?;
                let fetcher = fetcher_from_config(&config)?;

                let snapshot = fetch_snapshot(fetcher.as_ref(), &location)
                    .await
                    .map_err(|e| anyhow!(describe_error(&e)))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                } else {
                    print_report(&snapshot, config.unit_group);
                }
                Ok(())
            }
            Command::Search { units } => {
                let config = load_config(units)?;
                let fetcher = fetcher_from_config(&config)?;
                search_loop(fetcher.as_ref(), config.unit_group).await
            }
        }
    }
}

fn load_config(units: Option<UnitGroup>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(units) = units {
        config.unit_group = units;
    }
    Ok(config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Visual Crossing API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let start = UnitGroup::all().iter().position(|u| *u == config.unit_group).unwrap_or(0);
    let unit_group = Select::new("Units:", UnitGroup::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit group")?;

    config.api_key = Some(api_key.trim().to_string());
    config.unit_group = unit_group;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Each search replaces the previous snapshot; a rejected location keeps prompting.
async fn search_loop(fetcher: &dyn WeatherFetcher, units: UnitGroup) -> anyhow::Result<()> {
    loop {
        let location = match Text::new("Location:")
            .with_help_message("empty input or Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read location"),
        };
        if location.trim().is_empty() {
            break;
        }

        match fetch_snapshot(fetcher, &location).await {
            Ok(snapshot) => print_report(&snapshot, units),
            Err(e) => eprintln!("{}", describe_error(&e)),
        }
    }

    Ok(())
}

fn print_report(snapshot: &WeatherSnapshot, units: UnitGroup) {
    print!("{}", Report::new(snapshot, units));
}

/// User-facing text for a failed lookup.
fn describe_error(err: &WeatherError) -> String {
    match err {
        WeatherError::InvalidLocation => "Invalid location, try again.".to_string(),
        WeatherError::Network(msg) => {
            format!("Could not reach the weather service: {msg}\nPlease try again.")
        }
        WeatherError::MalformedPayload(detail) => {
            debug!("malformed payload: {detail}");
            "Something went wrong while reading the weather data.".to_string()
        }
    }
}
