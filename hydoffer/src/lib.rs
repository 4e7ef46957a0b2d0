use clap::Parser;
use std::path::PathBuf;

mod config;
pub use config::*;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments: an optional config file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "HYD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self, config: &AppConfig) -> anyhow::Result<()> {
        match self.command {
            Commands::Offer {
                io,
                period,
                forecast,
            } => {
                let input = io.read()?;
                let scenario = offer::read_scenario(input, config)?;
                let mode = offer::Mode::new(forecast)?;
                let bids = mode.evaluate(&scenario, period.into(), config)?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &bids)?;
            }
            Commands::Schema { output } => {
                let output = output.write()?;
                serde_json::to_writer_pretty(output, &schema::scenario())?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Config file {0} does not exist")]
    MissingConfig(PathBuf),
    #[error("Forecast demand factor must be finite and non-negative, got {0}")]
    ForecastFactor(f64),
}
