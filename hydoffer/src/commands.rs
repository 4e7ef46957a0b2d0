use super::{IOArgs, OutputArgs};
use clap::Subcommand;

pub mod offer;
pub mod schema;

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the bids of every hydro plant in the scenario
    Offer {
        #[command(flatten)]
        io: IOArgs,

        /// The period to evaluate, counting from 0
        #[arg(short, long, default_value_t = 0)]
        period: u32,

        /// Evaluate as a forecast under this demand growth factor
        #[arg(short, long)]
        forecast: Option<f64>,
    },

    /// Print the JSON schema of the scenario format
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
}
