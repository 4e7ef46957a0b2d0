use clap::Parser as _;
use hydoffer::{AppConfig, BaseArgs};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub fn main() -> anyhow::Result<()> {
    // Library crates report through `tracing`; print those events to stderr so
    // they never mix with JSON written to stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = BaseArgs::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    args.evaluate(&config)
}
