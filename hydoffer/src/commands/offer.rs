use crate::{AppConfig, CliError};
use hyd_core::models::{ForecastFactor, Period};
use hyd_solver::{PlantBids, current_offers, forecast_offers, io::Scenario};
use std::io::Read;
use tracing::{Level, event};

/// Whether the period is evaluated as it clears or ahead of time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Current,
    Forecast(ForecastFactor),
}

impl Mode {
    pub fn new(forecast: Option<f64>) -> Result<Self, CliError> {
        match forecast {
            None => Ok(Self::Current),
            Some(factor) if factor.is_finite() && factor >= 0.0 => {
                Ok(Self::Forecast(ForecastFactor(factor)))
            }
            Some(factor) => Err(CliError::ForecastFactor(factor)),
        }
    }

    pub fn evaluate(
        &self,
        scenario: &Scenario,
        period: Period,
        config: &AppConfig,
    ) -> anyhow::Result<Vec<PlantBids>> {
        let bids = match self {
            Self::Current => current_offers(scenario, period, config.engine)?,
            Self::Forecast(factor) => forecast_offers(scenario, *factor, period, config.engine)?,
        };

        event!(
            Level::INFO,
            mode = ?self,
            %period,
            plants = bids.len(),
            "evaluated scenario"
        );
        Ok(bids)
    }
}

/// Read a scenario, filling in configured defaults
pub fn read_scenario(input: impl Read, config: &AppConfig) -> anyhow::Result<Scenario> {
    let scenario = serde_json::from_reader::<_, Scenario>(input)?;
    Ok(scenario.with_default_first_period_flow(config.interconnector.first_period_flow))
}
