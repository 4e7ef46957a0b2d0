use crate::{EngineSettings, OfferEngine, OfferError};
use hyd_core::{
    models::{ForecastFactor, HydroBid, Outlook, Period},
    ports::{DemandFactor, MarketRepository},
};
use tracing::{Level, event};

/// The bids of one hydro plant
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantBids {
    /// The plant's name
    pub plant: String,
    /// One bid per segment, in load-duration curve order
    pub bids: Vec<HydroBid>,
}

/// Errors raised while computing the offers of a whole market
#[derive(Debug, thiserror::Error)]
pub enum MarketError<E> {
    /// The market data could not be read
    #[error("market data unavailable: {0}")]
    Repository(E),
    /// An offer computation failed
    #[error(transparent)]
    Offer(#[from] OfferError),
}

/// Bids of every hydro plant for the period being cleared
pub fn current_offers<R: MarketRepository>(
    market: &R,
    period: Period,
    settings: EngineSettings,
) -> Result<Vec<PlantBids>, MarketError<R::Error>> {
    let trend = market
        .demand_growth_trend()
        .map_err(MarketError::Repository)?;
    offers(market, trend, period, Outlook::Current, settings)
}

/// Bids every hydro plant expects to make in a future period
pub fn forecast_offers<R: MarketRepository>(
    market: &R,
    factor: ForecastFactor,
    period: Period,
    settings: EngineSettings,
) -> Result<Vec<PlantBids>, MarketError<R::Error>> {
    offers(market, factor, period, Outlook::Forecast, settings)
}

fn offers<R: MarketRepository, D: DemandFactor>(
    market: &R,
    demand: D,
    period: Period,
    outlook: Outlook,
    settings: EngineSettings,
) -> Result<Vec<PlantBids>, MarketError<R::Error>> {
    let curve = market
        .load_duration_curve()
        .map_err(MarketError::Repository)?;
    let intermittent = market
        .intermittent_profile(period, outlook)
        .map_err(MarketError::Repository)?;
    let interconnection = market
        .interconnection(period)
        .map_err(MarketError::Repository)?;
    let energy_budget = market
        .energy_budget(period)
        .map_err(MarketError::Repository)?;
    let plants = market.hydro_plants().map_err(MarketError::Repository)?;

    event!(
        Level::INFO,
        %period,
        ?outlook,
        plants = plants.len(),
        energy_budget,
        "computing hydro offers"
    );

    let engine = OfferEngine::new(curve, intermittent, demand, &interconnection, period, outlook)
        .with_settings(settings);

    plants
        .iter()
        .map(|plant| -> Result<PlantBids, MarketError<R::Error>> {
            Ok(PlantBids {
                plant: plant.name.clone(),
                bids: engine.bids(plant, energy_budget)?,
            })
        })
        .collect()
}
