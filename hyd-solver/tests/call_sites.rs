#![allow(unused_macros, dead_code)]
use hyd_core::models::{
    ForecastFactor, GrowthTrend, HydroPlant, Interconnection, IntermittentProfile,
    LoadDurationCurve, Period, SegmentId,
};
use hyd_solver::{OfferEngine, OfferError};
use rstest_reuse::template;

// The current-period and forecast queries share one engine. This template runs a
// test against both, with inputs chosen so that the two must agree.

#[derive(Clone, Copy, Debug)]
pub enum CallSite {
    Current,
    Forecast,
}

/// The market inputs of a test, minus the demand factor source
pub struct Market {
    pub curve: LoadDurationCurve,
    pub growth: f64,
    pub intermittent: IntermittentProfile,
    pub interconnection: Interconnection,
    pub period: Period,
}

impl CallSite {
    /// Offer per segment, in segment order
    pub fn offers(
        self,
        market: &Market,
        plant: &HydroPlant,
        energy_budget: f64,
    ) -> Result<Vec<f64>, OfferError> {
        match self {
            Self::Current => {
                let trend = GrowthTrend::flat(market.growth).unwrap();
                let engine = OfferEngine::current(
                    &market.curve,
                    &trend,
                    market.intermittent.clone(),
                    &market.interconnection,
                    market.period,
                );
                collect(market, |segment| engine.offer(plant, energy_budget, segment))
            }
            Self::Forecast => {
                let engine = OfferEngine::forecast(
                    &market.curve,
                    ForecastFactor(market.growth),
                    market.intermittent.clone(),
                    &market.interconnection,
                    market.period,
                );
                collect(market, |segment| engine.offer(plant, energy_budget, segment))
            }
        }
    }
}

fn collect(
    market: &Market,
    offer: impl Fn(SegmentId) -> Result<f64, OfferError>,
) -> Result<Vec<f64>, OfferError> {
    market.curve.ids().map(offer).collect()
}

#[template]
#[rstest]
#[case::current(CallSite::Current)]
#[case::forecast(CallSite::Forecast)]
pub fn both_call_sites(#[case] site: CallSite) -> () {}
