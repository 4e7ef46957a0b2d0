use hyd_core::{
    models::{
        GrowthTrend, HydroPlant, Interconnection, IntermittentError, IntermittentProfile,
        IntermittentTechnology, LoadDurationCurve, Outlook, Period, SegmentMap, estimate_flow,
    },
    ports::MarketRepository,
};
use serde::{Deserialize, Serialize};

/// The interconnector between two zonal markets, as seen from the scenario's market
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct InterconnectorScenario {
    /// The number of zonal markets in the simulation; coupling needs exactly two
    #[serde(default = "two_markets")]
    pub markets: usize,
    /// Interconnector capacity per period, the last value holding thereafter
    #[serde(default)]
    pub capacity: Vec<f64>,
    /// Signed flow per segment found by clearing the previous period, if any
    #[serde(default)]
    pub previous_flows: Option<SegmentMap>,
    /// Flow assumed in every segment of the first period, overriding the configured default
    #[serde(default)]
    pub first_period_flow: Option<f64>,
}

fn two_markets() -> usize {
    2
}

impl InterconnectorScenario {
    fn capacity(&self, period: Period) -> f64 {
        let index = (period.0 as usize).min(self.capacity.len().saturating_sub(1));
        self.capacity.get(index).copied().unwrap_or(0.0)
    }
}

/// A self-contained description of one market in one simulation
///
/// This is the file format read by the command line tools. It carries exactly
/// the aggregates the offer computation consumes, and implements
/// [`MarketRepository`] on top of them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Scenario {
    /// Baseline load per segment
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "hyd_core::models::LoadDurationCurveDto")
    )]
    pub load_duration_curve: LoadDurationCurve,

    /// Demand growth factor per period
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "hyd_core::models::GrowthTrendDto")
    )]
    pub demand_growth: GrowthTrend,

    /// Hydro energy available to the market in every period
    pub energy_budget: f64,

    /// The intermittent technologies installed in the market
    #[serde(default)]
    pub intermittent: Vec<IntermittentTechnology>,

    /// The coupling to a neighbouring market, if any
    #[serde(default)]
    pub interconnector: Option<InterconnectorScenario>,

    /// The hydro plants of the market
    pub plants: Vec<HydroPlant>,

    /// First-period flow used when the interconnector does not set its own
    #[serde(skip)]
    pub default_first_period_flow: f64,
}

impl Scenario {
    /// Use `flow` as the first-period flow unless the scenario provides one
    pub fn with_default_first_period_flow(mut self, flow: f64) -> Self {
        self.default_first_period_flow = flow;
        self
    }
}

impl MarketRepository for Scenario {
    type Error = ScenarioError;

    fn load_duration_curve(&self) -> Result<&LoadDurationCurve, Self::Error> {
        Ok(&self.load_duration_curve)
    }

    fn demand_growth_trend(&self) -> Result<&GrowthTrend, Self::Error> {
        Ok(&self.demand_growth)
    }

    fn intermittent_profile(
        &self,
        period: Period,
        outlook: Outlook,
    ) -> Result<IntermittentProfile, Self::Error> {
        let profile = IntermittentProfile::aggregate(
            self.intermittent
                .iter()
                .filter(|technology| technology.lifetime.is_available(period, outlook)),
        )?;
        Ok(profile)
    }

    fn interconnection(&self, period: Period) -> Result<Interconnection, Self::Error> {
        let Some(link) = &self.interconnector else {
            return Ok(Interconnection::Isolated);
        };
        let first_period_flow = link
            .first_period_flow
            .unwrap_or(self.default_first_period_flow);

        let flows = match (period.previous(), &link.previous_flows) {
            (Some(previous), Some(flows)) => {
                let (before, now) = (link.capacity(previous), link.capacity(period));
                Some(
                    flows
                        .iter()
                        .map(|(&segment, &flow)| (segment, estimate_flow(flow, before, now)))
                        .collect::<SegmentMap>(),
                )
            }
            _ => None,
        };

        Ok(Interconnection::for_markets(
            link.markets,
            flows,
            first_period_flow,
        ))
    }

    fn energy_budget(&self, _period: Period) -> Result<f64, Self::Error> {
        Ok(self.energy_budget)
    }

    fn hydro_plants(&self) -> Result<&[HydroPlant], Self::Error> {
        Ok(&self.plants)
    }
}

/// Errors raised while reading market data from a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The intermittent fleet is malformed
    #[error(transparent)]
    Intermittent(#[from] IntermittentError),
}
