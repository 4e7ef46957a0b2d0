use crate::{Allocation, Limits, OfferError, SortedCurve, allocate, offer_for, residual_points};
use hyd_core::{
    models::{
        ForecastFactor, GrowthTrend, HydroBid, HydroPlant, Interconnection, IntermittentProfile,
        LoadDurationCurve, Outlook, Period, SegmentId,
    },
    ports::{DemandFactor, FlowSource},
};
use tracing::{Level, event};

/// Numerical settings of the offer engine
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EngineSettings {
    /// Absolute slack on the energy budget, in capacity times hours
    pub energy_tolerance: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            energy_tolerance: 1e-6,
        }
    }
}

/// The offers of one plant for one period
#[derive(Clone, Debug)]
pub enum PlantOffer {
    /// The plant is not in operation and offers nothing
    Idle,
    /// The plant's capacity was waterfilled into the residual curve
    Allocated {
        /// The ranked residual curve
        curve: SortedCurve,
        /// The offers per rank
        allocation: Allocation,
    },
}

impl PlantOffer {
    /// The capacity offered in `segment`
    pub fn offer(&self, segment: SegmentId) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Allocated { curve, allocation } => offer_for(allocation, curve, segment),
        }
    }
}

/// Computes hydro offers against one market in one period.
///
/// The engine is parameterized by where the demand growth factor comes from and
/// where the interconnector flows come from. Queries for the period being cleared
/// use the market's growth trend and realized plant lifetimes (see
/// [`OfferEngine::current`]); forecasts use a caller-supplied factor and expected
/// lifetimes (see [`OfferEngine::forecast`]). Everything else is shared.
///
/// The engine holds no mutable state. Every call rebuilds the residual curve and
/// the allocation from scratch, so one engine can serve any number of plants.
#[derive(Clone, Debug)]
pub struct OfferEngine<'a, D, F> {
    curve: &'a LoadDurationCurve,
    intermittent: IntermittentProfile,
    demand: D,
    flows: F,
    period: Period,
    outlook: Outlook,
    settings: EngineSettings,
}

impl<'a> OfferEngine<'a, &'a GrowthTrend, &'a Interconnection> {
    /// An engine for the period currently being cleared
    pub fn current(
        curve: &'a LoadDurationCurve,
        trend: &'a GrowthTrend,
        intermittent: IntermittentProfile,
        interconnection: &'a Interconnection,
        period: Period,
    ) -> Self {
        Self::new(
            curve,
            intermittent,
            trend,
            interconnection,
            period,
            Outlook::Current,
        )
    }
}

impl<'a> OfferEngine<'a, ForecastFactor, &'a Interconnection> {
    /// An engine for a future period, under an assumed demand growth factor
    pub fn forecast(
        curve: &'a LoadDurationCurve,
        factor: ForecastFactor,
        intermittent: IntermittentProfile,
        interconnection: &'a Interconnection,
        period: Period,
    ) -> Self {
        Self::new(
            curve,
            intermittent,
            factor,
            interconnection,
            period,
            Outlook::Forecast,
        )
    }
}

impl<'a, D: DemandFactor, F: FlowSource> OfferEngine<'a, D, F> {
    /// An engine with arbitrary demand and flow sources
    pub fn new(
        curve: &'a LoadDurationCurve,
        intermittent: IntermittentProfile,
        demand: D,
        flows: F,
        period: Period,
        outlook: Outlook,
    ) -> Self {
        Self {
            curve,
            intermittent,
            demand,
            flows,
            period,
            outlook,
            settings: EngineSettings::default(),
        }
    }

    /// Replace the numerical settings
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The period the engine evaluates
    pub fn period(&self) -> Period {
        self.period
    }

    /// Build and rank the residual load curve
    pub fn residual_curve(&self) -> Result<SortedCurve, OfferError> {
        let points = residual_points(
            self.curve,
            &self.intermittent,
            &self.demand,
            &self.flows,
            self.period,
        )?;
        Ok(SortedCurve::new(points))
    }

    /// Waterfill a plant's capacity under the given energy budget
    pub fn allocate(
        &self,
        plant: &HydroPlant,
        energy_budget: f64,
    ) -> Result<PlantOffer, OfferError> {
        if !plant.lifetime.is_available(self.period, self.outlook) {
            event!(
                Level::WARN,
                plant = %plant.name,
                period = %self.period,
                outlook = ?self.outlook,
                "plant is not in operation, offering nothing"
            );
            return Ok(PlantOffer::Idle);
        }

        let limits = Limits::new(
            plant.nominal_capacity,
            energy_budget,
            self.settings.energy_tolerance,
        )?;
        let curve = self.residual_curve()?;
        let allocation = allocate(&curve, &limits)?;

        event!(
            Level::DEBUG,
            plant = %plant.name,
            period = %self.period,
            energy = allocation.energy(),
            "computed hydro allocation"
        );
        Ok(PlantOffer::Allocated { curve, allocation })
    }

    /// The capacity a plant offers in a single segment
    pub fn offer(
        &self,
        plant: &HydroPlant,
        energy_budget: f64,
        segment: SegmentId,
    ) -> Result<f64, OfferError> {
        Ok(self.allocate(plant, energy_budget)?.offer(segment))
    }

    /// A zero-priced bid for every segment, in load-duration curve order
    pub fn bids(
        &self,
        plant: &HydroPlant,
        energy_budget: f64,
    ) -> Result<Vec<HydroBid>, OfferError> {
        let offer = self.allocate(plant, energy_budget)?;
        Ok(self
            .curve
            .ids()
            .map(|segment| HydroBid::new(segment, offer.offer(segment)))
            .collect())
    }
}
