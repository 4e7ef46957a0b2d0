use crate::models::{
    GrowthTrend, HydroPlant, Interconnection, IntermittentProfile, LoadDurationCurve, Outlook,
    Period,
};

/// Read-only access to the market data an offer is computed from.
///
/// The surrounding simulation owns plants, technologies and past clearing
/// results. The offer computation needs only a handful of aggregates from it,
/// which this trait exposes per period.
///
/// # Outlook
///
/// Methods taking an [`Outlook`] distinguish between what is known for the period
/// being cleared (plants actually operational) and what an agent may expect of a
/// future period (plants expected to be operational).
pub trait MarketRepository {
    /// Error type for underlying data access failures
    type Error: std::error::Error;

    /// The market's baseline load per segment
    fn load_duration_curve(&self) -> Result<&LoadDurationCurve, Self::Error>;

    /// The market's demand growth trend
    fn demand_growth_trend(&self) -> Result<&GrowthTrend, Self::Error>;

    /// The aggregate intermittent fleet in operation at `period`
    fn intermittent_profile(
        &self,
        period: Period,
        outlook: Outlook,
    ) -> Result<IntermittentProfile, Self::Error>;

    /// The coupling to the neighbouring market at `period`
    ///
    /// For coupled markets this carries the flows estimated from the previous
    /// period's clearing, or none at all in the first period.
    fn interconnection(&self, period: Period) -> Result<Interconnection, Self::Error>;

    /// The hydro energy the market may use during `period`
    fn energy_budget(&self, period: Period) -> Result<f64, Self::Error>;

    /// The hydro plants of the market, regardless of their lifetime
    fn hydro_plants(&self) -> Result<&[HydroPlant], Self::Error>;
}
