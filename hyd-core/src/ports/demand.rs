use crate::models::Period;

/// A source of the multiplier applied to a market's baseline load.
///
/// The current period reads the market's own growth trend, while forecasts
/// substitute a factor chosen by the caller. Either way the offer computation
/// only ever asks for a single number per period.
pub trait DemandFactor {
    /// The demand growth factor in effect at `period`
    fn demand_factor(&self, period: Period) -> f64;
}

impl<T: DemandFactor + ?Sized> DemandFactor for &T {
    fn demand_factor(&self, period: Period) -> f64 {
        (**self).demand_factor(period)
    }
}
