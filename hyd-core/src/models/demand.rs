use super::Period;
use crate::ports::DemandFactor;

/// A market's demand growth trend, as a multiplier on the baseline load per period
///
/// The trend lists one factor per period starting at period 0. Periods beyond the
/// listed range keep the last factor. All factors must be finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GrowthTrendDto", into = "GrowthTrendDto")
)]
pub struct GrowthTrend(Vec<f64>);

impl GrowthTrend {
    /// Creates a trend from the per-period factors, validating all constraints
    pub fn new(factors: Vec<f64>) -> Result<Self, GrowthTrendError> {
        Self::try_from(GrowthTrendDto(factors))
    }

    /// A trend that never changes
    pub fn flat(factor: f64) -> Result<Self, GrowthTrendError> {
        Self::new(vec![factor])
    }

    /// The factor in effect at `period`
    pub fn value(&self, period: Period) -> f64 {
        let index = (period.0 as usize).min(self.0.len() - 1);
        self.0[index]
    }
}

impl DemandFactor for GrowthTrend {
    fn demand_factor(&self, period: Period) -> f64 {
        self.value(period)
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct GrowthTrendDto(pub Vec<f64>);

impl From<GrowthTrend> for GrowthTrendDto {
    fn from(value: GrowthTrend) -> Self {
        Self(value.0)
    }
}

impl TryFrom<GrowthTrendDto> for GrowthTrend {
    type Error = GrowthTrendError;

    fn try_from(value: GrowthTrendDto) -> Result<Self, Self::Error> {
        if value.0.is_empty() {
            return Err(GrowthTrendError::Empty);
        }
        for (period, factor) in value.0.iter().enumerate() {
            if !factor.is_finite() || *factor < 0.0 {
                return Err(GrowthTrendError::Invalid {
                    period: Period(period as u32),
                    factor: *factor,
                });
            }
        }
        Ok(Self(value.0))
    }
}

/// Errors that can occur when creating a GrowthTrend
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GrowthTrendError {
    /// No factors were provided
    #[error("a growth trend needs at least one factor")]
    Empty,
    /// A factor is negative or not finite
    #[error("invalid growth factor {factor} for period {period}")]
    Invalid {
        /// The period of the offending factor
        period: Period,
        /// The offending factor
        factor: f64,
    },
}

/// A caller-supplied demand factor for a future period
///
/// Forecasting agents do not read the market's trend at the forecast horizon;
/// they bring their own expectation of demand growth. The factor applies to
/// whatever period is queried.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ForecastFactor(pub f64);

impl DemandFactor for ForecastFactor {
    fn demand_factor(&self, _period: Period) -> f64 {
        self.0
    }
}
