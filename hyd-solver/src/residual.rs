use hyd_core::{
    models::{InterconnectorError, IntermittentProfile, LoadDurationCurve, Period, SegmentId},
    ports::{DemandFactor, FlowSource},
};

/// The load left for hydro in one segment, together with the segment's duration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidualLoadPoint {
    /// Load net of intermittent infeed and interconnector flow
    pub residual_load: f64,
    /// Duration of the segment, in hours
    pub hours: f64,
    /// The segment the point was computed for, or None for the zero-load anchor
    pub origin: Option<SegmentId>,
}

impl ResidualLoadPoint {
    /// The point closing off the bottom of every residual curve
    pub const ANCHOR: Self = Self {
        residual_load: 0.0,
        hours: 0.0,
        origin: None,
    };
}

/// Compute the residual load of every segment that hydro can serve.
///
/// Segments with a non-positive residual load are left out. The returned points
/// are in segment order and always end with [`ResidualLoadPoint::ANCHOR`].
pub fn residual_points(
    curve: &LoadDurationCurve,
    intermittent: &IntermittentProfile,
    demand: &impl DemandFactor,
    flows: &impl FlowSource,
    period: Period,
) -> Result<Vec<ResidualLoadPoint>, CurveError> {
    let n = curve.len();
    if n <= 1 {
        return Err(CurveError::TooFewSegments(n));
    }

    let factor = demand.demand_factor(period);
    if !factor.is_finite() || factor < 0.0 {
        return Err(CurveError::DemandFactor(factor));
    }

    let mut points = Vec::with_capacity(n + 1);
    for load in curve {
        let id = load.segment.id;
        let residual_load =
            load.base_load * factor - intermittent.infeed(id, n) + flows.net_flow(id)?;

        if !residual_load.is_finite() {
            return Err(CurveError::NonFinite(id));
        }
        if residual_load > 0.0 {
            points.push(ResidualLoadPoint {
                residual_load,
                hours: load.segment.hours,
                origin: Some(id),
            });
        }
    }
    points.push(ResidualLoadPoint::ANCHOR);

    Ok(points)
}

/// Errors raised while building the residual load curve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// The infeed interpolation needs at least two segments
    #[error("a load-duration curve needs at least 2 segments, got {0}")]
    TooFewSegments(usize),
    /// The demand growth factor is negative or not finite
    #[error("invalid demand growth factor {0}")]
    DemandFactor(f64),
    /// A residual load evaluated to NaN or infinity
    #[error("residual load of segment {0} is not finite")]
    NonFinite(SegmentId),
    /// An interconnector flow could not be resolved
    #[error(transparent)]
    Interconnector(#[from] InterconnectorError),
}
