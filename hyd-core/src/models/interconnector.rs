use super::{SegmentId, SegmentMap};
use crate::ports::FlowSource;

/// Estimate a segment's flow over the interconnector from the previous period
///
/// The flow found by the previous clearing is assumed to move by the full change
/// in interconnector capacity, in the direction it was already flowing. A segment
/// without flow stays without flow.
pub fn estimate_flow(previous_flow: f64, capacity_previous: f64, capacity_current: f64) -> f64 {
    let direction = if previous_flow > 0.0 {
        1.0
    } else if previous_flow < 0.0 {
        -1.0
    } else {
        0.0
    };
    previous_flow + direction * (capacity_current - capacity_previous)
}

/// How a market is coupled to its neighbour for the period being evaluated
///
/// Coupling only exists when exactly two zonal markets share an interconnector.
/// Flows are signed from the perspective of the market: positive values are
/// exports, negative values are imports.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "type")
)]
pub enum Interconnection {
    /// No coupling, the net flow is zero in every segment
    #[default]
    Isolated,
    /// Coupled to exactly one other market
    Coupled {
        /// Estimated flow per segment, or None if no clearing result exists yet
        flows: Option<SegmentMap>,
        /// Flow assumed in every segment while no clearing result exists
        #[cfg_attr(feature = "serde", serde(default))]
        first_period_flow: f64,
    },
}

impl Interconnection {
    /// Pick the coupling that applies to a simulation with `markets` zonal markets
    ///
    /// Any count other than two leaves the market isolated.
    pub fn for_markets(markets: usize, flows: Option<SegmentMap>, first_period_flow: f64) -> Self {
        if markets == 2 {
            Self::Coupled {
                flows,
                first_period_flow,
            }
        } else {
            Self::Isolated
        }
    }

    /// Check that every one of `ids` has an estimated flow
    pub fn validate(
        &self,
        ids: impl IntoIterator<Item = SegmentId>,
    ) -> Result<(), InterconnectorError> {
        match self {
            Self::Coupled {
                flows: Some(flows), ..
            } => match flows.first_missing(ids) {
                Some(id) => Err(InterconnectorError::Missing(id)),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

impl FlowSource for Interconnection {
    fn net_flow(&self, segment: SegmentId) -> Result<f64, InterconnectorError> {
        let flow = match self {
            Self::Isolated => return Ok(0.0),
            Self::Coupled { flows: None, first_period_flow } => *first_period_flow,
            Self::Coupled {
                flows: Some(flows), ..
            } => *flows
                .get(&segment)
                .ok_or(InterconnectorError::Missing(segment))?,
        };
        // importing power lowers the load the market has to serve itself
        Ok(-flow)
    }
}

/// Errors raised while resolving interconnector flows
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InterconnectorError {
    /// Two coupled markets need a flow for every segment
    #[error("no interconnector flow for segment {0}")]
    Missing(SegmentId),
}
