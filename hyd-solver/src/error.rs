use crate::{AllocationError, CurveError};
use hyd_core::models::{InterconnectorError, SegmentId};

/// Errors surfaced by an offer computation
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OfferError {
    /// The market data cannot produce a well-defined residual curve
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(CurveError),
    /// Two coupled markets need a flow estimate for every segment
    #[error("missing interconnector flow for segment {0}")]
    MissingInterconnectorData(SegmentId),
    /// The plant's capacity or energy budget is unusable
    #[error("invalid limits: {0}")]
    InvalidLimits(AllocationError),
    /// The energy budget ran out while no active rank had any duration
    #[error("no duration left to spread the remaining energy over before rank {rank}")]
    ZeroDivisorInAllocation {
        /// The first rank that was never reached
        rank: usize,
    },
}

impl From<CurveError> for OfferError {
    fn from(value: CurveError) -> Self {
        match value {
            CurveError::Interconnector(InterconnectorError::Missing(segment)) => {
                Self::MissingInterconnectorData(segment)
            }
            other => Self::InvalidConfiguration(other),
        }
    }
}

impl From<AllocationError> for OfferError {
    fn from(value: AllocationError) -> Self {
        match value {
            AllocationError::ZeroDivisor { rank } => Self::ZeroDivisorInAllocation { rank },
            other => Self::InvalidLimits(other),
        }
    }
}
