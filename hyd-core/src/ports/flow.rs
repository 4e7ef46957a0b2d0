use crate::models::{InterconnectorError, SegmentId};

/// A source of the net interconnector flow a market sees in each segment.
///
/// The value is added to the residual load as returned, so implementations must
/// already have applied the sign convention: imports are negative.
pub trait FlowSource {
    /// The signed net flow in `segment`
    fn net_flow(&self, segment: SegmentId) -> Result<f64, InterconnectorError>;
}

impl<T: FlowSource + ?Sized> FlowSource for &T {
    fn net_flow(&self, segment: SegmentId) -> Result<f64, InterconnectorError> {
        (**self).net_flow(segment)
    }
}
