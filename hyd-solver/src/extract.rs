use crate::{Allocation, SortedCurve};
use hyd_core::models::SegmentId;

/// The capacity offered in `segment`.
///
/// A segment that was dropped from the residual curve, or whose rank the
/// allocation never reached, offers 0.
pub fn offer_for(allocation: &Allocation, curve: &SortedCurve, segment: SegmentId) -> f64 {
    curve
        .rank_of(segment)
        .map_or(0.0, |rank| allocation.offer(rank))
}
