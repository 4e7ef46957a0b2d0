use super::SegmentId;

/// A hydro plant's bid into one segment of the dispatch plan
///
/// Hydro is offered as a price taker: the price is always zero, so the offered
/// capacity is dispatched whenever the segment clears.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydroBid {
    /// The segment the bid applies to
    pub segment: SegmentId,
    /// The offered capacity
    pub capacity: f64,
    /// The bid price
    pub price: f64,
}

impl HydroBid {
    /// A zero-priced bid for `capacity` in `segment`
    pub fn new(segment: SegmentId, capacity: f64) -> Self {
        Self {
            segment,
            capacity,
            price: 0.0,
        }
    }
}
