mod bid;
mod curve;
mod demand;
mod interconnector;
mod intermittent;
mod map;
mod plant;
mod segment;

pub use bid::HydroBid;
pub use curve::{LoadDurationCurve, LoadDurationCurveDto, LoadDurationCurveError};
pub use demand::{ForecastFactor, GrowthTrend, GrowthTrendDto, GrowthTrendError};
pub use interconnector::{Interconnection, InterconnectorError, estimate_flow};
pub use intermittent::{
    IntermittentError, IntermittentKind, IntermittentProfile, IntermittentTechnology,
};
pub use map::SegmentMap;
pub use plant::{HydroPlant, Lifetime, Outlook};
pub use segment::{Period, Segment, SegmentId, SegmentLoad};
