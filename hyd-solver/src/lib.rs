#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod allocator;
mod engine;
mod error;
mod extract;
mod market;
mod ranker;
mod residual;

pub use allocator::{
    Allocation, AllocationError, AllocationState, Limits, Termination, allocate,
};
pub use engine::{EngineSettings, OfferEngine, PlantOffer};
pub use error::OfferError;
pub use extract::offer_for;
pub use market::{MarketError, PlantBids, current_offers, forecast_offers};
pub use ranker::SortedCurve;
pub use residual::{CurveError, ResidualLoadPoint, residual_points};

/// A file-backed market, useful for analysis and testing
#[cfg(feature = "io")]
pub mod io;
