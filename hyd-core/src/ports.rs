mod demand;
mod flow;
mod market;

pub use demand::DemandFactor;
pub use flow::FlowSource;
pub use market::MarketRepository;
