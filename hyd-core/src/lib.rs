#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for hydro offers.
///
/// This module contains the fundamental data structures describing the market a
/// hydro plant bids into: the segmented load-duration curve, the intermittent
/// fleet, the interconnector and the plant itself.
///
/// The models are primarily data structures with validation on construction and
/// minimal business logic, keeping the domain entities separate from the solver
/// that consumes them.
pub mod models;

/// Interface traits for hydro offers.
///
/// This module contains the "ports" of the system: the data-access trait used to
/// obtain market inputs, and the strategy traits through which a current-period
/// query and a forecast query differ.
pub mod ports;
