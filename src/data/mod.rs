//! Data loading and aggregation into graph declarations.

pub mod cooccurrence;
pub mod gifts;
pub mod votes;

pub use cooccurrence::{aggregate_groups, CooccurrenceTotals};
