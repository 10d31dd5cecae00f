// Analyzer module: valuation math, ceiling filter and report grouping.

pub mod currency;
pub mod filter;
pub mod grouping;

pub use currency::{convert_to_usd, ValuationSchedule};
pub use filter::filter_by_ceiling;
pub use grouping::{group_offers, GroupedReport};
