pub mod offer_extractor;
pub mod page_parser;

pub use offer_extractor::OfferExtractor;
pub use page_parser::{AwardPageParser, Parser};
