use crate::model::{RawRecord, RouteRequest, ScraperError};

/// Supplies unnormalized award records for one origin/destination/date.
#[async_trait::async_trait]
pub trait RawOfferSource: Send + Sync {
    async fn fetch(&self, req: &RouteRequest) -> Result<Vec<RawRecord>, ScraperError>;
}
