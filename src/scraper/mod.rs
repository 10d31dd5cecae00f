pub mod page_source;
pub mod smiles_api;
pub mod traits;

pub use page_source::PageSource;
pub use smiles_api::SmilesApiSource;
pub use traits::RawOfferSource;

use crate::config::{AppConfig, SourceConfig};
use crate::model::ScraperError;
use std::sync::Arc;
use tracing::info;

pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 AwardSniper/0.1";

/// Builds the source selected in the config.
pub fn build_source(config: &AppConfig) -> Result<Arc<dyn RawOfferSource>, ScraperError> {
    let timeout = std::time::Duration::from_secs(config.request_timeout_seconds);
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    let source: Arc<dyn RawOfferSource> = match &config.source {
        SourceConfig::Api { endpoint } => Arc::new(SmilesApiSource::new(client, endpoint.clone())),
        SourceConfig::Page { url_template } => {
            Arc::new(PageSource::new(client, url_template.clone())?)
        }
    };
    info!("Offer source: {:?}", config.source);
    Ok(source)
}
