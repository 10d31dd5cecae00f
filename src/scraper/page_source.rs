use crate::model::{ParserError, RawRecord, RouteRequest, ScraperError};
use crate::parser::{AwardPageParser, Parser};
use crate::scraper::traits::RawOfferSource;
use reqwest::Client;
use tracing::{debug, warn};

/// Award search by downloading a rendered results page.
pub struct PageSource {
    client: Client,
    url_template: String,
    parser: AwardPageParser,
}

impl PageSource {
    pub fn new(client: Client, url_template: String) -> Result<Self, ParserError> {
        Ok(Self {
            client,
            url_template,
            parser: AwardPageParser::new()?,
        })
    }

    /// Fills `{origin}`, `{destination}` and `{date}` in the template.
    fn build_url(&self, req: &RouteRequest) -> String {
        self.url_template
            .replace("{origin}", &req.origin)
            .replace("{destination}", &req.destination)
            .replace("{date}", &req.date.format("%Y-%m-%d").to_string())
    }
}

#[async_trait::async_trait]
impl RawOfferSource for PageSource {
    async fn fetch(&self, req: &RouteRequest) -> Result<Vec<RawRecord>, ScraperError> {
        let url = self.build_url(req);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Results page {} answered [{}]", url, status);
            return Err(ScraperError::InvalidResponse(status));
        }

        let html = response.text().await?;
        Ok(self.parser.parse(&html)?)
    }
}
