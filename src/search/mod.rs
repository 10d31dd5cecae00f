// Search orchestration: origin expansion, retrieval, filter -> group -> render.
pub mod origins;
pub mod query;

use crate::analyzer::{filter_by_ceiling, group_offers};
use crate::config::AppConfig;
use crate::model::{FlightOffer, RouteRequest, SearchRequest};
use crate::notifier::report::ReportFormatter;
use crate::parser::OfferExtractor;
use crate::scraper::RawOfferSource;
use futures::future::join_all;
use origins::OriginExpansion;
use std::sync::Arc;
use tracing::{info, warn};

pub const APOLOGY: &str = "Sorry, try again.";

pub struct SearchOrchestrator {
    source: Arc<dyn RawOfferSource>,
    origins: OriginExpansion,
    extractor: OfferExtractor,
    formatter: ReportFormatter,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn RawOfferSource>, config: &AppConfig) -> Self {
        Self {
            source,
            origins: OriginExpansion::new(config.origin_aliases.clone()),
            extractor: OfferExtractor::new(config.fallback_airline.clone()),
            formatter: ReportFormatter::new(config.brl_per_usd, config.valuation_tiers.clone()),
        }
    }

    /// Offers for every origin of the request, in origin order then record
    /// order. An origin whose retrieval fails contributes nothing.
    pub async fn collect_offers(&self, request: &SearchRequest) -> Vec<FlightOffer> {
        let routes: Vec<RouteRequest> = self
            .origins
            .expand(&request.origin_city)
            .into_iter()
            .map(|origin| RouteRequest {
                origin,
                destination: request.dest_code.clone(),
                date: request.date,
            })
            .collect();

        // join_all yields results in input order whatever the completion order
        let fetched = join_all(routes.iter().map(|route| self.source.fetch(route))).await;

        let mut offers = Vec::new();
        for (route, result) in routes.iter().zip(fetched) {
            match result {
                Ok(records) => {
                    let extracted = self.extractor.extract_all(&records, route);
                    info!(
                        "{}-{}: {} raw records, {} offers",
                        route.origin,
                        route.destination,
                        records.len(),
                        extracted.len()
                    );
                    offers.extend(extracted);
                }
                Err(e) => {
                    warn!("Fetch failed for {}-{}: {}", route.origin, route.destination, e);
                }
            }
        }
        offers
    }

    pub async fn search(&self, request: &SearchRequest) -> String {
        let offers = self.collect_offers(request).await;
        let total = offers.len();
        let kept = filter_by_ceiling(offers, request.max_points);
        info!("{} of {} offers under ceiling {:?}", kept.len(), total, request.max_points);

        let report = group_offers(kept);
        info!("Rendering {} offers in {} sections", report.offer_count(), report.sections.len());
        self.formatter.render(&report)
    }
}

/// Full answer to one user message: usage text for malformed queries, the
/// report otherwise, and an apology if the search task dies.
pub async fn answer(orchestrator: Arc<SearchOrchestrator>, text: &str) -> String {
    let request = match query::parse_query(text) {
        Ok(req) => req,
        Err(e) => {
            info!("Rejected query {:?}: {}", text, e);
            return query::USAGE.to_string();
        }
    };

    info!("Searching {:?}", request);
    let task = tokio::spawn(async move { orchestrator.search(&request).await });
    match task.await {
        Ok(report) => report,
        Err(e) => {
            warn!("Search task failed: {}", e);
            APOLOGY.to_string()
        }
    }
}
