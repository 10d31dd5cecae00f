use crate::model::{RawField, RawRecord, RouteRequest, ScraperError};
use crate::scraper::traits::RawOfferSource;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Award search against the Smiles flight-search JSON endpoint.
pub struct SmilesApiSource {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    flights: Vec<ApiFlight>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiFlight {
    airline: Option<ApiAirline>,
    departure: Option<ApiStop>,
    arrival: Option<ApiStop>,
    recommended_fare: Option<ApiFare>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiAirline {
    code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiStop {
    airport_code: Option<String>,
    time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiFare {
    economy: Option<ApiCabin>,
    business: Option<ApiCabin>,
    /// BRL cents.
    taxes: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiCabin {
    miles: Option<f64>,
}

impl SmilesApiSource {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    fn build_body(req: &RouteRequest) -> serde_json::Value {
        json!({
            "adults": 1,
            "children": 0,
            "infants": 0,
            "cabin": 0,
            "currencyCode": "BRL",
            "originAirportCode": req.origin,
            "destinationAirportCode": req.destination,
            "departureDate": req.date.format("%Y-%m-%d").to_string(),
            "tripType": 1,
            "forceCongener": false,
            "isFlexibleDate": false
        })
    }
}

impl SearchResponse {
    pub(crate) fn into_records(self) -> Vec<RawRecord> {
        self.flights.into_iter().map(ApiFlight::into_record).collect()
    }
}

impl ApiFlight {
    fn into_record(self) -> RawRecord {
        let fare = self.recommended_fare.unwrap_or_default();
        let departure = self.departure.unwrap_or_default();
        let arrival = self.arrival.unwrap_or_default();
        let miles = |cabin: Option<ApiCabin>| cabin.and_then(|c| c.miles).map(RawField::Number);

        RawRecord {
            airline: self.airline.and_then(|a| a.code).map(RawField::Text),
            origin: departure.airport_code.map(RawField::Text),
            destination: arrival.airport_code.map(RawField::Text),
            departure: departure.time.map(RawField::Text),
            arrival: arrival.time.map(RawField::Text),
            economy_points: miles(fare.economy),
            business_points: miles(fare.business),
            taxes: fare.taxes.map(|cents| RawField::Number(cents / 100.0)),
        }
    }
}

#[async_trait::async_trait]
impl RawOfferSource for SmilesApiSource {
    async fn fetch(&self, req: &RouteRequest) -> Result<Vec<RawRecord>, ScraperError> {
        debug!("POST {} for {}-{} {}", self.endpoint, req.origin, req.destination, req.date);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Origin", "https://www.smiles.com.br")
            .header("Referer", "https://www.smiles.com.br/")
            .json(&Self::build_body(req))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Smiles search {}-{} answered [{}]", req.origin, req.destination, status);
            return Err(ScraperError::InvalidResponse(status));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn body_carries_route_and_date() {
        let req = RouteRequest {
            origin: "JFK".into(),
            destination: "GRU".into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        };
        let body = SmilesApiSource::build_body(&req);
        assert_eq!(body["originAirportCode"], "JFK");
        assert_eq!(body["destinationAirportCode"], "GRU");
        assert_eq!(body["departureDate"], "2025-12-20");
        assert_eq!(body["currencyCode"], "BRL");
    }

    #[test]
    fn maps_response_with_nulls() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "flights": [
                    {
                        "airline": { "code": "G3" },
                        "departure": { "airportCode": "JFK", "time": "08:00:00" },
                        "arrival": { "airportCode": "GRU", "time": "17:30:00" },
                        "recommendedFare": {
                            "economy": { "miles": 25000 },
                            "business": { "miles": null },
                            "taxes": 80000
                        }
                    },
                    { "departure": null }
                ]
            }"#,
        )
        .unwrap();

        let records = response.into_records();
        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.airline, Some(RawField::Text("G3".into())));
        assert_eq!(first.economy_points, Some(RawField::Number(25000.0)));
        assert_eq!(first.business_points, None);
        assert_eq!(first.taxes, Some(RawField::Number(800.0)));
        assert_eq!(records[1], RawRecord::default());
    }

    #[test]
    fn missing_flights_key_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_records().is_empty());
    }
}
