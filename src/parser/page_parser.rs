// Award results page HTML -> free-text RawRecords
use crate::model::{ParserError, RawField, RawRecord};
use scraper::{ElementRef, Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<RawRecord>, ParserError>;
}

/// Reads one result card per `article.flight-card`, keeping each field as the
/// card's inner text. Interpretation is left to the offer extractor.
pub struct AwardPageParser {
    card: Selector,
    airline: Selector,
    origin: Selector,
    destination: Selector,
    departure: Selector,
    arrival: Selector,
    economy: Selector,
    business: Selector,
    taxes: Selector,
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|_| ParserError::Selector(css.to_string()))
}

impl AwardPageParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            card: selector("article.flight-card")?,
            airline: selector(".airline")?,
            origin: selector(".departure .airport")?,
            destination: selector(".arrival .airport")?,
            departure: selector(".departure .time")?,
            arrival: selector(".arrival .time")?,
            economy: selector(".fare-economy .miles")?,
            business: selector(".fare-business .miles")?,
            taxes: selector(".taxes")?,
        })
    }

    fn text_of(card: ElementRef<'_>, selector: &Selector) -> Option<RawField> {
        let node = card.select(selector).next()?;
        let text = node.text().collect::<Vec<_>>().join(" ");
        let text = text.trim();
        (!text.is_empty()).then(|| RawField::Text(text.to_string()))
    }
}

impl Parser for AwardPageParser {
    fn parse(&self, html: &str) -> Result<Vec<RawRecord>, ParserError> {
        let document = Html::parse_document(html);

        let records = document
            .select(&self.card)
            .map(|card| RawRecord {
                airline: Self::text_of(card, &self.airline),
                origin: Self::text_of(card, &self.origin),
                destination: Self::text_of(card, &self.destination),
                departure: Self::text_of(card, &self.departure),
                arrival: Self::text_of(card, &self.arrival),
                economy_points: Self::text_of(card, &self.economy),
                business_points: Self::text_of(card, &self.business),
                taxes: Self::text_of(card, &self.taxes),
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <article class="flight-card">
            <span class="airline"> GOL </span>
            <div class="departure"><span class="airport">JFK</span><span class="time">08:00</span></div>
            <div class="arrival"><span class="airport">GRU</span><span class="time">17:30</span></div>
            <div class="fare-economy"><span class="miles">25.000 milhas</span></div>
            <div class="fare-business"><span class="miles"></span></div>
            <p class="taxes">Taxas R$ 1.160,00</p>
        </article>
        <article class="flight-card">
            <div class="fare-business"><span class="miles">90.000</span></div>
        </article>
        <div class="flight-card">ignored</div>
        </body></html>
    "#;

    #[test]
    fn reads_each_card_as_text_fields() {
        let records = AwardPageParser::new().unwrap().parse(PAGE).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.airline, Some(RawField::Text("GOL".into())));
        assert_eq!(first.origin, Some(RawField::Text("JFK".into())));
        assert_eq!(first.arrival, Some(RawField::Text("17:30".into())));
        assert_eq!(first.economy_points, Some(RawField::Text("25.000 milhas".into())));
        assert_eq!(first.business_points, None);
        assert_eq!(first.taxes, Some(RawField::Text("Taxas R$ 1.160,00".into())));

        let second = &records[1];
        assert_eq!(second.business_points, Some(RawField::Text("90.000".into())));
        assert_eq!(second.departure, None);
    }

    #[test]
    fn page_without_cards_is_empty() {
        let records = AwardPageParser::new().unwrap().parse("<html></html>").unwrap();
        assert!(records.is_empty());
    }
}
