// MercadoLibre-specific HTML parsing
use crate::model::{OfferRecord, ParserError};
use chrono::Utc;
use rand::Rng;
use scraper::{ElementRef, Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<OfferRecord>, ParserError>;
}

pub struct MeliParser;

impl MeliParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MeliParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MeliParser {
    fn parse(&self, html: &str) -> Result<Vec<OfferRecord>, ParserError> {
        let document = Html::parse_document(html);

        let card_selector = Selector::parse("div.poly-card")
            .map_err(|e| ParserError::HtmlParseError(e.to_string()))?;
        let title_selector = Selector::parse("h3.poly-component__title-wrapper").unwrap();
        let title_fallback_selector = Selector::parse("h2, h3").unwrap();
        let fraction_selector = Selector::parse("span.andes-money-amount__fraction").unwrap();
        let discount_selector = Selector::parse("span.andes-money-amount__discount").unwrap();
        let current_selector = Selector::parse("div.poly-price__current").unwrap();
        let portada_selector = Selector::parse("div.poly-card__portada").unwrap();
        let image_div_selector = Selector::parse("div.poly-card__image").unwrap();
        let link_selector = Selector::parse("a").unwrap();

        let mut rng = rand::rng();
        let mut records = Vec::new();

        for card in document.select(&card_selector) {
            let title = card
                .select(&title_selector)
                .next()
                .or_else(|| card.select(&title_fallback_selector).next());
            let name = title.map(element_text).filter(|t| !t.is_empty());
            // Cards without a name are navigation chrome, not offers
            let Some(name) = name else {
                continue;
            };

            // The first fraction on the card is the struck-through price.
            // The current price lives inside its own container when present.
            let price_before = card.select(&fraction_selector).next().map(element_text);
            let discount_label = card.select(&discount_selector).next().map(element_text);
            let price_current = card
                .select(&current_selector)
                .next()
                .unwrap_or(card)
                .select(&fraction_selector)
                .next()
                .map(element_text);

            let image_div = card
                .select(&portada_selector)
                .next()
                .or_else(|| card.select(&image_div_selector).next());
            let image_url = image_div.and_then(extract_image_url);

            let purchase_link = card
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(String::from);

            records.push(OfferRecord {
                name: Some(name),
                price_before,
                price_current,
                discount_label,
                purchase_link,
                image_url,
                image_id: rng.random_range(10_000_000..=99_999_999),
                fetched_at: Utc::now(),
            });
        }

        Ok(records)
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Picks the last (largest) candidate URL from a srcset attribute.
fn pick_from_srcset(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .next_back()?
        .trim()
        .split_whitespace()
        .next()
        .map(String::from)
}

/// Resolves the image URL out of a card's image container, trying the
/// `<source>` srcset first, then the usual lazy-loading attributes on the
/// `<img>`, and finally a plain `src` that is not an inline data URI.
fn extract_image_url(div: ElementRef) -> Option<String> {
    let source_selector = Selector::parse("source").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    if let Some(source) = div.select(&source_selector).next() {
        if let Some(url) = source.value().attr("srcset").and_then(pick_from_srcset) {
            return Some(url);
        }
    }

    let img = div.select(&img_selector).next()?;
    for attr in ["data-src", "data-original", "data-image", "data-lazy", "data-srcset"] {
        if let Some(value) = img.value().attr(attr) {
            if attr.ends_with("srcset") {
                if let Some(url) = pick_from_srcset(value) {
                    return Some(url);
                }
            } else {
                return Some(value.to_string());
            }
        }
    }
    if let Some(url) = img.value().attr("srcset").and_then(pick_from_srcset) {
        return Some(url);
    }

    img.value()
        .attr("src")
        .filter(|src| !src.starts_with("data:"))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_HTML: &str = r#"
        <div class="poly-card">
          <div class="poly-card__portada">
            <img data-src="https://http2.mlstatic.com/D_Q_NP_123-V.webp"
                 src="data:image/gif;base64,R0lGOD" />
          </div>
          <h3 class="poly-component__title-wrapper">
            <a href="https://www.mercadolibre.com.ar/p/MLA123456789">Smart TV Hisense 55" 4K</a>
          </h3>
          <s class="andes-money-amount--previous">
            <span class="andes-money-amount__fraction">999.999</span>
          </s>
          <span class="andes-money-amount__discount">30% OFF</span>
          <div class="poly-price__current">
            <span class="andes-money-amount__fraction">699.999</span>
          </div>
        </div>
        <div class="poly-card">
          <h2>Oferta sin precio</h2>
        </div>
    "#;

    #[test]
    fn extracts_fields_from_poly_card() {
        let records = MeliParser::new().parse(CARD_HTML).unwrap();
        assert_eq!(records.len(), 2);

        let r = &records[0];
        assert_eq!(r.name.as_deref(), Some("Smart TV Hisense 55\" 4K"));
        assert_eq!(r.price_before.as_deref(), Some("999.999"));
        assert_eq!(r.price_current.as_deref(), Some("699.999"));
        assert_eq!(r.discount_label.as_deref(), Some("30% OFF"));
        assert_eq!(
            r.purchase_link.as_deref(),
            Some("https://www.mercadolibre.com.ar/p/MLA123456789")
        );
        // lazy attribute wins over the inline data URI
        assert_eq!(
            r.image_url.as_deref(),
            Some("https://http2.mlstatic.com/D_Q_NP_123-V.webp")
        );
    }

    #[test]
    fn fallback_title_and_absent_fields() {
        let records = MeliParser::new().parse(CARD_HTML).unwrap();
        let r = &records[1];
        assert_eq!(r.name.as_deref(), Some("Oferta sin precio"));
        assert_eq!(r.price_before, None);
        assert_eq!(r.price_current, None);
        assert_eq!(r.discount_label, None);
        assert_eq!(r.image_url, None);
    }

    #[test]
    fn nameless_cards_are_skipped() {
        let html = r#"<div class="poly-card"><span>ad</span></div>"#;
        assert!(MeliParser::new().parse(html).unwrap().is_empty());
    }

    #[test]
    fn srcset_picks_last_candidate() {
        assert_eq!(
            pick_from_srcset("a.webp 1x, b.webp 2x").as_deref(),
            Some("b.webp")
        );
        assert_eq!(pick_from_srcset("").as_deref(), None);
    }

    #[test]
    fn image_ids_are_distinct_per_record() {
        let records = MeliParser::new().parse(CARD_HTML).unwrap();
        assert_ne!(records[0].image_id, records[1].image_id);
    }
}
