use crate::model::{OfferRecord, ScoredOffer};
use crate::normalizer::norm_name;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PRODUCT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)MLA\d{6,}").unwrap());

/// Extracts platform product codes from a purchase link.
///
/// Two rules, results unioned: any `MLA` + 6-or-more-digit match anywhere in
/// the URL, and the `wid` query parameter when it starts with `MLA`. Both are
/// uppercased. A single URL can reference two different products (path code
/// plus `wid`), and a collision on either is enough to drop a later record.
pub fn product_ids_from_url(url: &str) -> HashSet<String> {
    let mut ids: HashSet<String> = PRODUCT_ID_RE
        .find_iter(url)
        .map(|m| m.as_str().to_uppercase())
        .collect();

    let query = url
        .split_once('?')
        .map(|(_, rest)| rest.split('#').next().unwrap_or(""))
        .unwrap_or("");
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == "wid" {
            let value = value.to_uppercase();
            if value.starts_with("MLA") {
                ids.insert(value);
            }
        }
    }

    ids
}

/// Single-pass duplicate filter over a score-descending sequence.
///
/// Three independent identity signals accumulate across the pass: seen image
/// ids, seen product ids and seen normalized names. Because the input is
/// sorted by score, the highest-scoring instance of a duplicate group is
/// always the one kept.
#[derive(Default)]
pub struct Deduplicator {
    seen_image_ids: HashSet<u64>,
    seen_product_ids: HashSet<String>,
    seen_names: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every record that collides with an already-accepted one,
    /// preserving input order.
    pub fn dedupe(mut self, offers: Vec<ScoredOffer>) -> Vec<ScoredOffer> {
        let mut kept = Vec::with_capacity(offers.len());
        for offer in offers {
            if self.accept(&offer.record) {
                kept.push(offer);
            }
        }
        kept
    }

    /// Checks the three identity signals in order, short-circuiting on the
    /// first collision. On acceptance the record's identifiers are merged
    /// into all three seen sets.
    fn accept(&mut self, record: &OfferRecord) -> bool {
        if self.seen_image_ids.contains(&record.image_id) {
            return false;
        }

        let product_ids = product_ids_from_url(record.purchase_link.as_deref().unwrap_or(""));
        if !product_ids.is_disjoint(&self.seen_product_ids) {
            return false;
        }

        let name_key = norm_name(record.name.as_deref().unwrap_or(""));
        if !name_key.is_empty() && self.seen_names.contains(&name_key) {
            return false;
        }

        self.seen_image_ids.insert(record.image_id);
        self.seen_product_ids.extend(product_ids);
        if !name_key.is_empty() {
            self.seen_names.insert(name_key);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn offer(name: &str, image_id: u64, link: Option<&str>, score: f64) -> ScoredOffer {
        ScoredOffer {
            record: OfferRecord {
                name: Some(name.to_string()),
                price_before: None,
                price_current: None,
                discount_label: None,
                purchase_link: link.map(String::from),
                image_url: None,
                image_id,
                fetched_at: Utc::now(),
            },
            score,
        }
    }

    #[test]
    fn url_yields_path_and_wid_ids() {
        let ids = product_ids_from_url(
            "https://articulo.mercadolibre.com.ar/p/MLA123456789?wid=MLA987654321#position=2",
        );
        assert!(ids.contains("MLA123456789"));
        assert!(ids.contains("MLA987654321"));
    }

    #[test]
    fn wid_and_embedded_code_form_two_element_set() {
        let ids =
            product_ids_from_url("https://www.mercadolibre.com.ar/p/MLA111222333?wid=MLA444555666");
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("MLA111222333"));
        assert!(ids.contains("MLA444555666"));
    }

    #[test]
    fn lowercase_codes_are_uppercased() {
        let ids = product_ids_from_url("https://example.com/mla123456789?wid=mla44455");
        assert!(ids.contains("MLA123456789"));
        assert!(ids.contains("MLA44455"));
    }

    #[test]
    fn url_without_codes_yields_empty_set() {
        assert!(product_ids_from_url("https://example.com/oferta?wid=XYZ1").is_empty());
        assert!(product_ids_from_url("").is_empty());
    }

    #[test]
    fn image_id_collision_drops_record() {
        let out = Deduplicator::new().dedupe(vec![
            offer("Parlante JBL", 7, None, 0.9),
            offer("Parlante Sony", 7, None, 0.5),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.name.as_deref(), Some("Parlante JBL"));
    }

    #[test]
    fn product_id_collision_drops_record() {
        let out = Deduplicator::new().dedupe(vec![
            offer("Notebook Asus", 1, Some("https://x.com/MLA123456789"), 0.9),
            offer("Portatil Asus", 2, Some("https://y.com/p?wid=MLA123456789"), 0.5),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.image_id, 1);
    }

    #[test]
    fn normalized_name_collision_drops_record() {
        let out = Deduplicator::new().dedupe(vec![
            offer("Smart TV Hisense 55\" 4K Negro", 1, None, 0.9),
            offer("Hisense 55 pulgadas 4K", 2, None, 0.5),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.image_id, 1);
    }

    #[test]
    fn empty_names_never_collide() {
        let mut a = offer("", 1, None, 0.9);
        let mut b = offer("", 2, None, 0.5);
        a.record.name = None;
        b.record.name = Some(String::new());
        let out = Deduplicator::new().dedupe(vec![a, b]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = vec![
            offer("Smart TV Hisense 55\" 4K Negro", 1, Some("https://x.com/MLA123456789"), 0.9),
            offer("Hisense 55 pulgadas 4K", 2, None, 0.7),
            offer("Mouse Logitech", 3, None, 0.2),
        ];
        let once = Deduplicator::new().dedupe(input);
        let twice = Deduplicator::new().dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
        let ids: Vec<u64> = once.iter().map(|o| o.record.image_id).collect();
        let ids2: Vec<u64> = twice.iter().map(|o| o.record.image_id).collect();
        assert_eq!(ids, ids2);
    }
}
