use crate::config::ScoreConfig;
use crate::model::OfferRecord;
use crate::utils::{parse_money, parse_pct_off};

/// Computes the relevance score for one offer.
///
/// Deterministic and total: unparseable or missing fields contribute 0.0
/// instead of failing. Four signals are normalized into a comparable range
/// and combined as a weighted sum:
///
/// - percent-off from the discount label, clamped to `pct_off_cap`, / 100;
/// - absolute saving (before − current), / `saving_reference`;
/// - cheapness `1 / log10(current)`, rewarding low prices on a log scale;
/// - keyword/brand bonus, / `bonus_saturation`, clamped to 1.0.
pub fn score_offer(record: &OfferRecord, cfg: &ScoreConfig) -> f64 {
    let before = parse_money(record.price_before.as_deref());
    let current = parse_money(record.price_current.as_deref());
    let pct_off = parse_pct_off(record.discount_label.as_deref()).min(cfg.pct_off_cap);

    // a zero current price invalidates the saving, not just the cheapness
    let abs_saving = match (before, current) {
        (Some(b), Some(c)) if c > 0 && b > c => (b - c) as f64,
        _ => 0.0,
    };

    let cheapness = match current {
        Some(c) if c > 0 => 1.0 / (c as f64).log10(),
        _ => 0.0,
    };

    let name = record.name.as_deref().unwrap_or("").to_lowercase();
    let mut bonus = 0.0;
    for kw in &cfg.keywords {
        if name.contains(&kw.to_lowercase()) {
            bonus += cfg.keyword_boost;
        }
    }
    for (brand, boost) in &cfg.brand_weights {
        if name.contains(&brand.to_lowercase()) {
            bonus += boost;
        }
    }

    let pct_norm = pct_off / 100.0;
    let save_norm = abs_saving / cfg.saving_reference;
    let kw_norm = (bonus / cfg.bonus_saturation).min(1.0);

    cfg.weights.pct_off * pct_norm
        + cfg.weights.abs_saving * save_norm
        + cfg.weights.cheapness * cheapness
        + cfg.weights.keyword_brand * kw_norm
}
