// Utility functions: price and discount parsing
use once_cell::sync::Lazy;
use regex::Regex;

static PCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)").unwrap());

/// Converts "1.234.567" or "$ 123.456" into whole currency units.
///
/// Grouping dots are locale punctuation, not decimal points. Returns `None`
/// when the input is absent or contains no digits.
pub fn parse_money(s: Option<&str>) -> Option<u64> {
    let digits: String = s?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Extracts the number from a discount label, "53% OFF" → 53.0.
///
/// Comma and dot are both accepted as decimal separator. Absent or
/// unparseable labels contribute 0.0.
pub fn parse_pct_off(s: Option<&str>) -> f64 {
    let Some(s) = s else {
        return 0.0;
    };
    PCT_RE
        .find(s)
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .unwrap_or(0.0)
}
