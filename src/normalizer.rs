//! Aggressive product-name canonicalization used as the weak dedup signal.
//!
//! Two listings of the same product often differ only in color/size/display
//! wording. Stripping that noise makes them collide on the same key.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// Removed in list order, before tokenization.
const STOP_PHRASES: &[&str] = &[
    "color", "negro", "blanco", "gris", "azul", "rojo", "android", "google tv",
    "smart tv", "pantalla", "pulgadas", "full hd", "uhd", "4k", "8k", "wifi",
    "led", "qled", "ips", "mini", "kit", "combo",
];

static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes a product name for duplicate detection.
///
/// Diacritics are dropped, stop phrases removed, punctuation collapsed to
/// whitespace and standalone digit runs erased. Known trade-off: the digit
/// removal also strips legitimate distinguishers such as screen sizes.
/// An empty input normalizes to an empty string and never registers as a
/// collision.
pub fn norm_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let ascii: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c) && c.is_ascii())
        .collect();
    let mut s = ascii.to_lowercase();

    for phrase in STOP_PHRASES {
        s = s.replace(phrase, " ");
    }

    let s = NON_ALNUM_RE.replace_all(&s, " ");
    let s = DIGIT_RUN_RE.replace_all(&s, " ");
    WS_RE.replace_all(&s, " ").trim().to_string()
}
