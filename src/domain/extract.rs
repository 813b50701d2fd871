use std::sync::LazyLock;

use regex::Regex;

use super::{parse_cents, Cents};

/// Currency-prefixed amount: "R$ 1.234,56", "R$50", "R$ 850,00".
/// Dots are thousand separators, the comma is the decimal separator.
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*([\d.,]+)").expect("valid regex"));

/// Bare numeric token: digits, optionally followed by a separator and
/// one or two fractional digits.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+([.,]\d{1,2})?").expect("valid regex"));

/// Extract a monetary amount from free-form text, in cents.
///
/// A currency-prefixed match wins over any bare number; only the first match
/// of the winning pattern is used. Unparsable or absent numeric content
/// degrades silently to zero rather than surfacing an error.
pub fn extract_amount(text: &str) -> Cents {
    if let Some(caps) = CURRENCY_RE.captures(text) {
        let normalized = caps[1].replace('.', "").replace(',', ".");
        return parse_cents(&normalized).unwrap_or(0);
    }

    if let Some(m) = NUMBER_RE.find(text) {
        let normalized = m.as_str().replace(',', ".");
        return parse_cents(&normalized).unwrap_or(0);
    }

    0
}
