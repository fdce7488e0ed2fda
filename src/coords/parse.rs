// src/coords/parse.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that can't be part of a signed decimal with grouping separators.
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9,.\-]").unwrap());

/// Largest magnitude accepted without rescaling.
const MAX_MAGNITUDE: f64 = 180.0;

/// How many times a value may be divided by ten to bring it under `MAX_MAGNITUDE`.
const MAX_RESCALES: u32 = 10;

/// Parse a noisy decimal string, resolving `,`/`.` as decimal or thousands separator.
///
/// - `"1.234.567,89"` → `1234567.89` (comma after the last dot is the decimal mark)
/// - `"1,234,567.89"` → `1234567.89`
/// - `" 12° 30'"`     → `1230`
///
/// Returns `None` for blank input or anything that still isn't a finite number
/// after cleaning.
/// A non-blank cell with no digits left after cleaning (`"N/A"`) is `None`, never `0`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stripped = NON_NUMERIC.replace_all(trimmed, "");
    // `None < Some(_)`, so a lone comma counts as "after" a missing dot.
    let cleaned = if stripped.rfind(',') > stripped.rfind('.') {
        stripped.replace('.', "").replacen(',', ".", 1)
    } else {
        stripped.replace(',', "")
    };

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Divide by ten until the magnitude fits in ±180, at most `MAX_RESCALES` times.
/// Recovers integers that lost their decimal point, e.g. `-7900115439` → `-79.00115439`.
pub fn rescale_magnitude(mut value: f64) -> f64 {
    let mut tries = 0;
    while value.abs() > MAX_MAGNITUDE && tries < MAX_RESCALES {
        value /= 10.0;
        tries += 1;
    }
    value
}

/// Full repair of a single coordinate cell.
pub fn parse_coord(raw: &str) -> Option<f64> {
    parse_decimal(raw).map(rescale_magnitude)
}

/// Round half-up to 6 decimals and render fixed-point. Negative zero prints as `0.000000`.
pub fn format_coord(value: f64) -> String {
    let mut rounded = (value * 1e6 + 0.5).floor() / 1e6;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{:.6}", rounded)
}
