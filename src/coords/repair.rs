// src/coords/repair.rs

use super::parse::{format_coord, parse_coord};
use super::types::Axis;

/// What happened to one row's coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    /// Valid, and the formatted values equal the raw text.
    Unchanged,
    /// Valid after rewriting; `swapped` when the raw cells were transposed.
    Fixed { swapped: bool },
    /// Neither direct nor swapped values are in bounds; raw text kept.
    Invalid,
}

/// Result of repairing one (latitude, longitude) cell pair.
#[derive(Clone, Debug, PartialEq)]
pub struct RepairedPair {
    pub lat: String,
    pub lon: String,
    pub outcome: RowOutcome,
}

fn validate(raw_lat: &str, raw_lon: &str) -> Option<(f64, f64)> {
    let lat = parse_coord(raw_lat);
    let lon = parse_coord(raw_lon);
    if Axis::Latitude.contains(lat) && Axis::Longitude.contains(lon) {
        lat.zip(lon)
    } else {
        None
    }
}

/// Repair a raw coordinate pair.
///
/// The cells are tried as given first. Only if that fails are they tried
/// transposed, to catch the common data-entry mistake of swapping the two
/// columns; a pair that validates both ways therefore keeps its original
/// orientation. This is not a general geocoding correction.
pub fn repair_pair(raw_lat: &str, raw_lon: &str) -> RepairedPair {
    let (values, swapped) = match validate(raw_lat, raw_lon) {
        Some(v) => (Some(v), false),
        None => match validate(raw_lon, raw_lat) {
            Some(v) => (Some(v), true),
            None => (None, false),
        },
    };

    let Some((lat, lon)) = values else {
        return RepairedPair {
            lat: raw_lat.to_string(),
            lon: raw_lon.to_string(),
            outcome: RowOutcome::Invalid,
        };
    };

    let lat = format_coord(lat);
    let lon = format_coord(lon);
    let outcome = if lat != raw_lat || lon != raw_lon {
        RowOutcome::Fixed { swapped }
    } else {
        RowOutcome::Unchanged
    };

    RepairedPair { lat, lon, outcome }
}
