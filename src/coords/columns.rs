// src/coords/columns.rs

use deunicode::deunicode;
use tracing::debug;

use super::types::Axis;
use crate::error::NormalizeError;

/// Header comparison key: diacritics stripped, upper-cased, trimmed.
pub fn fold_header(raw: &str) -> String {
    deunicode(raw).to_uppercase().trim().to_string()
}

/// Index of the column matching `aliases`.
///
/// Every header is checked for an exact (folded) match first; only if none
/// matches is a header accepted for merely containing an alias. Within a pass
/// the earliest header wins.
pub fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let folded: Vec<String> = headers.iter().map(|h| fold_header(h)).collect();
    let keys: Vec<String> = aliases.iter().map(|a| fold_header(a)).collect();

    folded
        .iter()
        .position(|h| keys.iter().any(|k| h == k))
        .or_else(|| {
            folded
                .iter()
                .position(|h| keys.iter().any(|k| h.contains(k.as_str())))
        })
}

/// The resolved latitude/longitude columns of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordColumns {
    pub lat_index: usize,
    pub lon_index: usize,
    pub lat_name: String,
    pub lon_name: String,
}

fn resolve_axis(headers: &[String], axis: Axis, explicit: Option<&str>) -> Option<usize> {
    let found = match explicit {
        Some(name) => {
            let key = fold_header(name);
            headers.iter().position(|h| fold_header(h) == key)
        }
        None => find_column(headers, axis.default_aliases()),
    };
    debug!(axis = axis.as_str(), ?explicit, ?found, "resolved column");
    found
}

/// Resolve both coordinate columns, honouring explicit header names when given.
pub fn resolve_columns(
    headers: &[String],
    lat_override: Option<&str>,
    lon_override: Option<&str>,
) -> Result<CoordColumns, NormalizeError> {
    let lat = resolve_axis(headers, Axis::Latitude, lat_override);
    let lon = resolve_axis(headers, Axis::Longitude, lon_override);

    match (lat, lon) {
        (Some(lat_index), Some(lon_index)) => Ok(CoordColumns {
            lat_index,
            lon_index,
            lat_name: headers[lat_index].clone(),
            lon_name: headers[lon_index].clone(),
        }),
        _ => Err(NormalizeError::MissingColumns {
            lat: lat.map(|i| headers[i].clone()),
            lon: lon.map(|i| headers[i].clone()),
        }),
    }
}
