// src/coords/types.rs

/// Which half of a coordinate pair a column or value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn as_str(&self) -> &str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    /// Inclusive bound on the absolute value, in decimal degrees.
    pub fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Header names tried when no explicit column is configured.
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Axis::Latitude => &["LATITUD", "LAT", "Y", "LATITUDE", "LATITUD_WGS84"],
            Axis::Longitude => &["LONGITUD", "LON", "X", "LONGITUDE", "LONGITUD_WGS84"],
        }
    }

    /// `None` (unresolvable) never validates.
    pub fn contains(&self, value: Option<f64>) -> bool {
        let limit = self.limit();
        matches!(value, Some(v) if (-limit..=limit).contains(&v))
    }
}
