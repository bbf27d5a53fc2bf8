use foundation::LonLat;
use foundation::math::web_mercator_to_lonlat;

use crate::error::DataError;

/// Coordinate reference systems the loaders know how to normalize.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crs {
    /// Geographic lon/lat (EPSG:4326, OGC CRS84).
    Wgs84,
    /// Spherical Web Mercator meters (EPSG:3857 and its aliases).
    WebMercator,
}

impl Crs {
    /// Resolve a legacy GeoJSON `crs` name such as `urn:ogc:def:crs:EPSG::3857`.
    pub fn from_name(name: &str) -> Result<Self, DataError> {
        let code = name
            .rsplit(':')
            .find(|part| !part.is_empty())
            .unwrap_or_default()
            .to_ascii_uppercase();
        match code.as_str() {
            "CRS84" | "4326" => Ok(Crs::Wgs84),
            "3857" | "900913" | "3785" | "102100" => Ok(Crs::WebMercator),
            _ => Err(DataError::UnsupportedCrs(name.to_string())),
        }
    }

    pub fn to_wgs84(self, p: LonLat) -> LonLat {
        match self {
            Crs::Wgs84 => p,
            Crs::WebMercator => web_mercator_to_lonlat(p.lon, p.lat),
        }
    }
}
