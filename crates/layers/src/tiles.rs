use serde::Serialize;

pub const CARTO_POSITRON_URL: &str =
    "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
pub const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/\">CARTO</a>";

/// Base map raster tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    pub name: String,
    /// XYZ template in Leaflet syntax.
    pub url: String,
    /// HTML attribution shown on the map.
    pub attribution: String,
}

impl TileLayer {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            attribution: attribution.into(),
        }
    }

    /// Light CARTO basemap.
    pub fn carto_positron() -> Self {
        Self::new("CARTO Positron", CARTO_POSITRON_URL, CARTO_ATTRIBUTION)
    }
}
