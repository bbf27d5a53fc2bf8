use foundation::{GeoBounds, LonLat};
use serde_json::Value;

use crate::error::DataError;
use crate::geojson::{FeatureCollection, Geometry};

#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub name: Option<String>,
    pub position: LonLat,
}

impl Poi {
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// Point features such as schools or hospitals, in EPSG:4326.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiSet {
    pois: Vec<Poi>,
}

impl PoiSet {
    pub fn from_geojson_str(payload: &str) -> Result<Self, DataError> {
        Self::from_collection(FeatureCollection::from_geojson_str(payload)?)
    }

    pub fn from_collection(collection: FeatureCollection) -> Result<Self, DataError> {
        let mut pois = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let Geometry::Point(position) = feature.geometry else {
                return Err(DataError::UnexpectedGeometry {
                    index,
                    expected: "Point",
                    found: feature.geometry.type_name(),
                });
            };
            if !position.is_valid() {
                return Err(DataError::InvalidFeature {
                    index,
                    reason: format!(
                        "coordinates out of range: [{}, {}]",
                        position.lon, position.lat
                    ),
                });
            }
            let name = match feature.properties.get("name") {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            pois.push(Poi { name, position });
        }
        Ok(Self { pois })
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.pois.iter().map(|p| p.position))
    }
}
