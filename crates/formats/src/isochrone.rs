use foundation::math::{finite_min_max, multi_polygon_centroid, polygon_centroid};
use foundation::{GeoBounds, LonLat};
use serde_json::Value;

use crate::error::DataError;
use crate::geojson::{FeatureCollection, Geometry};

/// Name of the property carrying the travel-time band in minutes.
pub const CONTOUR_PROPERTY: &str = "contour";

#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneFeature {
    /// Travel-time band in minutes.
    pub contour: f64,
    /// Always a `Polygon` or `MultiPolygon`.
    pub geometry: Geometry,
}

impl IsochroneFeature {
    pub fn centroid(&self) -> Option<LonLat> {
        match &self.geometry {
            Geometry::Polygon(rings) => polygon_centroid(rings),
            Geometry::MultiPolygon(polys) => multi_polygon_centroid(polys),
            _ => None,
        }
    }

    /// Popup text, whole minutes.
    pub fn label(&self) -> String {
        format!("{} min", self.contour.trunc() as i64)
    }
}

/// Travel-time polygons for one center.
///
/// Construction validates the collection: non-empty, polygon geometries
/// only, and a finite non-negative `contour` on every feature.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneSet {
    features: Vec<IsochroneFeature>,
    min_contour: f64,
    max_contour: f64,
    start_point: LonLat,
}

impl IsochroneSet {
    pub fn from_geojson_str(payload: &str) -> Result<Self, DataError> {
        Self::from_collection(FeatureCollection::from_geojson_str(payload)?)
    }

    pub fn from_collection(collection: FeatureCollection) -> Result<Self, DataError> {
        if collection.features.is_empty() {
            return Err(DataError::Empty);
        }

        let mut features = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let contour = parse_contour(index, feature.properties.get(CONTOUR_PROPERTY))?;
            if !matches!(
                feature.geometry,
                Geometry::Polygon(_) | Geometry::MultiPolygon(_)
            ) {
                return Err(DataError::UnexpectedGeometry {
                    index,
                    expected: "Polygon",
                    found: feature.geometry.type_name(),
                });
            }
            features.push(IsochroneFeature {
                contour,
                geometry: feature.geometry,
            });
        }

        let (min_contour, max_contour) = finite_min_max(features.iter().map(|f| f.contour))
            .ok_or(DataError::Empty)?;

        // The start point is the centroid of the first smallest band.
        let (start_index, start_feature) = features
            .iter()
            .enumerate()
            .find(|(_, f)| f.contour == min_contour)
            .ok_or(DataError::Empty)?;
        let start_point = start_feature
            .centroid()
            .ok_or_else(|| DataError::InvalidFeature {
                index: start_index,
                reason: "polygon has no vertices".to_string(),
            })?;

        Ok(Self {
            features,
            min_contour,
            max_contour,
            start_point,
        })
    }

    pub fn features(&self) -> &[IsochroneFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn min_contour(&self) -> f64 {
        self.min_contour
    }

    pub fn max_contour(&self) -> f64 {
        self.max_contour
    }

    /// Upper bound of the minutes slider: whole minutes, never below 1.
    pub fn max_minutes(&self) -> u32 {
        (self.max_contour.floor() as u32).max(1)
    }

    /// Centroid of the smallest-contour polygon.
    pub fn start_point(&self) -> LonLat {
        self.start_point
    }

    /// Distinct contour values, ascending.
    pub fn contours(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.features.iter().map(|f| f.contour).collect();
        values.sort_by(|a, b| foundation::math::stable_total_cmp_f64(*a, *b));
        values.dedup();
        values
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.features.iter().flat_map(|f| f.geometry.coords()))
    }
}

fn parse_contour(index: usize, value: Option<&Value>) -> Result<f64, DataError> {
    match value {
        None | Some(Value::Null) => Err(DataError::MissingContour { index }),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(DataError::InvalidContour {
                index,
                value: n.to_string(),
            }),
        },
        Some(other) => Err(DataError::InvalidContour {
            index,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::IsochroneSet;
    use crate::error::DataError;
    use serde_json::{Value, json};

    fn square_feature(contour: Value, x0: f64, size: f64) -> Value {
        json!({
            "type": "Feature",
            "properties": {"contour": contour},
            "geometry": {"type": "Polygon", "coordinates": [[
                [x0, 45.0], [x0 + size, 45.0], [x0 + size, 45.0 + size], [x0, 45.0 + size], [x0, 45.0]
            ]]}
        })
    }

    fn collection(features: Vec<Value>) -> String {
        json!({"type": "FeatureCollection", "features": features}).to_string()
    }

    #[test]
    fn start_point_is_centroid_of_smallest_band() {
        let payload = collection(vec![
            square_feature(json!(15), 9.0, 0.3),
            square_feature(json!(5), 9.1, 0.1),
            square_feature(json!(10), 9.05, 0.2),
        ]);
        let set = IsochroneSet::from_geojson_str(&payload).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.min_contour(), 5.0);
        assert_eq!(set.max_contour(), 15.0);
        assert_eq!(set.max_minutes(), 15);
        let start = set.start_point();
        assert!((start.lon - 9.15).abs() < 1e-9);
        assert!((start.lat - 45.05).abs() < 1e-9);
        assert_eq!(set.contours(), vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn fractional_contours_floor_the_slider_bound() {
        let payload = collection(vec![square_feature(json!(12.7), 9.0, 0.1)]);
        let set = IsochroneSet::from_geojson_str(&payload).unwrap();
        assert_eq!(set.max_minutes(), 12);
        assert_eq!(set.features()[0].label(), "12 min");

        let payload = collection(vec![square_feature(json!(0), 9.0, 0.1)]);
        let set = IsochroneSet::from_geojson_str(&payload).unwrap();
        assert_eq!(set.max_minutes(), 1);
    }

    #[test]
    fn empty_collection_fails() {
        let err = IsochroneSet::from_geojson_str(&collection(vec![])).unwrap_err();
        assert_eq!(err, DataError::Empty);
    }

    #[test]
    fn missing_or_bad_contour_fails() {
        let mut feature = square_feature(json!(5), 9.0, 0.1);
        feature["properties"] = json!({"minutes": 5});
        let err = IsochroneSet::from_geojson_str(&collection(vec![feature])).unwrap_err();
        assert_eq!(err, DataError::MissingContour { index: 0 });

        let payload = collection(vec![
            square_feature(json!(5), 9.0, 0.1),
            square_feature(json!("ten"), 9.0, 0.1),
        ]);
        let err = IsochroneSet::from_geojson_str(&payload).unwrap_err();
        assert!(matches!(err, DataError::InvalidContour { index: 1, .. }));

        let payload = collection(vec![square_feature(json!(-5), 9.0, 0.1)]);
        let err = IsochroneSet::from_geojson_str(&payload).unwrap_err();
        assert!(matches!(err, DataError::InvalidContour { index: 0, .. }));
    }

    #[test]
    fn non_polygon_geometry_fails() {
        let feature = json!({
            "type": "Feature",
            "properties": {"contour": 5},
            "geometry": {"type": "LineString", "coordinates": [[9.0, 45.0], [9.1, 45.1]]}
        });
        let err = IsochroneSet::from_geojson_str(&collection(vec![feature])).unwrap_err();
        assert_eq!(
            err,
            DataError::UnexpectedGeometry {
                index: 0,
                expected: "Polygon",
                found: "LineString"
            }
        );
    }

    #[test]
    fn bounds_cover_every_band() {
        let payload = collection(vec![
            square_feature(json!(10), 9.0, 0.3),
            square_feature(json!(5), 9.1, 0.1),
        ]);
        let set = IsochroneSet::from_geojson_str(&payload).unwrap();
        let b = set.bounds().unwrap();
        assert_eq!(b.min, [9.0, 45.0]);
        assert!((b.max[0] - 9.3).abs() < 1e-12);
    }
}
