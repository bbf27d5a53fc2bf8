//! Reader for the GeoJSON files the viewer consumes.
//!
//! A legacy `crs` member is resolved before any feature is read and every
//! position is converted to EPSG:4326 as it is parsed, so the collections
//! handed to callers are always in lon/lat degrees.

use foundation::LonLat;
use serde_json::{Map, Value};

use crate::crs::Crs;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LonLat),
    MultiPoint(Vec<LonLat>),
    LineString(Vec<LonLat>),
    MultiLineString(Vec<Vec<LonLat>>),
    Polygon(Vec<Vec<LonLat>>),
    MultiPolygon(Vec<Vec<Vec<LonLat>>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Every coordinate of the geometry, in document order.
    pub fn coords(&self) -> Vec<LonLat> {
        match self {
            Geometry::Point(p) => vec![*p],
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.clone(),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().copied().collect()
            }
            Geometry::MultiPolygon(polys) => polys.iter().flatten().flatten().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

/// A FeatureCollection in EPSG:4326.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, DataError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| DataError::InvalidJson(e.to_string()))?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, DataError> {
        let Value::Object(root) = value else {
            return Err(DataError::NotAFeatureCollection);
        };
        if root.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(DataError::NotAFeatureCollection);
        }
        let Some(Value::Array(items)) = root.get("features") else {
            return Err(DataError::NotAFeatureCollection);
        };

        let crs = collection_crs(root.get("crs"))?;
        let features = items
            .iter()
            .enumerate()
            .map(|(index, item)| FeatureReader { index, crs }.feature(item))
            .collect::<Result<_, _>>()?;
        Ok(Self { features })
    }
}

/// CRS named by the legacy `crs` member; absent or null means EPSG:4326.
fn collection_crs(member: Option<&Value>) -> Result<Crs, DataError> {
    match member {
        None | Some(Value::Null) => Ok(Crs::Wgs84),
        Some(value) => match value.pointer("/properties/name").and_then(Value::as_str) {
            Some(name) => Crs::from_name(name),
            None => Err(DataError::UnsupportedCrs(value.to_string())),
        },
    }
}

/// Reads the feature at `index`; every error names that index.
struct FeatureReader {
    index: usize,
    crs: Crs,
}

impl FeatureReader {
    fn invalid(&self, reason: impl Into<String>) -> DataError {
        DataError::InvalidFeature {
            index: self.index,
            reason: reason.into(),
        }
    }

    fn feature(&self, value: &Value) -> Result<Feature, DataError> {
        let Value::Object(obj) = value else {
            return Err(self.invalid("feature must be an object"));
        };
        match obj.get("type").and_then(Value::as_str) {
            Some("Feature") => {}
            Some(other) => return Err(self.invalid(format!("unexpected feature type: {other}"))),
            None => return Err(self.invalid("feature missing type")),
        }

        // `"properties": null` is legal and reads as no properties.
        let properties = match obj.get("properties") {
            Some(Value::Object(props)) => props.clone(),
            _ => Map::new(),
        };
        let geometry = match obj.get("geometry") {
            None | Some(Value::Null) => return Err(self.invalid("feature has no geometry")),
            Some(geometry) => self.geometry(geometry)?,
        };
        Ok(Feature {
            properties,
            geometry,
        })
    }

    fn geometry(&self, value: &Value) -> Result<Geometry, DataError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid("geometry missing type"))?;
        let coords = value
            .get("coordinates")
            .ok_or_else(|| self.invalid(format!("{kind} missing coordinates")))?;

        Ok(match kind {
            "Point" => Geometry::Point(self.position(coords)?),
            "MultiPoint" => Geometry::MultiPoint(self.path(coords)?),
            "LineString" => Geometry::LineString(self.path(coords)?),
            "MultiLineString" => Geometry::MultiLineString(self.list(coords, |c| self.path(c))?),
            "Polygon" => Geometry::Polygon(self.polygon(coords)?),
            "MultiPolygon" => Geometry::MultiPolygon(self.list(coords, |c| self.polygon(c))?),
            other => return Err(self.invalid(format!("unsupported geometry type: {other}"))),
        })
    }

    fn polygon(&self, value: &Value) -> Result<Vec<Vec<LonLat>>, DataError> {
        let rings = self.list(value, |c| self.path(c))?;
        if rings.is_empty() {
            return Err(self.invalid("polygon has no rings"));
        }
        Ok(rings)
    }

    fn path(&self, value: &Value) -> Result<Vec<LonLat>, DataError> {
        self.list(value, |c| self.position(c))
    }

    fn list<T>(
        &self,
        value: &Value,
        item: impl Fn(&Value) -> Result<T, DataError>,
    ) -> Result<Vec<T>, DataError> {
        value
            .as_array()
            .ok_or_else(|| self.invalid("coordinates must be nested arrays"))?
            .iter()
            .map(item)
            .collect()
    }

    /// `[x, y, ...]` in the collection CRS, returned as lon/lat.
    fn position(&self, value: &Value) -> Result<LonLat, DataError> {
        let Some([x, y, ..]) = value.as_array().map(Vec::as_slice) else {
            return Err(self.invalid(format!("position must be [x, y], got {value}")));
        };
        match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(self.crs.to_wgs84(LonLat::new(x, y))),
            _ => Err(self.invalid(format!("position must be numeric, got {value}"))),
        }
    }
}

pub fn geometry_to_geojson_value(geom: &Geometry) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "type".to_string(),
        Value::String(geom.type_name().to_string()),
    );
    let coords = match geom {
        Geometry::Point(p) => point_coords(p),
        Geometry::MultiPoint(ps) | Geometry::LineString(ps) => line_coords(ps),
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            Value::Array(lines.iter().map(|l| line_coords(l)).collect())
        }
        Geometry::MultiPolygon(polys) => Value::Array(
            polys
                .iter()
                .map(|poly| Value::Array(poly.iter().map(|r| line_coords(r)).collect()))
                .collect(),
        ),
    };
    obj.insert("coordinates".to_string(), coords);
    Value::Object(obj)
}

fn point_coords(p: &LonLat) -> Value {
    Value::Array(vec![Value::from(p.lon), Value::from(p.lat)])
}

fn line_coords(ps: &[LonLat]) -> Value {
    Value::Array(ps.iter().map(point_coords).collect())
}
