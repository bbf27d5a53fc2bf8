use formats::{IsochroneSet, geometry_to_geojson_value};
use foundation::math::stable_total_cmp_f64;
use serde::Serialize;

use crate::symbology::{ColorScale, PolygonStyle};

/// One isochrone polygon, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsochroneLayer {
    pub contour: f64,
    /// Popup text.
    pub label: String,
    pub style: PolygonStyle,
    /// GeoJSON geometry object.
    pub geometry: serde_json::Value,
}

/// Color scale keyed on the contour range of the whole set, not the
/// filtered subset, so a band keeps its color while the slider moves.
pub fn contour_scale(set: &IsochroneSet) -> ColorScale {
    ColorScale::spectral_8(set.min_contour(), set.max_contour())
}

/// Polygons with `contour <= max_minutes`, in draw order.
///
/// Larger bands come first so shorter travel times end up on top. Bands
/// sharing a contour value keep reverse file order.
pub fn isochrone_layers(
    set: &IsochroneSet,
    max_minutes: f64,
    scale: &ColorScale,
) -> Vec<IsochroneLayer> {
    let mut selected: Vec<_> = set
        .features()
        .iter()
        .rev()
        .filter(|f| f.contour <= max_minutes)
        .collect();
    selected.sort_by(|a, b| stable_total_cmp_f64(b.contour, a.contour));

    selected
        .into_iter()
        .map(|f| IsochroneLayer {
            contour: f.contour,
            label: f.label(),
            style: PolygonStyle::banded(scale.hex_at(f.contour)),
            geometry: geometry_to_geojson_value(&f.geometry),
        })
        .collect()
}
