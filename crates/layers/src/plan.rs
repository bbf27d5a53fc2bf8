use formats::{IsochroneSet, PoiSet};
use serde::Serialize;

use crate::isochrone::{IsochroneLayer, contour_scale, isochrone_layers};
use crate::legend::Legend;
use crate::markers::{Marker, PoiKind, poi_markers, start_marker};
use crate::tiles::TileLayer;

/// Which point overlays are switched on.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    pub schools: bool,
    pub hospitals: bool,
}

/// Everything one render draws, in draw order: tiles, isochrone bands
/// (largest first), the start marker, then the overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub tiles: TileLayer,
    pub isochrones: Vec<IsochroneLayer>,
    pub start_marker: Marker,
    pub schools: Vec<Marker>,
    pub hospitals: Vec<Marker>,
    pub legend: Legend,
}

pub struct RenderInputs<'a> {
    pub isochrones: &'a IsochroneSet,
    pub schools: &'a PoiSet,
    pub hospitals: &'a PoiSet,
    pub max_minutes: u32,
    pub overlays: Overlays,
    pub tiles: &'a TileLayer,
}

/// Clamp a requested threshold into `[1, upper]`; no request means `upper`.
pub fn resolve_minutes(requested: Option<u32>, upper: u32) -> u32 {
    let upper = upper.max(1);
    requested.map_or(upper, |m| m.clamp(1, upper))
}

pub fn build_render_plan(inputs: RenderInputs<'_>) -> RenderPlan {
    let scale = contour_scale(inputs.isochrones);
    let isochrones = isochrone_layers(inputs.isochrones, inputs.max_minutes as f64, &scale);

    let schools = if inputs.overlays.schools {
        poi_markers(inputs.schools, PoiKind::School)
    } else {
        Vec::new()
    };
    let hospitals = if inputs.overlays.hospitals {
        poi_markers(inputs.hospitals, PoiKind::Hospital)
    } else {
        Vec::new()
    };

    RenderPlan {
        tiles: inputs.tiles.clone(),
        isochrones,
        start_marker: start_marker(inputs.isochrones.start_point()),
        schools,
        hospitals,
        legend: Legend::new(&scale, inputs.isochrones.contours()),
    }
}
