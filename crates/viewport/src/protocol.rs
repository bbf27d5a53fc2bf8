//! Wire types exchanged with the map page.
//!
//! - Filter inputs (page → server, once per render)
//! - Viewport reports (page → server, after every pan or zoom)
//! - Viewport decisions (server → page, inside the render response)

use foundation::LonLat;
use serde::{Deserialize, Serialize};

/// Zoom used for the default viewport of a center.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Highest zoom level a report may carry.
pub const MAX_ZOOM: f64 = 24.0;

/// Map position in Leaflet's `{lat, lng}` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LonLat> for LatLng {
    fn from(p: LonLat) -> Self {
        Self::new(p.lat, p.lon)
    }
}

impl From<LatLng> for LonLat {
    fn from(p: LatLng) -> Self {
        LonLat::new(p.lng, p.lat)
    }
}

/// Map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Default view of a center: its start point at `zoom`.
    pub fn around(start: LonLat, zoom: f64) -> Self {
        Self::new(start.into(), zoom)
    }

    /// Check a viewport reported by the page.
    pub fn validate(&self) -> Result<(), ViewportError> {
        let center: LonLat = self.center.into();
        if !center.is_valid() {
            return Err(ViewportError::CenterOutOfRange {
                lat: self.center.lat,
                lng: self.center.lng,
            });
        }
        if !self.zoom.is_finite() || !(0.0..=MAX_ZOOM).contains(&self.zoom) {
            return Err(ViewportError::ZoomOutOfRange(self.zoom));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    CenterOutOfRange { lat: f64, lng: f64 },
    ZoomOutOfRange(f64),
}

impl std::fmt::Display for ViewportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewportError::CenterOutOfRange { lat, lng } => {
                write!(f, "viewport center out of range: lat={lat} lng={lng}")
            }
            ViewportError::ZoomOutOfRange(z) => {
                write!(f, "zoom out of range [0, {MAX_ZOOM}]: {z}")
            }
        }
    }
}

impl std::error::Error for ViewportError {}

/// The four user-controlled inputs as of one render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub center: String,
    pub minutes: u32,
    pub show_schools: bool,
    pub show_hospitals: bool,
}
