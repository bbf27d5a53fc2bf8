use formats::PoiSet;
use foundation::LonLat;
use serde::Serialize;

/// Marker glyph, interpreted by the page script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Font Awesome glyph inside a colored pin.
    Pin {
        icon: &'static str,
        color: &'static str,
    },
    /// Outlined marker with a glyph, used for the travel origin.
    Beacon {
        icon: &'static str,
        background_color: &'static str,
        text_color: &'static str,
        border_color: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub icon: MarkerIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// Overlay categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PoiKind {
    School,
    Hospital,
}

impl PoiKind {
    /// Popup text for a point without a name.
    pub fn default_label(self) -> &'static str {
        match self {
            PoiKind::School => "School",
            PoiKind::Hospital => "Hospital",
        }
    }

    pub fn icon(self) -> MarkerIcon {
        match self {
            PoiKind::School => MarkerIcon::Pin {
                icon: "graduation-cap",
                color: "blue",
            },
            PoiKind::Hospital => MarkerIcon::Pin {
                icon: "plus-square",
                color: "red",
            },
        }
    }
}

pub fn start_marker(position: LonLat) -> Marker {
    Marker {
        lat: position.lat,
        lng: position.lon,
        icon: MarkerIcon::Beacon {
            icon: "car",
            background_color: "white",
            text_color: "black",
            border_color: "black",
        },
        popup: None,
    }
}

pub fn poi_markers(set: &PoiSet, kind: PoiKind) -> Vec<Marker> {
    set.pois()
        .iter()
        .map(|poi| Marker {
            lat: poi.position.lat,
            lng: poi.position.lon,
            icon: kind.icon(),
            popup: Some(poi.display_name(kind.default_label()).to_string()),
        })
        .collect()
}
