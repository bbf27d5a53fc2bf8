//! Colors and path styles for isochrone polygons.

use serde::Serialize;

/// RGB color, 0..=255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }

    fn from_unit(c: [f64; 3]) -> Self {
        // Truncating after scaling by just under 256 keeps endpoint colors exact.
        let byte = |u: f64| (u.clamp(0.0, 1.0) * 255.999_999_9) as u8;
        Self::new(byte(c[0]), byte(c[1]), byte(c[2]))
    }
}

/// ColorBrewer "Spectral", 8 classes, red (low) to blue (high).
pub const SPECTRAL_8: [Rgb; 8] = [
    Rgb::new(0xd5, 0x3e, 0x4f),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x8b),
    Rgb::new(0xe6, 0xf5, 0x98),
    Rgb::new(0xab, 0xdd, 0xa4),
    Rgb::new(0x66, 0xc2, 0xa5),
    Rgb::new(0x32, 0x88, 0xbd),
];

/// Linear color scale over `[vmin, vmax]` with evenly spaced stops.
///
/// Values at or below the first stop take the first color, values at or
/// above the last stop take the last color, and anything between blends the
/// two surrounding stops channel by channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colors: Vec<[f64; 3]>,
    index: Vec<f64>,
}

impl ColorScale {
    /// Panics if `colors` is empty.
    pub fn linear(colors: &[Rgb], vmin: f64, vmax: f64) -> Self {
        assert!(!colors.is_empty(), "color scale needs at least one color");
        let n = colors.len();
        let index = if n == 1 {
            vec![vmin]
        } else {
            let step = (vmax - vmin) / (n - 1) as f64;
            (0..n).map(|i| vmin + step * i as f64).collect()
        };
        Self {
            colors: colors.iter().map(|c| c.to_unit()).collect(),
            index,
        }
    }

    pub fn spectral_8(vmin: f64, vmax: f64) -> Self {
        Self::linear(&SPECTRAL_8, vmin, vmax)
    }

    pub fn vmin(&self) -> f64 {
        self.index[0]
    }

    pub fn vmax(&self) -> f64 {
        self.index[self.index.len() - 1]
    }

    pub fn rgb_at(&self, x: f64) -> Rgb {
        let last = self.index.len() - 1;
        if x <= self.index[0] {
            return Rgb::from_unit(self.colors[0]);
        }
        if x >= self.index[last] {
            return Rgb::from_unit(self.colors[last]);
        }
        let i = self.index.iter().filter(|&&u| u < x).count();
        let (lo, hi) = (self.index[i - 1], self.index[i]);
        let p = if hi > lo { (x - lo) / (hi - lo) } else { 1.0 };
        let (a, b) = (self.colors[i - 1], self.colors[i]);
        Rgb::from_unit([
            a[0] * (1.0 - p) + b[0] * p,
            a[1] * (1.0 - p) + b[1] * p,
            a[2] * (1.0 - p) + b[2] * p,
        ])
    }

    pub fn hex_at(&self, x: f64) -> String {
        self.rgb_at(x).to_hex()
    }

    /// Stop colors as hex, low to high.
    pub fn stop_colors(&self) -> Vec<String> {
        self.colors
            .iter()
            .map(|c| Rgb::from_unit(*c).to_hex())
            .collect()
    }
}

/// Leaflet path options for one polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub color: String,
    pub fill_color: String,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl PolygonStyle {
    /// Stroke and fill in the same color, translucent fill.
    pub fn banded(color: String) -> Self {
        Self {
            fill_color: color.clone(),
            color,
            weight: 1.0,
            opacity: 0.9,
            fill_opacity: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorScale, PolygonStyle, Rgb, SPECTRAL_8};

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Rgb::new(50, 136, 189).to_hex(), "#3288bd");
        assert_eq!(Rgb::new(0, 7, 255).to_hex(), "#0007ff");
    }

    #[test]
    fn endpoints_take_first_and_last_color() {
        let scale = ColorScale::spectral_8(5.0, 30.0);
        assert_eq!(scale.rgb_at(5.0), SPECTRAL_8[0]);
        assert_eq!(scale.rgb_at(30.0), SPECTRAL_8[7]);
        assert_eq!(scale.hex_at(5.0), "#d53e4f");
        assert_eq!(scale.hex_at(30.0), "#3288bd");
        // Clamped outside the domain.
        assert_eq!(scale.rgb_at(-1.0), SPECTRAL_8[0]);
        assert_eq!(scale.rgb_at(99.0), SPECTRAL_8[7]);
    }

    #[test]
    fn interior_stops_are_hit_exactly() {
        // 8 stops over [0, 70] land on multiples of 10.
        let scale = ColorScale::spectral_8(0.0, 70.0);
        for (i, expected) in SPECTRAL_8.iter().enumerate() {
            assert_eq!(scale.rgb_at(10.0 * i as f64), *expected, "stop {i}");
        }
    }

    #[test]
    fn midpoint_blends_neighbours() {
        let scale = ColorScale::linear(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)], 0.0, 10.0);
        let mid = scale.rgb_at(5.0);
        assert_eq!(mid, Rgb::new(127, 127, 127));
    }

    #[test]
    fn degenerate_range_uses_first_color() {
        let scale = ColorScale::spectral_8(10.0, 10.0);
        assert_eq!(scale.rgb_at(10.0), SPECTRAL_8[0]);
        assert_eq!(scale.vmin(), 10.0);
        assert_eq!(scale.vmax(), 10.0);
    }

    #[test]
    fn banded_style_matches_color() {
        let style = PolygonStyle::banded("#abdda4".to_string());
        assert_eq!(style.color, style.fill_color);
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["fillColor"], "#abdda4");
        assert_eq!(json["weight"], 1.0);
        assert!(json.get("fillOpacity").is_some());
    }
}
