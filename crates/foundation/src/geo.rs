/// A geographic position in decimal degrees (EPSG:4326 axis order: lon, lat).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// True when the position lies inside the valid longitude/latitude range.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::LonLat;

    #[test]
    fn validity_checks_ranges_and_finiteness() {
        assert!(LonLat::new(9.19, 45.46).is_valid());
        assert!(LonLat::new(-180.0, -90.0).is_valid());
        assert!(!LonLat::new(181.0, 0.0).is_valid());
        assert!(!LonLat::new(0.0, 90.5).is_valid());
        assert!(!LonLat::new(f64::NAN, 0.0).is_valid());
    }
}
