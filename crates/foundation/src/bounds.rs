use crate::LonLat;

/// Axis-aligned lon/lat bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        GeoBounds { min, max }
    }

    /// Bounds of a single position.
    pub fn point(p: LonLat) -> Self {
        GeoBounds::new([p.lon, p.lat], [p.lon, p.lat])
    }

    /// Bounds covering every position, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = LonLat>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = GeoBounds::point(first);
        for p in points {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LonLat) {
        self.min[0] = self.min[0].min(p.lon);
        self.min[1] = self.min[1].min(p.lat);
        self.max[0] = self.max[0].max(p.lon);
        self.max[1] = self.max[1].max(p.lat);
    }

    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds::new(
            [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        )
    }
}
