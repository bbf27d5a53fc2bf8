//! Planar ring and polygon measures on raw lon/lat coordinates.
//!
//! Isochrone polygons cover a few kilometers, so centroids are computed in
//! coordinate space the same way GIS toolkits do for geographic layers.

use crate::LonLat;

const AREA_EPSILON: f64 = 1e-18;

/// Area and area-weighted centroid of one ring.
#[derive(Debug, Copy, Clone, PartialEq)]
struct RingMoment {
    /// Unsigned area in squared degrees.
    area: f64,
    centroid: LonLat,
}

/// Area and centroid of a ring, or `None` when the ring is degenerate.
///
/// The ring may be closed (first == last) or open, wound either way.
fn ring_moment(ring: &[LonLat]) -> Option<RingMoment> {
    let origin = ring.first().copied()?;
    let mut twice = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    // Translate to the first vertex to keep products small.
    for (a, b) in ring_edges(ring) {
        let (ax, ay) = (a.lon - origin.lon, a.lat - origin.lat);
        let (bx, by) = (b.lon - origin.lon, b.lat - origin.lat);
        let cross = ax * by - bx * ay;
        twice += cross;
        cx += (ax + bx) * cross;
        cy += (ay + by) * cross;
    }
    if twice.abs() <= AREA_EPSILON {
        return None;
    }
    Some(RingMoment {
        area: (twice * 0.5).abs(),
        centroid: LonLat::new(origin.lon + cx / (3.0 * twice), origin.lat + cy / (3.0 * twice)),
    })
}

/// Centroid of a polygon given as exterior ring followed by holes.
///
/// Falls back to the mean of the exterior vertices when the polygon has no
/// area. Returns `None` only for a polygon without vertices.
pub fn polygon_centroid(rings: &[Vec<LonLat>]) -> Option<LonLat> {
    multi_polygon_centroid(&[rings.to_vec()])
}

/// Area-weighted centroid of several polygons.
pub fn multi_polygon_centroid(polygons: &[Vec<Vec<LonLat>>]) -> Option<LonLat> {
    let mut area = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;

    for rings in polygons {
        let mut rings = rings.iter();
        let Some(exterior) = rings.next() else {
            continue;
        };
        if let Some(m) = ring_moment(exterior) {
            area += m.area;
            sx += m.area * m.centroid.lon;
            sy += m.area * m.centroid.lat;
        }
        for hole in rings {
            if let Some(m) = ring_moment(hole) {
                area -= m.area;
                sx -= m.area * m.centroid.lon;
                sy -= m.area * m.centroid.lat;
            }
        }
    }

    if area > AREA_EPSILON {
        return Some(LonLat::new(sx / area, sy / area));
    }
    vertex_mean(polygons.iter().filter_map(|rings| rings.first()))
}

fn vertex_mean<'a>(rings: impl Iterator<Item = &'a Vec<LonLat>>) -> Option<LonLat> {
    let mut n = 0usize;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for ring in rings {
        for p in open_ring(ring) {
            n += 1;
            sx += p.lon;
            sy += p.lat;
        }
    }
    (n > 0).then(|| LonLat::new(sx / n as f64, sy / n as f64))
}

/// Ring vertices without the repeated closing vertex.
fn open_ring(ring: &[LonLat]) -> &[LonLat] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

fn ring_edges(ring: &[LonLat]) -> impl Iterator<Item = (LonLat, LonLat)> + '_ {
    let open = open_ring(ring);
    let n = open.len();
    (0..n).map(move |i| (open[i], open[(i + 1) % n]))
}
