use crate::LonLat;

/// WGS84 semi-major axis (meters), the sphere radius used by Web Mercator.
pub const WGS84_A: f64 = 6_378_137.0;

/// Web Mercator (EPSG:3857) meters to lon/lat degrees.
pub fn web_mercator_to_lonlat(x: f64, y: f64) -> LonLat {
    let lon = (x / WGS84_A).to_degrees();
    let lat = (2.0 * (y / WGS84_A).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    LonLat::new(lon, lat)
}
