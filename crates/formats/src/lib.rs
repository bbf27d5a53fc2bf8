//! GeoJSON inputs of the isochrone viewer: parsing, CRS normalization and
//! typed isochrone / point-of-interest collections.

pub mod crs;
pub mod error;
pub mod geojson;
pub mod isochrone;
pub mod loader;
pub mod poi;

pub use crs::*;
pub use error::*;
pub use geojson::*;
pub use isochrone::*;
pub use loader::*;
pub use poi::*;
