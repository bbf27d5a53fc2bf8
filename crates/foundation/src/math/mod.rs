pub mod planar;
pub mod precision;
pub mod projection;

pub use planar::*;
pub use precision::*;
pub use projection::*;
