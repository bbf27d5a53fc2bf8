//! Map layers for one isochrone render: color scale, polygon bands,
//! markers, legend and the assembled render plan.

pub mod isochrone;
pub mod legend;
pub mod markers;
pub mod plan;
pub mod symbology;
pub mod tiles;

pub use isochrone::*;
pub use legend::*;
pub use markers::*;
pub use plan::*;
pub use symbology::*;
pub use tiles::*;
