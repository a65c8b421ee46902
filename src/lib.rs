/// Error type shared by every stage of the pipeline
pub mod error;
/// Node/Element graph built from a JSON mesh description
pub mod mesh;
/// Local maxima detection and ranking
pub mod view_spots;
/// Explicit run configuration and the load -> build -> evaluate pipeline
pub mod pipeline;
/// SVG rendering of a Mesh with its view spots highlighted
#[cfg(feature = "svg_export")]
pub mod render;

/// Commonly used types
pub mod prelude {
    pub use crate::error::ViewSpotError;
    pub use crate::mesh::{
        element::Element,
        node::Node,
        space::{normalize, Bounds, Point, Range},
        DuplicatePolicy, Mesh, MeshRecords,
    };
    pub use crate::pipeline::{Config, OutputTarget};
    #[cfg(feature = "svg_export")]
    pub use crate::render::SvgOptions;
    pub use crate::view_spots::{is_local_maximum, ViewSpot, ViewSpots};
}
