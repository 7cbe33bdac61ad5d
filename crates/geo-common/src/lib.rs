//! Common geographic types shared by the rastermap crates.

pub mod bbox;
pub mod distance;
pub mod error;
pub mod point;

pub use bbox::{BboxParseError, GeoBounds};
pub use distance::{edge_distances, great_circle_distance, EARTH_RADIUS_M};
pub use error::{RasterMapError, RasterMapResult};
pub use point::{GeoPoint, PixelPos, RasterCoord, Size2D};
