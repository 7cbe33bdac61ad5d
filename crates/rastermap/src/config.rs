//! Construction parameters for a raster map.
//!
//! This is the whole configuration surface: two corners, a pixel size and
//! the alpha flag. It can be deserialized from JSON, e.g.
//!
//! ```json
//! { "min": { "lat": 45.0, "lon": 5.0 }, "max": { "lat": 46.0, "lon": 7.0 }, "longest_pixel_size": 512 }
//! ```

use serde::{Deserialize, Serialize};

use crate::RasterMap;
use geo_common::{GeoBounds, GeoPoint, RasterMapError, RasterMapResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterMapConfig {
    /// South-west corner
    pub min: GeoPoint,
    /// North-east corner
    pub max: GeoPoint,
    /// Pixels along the longer side of the raster
    pub longest_pixel_size: u32,
    /// Start every alpha byte at 255
    #[serde(default = "default_alpha_to_max")]
    pub alpha_to_max: bool,
}

fn default_alpha_to_max() -> bool {
    true
}

impl RasterMapConfig {
    pub fn new(min: GeoPoint, max: GeoPoint, longest_pixel_size: u32) -> Self {
        Self {
            min,
            max,
            longest_pixel_size,
            alpha_to_max: default_alpha_to_max(),
        }
    }

    /// Build from a parsed bounding box.
    pub fn from_bounds(bounds: &GeoBounds, longest_pixel_size: u32) -> Self {
        Self::new(bounds.min(), bounds.max(), longest_pixel_size)
    }

    pub fn from_json_str(s: &str) -> RasterMapResult<Self> {
        serde_json::from_str(s).map_err(|e| RasterMapError::InvalidParameter {
            param: "config".to_string(),
            message: e.to_string(),
        })
    }

    pub fn build(&self) -> RasterMapResult<RasterMap> {
        RasterMap::new(self.min, self.max, self.longest_pixel_size, self.alpha_to_max)
    }
}
