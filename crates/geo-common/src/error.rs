//! Error types for raster map operations.

use thiserror::Error;

/// Result type alias using RasterMapError.
pub type RasterMapResult<T> = Result<T, RasterMapError>;

/// Primary error type for raster map operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterMapError {
    // === Position Errors ===
    #[error("The geo position ({lat}, {lon}) is out of bound")]
    GeoOutOfBounds { lat: f64, lon: f64 },

    #[error("The raster position ({x}, {y}) is out of bound for a {width}x{height} raster")]
    RasterOutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    // === Color Errors ===
    #[error("The color must contain at most {max} elements, got {components}")]
    InvalidColor { components: usize, max: usize },

    // === Construction Errors ===
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid pixel size: {0} (must be positive)")]
    InvalidPixelSize(u32),

    // === Input Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl RasterMapError {
    /// True for both the geographic and the raster flavour of out-of-bounds.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            RasterMapError::GeoOutOfBounds { .. } | RasterMapError::RasterOutOfBounds { .. }
        )
    }

    /// Short machine-readable code, used in CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            RasterMapError::GeoOutOfBounds { .. } | RasterMapError::RasterOutOfBounds { .. } => {
                "OutOfBounds"
            }
            RasterMapError::InvalidColor { .. } => "InvalidColor",
            RasterMapError::InvalidBounds(_) => "InvalidBounds",
            RasterMapError::InvalidPixelSize(_) => "InvalidPixelSize",
            RasterMapError::InvalidParameter { .. } => "InvalidParameter",
        }
    }
}
