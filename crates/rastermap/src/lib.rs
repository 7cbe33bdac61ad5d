//! Geographic raster maps backed by an RGBA pixel buffer.
//!
//! A [`RasterMap`] maps a lat/lon rectangle onto a pixel grid using an
//! equirectangular approximation and the center-pixel convention, and
//! exposes bounds-checked color accessors into its buffer.

pub mod config;
pub mod raster_map;

pub use config::RasterMapConfig;
pub use raster_map::{RasterMap, RasterMapSummary, RasterPoint, Sampling, NCPP};

pub use geo_common::{
    great_circle_distance, GeoBounds, GeoPoint, PixelPos, RasterCoord, RasterMapError,
    RasterMapResult, Size2D,
};
