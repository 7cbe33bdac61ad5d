//! Geographic rectangle to RGBA raster mapping.
//!
//! The raster follows the center-pixel convention: pixel `(x, y)` stands for
//! the geographic point at its center. Rows run north to south, so the
//! bottom-left geographic corner is on the last row.
//!
//! ## Buffer layout
//!
//! Row-major, top to bottom, 4 bytes per pixel (R, G, B, A), length
//! `width * height * 4`. Downstream encoders read this layout directly.

use serde::Serialize;
use tracing::{debug, trace};

use geo_common::{
    edge_distances, GeoBounds, GeoPoint, PixelPos, RasterCoord, RasterMapError, RasterMapResult,
    Size2D,
};

/// Number of components per pixel (RGBA).
pub const NCPP: usize = 4;

/// How a geo position is turned into a raster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Round to the nearest pixel, half away from zero.
    #[default]
    NearestNeighbor,
    /// Keep the sub-pixel coordinate.
    Exact,
}

/// Result of a geo to raster conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterPoint {
    Pixel(PixelPos),
    SubPixel(RasterCoord),
}

impl RasterPoint {
    /// The position as a fractional coordinate, whichever variant it is.
    pub fn as_coord(&self) -> RasterCoord {
        match *self {
            RasterPoint::Pixel(pos) => pos.into(),
            RasterPoint::SubPixel(coord) => coord,
        }
    }

    pub fn as_pixel(&self) -> Option<PixelPos> {
        match *self {
            RasterPoint::Pixel(pos) => Some(pos),
            RasterPoint::SubPixel(_) => None,
        }
    }
}

/// A lat/lon rectangle rasterized into an RGBA buffer.
///
/// Geometry is fixed at construction; only the buffer contents change.
#[derive(Debug, Clone)]
pub struct RasterMap {
    corners: GeoBounds,
    angle_size: Size2D<f64>,
    meter_size: Size2D<f64>,
    raster_size: Size2D<u32>,
    angle_per_pixel: Size2D<f64>,
    pixel_per_angle: Size2D<f64>,
    buffer: Vec<u8>,
}

/// Serializable snapshot of a raster map's geometry.
#[derive(Debug, Clone, Serialize)]
pub struct RasterMapSummary {
    pub corners: GeoBounds,
    pub angle_size: Size2D<f64>,
    pub meter_size: Size2D<f64>,
    pub raster_size: Size2D<u32>,
    pub angle_per_pixel: Size2D<f64>,
    pub pixel_per_angle: Size2D<f64>,
    pub portrait: bool,
    pub buffer_len: usize,
}

impl RasterMap {
    /// Allocate a raster for the rectangle `min`..`max`.
    ///
    /// The longer side, measured as great-circle distance along the bottom
    /// and left edges, gets exactly `longest_pixel_size` pixels; the other
    /// side is scaled proportionally and rounded up. Equal edges give a
    /// landscape raster. With `alpha_to_max` every alpha byte starts at 255,
    /// otherwise the whole buffer is zero.
    ///
    /// # Errors
    /// - `InvalidBounds` if a corner is not finite, `min` is not strictly
    ///   south-west of `max`, or an edge length is not positive.
    /// - `InvalidPixelSize` if `longest_pixel_size` is 0 or the buffer size
    ///   overflows.
    pub fn new(
        min: GeoPoint,
        max: GeoPoint,
        longest_pixel_size: u32,
        alpha_to_max: bool,
    ) -> RasterMapResult<Self> {
        if longest_pixel_size == 0 {
            return Err(RasterMapError::InvalidPixelSize(longest_pixel_size));
        }

        let corners = GeoBounds::new(min, max);
        corners.validate()?;

        // in meters
        let meter_size = edge_distances(&corners);
        let south_to_north = meter_size.height;
        let west_to_east = meter_size.width;

        if !(south_to_north > 0.0 && west_to_east > 0.0) {
            return Err(RasterMapError::InvalidBounds(format!(
                "degenerate edge: {} m west-east, {} m south-north",
                west_to_east, south_to_north
            )));
        }

        let angle_size = corners.angle_size();

        let longest = longest_pixel_size as f64;
        let raster_size = if south_to_north > west_to_east {
            Size2D {
                width: (longest * (west_to_east / south_to_north)).ceil() as u32,
                height: longest_pixel_size,
            }
        } else {
            Size2D {
                width: longest_pixel_size,
                height: (longest * (south_to_north / west_to_east)).ceil() as u32,
            }
        };

        let angle_per_pixel = Size2D {
            width: angle_size.width / raster_size.width as f64,
            height: angle_size.height / raster_size.height as f64,
        };
        let pixel_per_angle = Size2D {
            width: raster_size.width as f64 / angle_size.width,
            height: raster_size.height as f64 / angle_size.height,
        };

        let buffer_len = (raster_size.width as usize)
            .checked_mul(raster_size.height as usize)
            .and_then(|n| n.checked_mul(NCPP))
            .ok_or(RasterMapError::InvalidPixelSize(longest_pixel_size))?;

        let mut buffer = vec![0u8; buffer_len];
        if alpha_to_max {
            for pixel in buffer.chunks_exact_mut(NCPP) {
                pixel[3] = 255;
            }
        }

        debug!(
            width = raster_size.width,
            height = raster_size.height,
            portrait = south_to_north > west_to_east,
            west_to_east_m = west_to_east,
            south_to_north_m = south_to_north,
            alpha_to_max,
            "Allocated raster map"
        );

        Ok(Self {
            corners,
            angle_size,
            meter_size,
            raster_size,
            angle_per_pixel,
            pixel_per_angle,
            buffer,
        })
    }

    pub fn raster_width(&self) -> u32 {
        self.raster_size.width
    }

    pub fn raster_height(&self) -> u32 {
        self.raster_size.height
    }

    /// The live pixel buffer. Writes made through this map show up here.
    pub fn raster_data(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable view of the live pixel buffer.
    pub fn raster_data_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Give up the map and keep its buffer, e.g. to hand it to an encoder.
    pub fn into_raster_data(self) -> Vec<u8> {
        self.buffer
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.corners
    }

    pub fn angle_size(&self) -> Size2D<f64> {
        self.angle_size
    }

    pub fn meter_size(&self) -> Size2D<f64> {
        self.meter_size
    }

    pub fn raster_size(&self) -> Size2D<u32> {
        self.raster_size
    }

    pub fn angle_per_pixel(&self) -> Size2D<f64> {
        self.angle_per_pixel
    }

    pub fn pixel_per_angle(&self) -> Size2D<f64> {
        self.pixel_per_angle
    }

    /// True when the south-north edge is longer than the west-east edge.
    pub fn is_portrait(&self) -> bool {
        self.meter_size.height > self.meter_size.width
    }

    pub fn summary(&self) -> RasterMapSummary {
        RasterMapSummary {
            corners: self.corners,
            angle_size: self.angle_size,
            meter_size: self.meter_size,
            raster_size: self.raster_size,
            angle_per_pixel: self.angle_per_pixel,
            pixel_per_angle: self.pixel_per_angle,
            portrait: self.is_portrait(),
            buffer_len: self.buffer.len(),
        }
    }

    /// Convert a geo position to a raster position.
    ///
    /// The position must lie strictly inside the rectangle; every edge is
    /// exclusive.
    pub fn geo_pos_to_raster_pos(
        &self,
        geo_pos: &GeoPoint,
        sampling: Sampling,
    ) -> RasterMapResult<RasterPoint> {
        let coord = self.geo_to_raster_coord(geo_pos)?;
        Ok(match sampling {
            Sampling::NearestNeighbor => RasterPoint::Pixel(coord.round()),
            Sampling::Exact => RasterPoint::SubPixel(coord),
        })
    }

    /// Nearest-neighbour pixel for a geo position.
    ///
    /// Points right below the north edge or right before the east edge can
    /// round onto row -1 or column `width`; the raster-side accessors reject
    /// those.
    pub fn geo_to_pixel(&self, geo_pos: &GeoPoint) -> RasterMapResult<PixelPos> {
        Ok(self.geo_to_raster_coord(geo_pos)?.round())
    }

    /// Sub-pixel raster coordinate for a geo position.
    pub fn geo_to_raster_coord(&self, geo_pos: &GeoPoint) -> RasterMapResult<RasterCoord> {
        if !self.corners.contains_strict(geo_pos) {
            trace!(lat = geo_pos.lat, lon = geo_pos.lon, "Geo position out of bounds");
            return Err(RasterMapError::GeoOutOfBounds {
                lat: geo_pos.lat,
                lon: geo_pos.lon,
            });
        }

        let bottom_left = &self.corners.bottom_left;
        let x = (geo_pos.lon - bottom_left.lon) * self.pixel_per_angle.width;
        let y = self.raster_size.height as f64
            - (geo_pos.lat - bottom_left.lat) * self.pixel_per_angle.height
            - 1.0;

        Ok(RasterCoord { x, y })
    }

    /// Geo position at the center of a pixel.
    pub fn raster_pos_to_geo_pos(&self, raster_pos: &PixelPos) -> RasterMapResult<GeoPoint> {
        self.raster_coord_to_geo_pos(&RasterCoord::from(*raster_pos))
    }

    /// Geo position for a fractional raster coordinate, without rounding.
    ///
    /// Exact inverse of [`RasterMap::geo_to_raster_coord`].
    pub fn raster_coord_to_geo_pos(&self, raster_pos: &RasterCoord) -> RasterMapResult<GeoPoint> {
        self.check_raster_bounds(raster_pos.x, raster_pos.y)?;

        let bottom_left = &self.corners.bottom_left;
        let lon = bottom_left.lon + raster_pos.x * self.angle_per_pixel.width;
        let lat = bottom_left.lat
            + (self.raster_size.height as f64 - raster_pos.y - 1.0) * self.angle_per_pixel.height;

        Ok(GeoPoint { lat, lon })
    }

    /// Offset of the red component of a pixel within the buffer.
    pub fn raster_position_to_buffer_position(
        &self,
        raster_pos: &PixelPos,
    ) -> RasterMapResult<usize> {
        self.check_raster_bounds(raster_pos.x as f64, raster_pos.y as f64)?;

        // Bounds check guarantees both are non-negative and below the raster size
        let x = raster_pos.x as usize;
        let y = raster_pos.y as usize;
        Ok((y * self.raster_size.width as usize + x) * NCPP)
    }

    /// Write up to 4 components, `[r, g, b, a]`, at a pixel.
    ///
    /// Components not supplied keep their current value. Nothing is written
    /// if the position or the color is rejected.
    pub fn set_color_raster(
        &mut self,
        color: &[u8],
        raster_pos: &PixelPos,
    ) -> RasterMapResult<()> {
        let offset = self.raster_position_to_buffer_position(raster_pos)?;

        if color.len() > NCPP {
            return Err(RasterMapError::InvalidColor {
                components: color.len(),
                max: NCPP,
            });
        }

        self.buffer[offset..offset + color.len()].copy_from_slice(color);
        Ok(())
    }

    /// Write a color at the nearest pixel of a geo position.
    pub fn set_color_geo(&mut self, color: &[u8], geo_pos: &GeoPoint) -> RasterMapResult<()> {
        let raster_pos = self.geo_to_pixel(geo_pos)?;
        self.set_color_raster(color, &raster_pos)
    }

    /// The RGBA components of a pixel.
    pub fn color_at(&self, raster_pos: &PixelPos) -> RasterMapResult<[u8; NCPP]> {
        let offset = self.raster_position_to_buffer_position(raster_pos)?;
        let mut rgba = [0u8; NCPP];
        rgba.copy_from_slice(&self.buffer[offset..offset + NCPP]);
        Ok(rgba)
    }

    fn check_raster_bounds(&self, x: f64, y: f64) -> RasterMapResult<()> {
        let width = self.raster_size.width;
        let height = self.raster_size.height;

        // Written so that NaN fails too
        let inside = x >= 0.0 && x < width as f64 && y >= 0.0 && y < height as f64;
        if !inside {
            trace!(x, y, width, height, "Raster position out of bounds");
            return Err(RasterMapError::RasterOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        Ok(())
    }
}
