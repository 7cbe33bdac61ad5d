//! Geographic bounding rectangle and its corners.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, RasterMapError, RasterMapResult, Size2D};

/// An axis-aligned lat/lon rectangle, described by its four corners.
///
/// `bottom_left` is the south-west (min) corner and `top_right` the
/// north-east (max) corner; the other two are derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub bottom_left: GeoPoint,
    pub top_right: GeoPoint,
    pub bottom_right: GeoPoint,
    pub top_left: GeoPoint,
}

impl GeoBounds {
    /// Create bounds from the south-west and north-east corners.
    pub fn new(min: GeoPoint, max: GeoPoint) -> Self {
        Self {
            bottom_left: min,
            top_right: max,
            bottom_right: GeoPoint::new(min.lat, max.lon),
            top_left: GeoPoint::new(max.lat, min.lon),
        }
    }

    /// Parse a WMS-style BBOX string: "minLon,minLat,maxLon,maxLat"
    pub fn from_bbox_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| -> Result<f64, BboxParseError> {
            part.parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        let min_lon = parse(parts[0])?;
        let min_lat = parse(parts[1])?;
        let max_lon = parse(parts[2])?;
        let max_lat = parse(parts[3])?;

        Ok(Self::new(
            GeoPoint::new(min_lat, min_lon),
            GeoPoint::new(max_lat, max_lon),
        ))
    }

    pub fn min(&self) -> GeoPoint {
        self.bottom_left
    }

    pub fn max(&self) -> GeoPoint {
        self.top_right
    }

    /// Extent in degrees, as plain differences (no geodesic correction).
    pub fn angle_size(&self) -> Size2D<f64> {
        Size2D {
            width: self.top_right.lon - self.bottom_left.lon,
            height: self.top_right.lat - self.bottom_left.lat,
        }
    }

    /// Check if a point lies strictly inside the rectangle.
    ///
    /// All four edges are exclusive.
    pub fn contains_strict(&self, point: &GeoPoint) -> bool {
        point.lat > self.bottom_left.lat
            && point.lat < self.top_left.lat
            && point.lon > self.bottom_left.lon
            && point.lon < self.bottom_right.lon
    }

    /// Check that coordinates are finite and min is strictly south-west of max.
    pub fn validate(&self) -> RasterMapResult<()> {
        if !self.bottom_left.is_finite() || !self.top_right.is_finite() {
            return Err(RasterMapError::InvalidBounds(format!(
                "non-finite corner in [{}] .. [{}]",
                self.bottom_left, self.top_right
            )));
        }

        if self.bottom_left.lat >= self.top_right.lat || self.bottom_left.lon >= self.top_right.lon
        {
            return Err(RasterMapError::InvalidBounds(format!(
                "min [{}] must be strictly south-west of max [{}]",
                self.bottom_left, self.top_right
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minLon,minLat,maxLon,maxLat'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),
}

impl From<BboxParseError> for RasterMapError {
    fn from(err: BboxParseError) -> Self {
        RasterMapError::InvalidParameter {
            param: "bbox".to_string(),
            message: err.to_string(),
        }
    }
}
