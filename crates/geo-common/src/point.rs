//! Point and size types for geographic and raster space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RasterMapError;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for GeoPoint {
    type Err = RasterMapError;

    /// Parse a `"lat,lon"` pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| RasterMapError::InvalidParameter {
            param: "point".to_string(),
            message,
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(invalid(format!("expected 'lat,lon', got '{}'", s)));
        }

        let lat = parts[0]
            .parse()
            .map_err(|_| invalid(format!("invalid latitude '{}'", parts[0])))?;
        let lon = parts[1]
            .parse()
            .map_err(|_| invalid(format!("invalid longitude '{}'", parts[1])))?;

        Ok(Self { lat, lon })
    }
}

/// Integer raster position (column, row), origin top-left, y growing downward.
///
/// Signed: nearest-neighbour rounding of a geo position right below the
/// north edge lands on row -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<PixelPos> for RasterCoord {
    fn from(pos: PixelPos) -> Self {
        RasterCoord {
            x: pos.x as f64,
            y: pos.y as f64,
        }
    }
}

/// Fractional (sub-pixel) raster position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterCoord {
    pub x: f64,
    pub y: f64,
}

impl RasterCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both axes half away from zero.
    pub fn round(&self) -> PixelPos {
        PixelPos {
            x: self.x.round() as i64,
            y: self.y.round() as i64,
        }
    }
}

/// A width/height pair, in whatever unit the field name says.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size2D<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size2D<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geo_point() {
        let p: GeoPoint = "45.5, -73.6".parse().unwrap();
        assert_eq!(p, GeoPoint::new(45.5, -73.6));
        assert_eq!(p.to_string(), "45.5,-73.6");
    }

    #[test]
    fn test_parse_geo_point_invalid() {
        assert!(matches!(
            "45.5".parse::<GeoPoint>(),
            Err(RasterMapError::InvalidParameter { .. })
        ));
        assert!(matches!(
            "abc,1".parse::<GeoPoint>(),
            Err(RasterMapError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(RasterCoord::new(2.5, -0.5).round(), PixelPos::new(3, -1));
        assert_eq!(RasterCoord::new(2.49, -0.49).round(), PixelPos::new(2, 0));
    }

    #[test]
    fn test_geo_point_json() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5}"#).unwrap();
        assert_eq!(p, GeoPoint::new(1.5, 2.5));
    }
}
