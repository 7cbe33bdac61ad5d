//! Great-circle distance on a spherical Earth.

use crate::{GeoBounds, GeoPoint, Size2D};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the great-circle distance between two points in meters.
///
/// Uses the haversine formula. Identical points give 0; the antimeridian
/// and the poles get no special treatment.
pub fn great_circle_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Length of the bottom edge (W->E) and left edge (S->N) in meters.
pub fn edge_distances(bounds: &GeoBounds) -> Size2D<f64> {
    Size2D {
        width: great_circle_distance(&bounds.bottom_left, &bounds.bottom_right),
        height: great_circle_distance(&bounds.bottom_left, &bounds.top_left),
    }
}
