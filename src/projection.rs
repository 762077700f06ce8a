//! Azimuthal-equidistant mapping between geographic coordinates and the disc.
//!
//! The north pole sits at the disc center and the equator on the rim. Radial
//! distance grows linearly with colatitude; longitude is the angle measured
//! clockwise from the +z axis.

use crate::config::DiscConfig;
use crate::error::DiscError;
use crate::types::{GeoCoordinate, PlanarPoint};

// Relative slack on the rim so points projected from the equator invert cleanly.
const RIM_TOLERANCE: f64 = 1e-12;

/// Radial distance of a parallel. Fails for latitudes south of the equator.
pub fn radial_distance_for_latitude(lat_deg: f64, disc: &DiscConfig) -> Result<f64, DiscError> {
    if !(0.0..=90.0).contains(&lat_deg) {
        return Err(DiscError::LatitudeOutOfDisc(lat_deg));
    }
    // radius * phi / (pi/2) with phi the colatitude; kept in degrees so the rim is exact.
    Ok(disc.radius() * (90.0 - lat_deg) / 90.0)
}

pub fn geo_to_plane(coord: GeoCoordinate, disc: &DiscConfig) -> Result<PlanarPoint, DiscError> {
    let distance = radial_distance_for_latitude(coord.latitude_deg(), disc)?;
    if distance == 0.0 {
        // Pole: every longitude collapses onto the center.
        return Ok(PlanarPoint::ORIGIN);
    }
    let theta = coord.longitude_deg().to_radians();
    Ok(PlanarPoint::new(distance * theta.sin(), distance * theta.cos()))
}

pub fn plane_to_geo(point: PlanarPoint, disc: &DiscConfig) -> Result<GeoCoordinate, DiscError> {
    let distance = point.radial_distance();
    let radius = disc.radius();
    if !(distance <= radius * (1.0 + RIM_TOLERANCE)) {
        return Err(DiscError::OutsideDisc { distance, radius });
    }
    let lat = (90.0 - (distance / radius) * 90.0).max(0.0);
    let lon = if distance == 0.0 {
        0.0
    } else {
        point.x().atan2(point.z()).to_degrees()
    };
    GeoCoordinate::new(lat, lon)
}
