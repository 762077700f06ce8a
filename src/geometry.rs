use crate::config::DiscConfig;
use crate::projection::geo_to_plane;
use crate::sky::Sky;
use crate::types::{City, GeoCoordinate, PlanarPoint, Point};

// +z (longitude 0) points up the page, +x to the right.
#[inline]
pub fn to_pixels(p: PlanarPoint, center_px: Point, scale: f64) -> Point {
    Point {
        x: center_px.x + p.x() * scale,
        y: center_px.y - p.z() * scale,
    }
}

/// Latitudes of the drawn parallels, equator first. The pole is a point,
/// not a ring, and is left out.
pub fn parallels(step_deg: u32) -> Vec<f64> {
    (0..90).step_by(step_deg.max(1) as usize).map(f64::from).collect()
}

/// Longitudes of the drawn meridians in (-180, 180], starting at 0.
pub fn meridians(step_deg: u32) -> Vec<f64> {
    (0..360)
        .step_by(step_deg.max(1) as usize)
        .map(|lon| if lon > 180 { lon as f64 - 360.0 } else { lon as f64 })
        .collect()
}

/// Closed ring of points along a parallel, `-180..=180` in `step_deg` steps.
pub fn sample_parallel(lat_deg: f64, step_deg: u32, disc: &DiscConfig) -> Vec<PlanarPoint> {
    let step = step_deg.max(1) as i32;
    let mut out = Vec::new();
    let mut lon = -180;
    while lon <= 180 {
        if let Ok(p) = GeoCoordinate::new(lat_deg, lon as f64).and_then(|c| geo_to_plane(c, disc)) {
            out.push(p);
        }
        lon += step;
    }
    out
}

/// Meridian from the equator up to the pole.
pub fn sample_meridian(lon_deg: f64, step_deg: u32, disc: &DiscConfig) -> Vec<PlanarPoint> {
    let step = step_deg.max(1) as i32;
    let mut out = Vec::new();
    let mut lat = 0;
    while lat <= 90 {
        if let Ok(p) = GeoCoordinate::new(lat as f64, lon_deg).and_then(|c| geo_to_plane(c, disc)) {
            out.push(p);
        }
        lat += step;
    }
    out
}

/// Place named locations on the disc. Cities south of the equator are not
/// part of the model and are skipped.
pub fn place_cities<'a>(cities: &'a [City], sky: &Sky) -> Vec<(&'a City, PlanarPoint)> {
    cities
        .iter()
        .filter_map(|city| match sky.project_geo_to_plane(city.coord) {
            Ok(p) => Some((city, p)),
            Err(e) => {
                log::warn!("skipping {}: {e}", city.name);
                None
            }
        })
        .collect()
}
