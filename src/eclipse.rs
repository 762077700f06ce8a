use crate::config::{DiscConfig, EclipseConfig};
use crate::error::DiscError;
use crate::lighting::smoothstep;
use crate::projection::geo_to_plane;
use crate::types::{GeoCoordinate, PlanarPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseState {
    pub is_occurring: bool,
    /// 1 is full sunlight, 0 is totality
    pub attenuation: f64,
    pub marker: PlanarPoint,
}

impl Default for EclipseState {
    fn default() -> Self {
        Self {
            is_occurring: false,
            attenuation: 1.0,
            marker: PlanarPoint::ORIGIN,
        }
    }
}

/// Sunlight factor from the planar sun/moon separation: 0 at or inside
/// `near`, exactly 1 at or beyond `far`.
pub fn eclipse_attenuation(sun: PlanarPoint, moon: PlanarPoint, near: f64, far: f64) -> f64 {
    smoothstep(near, far, sun.distance_to(moon))
}

/// Where to draw an eclipse report on the disc.
pub fn marker_position(coord: GeoCoordinate, disc: &DiscConfig) -> Result<PlanarPoint, DiscError> {
    geo_to_plane(coord, disc)
}

/// Eclipse state for the current sun and moon. `report_marker` is a reported
/// visibility point already placed with [`marker_position`]; without one the
/// marker sits under the moon.
pub fn detect(
    sun: PlanarPoint,
    moon: PlanarPoint,
    cfg: &EclipseConfig,
    report_marker: Option<PlanarPoint>,
) -> EclipseState {
    let attenuation = eclipse_attenuation(sun, moon, cfg.near, cfg.far);
    EclipseState {
        is_occurring: attenuation < 1.0,
        attenuation,
        marker: report_marker.unwrap_or(moon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{approx, disc};

    #[test]
    fn no_attenuation_beyond_far_threshold() {
        let sun = PlanarPoint::new(0.0, 0.0);
        assert_eq!(eclipse_attenuation(sun, PlanarPoint::new(1500.0, 0.0), 300.0, 1500.0), 1.0);
        assert_eq!(eclipse_attenuation(sun, PlanarPoint::new(0.0, 9000.0), 300.0, 1500.0), 1.0);
    }

    #[test]
    fn total_when_coincident() {
        let p = PlanarPoint::new(2500.0, -800.0);
        assert_eq!(eclipse_attenuation(p, p, 300.0, 1500.0), 0.0);
        assert_eq!(eclipse_attenuation(p, PlanarPoint::new(2700.0, -800.0), 300.0, 1500.0), 0.0);
    }

    #[test]
    fn partial_in_between_and_monotonic() {
        let sun = PlanarPoint::ORIGIN;
        let mut prev = 0.0;
        for d in (300..=1500).step_by(100) {
            let a = eclipse_attenuation(sun, PlanarPoint::new(d as f64, 0.0), 300.0, 1500.0);
            assert!(a >= prev);
            prev = a;
        }
        let mid = eclipse_attenuation(sun, PlanarPoint::new(900.0, 0.0), 300.0, 1500.0);
        assert!(approx(mid, 0.5, 1e-12));
    }

    #[test]
    fn detect_reports_occurrence_and_marker() {
        let d = disc();
        let cfg = EclipseConfig::default();
        let sun = PlanarPoint::new(1000.0, 1000.0);
        let moon = PlanarPoint::new(1100.0, 1000.0);

        let state = detect(sun, moon, &cfg, None);
        assert!(state.is_occurring);
        assert_eq!(state.attenuation, 0.0);
        assert_eq!(state.marker, moon);

        let report = GeoCoordinate::new(45.0, 90.0).unwrap();
        let marker = marker_position(report, &d).unwrap();
        let state = detect(sun, moon, &cfg, Some(marker));
        assert!(approx(state.marker.x(), 5000.0, 1e-9));
        assert!(approx(state.marker.z(), 0.0, 1e-9));

        let far = detect(sun, PlanarPoint::new(-5000.0, 0.0), &cfg, None);
        assert!(!far.is_occurring);
        assert_eq!(far.attenuation, 1.0);
    }

    #[test]
    fn southern_report_has_no_marker() {
        let report = GeoCoordinate::new(-10.0, 20.0).unwrap();
        assert!(matches!(
            marker_position(report, &disc()),
            Err(DiscError::LatitudeOutOfDisc(_))
        ));
    }
}
