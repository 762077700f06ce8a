use std::f64::consts::PI;

use crate::types::PlanarPoint;

/// Illuminated fraction of the moon: 0 is new (sun and moon in the same
/// direction from the pole), 1 is full (opposite directions).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MoonPhase(f64);

impl MoonPhase {
    /// Used until a non-degenerate sun/moon configuration has been seen.
    pub const DEFAULT: MoonPhase = MoonPhase(0.5);

    pub fn new(fraction: f64) -> Self {
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// The same phase on [-1, 1]: -1 new, 1 full.
    pub fn signed(&self) -> f64 {
        2.0 * self.0 - 1.0
    }
}

impl Default for MoonPhase {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Phase from the angle between the sun and moon position vectors.
///
/// Returns `None` when either body sits exactly on the disc center, where
/// the angle is undefined, or when a position is not finite.
pub fn compute_phase(sun: PlanarPoint, moon: PlanarPoint) -> Option<MoonPhase> {
    let norm = sun.radial_distance() * moon.radial_distance();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    let cos_sep = sun.dot(moon) / norm;
    if cos_sep.is_nan() {
        return None;
    }
    let separation = cos_sep.clamp(-1.0, 1.0).acos() / PI;
    Some(MoonPhase::new((1.0 - (separation * PI).cos()) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn same_direction_is_new_moon() {
        let p = compute_phase(PlanarPoint::new(3000.0, 0.0), PlanarPoint::new(1200.0, 0.0)).unwrap();
        assert!(approx(p.fraction(), 0.0, 1e-12));
        assert!(approx(p.signed(), -1.0, 1e-12));
    }

    #[test]
    fn opposite_direction_is_full_moon() {
        let p = compute_phase(PlanarPoint::new(0.0, 5000.0), PlanarPoint::new(0.0, -2500.0)).unwrap();
        assert!(approx(p.fraction(), 1.0, 1e-12));
        assert!(approx(p.signed(), 1.0, 1e-12));
    }

    #[test]
    fn right_angle_is_half() {
        let p = compute_phase(PlanarPoint::new(4000.0, 0.0), PlanarPoint::new(0.0, 4000.0)).unwrap();
        assert!(approx(p.fraction(), 0.5, 1e-12));
    }

    #[test]
    fn symmetric_in_its_arguments() {
        let pts = [
            PlanarPoint::new(1000.0, 200.0),
            PlanarPoint::new(-3000.0, 4000.0),
            PlanarPoint::new(5.0, -9000.0),
            PlanarPoint::new(-7000.0, -1.0),
        ];
        for a in pts {
            for b in pts {
                let ab = compute_phase(a, b).unwrap().fraction();
                let ba = compute_phase(b, a).unwrap().fraction();
                assert!(approx(ab, ba, 1e-12));
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn degenerate_center_position_has_no_phase() {
        assert!(compute_phase(PlanarPoint::ORIGIN, PlanarPoint::new(1.0, 1.0)).is_none());
        assert!(compute_phase(PlanarPoint::new(1.0, 1.0), PlanarPoint::ORIGIN).is_none());
        assert_eq!(MoonPhase::default().fraction(), 0.5);
    }

    #[test]
    fn non_finite_positions_have_no_phase() {
        let moon = PlanarPoint::new(1000.0, 0.0);
        assert!(compute_phase(PlanarPoint::new(f64::INFINITY, 0.0), moon).is_none());
        assert!(compute_phase(moon, PlanarPoint::new(0.0, f64::NAN)).is_none());
    }
}
