use rayon::prelude::*;

use crate::celestial::CelestialBody;
use crate::config::{DiscConfig, SkyConfig};
use crate::eclipse::{detect, marker_position, EclipseState};
use crate::error::DiscError;
use crate::lighting::{IlluminationSample, LightingModel};
use crate::phase::{compute_phase, MoonPhase};
use crate::projection::{geo_to_plane, plane_to_geo};
use crate::types::{GeoCoordinate, PlanarPoint};

/// One raster cell of an evaluated illumination field.
#[derive(Debug, Clone, Copy)]
pub struct FieldCell {
    pub center: PlanarPoint,
    pub sample: IlluminationSample,
}

/// Most recent sun/moon inputs plus everything derived from them.
///
/// All sampling methods are read-only; only [`Sky::update`] and
/// [`Sky::report_eclipse`] change state.
#[derive(Debug, Clone)]
pub struct Sky {
    cfg: SkyConfig,
    lighting: LightingModel,
    sun: CelestialBody,
    moon: CelestialBody,
    declination_rad: f64,
    phase: MoonPhase,
    report_marker: Option<PlanarPoint>,
    eclipse: EclipseState,
}

impl Sky {
    pub fn new(cfg: SkyConfig) -> Result<Self, DiscError> {
        cfg.validate()?;
        let sun = CelestialBody::new(PlanarPoint::ORIGIN, cfg.sun.height)?;
        let moon = CelestialBody::new(PlanarPoint::ORIGIN, cfg.moon.height)?;
        let lighting = LightingModel::new(cfg.lighting.clone(), cfg.disc);
        Ok(Self {
            cfg,
            lighting,
            sun,
            moon,
            declination_rad: 0.0,
            phase: MoonPhase::DEFAULT,
            report_marker: None,
            eclipse: EclipseState::default(),
        })
    }

    pub fn disc(&self) -> &DiscConfig {
        &self.cfg.disc
    }

    pub fn sun(&self) -> &CelestialBody {
        &self.sun
    }

    pub fn moon(&self) -> &CelestialBody {
        &self.moon
    }

    pub fn declination_deg(&self) -> f64 {
        self.declination_rad.to_degrees()
    }

    /// Accept this tick's celestial positions and recompute phase and eclipse.
    pub fn update(&mut self, sun: PlanarPoint, moon: PlanarPoint, declination_deg: f64) {
        self.sun = self.sun.moved_to(sun);
        self.moon = self.moon.moved_to(moon);
        self.declination_rad = declination_deg.to_radians();

        match compute_phase(sun, moon) {
            Some(p) => self.phase = p,
            None => log::warn!(
                "sun or moon at the disc center or not finite, keeping moon phase {:.3}",
                self.phase.fraction()
            ),
        }
        self.eclipse = detect(sun, moon, &self.cfg.eclipse, self.report_marker);

        log::debug!(
            "sky update: sun ({:.1}, {:.1}) moon ({:.1}, {:.1}) decl {:.2} phase {:.3} eclipse {:.3}",
            sun.x(),
            sun.z(),
            moon.x(),
            moon.z(),
            declination_deg,
            self.phase.fraction(),
            self.eclipse.attenuation
        );
    }

    /// Set or clear the geographic point an external eclipse report names.
    pub fn report_eclipse(&mut self, coord: Option<GeoCoordinate>) -> Result<(), DiscError> {
        self.report_marker = coord.map(|c| marker_position(c, &self.cfg.disc)).transpose()?;
        self.eclipse = detect(
            self.sun.position(),
            self.moon.position(),
            &self.cfg.eclipse,
            self.report_marker,
        );
        Ok(())
    }

    pub fn sample_illumination(&self, point: PlanarPoint) -> IlluminationSample {
        self.lighting.sample(
            point,
            &self.sun,
            &self.moon,
            self.phase,
            self.declination_rad,
            self.eclipse.attenuation,
        )
    }

    pub fn sample_moon_phase(&self) -> MoonPhase {
        self.phase
    }

    pub fn sample_eclipse(&self) -> EclipseState {
        self.eclipse
    }

    pub fn project_geo_to_plane(&self, coord: GeoCoordinate) -> Result<PlanarPoint, DiscError> {
        geo_to_plane(coord, &self.cfg.disc)
    }

    pub fn project_plane_to_geo(&self, point: PlanarPoint) -> Result<GeoCoordinate, DiscError> {
        plane_to_geo(point, &self.cfg.disc)
    }

    /// Evaluate a `cells x cells` raster over the disc's bounding square.
    /// Cells whose center falls outside the disc are omitted; the rest come
    /// back in row-major order.
    pub fn sample_field(&self, cells: usize) -> Vec<FieldCell> {
        let radius = self.cfg.disc.radius();
        let size = 2.0 * radius / cells.max(1) as f64;
        (0..cells * cells)
            .into_par_iter()
            .filter_map(|i| {
                let (row, col) = (i / cells, i % cells);
                let center = PlanarPoint::new(
                    -radius + (col as f64 + 0.5) * size,
                    radius - (row as f64 + 0.5) * size,
                );
                (center.radial_distance() <= radius).then(|| FieldCell {
                    center,
                    sample: self.sample_illumination(center),
                })
            })
            .collect()
    }
}
