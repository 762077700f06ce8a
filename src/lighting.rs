//! Banded day/twilight/night illumination.
//!
//! The sun's zenith cosine (with a seasonal correction) is pushed through four
//! nested smoothsteps, one per boundary between adjacent bands. Each band's
//! weight is the difference of two neighbouring cumulative steps, which makes
//! the five weights a partition of unity and keeps every output continuous.

use std::f64::consts::FRAC_PI_2;

use crate::celestial::{zenith_cosine, CelestialBody};
use crate::config::{DiscConfig, LightingConfig};
use crate::phase::MoonPhase;
use crate::types::{PlanarPoint, Rgb};

/// Hermite smoothstep; `edge0 < edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandWeights {
    pub day: f64,
    pub civil: f64,
    pub nautical: f64,
    pub astronomical: f64,
    pub night: f64,
}

impl BandWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.day,
            self.civil,
            self.nautical,
            self.astronomical,
            self.night,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Classify a (season corrected) sun zenith cosine.
    pub fn classify(cos_sun: f64, cfg: &LightingConfig) -> Self {
        let s_day = smoothstep(cfg.cos_civil, cfg.cos_day, cos_sun);
        let s_civil = smoothstep(cfg.cos_nautical, cfg.cos_civil, cos_sun);
        let s_nautical = smoothstep(cfg.cos_astronomical, cfg.cos_nautical, cos_sun);
        let s_astro = smoothstep(cfg.cos_night, cfg.cos_astronomical, cos_sun);
        Self {
            day: s_day,
            civil: s_civil - s_day,
            nautical: s_nautical - s_civil,
            astronomical: s_astro - s_nautical,
            night: 1.0 - s_astro,
        }
    }

    /// Move the eclipsed share of daylight into the night band.
    pub fn eclipsed(self, attenuation: f64) -> Self {
        let lost = self.day * (1.0 - attenuation);
        Self {
            day: self.day - lost,
            night: self.night + lost,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlluminationSample {
    pub weights: BandWeights,
    /// Moonlight strength after brightness and phase scaling
    pub moon_light: f64,
    pub color: Rgb,
    /// Opacity of the darkness overlay: near 0 in daylight
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct LightingModel {
    cfg: LightingConfig,
    disc: DiscConfig,
}

impl LightingModel {
    /// `cfg` is expected to have passed [`LightingConfig::validate`].
    pub fn new(cfg: LightingConfig, disc: DiscConfig) -> Self {
        Self { cfg, disc }
    }

    /// Seasonal factor for a point: the pseudo-latitude is the point's
    /// colatitude, shifted by the declination and floored.
    pub fn season_cos(&self, point: PlanarPoint, declination_rad: f64) -> f64 {
        let lat = (point.radial_distance() / self.disc.radius()) * FRAC_PI_2;
        (lat - declination_rad).cos().max(self.cfg.season_floor)
    }

    pub fn sample(
        &self,
        point: PlanarPoint,
        sun: &CelestialBody,
        moon: &CelestialBody,
        phase: MoonPhase,
        declination_rad: f64,
        eclipse_attenuation: f64,
    ) -> IlluminationSample {
        let cfg = &self.cfg;

        let cos_sun = zenith_cosine(point, sun) * self.season_cos(point, declination_rad);
        let weights = BandWeights::classify(cos_sun, cfg).eclipsed(eclipse_attenuation);
        debug_assert!((weights.total() - 1.0).abs() < 1e-9);

        let cos_moon = zenith_cosine(point, moon);
        let moon_light = smoothstep(cfg.moon_low, cfg.moon_high, cos_moon)
            * cfg.moon_brightness
            * phase.fraction();

        let bands = [
            cfg.day_color,
            cfg.civil_color,
            cfg.nautical_color,
            cfg.astronomical_color,
            cfg.night_color,
        ];
        let w = weights.as_array();
        let base = bands
            .iter()
            .zip(w)
            .fold(Rgb::BLACK, |acc, (c, wi)| acc.plus(c.scaled(wi)));
        // No moon glow in full daylight.
        let color = base.mix(cfg.moon_tint, moon_light * (1.0 - weights.day));

        let darkness: f64 = cfg.band_darkness.iter().zip(w).map(|(d, wi)| d * wi).sum();
        let alpha = (cfg.day_alpha + (cfg.night_alpha - cfg.day_alpha) * darkness
            - moon_light * cfg.moon_alpha_relief)
            .clamp(0.0, 1.0);

        IlluminationSample {
            weights,
            moon_light,
            color,
            alpha,
        }
    }
}
