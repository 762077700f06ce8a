use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DiscError;
use crate::types::Rgb;

pub const DEFAULT_RADIUS: f64 = 10_000.0;

#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}
impl Margin {
    pub fn uniform(px: u32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }
}

/// Output document settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Illumination raster cells along each side of the disc's bounding square
    pub cells: usize,
    pub step_lat_deg: u32,
    pub step_lon_deg: u32,
    /// Spacing of the small rim ticks
    pub tick_lon_deg: u32,
    /// Draw parallels and meridians
    pub show_grid: bool,
}
impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: Margin::uniform(40),
            cells: 120,
            step_lat_deg: 10,
            step_lon_deg: 30,
            tick_lon_deg: 5,
            show_grid: true,
        }
    }
}

/// Disc geometry. The radius is validated on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscConfig", into = "RawDiscConfig")]
pub struct DiscConfig {
    radius: f64,
}

impl DiscConfig {
    pub fn new(radius: f64) -> Result<Self, DiscError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DiscError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for DiscConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawDiscConfig {
    radius: f64,
}

impl Default for RawDiscConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl TryFrom<RawDiscConfig> for DiscConfig {
    type Error = DiscError;

    fn try_from(raw: RawDiscConfig) -> Result<Self, Self::Error> {
        DiscConfig::new(raw.radius)
    }
}

impl From<DiscConfig> for RawDiscConfig {
    fn from(d: DiscConfig) -> Self {
        Self { radius: d.radius }
    }
}

/// Fixed height of a light source above the disc plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub height: f64,
}

impl BodyConfig {
    pub fn sun() -> Self {
        Self { height: 4_000.0 }
    }

    pub fn moon() -> Self {
        Self { height: 3_000.0 }
    }
}

/// Every tunable of the illumination law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub cos_night: f64,
    pub cos_astronomical: f64,
    pub cos_nautical: f64,
    pub cos_civil: f64,
    pub cos_day: f64,
    /// Lower bound for the seasonal cosine correction
    pub season_floor: f64,
    pub moon_low: f64,
    pub moon_high: f64,
    pub moon_brightness: f64,
    pub day_color: Rgb,
    pub civil_color: Rgb,
    pub nautical_color: Rgb,
    pub astronomical_color: Rgb,
    pub night_color: Rgb,
    pub moon_tint: Rgb,
    /// Darkness contributed by each band, day first, night last
    pub band_darkness: [f64; 5],
    pub day_alpha: f64,
    pub night_alpha: f64,
    pub moon_alpha_relief: f64,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            cos_night: 0.10,
            cos_astronomical: 0.20,
            cos_nautical: 0.30,
            cos_civil: 0.40,
            cos_day: 0.55,
            season_floor: -0.3,
            moon_low: 0.45,
            moon_high: 0.85,
            moon_brightness: 0.6,
            day_color: Rgb::new(1.0, 0.97, 0.88),
            civil_color: Rgb::new(1.0, 0.60, 0.30),
            nautical_color: Rgb::new(0.35, 0.23, 0.48),
            astronomical_color: Rgb::new(0.11, 0.15, 0.31),
            night_color: Rgb::new(0.02, 0.04, 0.12),
            moon_tint: Rgb::new(0.757, 0.792, 0.965),
            band_darkness: [0.0, 0.35, 0.65, 0.85, 1.0],
            day_alpha: 0.02,
            night_alpha: 0.85,
            moon_alpha_relief: 0.25,
        }
    }
}

impl LightingConfig {
    pub fn thresholds(&self) -> [f64; 5] {
        [
            self.cos_night,
            self.cos_astronomical,
            self.cos_nautical,
            self.cos_civil,
            self.cos_day,
        ]
    }

    pub fn validate(&self) -> Result<(), DiscError> {
        let t = self.thresholds();
        let ordered = t.iter().all(|v| v.is_finite()) && t.windows(2).all(|w| w[0] < w[1]);
        if !ordered {
            return Err(DiscError::UnorderedThresholds(t));
        }
        if !(self.moon_low < self.moon_high) {
            return Err(DiscError::InvalidLighting(format!(
                "moon_low ({}) must be below moon_high ({})",
                self.moon_low, self.moon_high
            )));
        }
        if !(-1.0..=1.0).contains(&self.season_floor) {
            return Err(DiscError::InvalidLighting(format!(
                "season_floor {} outside [-1, 1]",
                self.season_floor
            )));
        }
        let unit = [
            ("moon_brightness", self.moon_brightness),
            ("day_alpha", self.day_alpha),
            ("night_alpha", self.night_alpha),
            ("moon_alpha_relief", self.moon_alpha_relief),
        ];
        for (name, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                return Err(DiscError::InvalidLighting(format!(
                    "{name} {v} outside [0, 1]"
                )));
            }
        }
        if self.band_darkness.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(DiscError::InvalidLighting(format!(
                "band_darkness {:?} outside [0, 1]",
                self.band_darkness
            )));
        }
        Ok(())
    }
}

/// Sun/moon planar separation bounds for the eclipse attenuation ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EclipseConfig {
    pub near: f64,
    pub far: f64,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            near: 300.0,
            far: 1_500.0,
        }
    }
}

impl EclipseConfig {
    pub fn validate(&self) -> Result<(), DiscError> {
        if !(self.near >= 0.0 && self.near < self.far && self.far.is_finite()) {
            return Err(DiscError::InvalidEclipseThresholds {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

/// Model configuration, loadable from TOML. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    #[serde(default)]
    pub disc: DiscConfig,
    #[serde(default = "BodyConfig::sun")]
    pub sun: BodyConfig,
    #[serde(default = "BodyConfig::moon")]
    pub moon: BodyConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub eclipse: EclipseConfig,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            disc: DiscConfig::default(),
            sun: BodyConfig::sun(),
            moon: BodyConfig::moon(),
            lighting: LightingConfig::default(),
            eclipse: EclipseConfig::default(),
        }
    }
}

impl SkyConfig {
    pub fn validate(&self) -> Result<(), DiscError> {
        for h in [self.sun.height, self.moon.height] {
            if !(h.is_finite() && h > 0.0) {
                return Err(DiscError::InvalidHeight(h));
            }
        }
        self.lighting.validate()?;
        self.eclipse.validate()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: SkyConfig = toml::from_str(text).context("parsing sky config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))?;
        log::info!(
            "loaded sky config from {} (radius {})",
            path.display(),
            cfg.disc.radius()
        );
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing sky config")
    }
}
