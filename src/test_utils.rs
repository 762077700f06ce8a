use crate::config::{ChartConfig, DiscConfig, SkyConfig};
use crate::context::{ChartContext, Datasets};
use crate::sky::Sky;
use crate::types::PlanarPoint;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

pub fn disc() -> DiscConfig {
    DiscConfig::default()
}

pub fn sky_at(sun: (f64, f64), moon: (f64, f64), declination_deg: f64) -> Sky {
    let mut sky = Sky::new(SkyConfig::default()).unwrap();
    sky.update(
        PlanarPoint::new(sun.0, sun.1),
        PlanarPoint::new(moon.0, moon.1),
        declination_deg,
    );
    sky
}

pub fn make_context(patch: impl FnOnce(&mut ChartConfig)) -> ChartContext<'static> {
    let mut cfg = ChartConfig::default();
    cfg.cells = 16;
    patch(&mut cfg);
    let data = Datasets { cities: &[] };
    ChartContext::new(data, cfg, sky_at((3000.0, 0.0), (-3000.0, 1000.0), 0.0))
}
