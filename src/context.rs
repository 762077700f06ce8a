use crate::config::ChartConfig;
use crate::layout::ChartLayout;
use crate::sky::Sky;
use crate::types::City;

pub struct Datasets<'a> {
    pub cities: &'a [City],
}

pub struct ChartContext<'a> {
    pub data: Datasets<'a>,
    pub cfg: ChartConfig,
    pub sky: Sky,
    pub layout: ChartLayout,
}

impl<'a> ChartContext<'a> {
    pub fn new(data: Datasets<'a>, cfg: ChartConfig, sky: Sky) -> Self {
        let layout = ChartLayout::new(&cfg, sky.disc());
        Self {
            data,
            cfg,
            sky,
            layout,
        }
    }

    /// Longitude step for tracing parallels, finer on large charts
    pub fn adaptive_step_deg(&self) -> u32 {
        let target = if self.layout.radius_px <= 150.0 {
            10.0
        } else if self.layout.radius_px <= 400.0 {
            5.0
        } else {
            2.0
        };
        (target as u32).max(1)
    }

    /// Raster cell edge length on the page
    pub fn cell_px(&self) -> f64 {
        2.0 * self.layout.radius_px / self.cfg.cells.max(1) as f64
    }
}
