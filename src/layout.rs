use crate::config::{ChartConfig, DiscConfig};
use crate::types::Point;

#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub plot_x: f64,
    pub plot_y: f64,
    pub plot_w: f64,
    pub plot_h: f64,
    pub center_px: Point,
    /// Disc rim radius on the page
    pub radius_px: f64,
    /// Pixels per disc unit
    pub scale: f64,
}

impl ChartLayout {
    pub fn new(cfg: &ChartConfig, disc: &DiscConfig) -> Self {
        let plot_x = cfg.margin.left as f64;
        let plot_y = cfg.margin.top as f64;
        let plot_w = cfg.width.saturating_sub(cfg.margin.left + cfg.margin.right) as f64;
        let plot_h = cfg.height.saturating_sub(cfg.margin.top + cfg.margin.bottom) as f64;
        let center_px = Point {
            x: plot_x + plot_w / 2.0,
            y: plot_y + plot_h / 2.0,
        };

        let radius_px = plot_w.min(plot_h) / 2.0;
        let scale = radius_px / disc.radius();

        Self {
            plot_x,
            plot_y,
            plot_w,
            plot_h,
            center_px,
            radius_px,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margin;
    use crate::test_utils::{approx, disc};

    #[test]
    fn disc_fits_the_shorter_side() {
        let cfg = ChartConfig {
            width: 1000,
            height: 600,
            margin: Margin::uniform(50),
            ..ChartConfig::default()
        };
        let l = ChartLayout::new(&cfg, &disc());
        assert!(approx(l.radius_px, 250.0, 1e-12));
        assert!(approx(l.center_px.x, 500.0, 1e-12));
        assert!(approx(l.center_px.y, 300.0, 1e-12));
        assert!(approx(l.scale, 250.0 / 10_000.0, 1e-15));
    }

    #[test]
    fn oversized_margin_collapses_to_zero() {
        let cfg = ChartConfig {
            width: 50,
            height: 50,
            margin: Margin::uniform(40),
            ..ChartConfig::default()
        };
        let l = ChartLayout::new(&cfg, &disc());
        assert_eq!(l.radius_px, 0.0);
    }
}
