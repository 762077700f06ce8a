use svg::node::element::Group;

use crate::context::ChartContext;
use crate::geometry::{meridians, parallels, sample_meridian, sample_parallel, to_pixels};
use crate::layers::{group_with_class, polyline, text, Layer};
use crate::types::{GeoCoordinate, PlanarPoint, Point};

pub struct GridLayer {
    meridian_step_lat_deg: u32,
}
impl GridLayer {
    pub fn new() -> Self {
        Self {
            meridian_step_lat_deg: 2,
        }
    }
}

impl Layer for GridLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("lines");
        let disc = context.sky.disc();
        let l = &context.layout;
        let px = |pts: Vec<PlanarPoint>| -> Vec<Point> {
            pts.into_iter()
                .map(|p| to_pixels(p, l.center_px, l.scale))
                .collect()
        };

        // Parallels, labelled along the prime meridian
        let step_lon = context.adaptive_step_deg();
        for lat in parallels(context.cfg.step_lat_deg) {
            let ring = px(sample_parallel(lat, step_lon, disc));
            if let Some(path) = polyline("graticule lat", &ring) {
                g = g.add(path);
            }
            if lat > 0.0 {
                if let Ok(p) = GeoCoordinate::new(lat, 0.0).and_then(|c| context.sky.project_geo_to_plane(c)) {
                    let a = to_pixels(p, l.center_px, l.scale);
                    g = g.add(text(
                        "grid-label",
                        a.x + 4.0,
                        a.y - 3.0,
                        "start",
                        &format!("{lat:.0}°"),
                    ));
                }
            }
        }

        // Meridians
        for lon in meridians(context.cfg.step_lon_deg) {
            let line = px(sample_meridian(lon, self.meridian_step_lat_deg, disc));
            if let Some(path) = polyline("graticule lon", &line) {
                g = g.add(path);
            }
        }

        g
    }
}
