use svg::node::element::Group;

use crate::context::ChartContext;
use crate::geometry::{place_cities, to_pixels};
use crate::layers::{group_with_class, text, Layer};
use crate::types::Point;

type Bbox = (f64, f64, f64, f64);

const NAME_H: f64 = 12.0;
const COORD_H: f64 = 10.0;

pub fn coord_label(lat_deg: f64, lon_deg: f64) -> String {
    format!("{lat_deg:.1}°,{lon_deg:.1}°")
}

/// City labels placed greedily north-first, skipping positions that would
/// overlap a marker, another label, or leave the plot. Each label is the
/// name with its coordinates on a second line.
pub struct LabelsLayer {
    symbol_pad: f64,
    marker_r: f64,
    // name baseline offsets from the marker
    offsets: [(f64, f64); 6],
}
impl LabelsLayer {
    pub fn new() -> Self {
        Self {
            symbol_pad: 1.0,
            marker_r: 3.0,
            offsets: [
                (0.0, -18.0),
                (0.0, 16.0),
                (0.0, -24.0),
                (0.0, 22.0),
                (0.0, -30.0),
                (0.0, 28.0),
            ],
        }
    }
    fn boxes_overlap(a: Bbox, b: Bbox) -> bool {
        let (ax, ay, aw, ah) = a;
        let (bx, by, bw, bh) = b;
        !(ax + aw <= bx || ax >= bx + bw || ay + ah <= by || ay >= by + bh)
    }
    /// Box from the top of the name line to the bottom of the coordinate line.
    fn label_box_centered(&self, x: f64, y_baseline: f64, name: &str, coord: &str) -> Bbox {
        let name_w = name.chars().count().max(2) as f64 * 7.0;
        let coord_w = coord.chars().count() as f64 * 5.0;
        let w = name_w.max(coord_w).max(16.0);
        (x - w / 2.0, y_baseline - NAME_H, w, NAME_H + COORD_H)
    }
    fn marker_box(&self, p: Point) -> Bbox {
        let r = self.marker_r + self.symbol_pad;
        (p.x - r, p.y - r, 2.0 * r, 2.0 * r)
    }
}

impl Layer for LabelsLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("labels");
        let l = &context.layout;

        let mut cands: Vec<(f64, &str, String, Point)> =
            place_cities(context.data.cities, &context.sky)
                .into_iter()
                .map(|(city, p)| {
                    let lat = city.coord.latitude_deg();
                    (
                        lat,
                        city.name.as_str(),
                        coord_label(lat, city.coord.longitude_deg()),
                        to_pixels(p, l.center_px, l.scale),
                    )
                })
                .collect();
        cands.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut placed: Vec<Bbox> = cands.iter().map(|c| self.marker_box(c.3)).collect();

        let (left, top) = (l.plot_x, l.plot_y);
        let (right, bottom) = (left + l.plot_w, top + l.plot_h);

        for (_, name, coord, p) in cands {
            for (dx, dy) in self.offsets {
                let ax = p.x + dx;
                let ay = p.y + dy;

                let (bx, by, bw, bh) = self.label_box_centered(ax, ay, name, &coord);
                if bx < left || bx + bw > right || by < top || by + bh > bottom {
                    continue;
                }
                if placed
                    .iter()
                    .any(|&b| Self::boxes_overlap((bx, by, bw, bh), b))
                {
                    continue;
                }

                placed.push((bx, by, bw, bh));
                g = g.add(text("city-label", ax, ay, "middle", name));
                g = g.add(text("city-coord", ax, ay + COORD_H, "middle", &coord));
                break;
            }
        }

        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::context::{ChartContext, Datasets};
    use crate::test_utils::sky_at;
    use crate::types::{City, GeoCoordinate};

    fn city(name: &str, lat: f64, lon: f64) -> City {
        City {
            name: name.into(),
            coord: GeoCoordinate::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn overlap_detection() {
        assert!(LabelsLayer::boxes_overlap((0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 10.0, 10.0)));
        assert!(!LabelsLayer::boxes_overlap((0.0, 0.0, 10.0, 10.0), (10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn coincident_cities_get_distinct_label_slots() {
        let cities = vec![city("Alpha", 60.0, 10.0), city("Beta", 60.0, 10.0)];
        let context = ChartContext::new(
            Datasets { cities: &cities },
            ChartConfig::default(),
            sky_at((1.0, 0.0), (0.0, 1.0), 0.0),
        );
        let svg = LabelsLayer::new().render(&context).to_string();
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("Beta"));
        assert_eq!(svg.matches("city-label").count(), 2);
        assert_eq!(svg.matches("city-coord").count(), 2);
        assert!(svg.contains("60.0°,10.0°"));
    }

    #[test]
    fn coordinate_line_sits_under_the_name() {
        let cities = vec![city("Moscow", 55.75, 37.62)];
        let context = ChartContext::new(
            Datasets { cities: &cities },
            ChartConfig::default(),
            sky_at((1.0, 0.0), (0.0, 1.0), 0.0),
        );
        let svg = LabelsLayer::new().render(&context).to_string();
        assert!(svg.contains("55.8°,37.6°"));
        let name_at = svg.find("Moscow").unwrap();
        let coord_at = svg.find("55.8°,37.6°").unwrap();
        assert!(name_at < coord_at);
    }

    #[test]
    fn coord_label_format() {
        assert_eq!(coord_label(51.507, -0.128), "51.5°,-0.1°");
    }
}
