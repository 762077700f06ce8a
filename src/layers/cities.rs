use svg::node::element::{Circle, Group};

use crate::context::ChartContext;
use crate::geometry::{place_cities, to_pixels};
use crate::layers::labels::coord_label;
use crate::layers::{group_with_class, Layer};

pub struct CitiesLayer {
    marker_r: f64,
}
impl CitiesLayer {
    pub fn new() -> Self {
        Self { marker_r: 3.0 }
    }
}

impl Layer for CitiesLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("cities");
        let l = &context.layout;

        for (city, p) in place_cities(context.data.cities, &context.sky) {
            let px = to_pixels(p, l.center_px, l.scale);
            let coord = coord_label(city.coord.latitude_deg(), city.coord.longitude_deg());
            g = g.add(
                Circle::new()
                    .set("class", "city")
                    .set("cx", px.x)
                    .set("cy", px.y)
                    .set("r", self.marker_r)
                    .set("data-name", city.name.as_str())
                    .set("data-coord", coord),
            );
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

    #[test]
    fn marks_only_northern_cities() {
        let cities = vec![
            City {
                name: "London".into(),
                coord: GeoCoordinate::new(51.51, -0.13).unwrap(),
            },
            City {
                name: "Cape Town".into(),
                coord: GeoCoordinate::new(-33.93, 18.42).unwrap(),
            },
        ];
        let context = ChartContext::new(
            Datasets { cities: &cities },
            ChartConfig::default(),
            sky_at((1.0, 0.0), (0.0, 1.0), 0.0),
        );
        let svg = CitiesLayer::new().render(&context).to_string();
        assert_eq!(svg.matches("class=\"city\"").count(), 1);
        assert!(svg.contains("London"));
        assert!(!svg.contains("Cape Town"));
    }
}
