use svg::node::element::{Circle, Group};

use crate::context::ChartContext;
use crate::geometry::to_pixels;
use crate::layers::{group_with_class, Layer};

/// Ring around the eclipse marker, drawn only while an eclipse is under way.
pub struct EclipseLayer {
    inner_radius: f64,
    outer_radius: f64,
}
impl EclipseLayer {
    pub fn new() -> Self {
        // disc units
        Self {
            inner_radius: 550.0,
            outer_radius: 800.0,
        }
    }
}

impl Layer for EclipseLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("eclipse");
        let state = context.sky.sample_eclipse();
        if !state.is_occurring {
            return g;
        }
        let l = &context.layout;
        let p = to_pixels(state.marker, l.center_px, l.scale);
        let r = (self.inner_radius + self.outer_radius) / 2.0 * l.scale;
        let width = ((self.outer_radius - self.inner_radius) * l.scale).max(1.0);

        g = g.add(
            Circle::new()
                .set("class", "eclipse-marker")
                .set("cx", p.x)
                .set("cy", p.y)
                .set("r", r)
                .set("fill", "none")
                .set("stroke-width", width)
                .set("stroke-opacity", format!("{:.3}", 1.0 - state.attenuation)),
        );
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::context::{ChartContext, Datasets};
    use crate::test_utils::{make_context, sky_at};

    #[test]
    fn nothing_without_an_eclipse() {
        let context = make_context(|_| {});
        let svg = EclipseLayer::new().render(&context).to_string();
        assert!(!svg.contains("eclipse-marker"));
    }

    #[test]
    fn ring_during_totality() {
        let context = ChartContext::new(
            Datasets { cities: &[] },
            ChartConfig::default(),
            sky_at((2000.0, 2000.0), (2000.0, 2050.0), 0.0),
        );
        let svg = EclipseLayer::new().render(&context).to_string();
        assert!(svg.contains("eclipse-marker"));
        assert!(svg.contains("stroke-opacity=\"1.000\""));
    }
}
