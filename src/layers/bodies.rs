use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

use crate::context::ChartContext;
use crate::geometry::to_pixels;
use crate::layers::{group_with_class, Layer};
use crate::phase::MoonPhase;

/// Outline of the lit part of a moon of radius `r` centered on the origin,
/// with the bright limb facing +x.
///
/// The limb is a half circle; the terminator is a half ellipse whose x radius
/// shrinks to zero at quarter phase and bulges toward the limb for crescents.
pub fn lit_region(phase: MoonPhase, r: f64) -> Option<Data> {
    let f = phase.fraction();
    if f <= 0.0 {
        return None;
    }
    let rx = r * (1.0 - 2.0 * f).abs();
    let sweep = if f < 0.5 { 0.0 } else { 1.0 };
    Some(
        Data::new()
            .move_to((0.0, -r))
            .elliptical_arc_to((r, r, 0.0, 0.0, 1.0, 0.0, r))
            .elliptical_arc_to((rx, r, 0.0, 0.0, sweep, 0.0, -r))
            .close(),
    )
}

pub struct BodiesLayer {
    sun_r: f64,
    moon_r: f64,
}
impl BodiesLayer {
    pub fn new() -> Self {
        Self {
            sun_r: 9.0,
            moon_r: 8.0,
        }
    }
}

impl Layer for BodiesLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("bodies");
        let l = &context.layout;
        let sun = to_pixels(context.sky.sun().position(), l.center_px, l.scale);
        let moon = to_pixels(context.sky.moon().position(), l.center_px, l.scale);

        g = g.add(
            Circle::new()
                .set("class", "sun")
                .set("cx", sun.x)
                .set("cy", sun.y)
                .set("r", self.sun_r),
        );

        // Turn the bright limb toward the sun marker.
        let angle = (sun.y - moon.y).atan2(sun.x - moon.x).to_degrees();
        let phase = context.sky.sample_moon_phase();
        let mut glyph = Group::new().set("class", "moon").set(
            "transform",
            format!("translate({:.2},{:.2}) rotate({angle:.2})", moon.x, moon.y),
        );
        glyph = glyph.add(
            Circle::new()
                .set("class", "moon-dark")
                .set("cx", 0)
                .set("cy", 0)
                .set("r", self.moon_r),
        );
        if let Some(d) = lit_region(phase, self.moon_r) {
            glyph = glyph.add(Path::new().set("class", "moon-lit").set("d", d));
        }
        g.add(glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_context;

    #[test]
    fn new_moon_has_no_lit_region() {
        assert!(lit_region(MoonPhase::new(0.0), 8.0).is_none());
        assert!(lit_region(MoonPhase::new(0.25), 8.0).is_some());
    }

    #[test]
    fn renders_sun_and_moon_glyph() {
        // make_context puts the sun and moon on nearly opposite sides: a bright moon
        let context = make_context(|_| {});
        let svg = BodiesLayer::new().render(&context).to_string();
        assert!(svg.contains("class=\"sun\""));
        assert!(svg.contains("class=\"moon-dark\""));
        assert!(svg.contains("class=\"moon-lit\""));
        assert!(svg.contains("rotate("));
    }
}
