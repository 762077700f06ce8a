use svg::node::element::{Circle, Group, Rectangle};

use crate::context::ChartContext;
use crate::geometry::to_pixels;
use crate::layers::{group_with_class, Layer};

/// Raster of the darkness overlay, one square per field cell.
pub struct IlluminationLayer {
    min_alpha: f64,
}
impl IlluminationLayer {
    pub fn new() -> Self {
        Self { min_alpha: 0.005 }
    }
}

impl Layer for IlluminationLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("illumination");
        let l = &context.layout;

        g = g.add(
            Circle::new()
                .set("class", "disc")
                .set("cx", l.center_px.x)
                .set("cy", l.center_px.y)
                .set("r", l.radius_px),
        );

        let field = context.sky.sample_field(context.cfg.cells);
        let size = context.cell_px();
        log::debug!("illumination: {} cells of {size:.2}px", field.len());

        for cell in field {
            // Fully lit cells add nothing to the overlay.
            if cell.sample.alpha < self.min_alpha {
                continue;
            }
            let p = to_pixels(cell.center, l.center_px, l.scale);
            g = g.add(
                Rectangle::new()
                    .set("x", p.x - size / 2.0)
                    .set("y", p.y - size / 2.0)
                    // Slight overlap hides hairline seams between cells
                    .set("width", size + 0.5)
                    .set("height", size + 0.5)
                    .set("fill", cell.sample.color.to_hex())
                    .set("fill-opacity", format!("{:.3}", cell.sample.alpha)),
            );
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_context;

    #[test]
    fn renders_disc_and_dark_cells() {
        let context = make_context(|cfg| cfg.cells = 20);
        let svg = IlluminationLayer::new().render(&context).to_string();
        assert!(svg.contains("class=\"disc\""));

        let rects = svg.matches("<rect").count();
        let inside = context.sky.sample_field(20).len();
        assert!(rects > 0);
        assert!(rects <= inside);
        assert!(svg.contains("fill-opacity"));
    }
}
