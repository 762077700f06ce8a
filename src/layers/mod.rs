use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Text as TextEl};

use crate::context::ChartContext;
use crate::types::Point;

pub trait Layer {
    /// Produce an SVG group for this layer.
    fn render(&self, context: &ChartContext<'_>) -> Group;
}

pub fn group_with_class(class: &str) -> Group {
    let mut g = Group::new();
    g = g.set("class", class);
    g
}

pub fn text(class: &str, x: f64, y: f64, anchor: &str, content: &str) -> TextEl {
    TextEl::new(content)
        .set("class", class)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
}

/// Open polyline through `points`; `None` for fewer than two points.
pub fn polyline(class: &str, points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut d = Data::new().move_to((first.x, first.y));
    for p in rest {
        d = d.line_to((p.x, p.y));
    }
    Some(Path::new().set("class", class).set("fill", "none").set("d", d))
}

pub mod bodies;
pub mod cities;
pub mod eclipse;
pub mod frame;
pub mod grid;
pub mod illumination;
pub mod labels;

pub use bodies::BodiesLayer;
pub use cities::CitiesLayer;
pub use eclipse::EclipseLayer;
pub use frame::FrameLayer;
pub use grid::GridLayer;
pub use illumination::IlluminationLayer;
pub use labels::LabelsLayer;
