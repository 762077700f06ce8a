use svg::node::element::{Circle, Group, Line};

use crate::context::ChartContext;
use crate::layers::{group_with_class, text, Layer};
use crate::types::Point;

pub fn longitude_label(lon_deg: f64) -> String {
    let lon = lon_deg.round();
    if lon == 0.0 || lon.abs() == 180.0 {
        format!("{:.0}°", lon.abs())
    } else if lon > 0.0 {
        format!("{lon:.0}°E")
    } else {
        format!("{:.0}°W", -lon)
    }
}

/// Rim of the disc with longitude ticks pointing outward.
pub struct FrameLayer {
    minor_len: f64,
    major_len: f64,
    label_pad: f64,
}
impl FrameLayer {
    pub fn new() -> Self {
        Self {
            minor_len: 3.0,
            major_len: 7.0,
            label_pad: 16.0,
        }
    }
}

impl Layer for FrameLayer {
    fn render(&self, context: &ChartContext<'_>) -> Group {
        let mut g = group_with_class("frame");
        let l = &context.layout;
        let c = l.center_px;
        let r = l.radius_px;

        g = g.add(
            Circle::new()
                .set("class", "border")
                .set("cx", c.x)
                .set("cy", c.y)
                .set("r", r)
                .set("fill", "none"),
        );

        // Position on a circle of radius `rr` at longitude `lon` (0 at the top, east clockwise).
        let at = |lon: f64, rr: f64| -> Point {
            let t = lon.to_radians();
            Point {
                x: c.x + rr * t.sin(),
                y: c.y - rr * t.cos(),
            }
        };

        let tick = context.cfg.tick_lon_deg.max(1);
        let major = context.cfg.step_lon_deg.max(1);
        for deg in (0..360).step_by(tick as usize) {
            let lon = if deg > 180 { deg as f64 - 360.0 } else { deg as f64 };
            let is_major = deg % major == 0;
            let len = if is_major {
                self.major_len
            } else {
                self.minor_len
            };
            let (a, b) = (at(lon, r), at(lon, r + len));
            g = g.add(
                Line::new()
                    .set("x1", a.x)
                    .set("y1", a.y)
                    .set("x2", b.x)
                    .set("y2", b.y)
                    .set("class", "tick"),
            );
            if is_major {
                let p = at(lon, r + self.label_pad);
                g = g.add(text(
                    "tick-label",
                    p.x,
                    p.y + 4.0,
                    "middle",
                    &longitude_label(lon),
                ));
            }
        }

        g
    }
}
