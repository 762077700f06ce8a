use crate::config::ChartConfig;
use crate::context::{ChartContext, Datasets};
use crate::layers::{
    BodiesLayer, CitiesLayer, EclipseLayer, FrameLayer, GridLayer, IlluminationLayer, LabelsLayer,
    Layer,
};
use crate::sky::Sky;
use std::fs;
use svg::Document;
use svg::node::element::{Circle, ClipPath, Definitions, Group, Style};

// Load the default css for embedding
const DEFAULT_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles/chart.css"));

pub struct Chart<'a> {
    pub context: ChartContext<'a>,
    css_path: Option<String>,
}

impl<'a> Chart<'a> {
    pub fn new(data: Datasets<'a>, cfg: ChartConfig, sky: Sky, css_path: Option<String>) -> Self {
        Self {
            context: ChartContext::new(data, cfg, sky),
            css_path,
        }
    }

    fn load_css_text(&self) -> String {
        if let Some(path) = &self.css_path {
            match fs::read_to_string(path) {
                Ok(text) => return text,
                Err(e) => log::warn!("could not read css {path}: {e}; using embedded style"),
            }
        }
        // Embedded fallback
        DEFAULT_CSS.to_owned()
    }

    pub fn draw_document(&self) -> Document {
        let w = self.context.cfg.width;
        let h = self.context.cfg.height;
        let l = &self.context.layout;

        // Layer stack, back to front
        let mut clipped_layers: Vec<Box<dyn Layer>> = vec![Box::new(IlluminationLayer::new())];
        if self.context.cfg.show_grid {
            clipped_layers.push(Box::new(GridLayer::new()));
        }
        let unclipped_layers: Vec<Box<dyn Layer>> = vec![
            Box::new(FrameLayer::new()),
            Box::new(CitiesLayer::new()),
            Box::new(EclipseLayer::new()),
            Box::new(BodiesLayer::new()),
            Box::new(LabelsLayer::new()),
        ];

        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", w)
            .set("height", h)
            .set("class", "chart");

        let css = self.load_css_text();
        if !css.is_empty() {
            doc = doc.add(Style::new(css));
        }

        let clip_disc = Circle::new()
            .set("cx", l.center_px.x)
            .set("cy", l.center_px.y)
            .set("r", l.radius_px);
        let clip = ClipPath::new().set("id", "clip-disc").add(clip_disc);
        let defs = Definitions::new().add(clip);
        doc = doc.add(defs);

        // Layers bounded by the rim
        let mut clipped = Group::new().set("clip-path", "url(#clip-disc)");
        for layer in clipped_layers {
            clipped = clipped.add(layer.render(&self.context));
        }
        doc = doc.add(clipped);

        // Markers and labels may spill past the rim
        for layer in unclipped_layers {
            doc = doc.add(layer.render(&self.context));
        }

        doc
    }

    pub fn to_file(&self, path: &str) -> std::io::Result<()> {
        let doc = self.draw_document();
        svg::save(path, &doc)?;
        log::info!("wrote {path}");
        Ok(())
    }
}
