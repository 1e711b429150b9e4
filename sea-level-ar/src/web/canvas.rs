use bevy::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::engine::overlay::render::OverlaySurface;
use constants::dom::CANVAS_ELEMENT_ID;

/// 2D canvas stacked above the video element.
pub struct CanvasSurface {
    target: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
}

impl CanvasSurface {
    pub fn new(document: &Document) -> Self {
        let target = document
            .get_element_by_id(CANVAS_ELEMENT_ID)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                let context = canvas
                    .get_context("2d")
                    .ok()
                    .flatten()?
                    .dyn_into::<CanvasRenderingContext2d>()
                    .ok()?;
                Some((canvas, context))
            });

        if target.is_none() {
            warn!("#{CANVAS_ELEMENT_ID} with a 2d context not found, overlay will not be drawn");
        }

        Self { target }
    }
}

impl OverlaySurface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if let Some((canvas, _)) = &self.target {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }

    fn size(&self) -> (f64, f64) {
        self.target.as_ref().map_or((0.0, 0.0), |(canvas, _)| {
            (f64::from(canvas.width()), f64::from(canvas.height()))
        })
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        if let Some((_, context)) = &self.target {
            context.clear_rect(0.0, 0.0, width, height);
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), line_width: f64, colour: &str) {
        let Some((_, context)) = &self.target else {
            return;
        };
        context.begin_path();
        context.move_to(from.0, from.1);
        context.line_to(to.0, to.1);
        context.set_stroke_style_str(colour);
        context.set_line_width(line_width);
        context.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: &str) {
        let Some((_, context)) = &self.target else {
            return;
        };
        context.set_fill_style_str(colour);
        context.fill_rect(x, y, width, height);
    }
}
