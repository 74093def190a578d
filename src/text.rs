//! Label rasterisation through an offscreen 2D canvas, so labels use the
//! browser's own font stack.

use crate::constants::{label_font, LABEL_BASELINE_OFFSET};
use galaxy_core::{GalaxyError, LabelRasterizer, Rgb};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct CanvasLabelRasterizer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

fn raster_err(what: &str, e: impl std::fmt::Debug) -> GalaxyError {
    GalaxyError::Raster(format!("{what}: {e:?}"))
}

impl CanvasLabelRasterizer {
    pub fn new(document: &web::Document) -> Result<Self, GalaxyError> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| raster_err("create canvas", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| raster_err("canvas cast", e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| raster_err("get_context", e))?
            .ok_or_else(|| GalaxyError::Raster("2d context unavailable".to_string()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| raster_err("context cast", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl LabelRasterizer for CanvasLabelRasterizer {
    fn rasterize(
        &mut self,
        text: &str,
        color: Rgb,
        width: u32,
        height: u32,
    ) -> galaxy_core::Result<Vec<u8>> {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let (w, h) = (width as f64, height as f64);
        let [r, g, b] = color.to_bytes();
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_font(&label_font(height));
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(&format!("rgb({r},{g},{b})"));
        self.ctx
            .fill_text(text, w / 2.0, h / 2.0 + h * LABEL_BASELINE_OFFSET)
            .map_err(|e| raster_err("fill_text", e))?;
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| raster_err("get_image_data", e))?;
        Ok(data.data().0)
    }
}
