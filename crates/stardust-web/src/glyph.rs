use stardust::{AlphaMask, GlyphRasterizer};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Rasterizes glyphs with the browser's own text renderer on an off-screen
/// canvas, then reads back the alpha channel.
pub struct CanvasGlyphRasterizer {
    document: Document,
    font_family: String,
}

impl CanvasGlyphRasterizer {
    pub fn new(document: Document, font_family: impl Into<String>) -> Self {
        Self {
            document,
            font_family: font_family.into(),
        }
    }

    fn offscreen_context(&self, width: u32, height: u32) -> Option<CanvasRenderingContext2d> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into()
            .ok()?;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.get_context("2d").ok()??.dyn_into().ok()
    }
}

impl GlyphRasterizer for CanvasGlyphRasterizer {
    fn rasterize(&self, glyph: char, width: u32, height: u32, font_px: f64) -> Option<AlphaMask> {
        if width == 0 || height == 0 {
            return None;
        }
        let Some(ctx) = self.offscreen_context(width, height) else {
            log::warn!("off-screen canvas unavailable; glyph '{glyph}' not rasterized");
            return None;
        };

        ctx.set_fill_style_str("white");
        ctx.set_font(&format!("bold {}px \"{}\"", font_px, self.font_family));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(&glyph.to_string(), width as f64 / 2.0, height as f64 / 2.0)
            .ok()?;

        let image = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .ok()?;
        // The canvas element is dropped with `ctx` once sampling is done
        AlphaMask::from_rgba(width, height, &image.data())
    }
}
