use std::f64::consts::TAU;

use stardust::{FrameBuffer, Renderer};
use web_sys::CanvasRenderingContext2d;

/// Paints recorded frames onto the page canvas with the 2D context.
pub struct Canvas2dRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }
}

impl Renderer for Canvas2dRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn draw(&mut self, frame: &FrameBuffer) {
        if let Some(backdrop) = frame.backdrop() {
            self.ctx.set_fill_style_str(&backdrop.to_css());
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        }
        for circle in frame.circles() {
            self.ctx.begin_path();
            if self
                .ctx
                .arc(circle.x as f64, circle.y as f64, circle.radius as f64, 0.0, TAU)
                .is_err()
            {
                continue;
            }
            self.ctx.set_fill_style_str(&circle.color().to_css());
            self.ctx.fill();
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }
}
