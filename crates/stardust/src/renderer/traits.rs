//! Renderer trait for backends that paint recorded frames.
//!
//! The core never touches a real canvas. Backends (Canvas2D in the web
//! bridge, or a GPU pipeline reading `FrameBuffer::as_floats`) replay the
//! recorded fade and circles onto their own target.

use super::frame::FrameBuffer;

/// A paint target for recorded frames.
pub trait Renderer {
    /// Backend identifier (e.g., "canvas2d", "webgpu").
    fn backend(&self) -> &'static str;

    /// Paint one recorded frame.
    fn draw(&mut self, frame: &FrameBuffer);

    /// Handle a surface resize.
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::Rgba;
    use crate::renderer::frame::Surface;
    use glam::DVec2;

    /// Counts what it was asked to paint.
    #[derive(Default)]
    struct TallyRenderer {
        fades: usize,
        circles: usize,
        size: (u32, u32),
    }

    impl Renderer for TallyRenderer {
        fn backend(&self) -> &'static str {
            "tally"
        }

        fn draw(&mut self, frame: &FrameBuffer) {
            if frame.backdrop().is_some() {
                self.fades += 1;
            }
            self.circles += frame.circle_count();
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn renderer_replays_frames() {
        let mut renderer = TallyRenderer::default();
        let mut frame = FrameBuffer::new();
        frame.fade(Rgba::BLACK.with_alpha(0.2));
        frame.fill_circle(DVec2::new(1.0, 1.0), 1.0, Rgba::WHITE);
        renderer.draw(&frame);
        renderer.resize(640, 480);

        assert_eq!(renderer.backend(), "tally");
        assert_eq!((renderer.fades, renderer.circles), (1, 1));
        assert_eq!(renderer.size, (640, 480));
    }
}
