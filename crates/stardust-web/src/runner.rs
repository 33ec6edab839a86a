use stardust::{
    FrameBuffer, FrameStatus, LetterConfig, LoopHandle, Narrative, Renderer, Rng, Simulator,
    Stage, StardustError,
};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::audio::WebTone;
use crate::canvas::Canvas2dRenderer;
use crate::glyph::CanvasGlyphRasterizer;

/// Everything one letter needs in the browser: the particle simulator, the
/// stage machine, the drone, and the canvas it paints on.
///
/// Lives in a `thread_local!` in `lib.rs`; JS owns the animation frame loop
/// and calls `tick` until it returns false.
pub struct LetterRunner {
    simulator: Simulator<CanvasGlyphRasterizer, Rng>,
    handle: Option<LoopHandle>,
    narrative: Narrative,
    tone: WebTone,
    frame: FrameBuffer,
    renderer: Canvas2dRenderer,
    canvas: HtmlCanvasElement,
}

impl LetterRunner {
    pub fn new(canvas: HtmlCanvasElement, config: LetterConfig) -> Result<Self, StardustError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| StardustError::SurfaceUnavailable("no document".to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| StardustError::SurfaceUnavailable(format!("{e:?}")))?
            .ok_or_else(|| StardustError::SurfaceUnavailable("2d context missing".to_string()))?
            .dyn_into()
            .map_err(|_| StardustError::SurfaceUnavailable("not a 2d context".to_string()))?;

        let seed = match config.field.seed {
            0 => (js_sys::Math::random() * u64::MAX as f64) as u64,
            seed => seed,
        };
        let glyph = config.glyph();
        let rasterizer = CanvasGlyphRasterizer::new(document, config.field.font_family.clone());
        let frame = FrameBuffer::with_capacity(config.field.particle_count);
        let renderer = Canvas2dRenderer::new(ctx, canvas.width(), canvas.height());

        Ok(Self {
            simulator: Simulator::new(config.field, glyph, rasterizer, Rng::new(seed)),
            handle: None,
            narrative: Narrative::new(config.narrative),
            tone: WebTone::new(config.tone),
            frame,
            renderer,
            canvas,
        })
    }

    /// Size the canvas and start the particle loop.
    pub fn start(&mut self, width: u32, height: u32) {
        self.size_canvas(width, height);
        self.handle = Some(self.simulator.start(width, height));
        log::info!("{} renderer started at {}x{}", self.renderer.backend(), width, height);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size_canvas(width, height);
        self.simulator.resize(width, height);
    }

    /// Run one frame. Returns false once the loop is stopped.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(handle) = self.handle else {
            return false;
        };
        self.frame.clear();
        let stage = self.narrative.stage();
        match self.simulator.frame(&handle, stage, now_ms, &mut self.frame) {
            FrameStatus::Continue => {
                self.renderer.draw(&self.frame);
                true
            }
            FrameStatus::Stopped => {
                self.handle = None;
                false
            }
        }
    }

    /// Lift the veil; starts the drone if it is muted.
    pub fn begin(&mut self, now_ms: f64) {
        match self.narrative.begin(now_ms) {
            Ok(_) => self.tone.unmute(),
            Err(err) => log::warn!("{err}"),
        }
    }

    pub fn dedicate(&mut self, now_ms: f64) {
        if let Err(err) = self.narrative.dedicate(now_ms) {
            log::warn!("{err}");
        }
    }

    pub fn close(&mut self, now_ms: f64) {
        if let Err(err) = self.narrative.close(now_ms) {
            log::warn!("{err}");
        }
    }

    pub fn toggle_sound(&mut self) {
        self.tone.toggle();
    }

    pub fn is_muted(&self) -> bool {
        self.tone.is_muted()
    }

    pub fn stage(&self) -> Stage {
        self.narrative.stage()
    }

    pub fn tagline_visible(&self, now_ms: f64) -> bool {
        self.narrative.tagline_visible(now_ms)
    }

    pub fn final_link_visible(&self, now_ms: f64) -> bool {
        self.narrative.final_link_visible(now_ms)
    }

    /// Stop the loop and release audio. Later ticks draw nothing.
    pub fn teardown(&mut self) {
        self.simulator.stop();
        self.handle = None;
        self.frame.clear();
        self.tone.shutdown();
    }

    // ---- Frame accessors for renderers reading wasm memory directly ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.circles_ptr()
    }

    pub fn circle_count(&self) -> u32 {
        self.frame.circle_count() as u32
    }

    fn size_canvas(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.resize(width, height);
    }
}
