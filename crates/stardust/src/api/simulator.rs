//! Lifecycle owner of the particle field.
//!
//! The host drives the loop: it calls `start` once the surface exists, then
//! `frame` from its display-sync callback for as long as `frame` answers
//! `FrameStatus::Continue`, and `stop` on teardown. Nothing here is global.

use crate::api::config::FieldConfig;
use crate::api::stage::Stage;
use crate::core::rng::RandomSource;
use crate::core::time::FrameClock;
use crate::renderer::frame::Surface;
use crate::systems::field::ParticleField;
use crate::systems::glyph::{rasterize_point_cloud, GlyphRasterizer};

/// Proof that a loop was started. Stale after `stop` or a newer `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopHandle {
    generation: u64,
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame.
    Continue,
    /// The loop was stopped; do not reschedule.
    Stopped,
}

/// Particle field simulator with an explicit start/resize/stop lifecycle.
pub struct Simulator<G: GlyphRasterizer, R: RandomSource> {
    config: FieldConfig,
    glyph: char,
    rasterizer: G,
    rng: R,
    field: ParticleField,
    clock: FrameClock,
    size: (u32, u32),
    generation: u64,
    live: Option<u64>,
}

impl<G: GlyphRasterizer, R: RandomSource> Simulator<G, R> {
    pub fn new(config: FieldConfig, glyph: char, rasterizer: G, rng: R) -> Self {
        let clock = FrameClock::new(config.frame_budget_ms);
        Self {
            config,
            glyph,
            rasterizer,
            rng,
            field: ParticleField::new(),
            clock,
            size: (0, 0),
            generation: 0,
            live: None,
        }
    }

    /// Build the field for a `width × height` surface and hand out a fresh
    /// loop handle. Any previously issued handle goes stale.
    pub fn start(&mut self, width: u32, height: u32) -> LoopHandle {
        self.generation += 1;
        self.live = Some(self.generation);
        self.clock.reset();
        self.rebuild(width, height);
        log::debug!("particle loop {} started", self.generation);
        LoopHandle { generation: self.generation }
    }

    /// Rebuild glyph samples and the whole population for a new size.
    /// In-flight particle state is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.rebuild(width, height);
    }

    /// Change the glyph the veil gathers into. Rebuilds if running.
    pub fn set_glyph(&mut self, glyph: char) {
        if glyph == self.glyph {
            return;
        }
        self.glyph = glyph;
        if self.live.is_some() {
            let (w, h) = self.size;
            self.rebuild(w, h);
        }
    }

    /// Stop the loop. Every outstanding handle goes stale and later frames
    /// draw nothing.
    pub fn stop(&mut self) {
        if let Some(generation) = self.live.take() {
            log::debug!(
                "particle loop {} stopped after {} frames ({} slow)",
                generation,
                self.clock.frames(),
                self.clock.slow_frames()
            );
        }
        self.field.clear();
    }

    pub fn is_live(&self, handle: &LoopHandle) -> bool {
        self.live == Some(handle.generation)
    }

    /// Run one frame: step every particle under `stage`, then fade the
    /// surface and draw. A stale handle touches nothing.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        handle: &LoopHandle,
        stage: Stage,
        now_ms: f64,
        surface: &mut S,
    ) -> FrameStatus {
        if !self.is_live(handle) {
            return FrameStatus::Stopped;
        }
        let timing = self.clock.tick(now_ms);
        self.field.step(stage, timing.elapsed_ms, &self.config, &mut self.rng);
        self.field.render(stage, &self.config, surface);
        FrameStatus::Continue
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn rebuild(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        let cloud = rasterize_point_cloud(&self.rasterizer, self.glyph, width, height, &self.config);
        if cloud.is_empty() && width > 0 && height > 0 {
            log::warn!("glyph '{}' produced no points; scattering targets", self.glyph);
        }
        self.field.populate(width, height, &cloud, &self.config, &mut self.rng);
        log::info!(
            "particle field rebuilt at {}x{}: {} particles from {} glyph points",
            width,
            height,
            self.field.len(),
            cloud.len()
        );
    }
}
