/// Timing for one frame of the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Milliseconds since the first frame after `start`.
    pub elapsed_ms: f64,
    /// Milliseconds since the previous frame (0 on the first).
    pub dt_ms: f64,
    /// Frame counter, starting at 0.
    pub frame: u64,
}

/// Frame clock driven by host timestamps (e.g. `requestAnimationFrame`).
/// Tracks elapsed time for the turbulence term and counts slow frames.
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: f64,
    frames: u64,
    budget_ms: f64,
    slow_frames: u64,
}

impl FrameClock {
    /// How often (in frames) the slow-frame tally is logged.
    const REPORT_EVERY: u64 = 600;

    pub fn new(budget_ms: f64) -> Self {
        Self {
            origin_ms: None,
            last_ms: 0.0,
            frames: 0,
            budget_ms,
            slow_frames: 0,
        }
    }

    /// Forget the origin; the next tick becomes elapsed 0.
    pub fn reset(&mut self) {
        self.origin_ms = None;
        self.last_ms = 0.0;
        self.frames = 0;
        self.slow_frames = 0;
    }

    /// Record a frame at host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> FrameTiming {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let dt_ms = if self.frames == 0 {
            0.0
        } else {
            // Hosts may hand back a stale timestamp after a tab switch
            (now_ms - self.last_ms).max(0.0)
        };
        self.last_ms = now_ms;

        // A frame taking twice the budget is a dropped frame
        if dt_ms > self.budget_ms * 2.0 {
            self.slow_frames += 1;
        }

        let timing = FrameTiming {
            elapsed_ms: (now_ms - origin).max(0.0),
            dt_ms,
            frame: self.frames,
        };
        self.frames += 1;

        if self.frames % Self::REPORT_EVERY == 0 {
            log::debug!(
                "frame {}: {} slow frames so far (budget {:.1}ms)",
                self.frames, self.slow_frames, self.budget_ms
            );
        }

        timing
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }
}
