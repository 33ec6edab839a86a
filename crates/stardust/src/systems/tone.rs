//! Mute toggle for the ambient drone, modelled as linear gain ramps.
//!
//! The envelope only does the arithmetic; an audio backend applies each
//! returned `GainRamp` to a real gain node.

use crate::api::config::ToneConfig;

/// A linear gain change from `from` at `start_s` to `to` at `end_s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainRamp {
    pub from: f32,
    pub to: f32,
    pub start_s: f64,
    pub end_s: f64,
}

impl GainRamp {
    /// Gain at time `t` (seconds, same clock as the ramp).
    pub fn value_at(&self, t: f64) -> f32 {
        if t <= self.start_s {
            return self.from;
        }
        if t >= self.end_s || self.end_s <= self.start_s {
            return self.to;
        }
        let k = ((t - self.start_s) / (self.end_s - self.start_s)) as f32;
        self.from + (self.to - self.from) * k
    }
}

/// Mute state of the drone. Starts muted at zero gain.
pub struct ToneEnvelope {
    config: ToneConfig,
    muted: bool,
    ramp: Option<GainRamp>,
}

impl ToneEnvelope {
    pub fn new(config: ToneConfig) -> Self {
        Self {
            config,
            muted: true,
            ramp: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn frequency_hz(&self) -> f32 {
        self.config.frequency_hz
    }

    /// Current gain, continuing any ramp in progress.
    pub fn gain_at(&self, now_s: f64) -> f32 {
        self.ramp.map_or(0.0, |r| r.value_at(now_s))
    }

    /// Flip mute and return the ramp that gets there from the current gain.
    pub fn toggle(&mut self, now_s: f64) -> GainRamp {
        let from = self.gain_at(now_s);
        self.muted = !self.muted;
        let to = if self.muted { 0.0 } else { self.config.volume };
        let ramp = GainRamp {
            from,
            to,
            start_s: now_s,
            end_s: now_s + self.config.ramp_seconds,
        };
        self.ramp = Some(ramp);
        ramp
    }

    /// Unmute if muted. Returns the ramp when something changed.
    pub fn unmute(&mut self, now_s: f64) -> Option<GainRamp> {
        if self.muted {
            Some(self.toggle(now_s))
        } else {
            None
        }
    }
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self::new(ToneConfig::default())
    }
}
