//! Letter configuration.
//!
//! Every tunable of the particle field, the narrative timings and the ambient
//! tone lives here with its reference value as the default. Hosts may pass a
//! partial JSON document; missing fields keep their defaults.

use serde::Deserialize;

use crate::api::error::StardustError;

/// Glyph used when the recipient name is empty. The stroke font has no entry
/// for it, so the field falls back to scattered targets.
pub const FALLBACK_GLYPH: char = '*';

/// Top-level configuration for one letter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LetterConfig {
    /// Name of the person the letter is for; its initial shapes the veil.
    pub recipient: String,
    pub field: FieldConfig,
    pub narrative: NarrativeConfig,
    pub tone: ToneConfig,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            recipient: "Zaara".to_string(),
            field: FieldConfig::default(),
            narrative: NarrativeConfig::default(),
            tone: ToneConfig::default(),
        }
    }
}

impl LetterConfig {
    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> Result<Self, StardustError> {
        let config: Self = serde_json::from_str(json).map_err(StardustError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StardustError> {
        self.field.validate()?;
        self.narrative.validate()?;
        self.tone.validate()
    }

    /// The character the veil particles gather into: the recipient's initial,
    /// uppercased.
    pub fn glyph(&self) -> char {
        self.recipient
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(FALLBACK_GLYPH)
    }
}

/// Particle field tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Fixed population size (default: 897).
    pub particle_count: usize,
    /// Spring constant toward the attractor.
    pub stiffness: f64,
    /// Velocity damping factor applied every frame, in (0, 1).
    pub friction: f64,
    /// Turbulence displacement per axis, in pixels. Zero disables it.
    pub turbulence_amplitude: f64,
    /// Turbulence phase rate per elapsed millisecond.
    pub turbulence_rate: f64,
    /// Side of the square around the center that closure attractors land in.
    pub collapse_jitter: f64,
    /// Glyph font size as a fraction of the shorter surface side.
    pub glyph_scale: f64,
    /// Raster alpha a grid sample must exceed to join the point cloud.
    pub alpha_threshold: u8,
    /// Sampling stride on wide surfaces.
    pub grid_stride: u32,
    /// Sampling stride on narrow surfaces.
    pub narrow_grid_stride: u32,
    /// Surfaces narrower than this use `narrow_grid_stride`.
    pub narrow_breakpoint: u32,
    pub size_min: f64,
    pub size_max: f64,
    pub alpha_min: f32,
    pub alpha_max: f32,
    /// Opacity of the per-frame composite that produces motion trails.
    pub trail_alpha: f32,
    /// Upper bound of the particle alpha while collapsing.
    pub collapse_alpha_max: f32,
    /// Font family used by raster backends that draw real text.
    pub font_family: String,
    /// Frame budget in milliseconds; slower frames are counted.
    pub frame_budget_ms: f64,
    /// RNG seed. Zero lets the host pick one.
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 897,
            stiffness: 0.03,
            friction: 0.95,
            turbulence_amplitude: 0.4,
            turbulence_rate: 0.001,
            collapse_jitter: 50.0,
            glyph_scale: 0.6,
            alpha_threshold: 128,
            grid_stride: 8,
            narrow_grid_stride: 6,
            narrow_breakpoint: 768,
            size_min: 0.5,
            size_max: 2.5,
            alpha_min: 0.1,
            alpha_max: 0.5,
            trail_alpha: 0.2,
            collapse_alpha_max: 0.2,
            font_family: "Playfair Display".to_string(),
            frame_budget_ms: 1000.0 / 60.0,
            seed: 0,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), StardustError> {
        let invalid = |msg: String| Err(StardustError::InvalidConfig(msg));

        if !(self.friction > 0.0 && self.friction < 1.0) {
            return invalid(format!("friction must be in (0, 1), got {}", self.friction));
        }
        if !(self.stiffness > 0.0) {
            return invalid(format!("stiffness must be positive, got {}", self.stiffness));
        }
        if self.grid_stride == 0 || self.narrow_grid_stride == 0 {
            return invalid("grid strides must be non-zero".to_string());
        }
        if self.size_min < 0.0 || self.size_min > self.size_max {
            return invalid(format!("size range [{}, {}] is not ordered", self.size_min, self.size_max));
        }
        if !(0.0..=1.0).contains(&self.alpha_min)
            || !(0.0..=1.0).contains(&self.alpha_max)
            || self.alpha_min > self.alpha_max
        {
            return invalid(format!("alpha range [{}, {}] is not ordered within [0, 1]", self.alpha_min, self.alpha_max));
        }
        if self.alpha_threshold == u8::MAX {
            return invalid("alpha threshold 255 can never be exceeded".to_string());
        }
        if !(self.glyph_scale > 0.0) {
            return invalid(format!("glyph scale must be positive, got {}", self.glyph_scale));
        }
        if self.collapse_jitter < 0.0 || self.turbulence_amplitude < 0.0 {
            return invalid("jitter and turbulence must not be negative".to_string());
        }
        if !(self.frame_budget_ms > 0.0) {
            return invalid(format!("frame budget must be positive, got {}", self.frame_budget_ms));
        }
        Ok(())
    }
}

/// Timed cues of the narrative, in milliseconds after entering a stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NarrativeConfig {
    pub tagline_delay_ms: f64,
    pub final_link_delay_ms: f64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            tagline_delay_ms: 2000.0,
            final_link_delay_ms: 5000.0,
        }
    }
}

impl NarrativeConfig {
    pub fn validate(&self) -> Result<(), StardustError> {
        if self.tagline_delay_ms < 0.0 || self.final_link_delay_ms < 0.0 {
            return Err(StardustError::InvalidConfig("narrative delays must not be negative".to_string()));
        }
        Ok(())
    }
}

/// Ambient sine drone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToneConfig {
    pub frequency_hz: f32,
    /// Gain when unmuted.
    pub volume: f32,
    /// Duration of the linear gain ramp on every toggle.
    pub ramp_seconds: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 110.0,
            volume: 0.05,
            ramp_seconds: 1.0,
        }
    }
}

impl ToneConfig {
    pub fn validate(&self) -> Result<(), StardustError> {
        if !(self.frequency_hz > 0.0) {
            return Err(StardustError::InvalidConfig(format!("tone frequency must be positive, got {}", self.frequency_hz)));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(StardustError::InvalidConfig(format!("tone volume must be in [0, 1], got {}", self.volume)));
        }
        if self.ramp_seconds < 0.0 {
            return Err(StardustError::InvalidConfig("tone ramp must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LetterConfig::default().validate().unwrap();
    }

    #[test]
    fn default_field_matches_reference_values() {
        let field = FieldConfig::default();
        assert_eq!(field.particle_count, 897);
        assert_eq!(field.stiffness, 0.03);
        assert_eq!(field.friction, 0.95);
        assert_eq!(field.alpha_threshold, 128);
        assert_eq!((field.grid_stride, field.narrow_grid_stride), (8, 6));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LetterConfig::from_json(r#"{
            "recipient": "amelia",
            "field": { "particleCount": 120, "fontFamily": "Georgia" }
        }"#).unwrap();
        assert_eq!(config.recipient, "amelia");
        assert_eq!(config.field.particle_count, 120);
        assert_eq!(config.field.font_family, "Georgia");
        assert_eq!(config.field.friction, 0.95);
        assert_eq!(config.tone, ToneConfig::default());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = LetterConfig::from_json("{ recipient: ").unwrap_err();
        assert!(matches!(err, StardustError::Config(_)));
    }

    #[test]
    fn friction_of_one_is_rejected() {
        let err = LetterConfig::from_json(r#"{ "field": { "friction": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, StardustError::InvalidConfig(_)));
    }

    #[test]
    fn zero_stride_is_rejected() {
        let mut field = FieldConfig::default();
        field.narrow_grid_stride = 0;
        assert!(field.validate().is_err());
    }

    #[test]
    fn inverted_size_range_is_rejected() {
        let mut field = FieldConfig::default();
        field.size_min = 3.0;
        assert!(field.validate().is_err());
    }

    #[test]
    fn loud_tone_is_rejected() {
        let err = LetterConfig::from_json(r#"{ "tone": { "volume": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, StardustError::InvalidConfig(_)));
    }

    #[test]
    fn glyph_is_uppercased_initial() {
        let config = LetterConfig { recipient: "  zaara".to_string(), ..LetterConfig::default() };
        assert_eq!(config.glyph(), 'Z');
        assert_eq!(LetterConfig::default().glyph(), 'Z');
    }

    #[test]
    fn empty_recipient_uses_fallback_glyph() {
        let config = LetterConfig { recipient: String::new(), ..LetterConfig::default() };
        assert_eq!(config.glyph(), FALLBACK_GLYPH);
    }
}
