use std::fmt;

use serde::Deserialize;

/// Narrative phase of the letter. Owned by the host; the particle field only
/// reads it once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Intro veil: particles gather into the recipient's initial.
    #[default]
    Veil,
    /// Main scroll narrative: particles drift around their origins.
    Main,
    /// Dedication panel. Same particle behavior as `Main`.
    Dedication,
    /// Closing scene: particles implode toward the center and darken.
    Closure,
}

/// Which attractor rule a stage selects for every particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractorMode {
    /// Pull toward the particle's glyph-derived target.
    Glyph,
    /// Pull toward its own resting origin.
    Idle,
    /// Pull toward a jittered point near the surface center.
    Collapse,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Veil, Stage::Main, Stage::Dedication, Stage::Closure];

    /// Parse a stage name. Unknown names fall back to `Main`, so a host that
    /// sends something unexpected gets idle drift instead of an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "veil" => Stage::Veil,
            "main" => Stage::Main,
            "dedication" => Stage::Dedication,
            "closure" => Stage::Closure,
            other => {
                log::debug!("unknown stage '{other}', treating as main");
                Stage::Main
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Veil => "veil",
            Stage::Main => "main",
            Stage::Dedication => "dedication",
            Stage::Closure => "closure",
        }
    }

    pub fn attractor_mode(self) -> AttractorMode {
        match self {
            Stage::Veil => AttractorMode::Glyph,
            Stage::Closure => AttractorMode::Collapse,
            Stage::Main | Stage::Dedication => AttractorMode::Idle,
        }
    }

    /// Closure inverts the trail composite: fade to white instead of black.
    pub fn fades_to_light(self) -> bool {
        self == Stage::Closure
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Stage {
    fn from(name: &str) -> Self {
        Stage::from_name(name)
    }
}
