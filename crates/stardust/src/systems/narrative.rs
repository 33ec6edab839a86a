//! Stage machine of the letter and its timed cues.

use crate::api::config::NarrativeConfig;
use crate::api::error::StardustError;
use crate::api::stage::Stage;

/// Current stage plus the host time it was entered.
///
/// Allowed moves: veil → main → (dedication →) closure. Closure is final.
pub struct Narrative {
    stage: Stage,
    entered_at_ms: f64,
    config: NarrativeConfig,
}

impl Narrative {
    pub fn new(config: NarrativeConfig) -> Self {
        Self {
            stage: Stage::Veil,
            entered_at_ms: 0.0,
            config,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Milliseconds spent in the current stage.
    pub fn time_in_stage(&self, now_ms: f64) -> f64 {
        (now_ms - self.entered_at_ms).max(0.0)
    }

    /// Lift the veil.
    pub fn begin(&mut self, now_ms: f64) -> Result<Stage, StardustError> {
        self.advance(Stage::Main, now_ms)
    }

    /// Open the dedication panel.
    pub fn dedicate(&mut self, now_ms: f64) -> Result<Stage, StardustError> {
        self.advance(Stage::Dedication, now_ms)
    }

    /// Move to the closing scene.
    pub fn close(&mut self, now_ms: f64) -> Result<Stage, StardustError> {
        self.advance(Stage::Closure, now_ms)
    }

    /// The tagline fades in a while after the main narrative starts.
    pub fn tagline_visible(&self, now_ms: f64) -> bool {
        self.stage == Stage::Main && self.time_in_stage(now_ms) >= self.config.tagline_delay_ms
    }

    /// The final link appears a while after closure.
    pub fn final_link_visible(&self, now_ms: f64) -> bool {
        self.stage == Stage::Closure && self.time_in_stage(now_ms) >= self.config.final_link_delay_ms
    }

    fn advance(&mut self, to: Stage, now_ms: f64) -> Result<Stage, StardustError> {
        let allowed = matches!(
            (self.stage, to),
            (Stage::Veil, Stage::Main)
                | (Stage::Main, Stage::Dedication)
                | (Stage::Main, Stage::Closure)
                | (Stage::Dedication, Stage::Closure)
        );
        if !allowed {
            return Err(StardustError::InvalidTransition { from: self.stage, to });
        }
        log::info!("stage {} -> {}", self.stage, to);
        self.stage = to;
        self.entered_at_ms = now_ms;
        Ok(to)
    }
}

impl Default for Narrative {
    fn default() -> Self {
        Self::new(NarrativeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_behind_the_veil() {
        let narrative = Narrative::default();
        assert_eq!(narrative.stage(), Stage::Veil);
    }

    #[test]
    fn full_path_through_dedication() {
        let mut n = Narrative::default();
        assert_eq!(n.begin(100.0).unwrap(), Stage::Main);
        assert_eq!(n.dedicate(200.0).unwrap(), Stage::Dedication);
        assert_eq!(n.close(300.0).unwrap(), Stage::Closure);
    }

    #[test]
    fn main_can_close_directly() {
        let mut n = Narrative::default();
        n.begin(0.0).unwrap();
        assert_eq!(n.close(10.0).unwrap(), Stage::Closure);
    }

    #[test]
    fn cannot_skip_the_veil() {
        let mut n = Narrative::default();
        let err = n.close(0.0).unwrap_err();
        assert!(matches!(
            err,
            StardustError::InvalidTransition { from: Stage::Veil, to: Stage::Closure }
        ));
        assert_eq!(n.stage(), Stage::Veil);
    }

    #[test]
    fn closure_is_final() {
        let mut n = Narrative::default();
        n.begin(0.0).unwrap();
        n.close(1.0).unwrap();
        assert!(n.begin(2.0).is_err());
        assert!(n.dedicate(2.0).is_err());
        assert!(n.close(2.0).is_err());
    }

    #[test]
    fn tagline_appears_after_delay() {
        let mut n = Narrative::default();
        assert!(!n.tagline_visible(10_000.0));
        n.begin(1000.0).unwrap();
        assert!(!n.tagline_visible(2999.0));
        assert!(n.tagline_visible(3000.0));
        n.close(4000.0).unwrap();
        assert!(!n.tagline_visible(9000.0));
    }

    #[test]
    fn final_link_appears_after_delay() {
        let mut n = Narrative::default();
        n.begin(0.0).unwrap();
        n.close(500.0).unwrap();
        assert!(!n.final_link_visible(5499.0));
        assert!(n.final_link_visible(5500.0));
    }

    #[test]
    fn custom_delays() {
        let mut n = Narrative::new(NarrativeConfig {
            tagline_delay_ms: 0.0,
            final_link_delay_ms: 100.0,
        });
        n.begin(50.0).unwrap();
        assert!(n.tagline_visible(50.0));
        assert_eq!(n.time_in_stage(20.0), 0.0);
    }
}
