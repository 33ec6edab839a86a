use stardust::{GainRamp, ToneConfig, ToneEnvelope};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Live Web Audio graph: sine oscillator → gain → speakers.
struct ToneGraph {
    ctx: AudioContext,
    gain: GainNode,
    _oscillator: OscillatorNode,
}

impl ToneGraph {
    fn build(frequency_hz: f32) -> Result<Self, JsValue> {
        let ctx = AudioContext::new()?;
        let now = ctx.current_time();

        let gain = ctx.create_gain()?;
        gain.connect_with_audio_node(&ctx.destination())?;
        gain.gain().set_value_at_time(0.0, now)?;

        let oscillator = ctx.create_oscillator()?;
        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value_at_time(frequency_hz, now)?;
        oscillator.connect_with_audio_node(&gain)?;
        oscillator.start()?;

        Ok(Self { ctx, gain, _oscillator: oscillator })
    }

    fn apply(&self, ramp: GainRamp) -> Result<(), JsValue> {
        let param = self.gain.gain();
        param.set_value_at_time(ramp.from, ramp.start_s)?;
        param.linear_ramp_to_value_at_time(ramp.to, ramp.end_s)?;
        Ok(())
    }
}

/// Ambient drone with a ramped mute toggle.
///
/// The audio graph is created lazily on the first unmute, because browsers
/// only allow audio to start from a user gesture.
pub struct WebTone {
    envelope: ToneEnvelope,
    graph: Option<ToneGraph>,
}

impl WebTone {
    pub fn new(config: ToneConfig) -> Self {
        Self {
            envelope: ToneEnvelope::new(config),
            graph: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.envelope.is_muted()
    }

    /// Flip mute. Audio failures are logged and leave the page silent.
    pub fn toggle(&mut self) {
        if !self.ensure_graph() {
            return;
        }
        let Some(graph) = self.graph.as_ref() else { return };
        let ramp = self.envelope.toggle(graph.ctx.current_time());
        if let Err(err) = graph.apply(ramp) {
            log::warn!("tone ramp failed: {err:?}");
        }
    }

    /// Unmute if muted.
    pub fn unmute(&mut self) {
        if self.envelope.is_muted() {
            self.toggle();
        }
    }

    fn ensure_graph(&mut self) -> bool {
        if self.graph.is_some() {
            return true;
        }
        match ToneGraph::build(self.envelope.frequency_hz()) {
            Ok(graph) => {
                self.graph = Some(graph);
                true
            }
            Err(err) => {
                log::warn!("audio unavailable: {err:?}");
                false
            }
        }
    }

    /// Close the audio context.
    pub fn shutdown(&mut self) {
        if let Some(graph) = self.graph.take() {
            let _ = graph.ctx.close();
        }
    }
}
