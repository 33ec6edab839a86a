pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{LetterConfig, FieldConfig, NarrativeConfig, ToneConfig};
pub use api::error::StardustError;
pub use api::stage::{Stage, AttractorMode};
pub use api::simulator::{Simulator, LoopHandle, FrameStatus};
pub use core::rng::{Rng, RandomSource};
pub use core::time::{FrameClock, FrameTiming};
pub use systems::glyph::{
    AlphaMask, GlyphRasterizer, PointCloud, StrokeFont,
    grid_stride, rasterize_point_cloud, sample_points,
};
pub use systems::particle::Particle;
pub use systems::field::ParticleField;
pub use systems::narrative::Narrative;
pub use systems::tone::{ToneEnvelope, GainRamp};
pub use renderer::color::Rgba;
pub use renderer::frame::{CircleInstance, FrameBuffer, Surface};
pub use renderer::traits::Renderer;
