//! Glyph rasterization and grid sampling.
//!
//! A `GlyphRasterizer` draws one character onto an off-screen alpha mask;
//! `sample_points` turns that mask into the point cloud the particles
//! gather into.

mod mask;
mod sampling;
mod stroke_font;

pub use mask::{AlphaMask, GlyphRasterizer};
pub use sampling::{PointCloud, grid_stride, rasterize_point_cloud, sample_points};
pub use stroke_font::StrokeFont;
