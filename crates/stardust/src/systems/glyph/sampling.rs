use glam::UVec2;

use super::mask::{AlphaMask, GlyphRasterizer};
use crate::api::config::FieldConfig;

/// Grid coordinates where a rasterized glyph is opaque enough, in row-major
/// sampling order. Built once per (re)initialization and then dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<UVec2>,
}

impl PointCloud {
    pub fn new(points: Vec<UVec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[UVec2] {
        &self.points
    }

    /// Point at `index mod len`, so a larger population reuses samples.
    pub fn wrapping(&self, index: usize) -> Option<UVec2> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[index % self.points.len()])
    }

    pub fn contains(&self, point: UVec2) -> bool {
        self.points.contains(&point)
    }
}

/// Sample `mask` on a uniform grid, keeping points whose alpha exceeds
/// `threshold`. A zero stride is treated as 1.
pub fn sample_points(mask: &AlphaMask, stride: u32, threshold: u8) -> PointCloud {
    let step = stride.max(1) as usize;
    let mut points = Vec::new();
    for y in (0..mask.height()).step_by(step) {
        for x in (0..mask.width()).step_by(step) {
            if mask.get(x, y) > threshold {
                points.push(UVec2::new(x, y));
            }
        }
    }
    PointCloud::new(points)
}

/// Sampling stride for a surface: denser on narrow (phone-sized) surfaces.
pub fn grid_stride(width: u32, config: &FieldConfig) -> u32 {
    let stride = if width < config.narrow_breakpoint {
        config.narrow_grid_stride
    } else {
        config.grid_stride
    };
    stride.max(1)
}

/// Rasterize `glyph` for a `width × height` surface and sample it.
///
/// Returns an empty cloud for a zero-size surface, an unrenderable glyph, or
/// a blank mask (a browser font missing the character draws nothing). The
/// mask is dropped before returning.
pub fn rasterize_point_cloud<G: GlyphRasterizer + ?Sized>(
    rasterizer: &G,
    glyph: char,
    width: u32,
    height: u32,
    config: &FieldConfig,
) -> PointCloud {
    if width == 0 || height == 0 {
        return PointCloud::default();
    }
    let font_px = width.min(height) as f64 * config.glyph_scale;
    match rasterizer.rasterize(glyph, width, height, font_px) {
        Some(mask) if !mask.is_blank() => {
            sample_points(&mask, grid_stride(width, config), config.alpha_threshold)
        }
        _ => PointCloud::default(),
    }
}
