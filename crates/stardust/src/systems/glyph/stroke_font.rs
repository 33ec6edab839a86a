use std::collections::HashMap;

use glam::Vec2;
use serde::Deserialize;

use super::mask::{AlphaMask, GlyphRasterizer};
use crate::api::error::StardustError;

/// Stroke table shipped with the crate: uppercase A-Z and digits 0-9.
const BUILTIN_FONT: &str = include_str!("../../../assets/stroke_font.json");

/// Stroke font table as stored on disk.
#[derive(Debug, Deserialize)]
struct StrokeFontData {
    meta: StrokeMeta,
    glyphs: HashMap<String, StrokeGlyph>,
}

/// Metrics shared by every glyph in the table.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrokeMeta {
    /// Stroke thickness as a fraction of the cap height.
    stroke_width: f32,
    /// Cap height as a fraction of the font size.
    cap_height: f32,
}

/// One character: polylines in a unit box (x right, y down).
#[derive(Debug, Clone, Deserialize)]
struct StrokeGlyph {
    /// Box width relative to its height.
    width: f32,
    strokes: Vec<Vec<[f32; 2]>>,
}

/// Headless glyph rasterizer drawing thick anti-aliased polylines.
///
/// Stands in for browser text rendering wherever no canvas is available
/// (native hosts, tests). Lowercase letters are folded to uppercase.
#[derive(Debug, Clone)]
pub struct StrokeFont {
    meta: StrokeMeta,
    glyphs: HashMap<char, StrokeGlyph>,
}

impl StrokeFont {
    /// The embedded stroke table.
    pub fn builtin() -> Result<Self, StardustError> {
        Self::from_json(BUILTIN_FONT)
    }

    /// Parse a stroke table. Keys must be single characters.
    pub fn from_json(json: &str) -> Result<Self, StardustError> {
        let data: StrokeFontData = serde_json::from_str(json).map_err(StardustError::Font)?;
        let mut glyphs = HashMap::with_capacity(data.glyphs.len());
        for (key, glyph) in data.glyphs {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    glyphs.insert(c, glyph);
                }
                _ => log::warn!("stroke font: skipping multi-character key '{key}'"),
            }
        }
        Ok(Self { meta: data.meta, glyphs })
    }

    pub fn supports(&self, glyph: char) -> bool {
        self.lookup(glyph).is_some()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    fn lookup(&self, glyph: char) -> Option<&StrokeGlyph> {
        self.glyphs
            .get(&glyph)
            .or_else(|| self.glyphs.get(&glyph.to_ascii_uppercase()))
    }
}

impl GlyphRasterizer for StrokeFont {
    fn rasterize(&self, glyph: char, width: u32, height: u32, font_px: f64) -> Option<AlphaMask> {
        if width == 0 || height == 0 || !(font_px > 0.0) {
            return None;
        }
        let def = self.lookup(glyph)?;

        // Glyph box centered on the surface
        let box_h = font_px as f32 * self.meta.cap_height;
        let box_w = box_h * def.width;
        let origin = Vec2::new(
            (width as f32 - box_w) / 2.0,
            (height as f32 - box_h) / 2.0,
        );
        let to_px = |p: [f32; 2]| origin + Vec2::new(p[0] * box_w, p[1] * box_h);
        let half = (box_h * self.meta.stroke_width / 2.0).max(0.5);

        let mut segments: Vec<(Vec2, Vec2)> = Vec::new();
        for stroke in &def.strokes {
            match stroke.as_slice() {
                [] => {}
                [dot] => segments.push((to_px(*dot), to_px(*dot))),
                points => {
                    for pair in points.windows(2) {
                        segments.push((to_px(pair[0]), to_px(pair[1])));
                    }
                }
            }
        }

        let mut mask = AlphaMask::new(width, height);
        if segments.is_empty() {
            return Some(mask);
        }

        // Only visit pixels near the strokes
        let (mut lo, mut hi) = (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN));
        for (a, b) in &segments {
            lo = lo.min(a.min(*b));
            hi = hi.max(a.max(*b));
        }
        let pad = half + 1.0;
        let x0 = (lo.x - pad).floor().max(0.0) as u32;
        let y0 = (lo.y - pad).floor().max(0.0) as u32;
        let x1 = ((hi.x + pad).ceil().max(0.0) as u32).min(width);
        let y1 = ((hi.y + pad).ceil().max(0.0) as u32).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let dist = segments
                    .iter()
                    .map(|(a, b)| distance_to_segment(center, *a, *b))
                    .fold(f32::MAX, f32::min);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    mask.cover(x, y, (coverage * 255.0).round() as u8);
                }
            }
        }

        Some(mask)
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
