//! Drawing surface abstraction and the CPU-side frame record.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use super::color::Rgba;

/// The two drawing primitives the particle field needs.
pub trait Surface {
    /// Composite a translucent fill over the whole surface.
    fn fade(&mut self, color: Rgba);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
}

/// Per-circle render data. 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn color(&self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, self.a)
    }
}

/// One recorded frame: the trail composite color followed by the circles
/// drawn over it, in draw order. Renderers replay it onto a real target.
pub struct FrameBuffer {
    backdrop: Option<Rgba>,
    circles: Vec<CircleInstance>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            backdrop: None,
            circles: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.backdrop = None;
        self.circles.clear();
    }

    /// Composite color of this frame, if the frame faded the surface.
    pub fn backdrop(&self) -> Option<Rgba> {
        self.backdrop
    }

    pub fn circles(&self) -> &[CircleInstance] {
        &self.circles
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backdrop.is_none() && self.circles.is_empty()
    }

    /// Circle data as a flat float slice (`FLOATS` per circle).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.circles)
    }

    pub fn circles_ptr(&self) -> *const f32 {
        self.circles.as_ptr() as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for FrameBuffer {
    fn fade(&mut self, color: Rgba) {
        // The fade covers everything drawn before it
        self.circles.clear();
        self.backdrop = Some(color);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.circles.push(CircleInstance {
            x: center.x as f32,
            y: center.y as f32,
            radius: radius as f32,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
            _pad: 0.0,
        });
    }
}
