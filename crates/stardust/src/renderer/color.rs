/// RGBA color for particles and trail composites (0.0 - 1.0 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB u8 values (0-255) and a float alpha.
    pub fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string for Canvas2D fill styles.
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_of_trail_dark() {
        assert_eq!(Rgba::rgb8(5, 5, 5, 0.2).to_css(), "rgba(5, 5, 5, 0.2)");
    }

    #[test]
    fn css_clamps_out_of_range() {
        let c = Rgba::new(1.5, -0.2, 0.5, 3.0);
        assert_eq!(c.to_css(), "rgba(255, 0, 128, 1)");
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Rgba::WHITE.with_alpha(0.3);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 1.0, 1.0, 0.3));
    }
}
