/// Off-screen 8-bit alpha raster, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing alpha channel. Returns `None` if the length does not
    /// match `width × height`.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> Option<Self> {
        if alpha.len() != width as usize * height as usize {
            return None;
        }
        Some(Self { width, height, alpha })
    }

    /// Extract the alpha channel of an RGBA8 pixel buffer (e.g. canvas
    /// `ImageData`).
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Some(Self { width, height, alpha })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at (x, y); 0 outside the mask.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Raise the alpha at (x, y) to at least `value`. Ignores out-of-bounds.
    pub fn cover(&mut self, x: u32, y: u32, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.alpha[idx] = self.alpha[idx].max(value);
    }

    /// True if no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }
}

/// Draws a single character, centered and filled, onto an off-screen mask.
///
/// Implementations return `None` when the surface has zero size or the
/// character cannot be drawn; callers fall back to scattered targets.
pub trait GlyphRasterizer {
    fn rasterize(&self, glyph: char, width: u32, height: u32, font_px: f64) -> Option<AlphaMask>;
}
