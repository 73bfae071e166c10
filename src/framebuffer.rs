/// Fixed-size pixel surface the renderer draws into.
/// Pixels are packed `0x00RRGGBB`, the layout softbuffer presents.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Writes outside the surface are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Fill rows `[y0, y1)` of column `x`, clipped to the surface.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize, color: u32) {
        if x >= self.width {
            return;
        }
        let y1 = y1.min(self.height);
        let mut idx = y0 * self.width + x;
        for _y in y0..y1 {
            self.pixels[idx] = color;
            idx += self.width;
        }
    }

    /// Filled disc inscribed in the `size`x`size` square at `(x0, y0)`.
    pub fn fill_disc(&mut self, x0: usize, y0: usize, size: usize, color: u32) {
        let r = size as f32 * 0.5;
        for dy in 0..size {
            for dx in 0..size {
                // Test pixel centres against the circle
                let px = dx as f32 + 0.5 - r;
                let py = dy as f32 + 0.5 - r;
                if px * px + py * py <= r * r {
                    self.set_pixel(x0 + dx, y0 + dy, color);
                }
            }
        }
    }
}
