/// Drawing operations understood by [`Canvas::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole canvas and reset depth
    Clear([u8; 3]),

    /// Depth-tested pixel
    Pixel { x: i32, y: i32, depth: f32, rgb: [u8; 3] },

    /// Depth-tested filled circle centred at (cx, cy)
    FilledCircle { cx: f32, cy: f32, radius: f32, depth: f32, rgb: [u8; 3] },

    /// Scale the colour of an existing pixel, keeping its depth
    Darken { x: i32, y: i32, factor: f32 },
}

/// RGBA pixel buffer with a per-pixel depth buffer
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<u8>,
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let count = (width * height) as usize;
        Self {
            pixels: vec![0; count * 4],
            depth: vec![f32::INFINITY; count],
            width,
            height,
        }
    }

    /// Reallocate for new dimensions; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn execute(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(rgb) => self.clear(rgb),
            DrawOp::Pixel { x, y, depth, rgb } => self.plot(x, y, depth, rgb),
            DrawOp::FilledCircle { cx, cy, radius, depth, rgb } => {
                self.fill_circle(cx, cy, radius, depth, rgb)
            }
            DrawOp::Darken { x, y, factor } => self.darken(x, y, factor),
        }
    }

    fn clear(&mut self, rgb: [u8; 3]) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        self.depth.fill(f32::INFINITY);
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Writes only when nearer than what is already there
    fn plot(&mut self, x: i32, y: i32, depth: f32, rgb: [u8; 3]) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        if depth >= self.depth[i] {
            return;
        }
        self.depth[i] = depth;
        self.pixels[i * 4..i * 4 + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, depth: f32, rgb: [u8; 3]) {
        let radius = radius.max(0.5);
        let r_sq = radius * radius;

        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;

        for y in y0.max(0)..=y1.min(self.height as i32 - 1) {
            for x in x0.max(0)..=x1.min(self.width as i32 - 1) {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.plot(x, y, depth, rgb);
                }
            }
        }
    }

    fn darken(&mut self, x: i32, y: i32, factor: f32) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let factor = factor.clamp(0.0, 1.0);
        for channel in &mut self.pixels[i * 4..i * 4 + 3] {
            *channel = (*channel as f32 * factor).round() as u8;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x as i32, y as i32)?;
        let p = &self.pixels[i * 4..i * 4 + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.offset(x as i32, y as i32).map(|i| self.depth[i])
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
