use crate::foundation::core::{Canvas, Rgb8};

/// RGB8 drawing surface.
///
/// Scene coordinates have their origin at the bottom-left; rows are stored top-down so the
/// buffer can be written out as an image directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(canvas: Canvas, background: Rgb8) -> Self {
        let mut data = Vec::with_capacity(canvas.pixel_count() * 3);
        for _ in 0..canvas.pixel_count() {
            data.extend_from_slice(&[background.r, background.g, background.b]);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGB8 bytes, row-major, top row first.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let row = i64::from(self.height) - 1 - y;
        Some(((row * i64::from(self.width) + x) * 3) as usize)
    }

    /// Write one pixel in scene coordinates; out-of-bounds writes are dropped.
    pub fn plot(&mut self, x: i64, y: i64, color: Rgb8) {
        if let Some(o) = self.offset(x, y) {
            self.data[o..o + 3].copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb8> {
        self.offset(x, y)
            .map(|o| Rgb8::new(self.data[o], self.data[o + 1], self.data[o + 2]))
    }
}

/// Per-pixel depth, larger `z` is nearer the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl DepthBuffer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            values: vec![f64::NEG_INFINITY; canvas.pixel_count()],
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y * i64::from(self.width) + x) as usize)
    }

    pub fn depth(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// Record `z` at `(x, y)` if it is nearer than what is stored. Returns whether it was.
    pub fn test_and_set(&mut self, x: i64, y: i64, z: f64) -> bool {
        match self.index(x, y) {
            Some(i) if z > self.values[i] => {
                self.values[i] = z;
                true
            }
            _ => false,
        }
    }
}

/// Per-frame render target: a surface and its depth buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub surface: Surface,
    pub depth: DepthBuffer,
}

impl SceneState {
    pub fn new(canvas: Canvas, background: Rgb8) -> Self {
        Self {
            surface: Surface::new(canvas, background),
            depth: DepthBuffer::new(canvas),
        }
    }

    /// Depth-tested pixel write.
    pub fn plot(&mut self, x: i64, y: i64, z: f64, color: Rgb8) {
        if self.depth.test_and_set(x, y, z) {
            self.surface.plot(x, y, color);
        }
    }
}
