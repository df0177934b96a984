use crate::palette::Rgb;

/// 2D drawing target the pixel field paints into
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn resize(&mut self, width: usize, height: usize);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
}

/// One painted dot: last color drawn over it and how much of it is covered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub color: Rgb,
    pub coverage: f32,
}

/// Row-major grid of dots, one per surface pixel
#[derive(Debug, Clone, Default)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    dots: Vec<Option<Dot>>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![None; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Dot> {
        if x < self.width && y < self.height {
            self.dots[y * self.width + x]
        } else {
            None
        }
    }

    /// Number of dots with any paint on them
    #[cfg(test)]
    pub fn painted(&self) -> usize {
        self.dots.iter().filter(|d| d.is_some()).count()
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.dots = vec![None; width * height];
    }

    fn clear(&mut self) {
        self.dots.fill(None);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        let x0 = x.max(0.0);
        let y0 = y.max(0.0);
        let x1 = (x + w).min(self.width as f32);
        let y1 = (y + h).min(self.height as f32);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        // Accumulate the overlapped area of every dot the rectangle touches
        for dy in (y0.floor() as usize)..(y1.ceil() as usize) {
            let oy = (y1.min(dy as f32 + 1.0) - y0.max(dy as f32)).max(0.0);
            for dx in (x0.floor() as usize)..(x1.ceil() as usize) {
                let ox = (x1.min(dx as f32 + 1.0) - x0.max(dx as f32)).max(0.0);
                let area = ox * oy;
                if area <= 0.0 {
                    continue;
                }
                let slot = &mut self.dots[dy * self.width + dx];
                let coverage = slot.map_or(0.0, |d| d.coverage);
                *slot = Some(Dot {
                    color,
                    coverage: (coverage + area).min(1.0),
                });
            }
        }
    }
}
