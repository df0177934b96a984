use crate::field::AnimationMode;
use crate::palette::Rgb;
use crate::surface::Surface;
use rand::Rng;

/// Smallest size a shimmering pixel shrinks to
const MIN_SIZE: f32 = 0.5;
/// Side of the square cell each pixel is centered in
const MAX_SIZE_INTEGER: f32 = 2.0;
/// Size lost per disappear step
const SHRINK_STEP: f32 = 0.1;

/// A single animated cell of the pixel card.
///
/// Lifecycle: idle -> (appear) delaying -> growing -> shimmering,
/// then (disappear) shrinking -> idle. Any call can restart the cycle from
/// wherever the pixel currently sits.
#[derive(Debug, Clone)]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    /// Shimmer velocity per frame
    pub speed: f32,
    pub size: f32,
    /// Growth per frame while appearing
    pub size_step: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Counter value that has to be reached before growth starts
    pub delay: f32,
    pub counter: f32,
    pub counter_step: f32,
    pub is_idle: bool,
    pub is_reverse: bool,
    pub is_shimmer: bool,
}

impl Pixel {
    /// Create a pixel at `origin` on a surface of `extent` (width, height).
    /// `speed` is the field's effective speed; each pixel scales it randomly.
    pub fn new<R: Rng>(
        rng: &mut R,
        origin: (f32, f32),
        color: Rgb,
        speed: f32,
        delay: f32,
        extent: (usize, usize),
    ) -> Self {
        let (width, height) = extent;
        Self {
            x: origin.0,
            y: origin.1,
            color,
            speed: rng.gen_range(0.1..0.9) * speed,
            size: 0.0,
            size_step: rng.gen::<f32>() * 0.4,
            min_size: MIN_SIZE,
            max_size: rng.gen_range(MIN_SIZE..MAX_SIZE_INTEGER),
            delay,
            counter: 0.0,
            counter_step: rng.gen::<f32>() * 4.0 + (width + height) as f32 * 0.01,
            is_idle: false,
            is_reverse: false,
            is_shimmer: false,
        }
    }

    /// Advance one step in `mode`
    pub fn step<S: Surface + ?Sized>(&mut self, mode: AnimationMode, surface: &mut S) {
        match mode {
            AnimationMode::Appear => self.appear(surface),
            AnimationMode::Disappear => self.disappear(surface),
        }
    }

    pub fn appear<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.is_idle = false;

        if self.counter < self.delay {
            self.counter += self.counter_step;
            return;
        }

        if self.size >= self.max_size {
            self.is_shimmer = true;
        }

        if self.is_shimmer {
            self.shimmer();
        } else {
            self.size = (self.size + self.size_step).min(self.max_size);
        }

        self.draw(surface);
    }

    pub fn disappear<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.is_shimmer = false;
        self.counter = 0.0;

        if self.size <= 0.0 {
            self.is_idle = true;
            return;
        }

        self.size = (self.size - SHRINK_STEP).max(0.0);
        self.draw(surface);
    }

    /// Twinkle back and forth between min and max size
    fn shimmer(&mut self) {
        if self.size >= self.max_size {
            self.is_reverse = true;
        } else if self.size <= self.min_size {
            self.is_reverse = false;
        }

        let delta = if self.is_reverse { -self.speed } else { self.speed };
        self.size = (self.size + delta).clamp(self.min_size, self.max_size);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let offset = MAX_SIZE_INTEGER * 0.5 - self.size * 0.5;
        surface.fill_rect(
            self.x + offset,
            self.y + offset,
            self.size,
            self.size,
            self.color,
        );
    }

    /// True once nothing further will change under `mode`
    pub fn is_settled(&self, mode: AnimationMode) -> bool {
        match mode {
            AnimationMode::Disappear => self.is_idle,
            AnimationMode::Appear => self.is_shimmer && self.speed == 0.0,
        }
    }

    /// Whether anything of this pixel would be painted right now
    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const COLOR: Rgb = Rgb::new(0xcb, 0xd5, 0xe1);

    fn pixel(delay: f32, counter_step: f32) -> Pixel {
        Pixel {
            x: 2.0,
            y: 2.0,
            color: COLOR,
            speed: 0.02,
            size: 0.0,
            size_step: 0.25,
            min_size: MIN_SIZE,
            max_size: 1.5,
            delay,
            counter: 0.0,
            counter_step,
            is_idle: false,
            is_reverse: false,
            is_shimmer: false,
        }
    }

    #[test]
    fn test_random_parameters_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let p = Pixel::new(&mut rng, (0.0, 0.0), COLOR, 0.035, 3.0, (100, 50));
            assert!(p.speed >= 0.1 * 0.035 && p.speed <= 0.9 * 0.035);
            assert!(p.size_step >= 0.0 && p.size_step < 0.4);
            assert!(p.max_size >= MIN_SIZE && p.max_size < MAX_SIZE_INTEGER);
            assert!(p.counter_step >= 1.5 && p.counter_step < 5.5);
            assert_eq!(p.size, 0.0);
            assert_eq!(p.delay, 3.0);
            assert!(!p.is_idle && !p.is_shimmer && !p.is_reverse);
        }
    }

    #[test]
    fn test_same_seed_same_pixel() {
        let a = Pixel::new(&mut StdRng::seed_from_u64(9), (1.0, 1.0), COLOR, 0.05, 0.0, (10, 10));
        let b = Pixel::new(&mut StdRng::seed_from_u64(9), (1.0, 1.0), COLOR, 0.05, 0.0, (10, 10));
        assert_eq!(a.speed, b.speed);
        assert_eq!(a.size_step, b.size_step);
        assert_eq!(a.max_size, b.max_size);
        assert_eq!(a.counter_step, b.counter_step);
    }

    #[test]
    fn test_delay_gate_takes_ceil_delay_over_step_calls() {
        let mut surface = PixelBuffer::new(8, 8);
        for (delay, step, gated) in [(10.0, 2.5, 4), (9.0, 3.0, 3), (10.0, 3.0, 4), (0.0, 1.0, 0)] {
            let mut p = pixel(delay, step);
            for _ in 0..gated {
                p.appear(&mut surface);
                assert_eq!(p.size, 0.0, "grew too early for delay {}", delay);
            }
            p.appear(&mut surface);
            assert!(p.size > 0.0, "did not grow after {} gated calls", gated);
        }
    }

    #[test]
    fn test_delay_gate_does_not_draw() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut p = pixel(5.0, 1.0);
        p.appear(&mut surface);
        assert_eq!(surface.painted(), 0);
        assert!(!p.is_idle);
    }

    #[test]
    fn test_growth_never_exceeds_max_size() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut p = pixel(0.0, 1.0);
        for _ in 0..50 {
            p.appear(&mut surface);
            assert!(p.size <= p.max_size);
        }
        assert!(p.is_shimmer);
    }

    #[test]
    fn test_shimmer_oscillates_within_bounds() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut p = pixel(0.0, 1.0);
        p.speed = 0.3;
        while !p.is_shimmer {
            p.appear(&mut surface);
        }

        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..500 {
            p.appear(&mut surface);
            assert!(p.size >= p.min_size && p.size <= p.max_size);
            assert!(p.is_shimmer);
            assert!(!p.is_idle);
            saw_min |= p.size == p.min_size;
            saw_max |= p.size == p.max_size;
        }
        assert!(saw_min && saw_max, "shimmer should reach both bounds");
    }

    #[test]
    fn test_disappear_shrinks_then_goes_idle() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut p = pixel(0.0, 1.0);
        p.size = 0.35;
        p.is_shimmer = true;
        p.counter = 4.0;

        let mut previous = p.size;
        let mut steps = 0;
        while !p.is_idle {
            p.disappear(&mut surface);
            assert!(!p.is_shimmer);
            assert_eq!(p.counter, 0.0);
            assert!(p.size <= previous);
            assert!(p.size >= 0.0);
            previous = p.size;
            steps += 1;
            assert!(steps < 100);
        }
        // 0.35 -> 0.25 -> 0.15 -> 0.05 -> 0.0 -> idle
        assert_eq!(steps, 5);

        p.disappear(&mut surface);
        assert!(p.is_idle);
        p.appear(&mut surface);
        assert!(!p.is_idle);
    }

    #[test]
    fn test_draw_is_centered_in_cell() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut p = pixel(0.0, 1.0);
        p.size = 2.0;
        p.draw(&mut surface);
        assert_eq!(surface.painted(), 4);
        assert!(surface.get(2, 2).is_some());
        assert!(surface.get(3, 3).is_some());
        assert!(surface.get(4, 4).is_none());

        let mut surface = PixelBuffer::new(8, 8);
        p.size = 1.0;
        p.draw(&mut surface);
        // 1x1 square at (2.5, 2.5) touches the same four dots
        assert_eq!(surface.painted(), 4);
        assert!((surface.get(2, 2).unwrap().coverage - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_settled_per_mode() {
        let mut p = pixel(0.0, 1.0);
        assert!(!p.is_settled(AnimationMode::Appear));
        p.is_shimmer = true;
        assert!(!p.is_settled(AnimationMode::Appear));
        p.speed = 0.0;
        assert!(p.is_settled(AnimationMode::Appear));
        assert!(!p.is_settled(AnimationMode::Disappear));
        p.is_idle = true;
        assert!(p.is_settled(AnimationMode::Disappear));
    }
}
