use crate::palette::Palette;
use crate::pixel::Pixel;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use rand::rngs::StdRng;

/// Minimum time between two accepted frames (~60 FPS)
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

const SPEED_MIN: f32 = 0.0;
const SPEED_MAX: f32 = 100.0;
const SPEED_THROTTLE: f32 = 0.001;

/// Which step every pixel takes on each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Appear,
    Disappear,
}

impl AnimationMode {
    pub fn name(&self) -> &str {
        match self {
            AnimationMode::Appear => "Appear",
            AnimationMode::Disappear => "Disappear",
        }
    }
}

/// Snapshot of the field for the status display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub total: usize,
    pub visible: usize,
    pub shimmering: usize,
    pub idle: usize,
}

/// Grid of pixels covering the card plus the frame-capped loop animating it
pub struct PixelField {
    pub pixels: Vec<Pixel>,
    pub palette: Palette,
    pub gap: usize,
    /// Configured speed (0-100), see [`PixelField::effective_speed`]
    pub speed: f32,
    pub reduced_motion: bool,
    /// Integer size of the container at the last build
    pub width: usize,
    pub height: usize,
    /// Frames that actually advanced the pixels
    pub frames: u64,
    mode: Option<AnimationMode>,
    frame: Option<FrameHandle>,
    time_previous: f64,
    rng: StdRng,
}

impl PixelField {
    /// Create an empty field; call [`PixelField::build`] once the container
    /// size is known
    pub fn new(palette: Palette, gap: usize, speed: f32, reduced_motion: bool, rng: StdRng) -> Self {
        Self {
            pixels: Vec::new(),
            palette,
            gap: gap.max(1),
            speed,
            reduced_motion,
            width: 0,
            height: 0,
            frames: 0,
            mode: None,
            frame: None,
            time_previous: 0.0,
            rng,
        }
    }

    /// Map a configured speed (0-100) to a per-frame size delta
    pub fn effective_speed(&self, value: f32) -> f32 {
        if value.is_nan() || value <= SPEED_MIN || self.reduced_motion {
            SPEED_MIN
        } else if value >= SPEED_MAX {
            SPEED_MAX * SPEED_THROTTLE
        } else {
            value * SPEED_THROTTLE
        }
    }

    /// Regenerate every pixel for a container of `container` (width, height).
    /// Any in-flight animation continues on the new pixels from the next frame.
    pub fn build<S: Surface + ?Sized>(&mut self, container: (f32, f32), surface: &mut S) {
        surface.resize(
            container.0.max(0.0).floor() as usize,
            container.1.max(0.0).floor() as usize,
        );
        let (width, height) = (surface.width(), surface.height());

        let speed = self.effective_speed(self.speed);
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;

        let mut pixels = Vec::with_capacity(width.div_ceil(self.gap) * height.div_ceil(self.gap));
        for x in (0..width).step_by(self.gap) {
            for y in (0..height).step_by(self.gap) {
                let color = self.palette.pick(&mut self.rng);
                let delay = if self.reduced_motion {
                    0.0
                } else {
                    let dx = x as f32 - center_x;
                    let dy = y as f32 - center_y;
                    (dx * dx + dy * dy).sqrt()
                };
                pixels.push(Pixel::new(
                    &mut self.rng,
                    (x as f32, y as f32),
                    color,
                    speed,
                    delay,
                    (width, height),
                ));
            }
        }

        self.pixels = pixels;
        self.width = width;
        self.height = height;
        tracing::debug!(width, height, gap = self.gap, pixels = self.pixels.len(), "built pixel grid");
    }

    /// Start animating every pixel in `mode`, replacing any running loop
    pub fn trigger<F, S>(&mut self, mode: AnimationMode, now: f64, scheduler: &mut F, surface: &mut S)
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        self.stop(scheduler);
        tracing::debug!(mode = mode.name(), "animation triggered");

        self.mode = Some(mode);
        self.time_previous = now;
        self.on_frame(now, scheduler, surface);
    }

    /// Scheduled frame callback. Returns true if the pixels were advanced.
    pub fn on_frame<F, S>(&mut self, now: f64, scheduler: &mut F, surface: &mut S) -> bool
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        let Some(mode) = self.mode else {
            return false;
        };
        self.frame = Some(scheduler.request_frame());

        let time_passed = now - self.time_previous;
        if time_passed < FRAME_INTERVAL_MS {
            return false;
        }
        // Keep the remainder so the cadence doesn't drift
        self.time_previous = now - (time_passed % FRAME_INTERVAL_MS);

        surface.clear();
        let mut all_settled = true;
        for pixel in &mut self.pixels {
            pixel.step(mode, surface);
            all_settled &= pixel.is_settled(mode);
        }
        self.frames += 1;

        if all_settled {
            if let Some(handle) = self.frame.take() {
                scheduler.cancel_frame(handle);
            }
            tracing::debug!(mode = mode.name(), frames = self.frames, "animation settled");
        }
        true
    }

    /// Whether a frame is currently scheduled
    /// Cancel the pending frame, if any, leaving pixels where they are
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Mode of the most recent trigger
    pub fn mode(&self) -> Option<AnimationMode> {
        self.mode
    }

    pub fn stats(&self) -> FieldStats {
        self.pixels.iter().fold(
            FieldStats {
                total: self.pixels.len(),
                ..Default::default()
            },
            |mut stats, p| {
                stats.visible += p.is_visible() as usize;
                stats.shimmering += p.is_shimmer as usize;
                stats.idle += p.is_idle as usize;
                stats
            },
        )
    }
}
