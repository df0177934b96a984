use crate::error::CardResult;
use crate::field::{AnimationMode, PixelField};
use crate::presets::Variant;
use crate::scheduler::FrameScheduler;
use crate::settings::CardSettings;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Signals the host forwards to the card
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    /// New container size (width, height)
    Resize(f32, f32),
}

/// A pixel field bound to its settings and container
pub struct PixelCard {
    pub settings: CardSettings,
    pub field: PixelField,
    container: (f32, f32),
    seed: Option<u64>,
}

impl PixelCard {
    /// Build the card for a container of `container` (width, height).
    /// With a seed the pixel layout is reproducible.
    pub fn new<S: Surface + ?Sized>(
        settings: CardSettings,
        container: (f32, f32),
        seed: Option<u64>,
        surface: &mut S,
    ) -> CardResult<Self> {
        let field = Self::make_field(&settings, seed)?;
        let mut card = Self {
            settings,
            field,
            container,
            seed,
        };
        card.field.build(container, surface);
        tracing::info!(
            variant = card.settings.variant.name(),
            gap = card.settings.gap,
            speed = card.settings.speed,
            reduced_motion = card.settings.reduced_motion,
            "pixel card ready"
        );
        Ok(card)
    }

    fn make_field(settings: &CardSettings, seed: Option<u64>) -> CardResult<PixelField> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(PixelField::new(
            settings.palette()?,
            settings.gap,
            settings.speed,
            settings.reduced_motion,
            rng,
        ))
    }

    /// Route a host signal to the field.
    /// Returns the mode that was triggered, if any.
    pub fn handle_event<F, S>(
        &mut self,
        event: CardEvent,
        now: f64,
        scheduler: &mut F,
        surface: &mut S,
    ) -> Option<AnimationMode>
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        let mode = match event {
            CardEvent::PointerEnter => AnimationMode::Appear,
            CardEvent::PointerLeave => AnimationMode::Disappear,
            CardEvent::Focus if !self.settings.no_focus => AnimationMode::Appear,
            CardEvent::Blur if !self.settings.no_focus => AnimationMode::Disappear,
            CardEvent::Focus | CardEvent::Blur => return None,
            CardEvent::Resize(width, height) => {
                self.container = (width, height);
                self.field.build(self.container, surface);
                // New pixels start at size 0; a lit card has to grow them again
                if self.field.mode() != Some(AnimationMode::Appear) {
                    return None;
                }
                AnimationMode::Appear
            }
        };
        self.field.trigger(mode, now, scheduler, surface);
        Some(mode)
    }

    /// Replace the settings and regenerate the grid. Pixels start over idle.
    pub fn apply_settings<F, S>(
        &mut self,
        settings: CardSettings,
        scheduler: &mut F,
        surface: &mut S,
    ) -> CardResult<()>
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        let mut field = Self::make_field(&settings, self.seed)?;
        field.build(self.container, surface);
        self.field.stop(scheduler);
        self.field = field;
        self.settings = settings;
        tracing::debug!(variant = self.settings.variant.name(), "card settings applied");
        Ok(())
    }

    pub fn set_variant<F, S>(&mut self, variant: Variant, scheduler: &mut F, surface: &mut S) -> CardResult<()>
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        let mut settings = self.settings.clone();
        settings.apply_variant(variant);
        self.apply_settings(settings, scheduler, surface)
    }

    pub fn container(&self) -> (f32, f32) {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameQueue;
    use crate::settings::CardOptions;
    use crate::surface::PixelBuffer;

    fn card(variant: Variant, surface: &mut PixelBuffer) -> PixelCard {
        let settings = CardOptions {
            variant: Some(variant),
            ..Default::default()
        }
        .resolve(false)
        .unwrap();
        PixelCard::new(settings, (40.0, 20.0), Some(5), surface).unwrap()
    }

    #[test]
    fn test_pointer_events_trigger_modes() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();
        let mut c = card(Variant::Default, &mut surface);

        assert_eq!(
            c.handle_event(CardEvent::PointerEnter, 0.0, &mut queue, &mut surface),
            Some(AnimationMode::Appear)
        );
        assert!(c.field.is_running());
        assert_eq!(
            c.handle_event(CardEvent::PointerLeave, 5.0, &mut queue, &mut surface),
            Some(AnimationMode::Disappear)
        );
        assert_eq!(c.field.mode(), Some(AnimationMode::Disappear));
    }

    #[test]
    fn test_focus_events_respect_no_focus() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();

        let mut focusable = card(Variant::Blue, &mut surface);
        assert_eq!(
            focusable.handle_event(CardEvent::Focus, 0.0, &mut queue, &mut surface),
            Some(AnimationMode::Appear)
        );
        assert_eq!(
            focusable.handle_event(CardEvent::Blur, 0.0, &mut queue, &mut surface),
            Some(AnimationMode::Disappear)
        );

        let mut queue = FrameQueue::new();
        let mut pink = card(Variant::Pink, &mut surface);
        assert_eq!(pink.handle_event(CardEvent::Focus, 0.0, &mut queue, &mut surface), None);
        assert_eq!(pink.handle_event(CardEvent::Blur, 0.0, &mut queue, &mut surface), None);
        assert!(!pink.field.is_running());
        assert!(!queue.is_pending());
    }

    #[test]
    fn test_resize_rebuilds_grid() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();
        let mut c = card(Variant::Default, &mut surface);
        assert_eq!(c.field.pixels.len(), 8 * 4);

        assert_eq!(c.handle_event(CardEvent::Resize(12.0, 9.0), 0.0, &mut queue, &mut surface), None);
        assert_eq!(c.container(), (12.0, 9.0));
        assert_eq!(c.field.pixels.len(), 3 * 2);
        assert_eq!((surface.width(), surface.height()), (12, 9));
    }

    #[test]
    fn test_seeded_cards_are_identical() {
        let mut surface = PixelBuffer::default();
        let a = card(Variant::Yellow, &mut surface);
        let b = card(Variant::Yellow, &mut surface);
        for (p, q) in a.field.pixels.iter().zip(&b.field.pixels) {
            assert_eq!(p.color, q.color);
            assert_eq!(p.max_size, q.max_size);
            assert_eq!(p.speed, q.speed);
        }
    }

    #[test]
    fn test_set_variant_rebuilds_with_new_gap() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();
        let mut c = card(Variant::Default, &mut surface);
        c.set_variant(Variant::Blue, &mut queue, &mut surface).unwrap();
        assert_eq!(c.settings.variant, Variant::Blue);
        assert_eq!(c.field.gap, 10);
        assert_eq!(c.field.pixels.len(), 4 * 2);
    }

    #[test]
    fn test_apply_settings_cancels_running_loop() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();
        let mut c = card(Variant::Default, &mut surface);
        c.handle_event(CardEvent::PointerEnter, 0.0, &mut queue, &mut surface);
        assert_eq!(queue.pending_count(), 1);

        c.set_variant(Variant::Yellow, &mut queue, &mut surface).unwrap();
        assert!(!c.field.is_running());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_resize_while_lit_regrows_pixels() {
        let mut surface = PixelBuffer::default();
        let mut queue = FrameQueue::new();
        let mut c = card(Variant::Default, &mut surface);
        c.handle_event(CardEvent::PointerEnter, 0.0, &mut queue, &mut surface);

        assert_eq!(
            c.handle_event(CardEvent::Resize(30.0, 12.0), 20.0, &mut queue, &mut surface),
            Some(AnimationMode::Appear)
        );
        assert!(c.field.is_running());
        assert_eq!(queue.pending_count(), 1);

        // A faded card stays dark after a resize
        c.handle_event(CardEvent::PointerLeave, 40.0, &mut queue, &mut surface);
        assert_eq!(c.handle_event(CardEvent::Resize(20.0, 10.0), 60.0, &mut queue, &mut surface), None);
    }
}
