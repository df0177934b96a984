use crate::braille;
use crate::card::{CardEvent, PixelCard};
use crate::error::CardResult;
use crate::field::AnimationMode;
use crate::presets::Variant;
use crate::scheduler::FrameQueue;
use crate::settings::CardSettings;
use crate::surface::PixelBuffer;
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Speed change per +/- press
const SPEED_STEP: f32 = 5.0;

/// Main application state
pub struct App {
    pub card: PixelCard,
    pub surface: PixelBuffer,
    pub frames: FrameQueue,
    /// Screen area of the card's canvas (inside its border)
    pub card_area: Rect,
    pub hovered: bool,
    pub focused: bool,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    /// Last settings error, shown in the status box
    pub message: Option<String>,
    started: Instant,
}

impl App {
    pub fn new(settings: CardSettings, card_area: Rect, seed: Option<u64>) -> CardResult<Self> {
        let mut surface = PixelBuffer::default();
        let container = Self::container_size(card_area);
        let card = PixelCard::new(settings, container, seed, &mut surface)?;
        Ok(Self {
            card,
            surface,
            frames: FrameQueue::new(),
            card_area,
            hovered: false,
            focused: false,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            message: None,
            started: Instant::now(),
        })
    }

    fn container_size(area: Rect) -> (f32, f32) {
        let (width, height) = braille::calculate_surface_size(area.width, area.height);
        (width as f32, height as f32)
    }

    /// Milliseconds since startup, the clock the animation loop runs on
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn send(&mut self, event: CardEvent) -> Option<AnimationMode> {
        let now = self.now();
        self.card
            .handle_event(event, now, &mut self.frames, &mut self.surface)
    }

    /// Run the animation frame if one is due
    pub fn tick(&mut self) {
        if self.frames.take_due() {
            let now = self.now();
            self.card.field.on_frame(now, &mut self.frames, &mut self.surface);
        }
    }

    /// Pointer moved to terminal cell (column, row)
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let inside = self.card_area.contains(Position::new(column, row));
        if inside != self.hovered {
            self.hovered = inside;
            self.send(if inside {
                CardEvent::PointerEnter
            } else {
                CardEvent::PointerLeave
            });
        }
    }

    /// Pointer left the terminal entirely
    pub fn pointer_gone(&mut self) {
        if self.hovered {
            self.hovered = false;
            self.send(CardEvent::PointerLeave);
        }
    }

    /// Tab: move keyboard focus onto / off the card
    pub fn toggle_focus(&mut self) {
        if self.card.settings.no_focus {
            return;
        }
        self.focused = !self.focused;
        self.send(if self.focused {
            CardEvent::Focus
        } else {
            CardEvent::Blur
        });
    }

    pub fn blur(&mut self) {
        if self.focused {
            self.focused = false;
            self.send(CardEvent::Blur);
        }
    }

    /// Card area changed (terminal resize or fullscreen toggle)
    pub fn resize(&mut self, card_area: Rect) {
        self.card_area = card_area;
        let (width, height) = Self::container_size(card_area);
        if self.card.container() != (width, height) {
            self.send(CardEvent::Resize(width, height));
        }
    }

    /// Whether the card is lit up by hover or focus
    pub fn is_active(&self) -> bool {
        self.hovered || self.focused
    }

    fn update_settings(&mut self, update: impl FnOnce(&mut CardSettings)) {
        let mut settings = self.card.settings.clone();
        update(&mut settings);
        self.message = self
            .card
            .apply_settings(settings, &mut self.frames, &mut self.surface)
            .err()
            .map(|e| e.to_string());
        self.replay();
    }

    /// Restart the animation that matches the current hover/focus state
    fn replay(&mut self) {
        if self.is_active() {
            self.send(CardEvent::PointerEnter);
        }
    }

    fn switch_variant(&mut self, variant: Variant) {
        self.message = self
            .card
            .set_variant(variant, &mut self.frames, &mut self.surface)
            .err()
            .map(|e| e.to_string());
        if self.card.settings.no_focus {
            self.focused = false;
        }
        self.replay();
    }

    pub fn cycle_variant(&mut self) {
        self.switch_variant(self.card.settings.variant.next());
    }

    pub fn cycle_variant_prev(&mut self) {
        self.switch_variant(self.card.settings.variant.prev());
    }

    pub fn increase_speed(&mut self) {
        self.update_settings(|s| s.adjust_speed(SPEED_STEP));
    }

    pub fn decrease_speed(&mut self) {
        self.update_settings(|s| s.adjust_speed(-SPEED_STEP));
    }

    pub fn adjust_gap(&mut self, delta: i32) {
        self.update_settings(|s| s.adjust_gap(delta));
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help content up
    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Scroll help content down
    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }
}
