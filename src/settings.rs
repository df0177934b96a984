use crate::error::{CardError, CardResult};
use crate::palette::Palette;
use crate::presets::Variant;
use serde::{Deserialize, Serialize};

pub const MIN_GAP: usize = 1;
pub const MAX_GAP: usize = 20;
pub const MIN_SPEED: f32 = 0.0;
pub const MAX_SPEED: f32 = 100.0;

/// User-facing card options; anything left out comes from the variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    pub variant: Option<Variant>,
    /// Spacing between pixel origins, in surface pixels
    pub gap: Option<usize>,
    /// Shimmer speed (0-100)
    pub speed: Option<f32>,
    /// Comma-separated hex colors
    pub colors: Option<String>,
    /// Ignore keyboard focus/blur
    pub no_focus: Option<bool>,
}

impl CardOptions {
    /// Layer `overrides` on top of these options
    pub fn merge(self, overrides: CardOptions) -> CardOptions {
        CardOptions {
            variant: overrides.variant.or(self.variant),
            gap: overrides.gap.or(self.gap),
            speed: overrides.speed.or(self.speed),
            colors: overrides.colors.or(self.colors),
            no_focus: overrides.no_focus.or(self.no_focus),
        }
    }

    /// Fill gaps from the variant preset and validate
    pub fn resolve(&self, reduced_motion: bool) -> CardResult<CardSettings> {
        let variant = self.variant.unwrap_or_default();
        let preset = variant.preset();

        let settings = CardSettings {
            variant,
            gap: self.gap.unwrap_or(preset.gap),
            speed: self.speed.unwrap_or(preset.speed),
            colors: self
                .colors
                .clone()
                .unwrap_or_else(|| preset.colors.to_string()),
            no_focus: self.no_focus.unwrap_or(preset.no_focus),
            reduced_motion,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Fully resolved card configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CardSettings {
    pub variant: Variant,
    pub gap: usize,
    pub speed: f32,
    pub colors: String,
    pub no_focus: bool,
    /// Sampled once at startup; disables the radial reveal and the shimmer
    pub reduced_motion: bool,
}

impl CardSettings {
    pub fn validate(&self) -> CardResult<()> {
        if self.gap < MIN_GAP {
            return Err(CardError::InvalidGap);
        }
        if !self.speed.is_finite() {
            return Err(CardError::InvalidSpeed(self.speed));
        }
        self.palette().map(|_| ())
    }

    pub fn palette(&self) -> CardResult<Palette> {
        Palette::parse(&self.colors)
    }

    /// Switch to another variant's gap, speed, palette and focus handling
    pub fn apply_variant(&mut self, variant: Variant) {
        let preset = variant.preset();
        self.variant = variant;
        self.gap = preset.gap;
        self.speed = preset.speed;
        self.colors = preset.colors.to_string();
        self.no_focus = preset.no_focus;
    }

    /// Adjust speed (clamped to 0-100)
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Adjust gap (clamped to 1-20)
    pub fn adjust_gap(&mut self, delta: i32) {
        self.gap = (self.gap as i32 + delta).clamp(MIN_GAP as i32, MAX_GAP as i32) as usize;
    }

    /// Options that reproduce these settings exactly
    pub fn to_options(&self) -> CardOptions {
        CardOptions {
            variant: Some(self.variant),
            gap: Some(self.gap),
            speed: Some(self.speed),
            colors: Some(self.colors.clone()),
            no_focus: Some(self.no_focus),
        }
    }
}
