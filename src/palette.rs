use crate::error::{CardError, CardResult};
use rand::Rng;
use ratatui::style::Color;
use std::fmt;

/// 24-bit color parsed from a CSS-style hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional)
    pub fn parse(s: &str) -> CardResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || CardError::InvalidColor(s.trim().to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Scale brightness by `t` (0.0-1.0)
    pub fn scaled(&self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * t).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Non-empty list of colors pixels pick from
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Parse a comma-separated color list, e.g. `"#f8fafc,#f1f5f9,#cbd5e1"`
    pub fn parse(list: &str) -> CardResult<Self> {
        let colors = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Rgb::parse)
            .collect::<CardResult<Vec<_>>>()?;
        Self::from_colors(colors)
    }

    pub fn from_colors(colors: Vec<Rgb>) -> CardResult<Self> {
        if colors.is_empty() {
            return Err(CardError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Uniformly random color
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Rgb {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", color)?;
        }
        Ok(())
    }
}
