use crate::palette::Rgb;
use serde::{Deserialize, Serialize};

/// Named card styles shipped with the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Variant {
    #[default]
    Default,
    Blue,
    Yellow,
    Pink,
}

/// Config files go through the same lenient lookup as the CLI
impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::from_name(&s)
    }
}

impl Variant {
    /// Case-insensitive lookup; unknown names fall back to `Default`
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "blue" => Variant::Blue,
            "yellow" => Variant::Yellow,
            "pink" => Variant::Pink,
            _ => Variant::Default,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Variant::Default => "default",
            Variant::Blue => "blue",
            Variant::Yellow => "yellow",
            Variant::Pink => "pink",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Variant::Default => Variant::Blue,
            Variant::Blue => Variant::Yellow,
            Variant::Yellow => Variant::Pink,
            Variant::Pink => Variant::Default,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Variant::Default => Variant::Pink,
            Variant::Blue => Variant::Default,
            Variant::Yellow => Variant::Blue,
            Variant::Pink => Variant::Yellow,
        }
    }

    /// Defaults bundled with this variant
    pub fn preset(&self) -> Preset {
        match self {
            Variant::Default => Preset {
                active_color: None,
                gap: 5,
                speed: 35.0,
                colors: "#f8fafc,#f1f5f9,#cbd5e1",
                no_focus: false,
            },
            Variant::Blue => Preset {
                active_color: Some(Rgb::new(0xe0, 0xf2, 0xfe)),
                gap: 10,
                speed: 25.0,
                colors: "#e0f2fe,#7dd3fc,#0ea5e9",
                no_focus: false,
            },
            Variant::Yellow => Preset {
                active_color: Some(Rgb::new(0xfe, 0xf0, 0x8a)),
                gap: 3,
                speed: 20.0,
                colors: "#fef08a,#fde047,#eab308",
                no_focus: false,
            },
            Variant::Pink => Preset {
                active_color: Some(Rgb::new(0xfe, 0xcd, 0xd3)),
                gap: 6,
                speed: 80.0,
                colors: "#fecdd3,#fda4af,#e11d48",
                no_focus: true,
            },
        }
    }
}

/// Gap, speed, palette and focus handling of a variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Highlight color for the card frame while active
    pub active_color: Option<Rgb>,
    pub gap: usize,
    pub speed: f32,
    pub colors: &'static str,
    pub no_focus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    const ALL: [Variant; 4] = [Variant::Default, Variant::Blue, Variant::Yellow, Variant::Pink];

    #[test]
    fn test_default_preset_values() {
        let p = Variant::Default.preset();
        assert_eq!(p.gap, 5);
        assert_eq!(p.speed, 35.0);
        assert_eq!(p.colors, "#f8fafc,#f1f5f9,#cbd5e1");
        assert!(!p.no_focus);
        assert!(p.active_color.is_none());
    }

    #[test]
    fn test_pink_ignores_focus() {
        let p = Variant::Pink.preset();
        assert!(p.no_focus);
        assert_eq!(p.gap, 6);
        assert_eq!(p.speed, 80.0);
    }

    #[test]
    fn test_every_preset_palette_parses() {
        for v in ALL {
            let palette = Palette::parse(v.preset().colors).unwrap();
            assert_eq!(palette.len(), 3, "{}", v.name());
        }
    }

    #[test]
    fn test_from_name_falls_back_to_default() {
        assert_eq!(Variant::from_name("Blue"), Variant::Blue);
        assert_eq!(Variant::from_name(" pink "), Variant::Pink);
        assert_eq!(Variant::from_name("purple"), Variant::Default);
        assert_eq!(Variant::from_name(""), Variant::Default);
    }

    #[test]
    fn test_cycle_visits_all_and_reverses() {
        let mut v = Variant::Default;
        for expected in ALL.iter().skip(1).chain(std::iter::once(&Variant::Default)) {
            v = v.next();
            assert_eq!(v, *expected);
        }
        for variant in ALL {
            assert_eq!(variant.next().prev(), variant);
        }
    }
}
