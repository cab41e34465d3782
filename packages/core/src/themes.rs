// ABOUTME: Flower color theme catalog
// ABOUTME: Fixed named color triples and the random "style jackslot" picker

use rand::Rng;
use serde::Serialize;

/// A named color triple; colors are `#rrggbb` hex strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

impl Theme {
    const fn new(
        name: &'static str,
        primary: &'static str,
        secondary: &'static str,
        accent: &'static str,
    ) -> Self {
        Self {
            name,
            primary,
            secondary,
            accent,
        }
    }

    /// Parse one of the theme colors into RGB components
    pub fn rgb(color: &str) -> Option<(u8, u8, u8)> {
        let hex = color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

pub static FLOWER_THEMES: [Theme; 20] = [
    Theme::new("Sakura", "#ff9aae", "#ffe4ec", "#ff6b9d"),
    Theme::new("Rose", "#c21f3a", "#ffe3e8", "#ff6f91"),
    Theme::new("Lavender", "#8e7cc3", "#f3ecff", "#b4a7d6"),
    Theme::new("Sunflower", "#f1c232", "#fff5cc", "#f6b26b"),
    Theme::new("Lotus", "#ff99cc", "#ffe6f2", "#ff66b3"),
    Theme::new("Orchid", "#b565a7", "#f7d9ff", "#e066ff"),
    Theme::new("Peony", "#e06666", "#fde3e3", "#cc0000"),
    Theme::new("Camellia", "#d9534f", "#fbe4e2", "#c9302c"),
    Theme::new("Magnolia", "#f6b26b", "#fff2e5", "#e69138"),
    Theme::new("Hydrangea", "#6fa8dc", "#e3f2fd", "#3c78d8"),
    Theme::new("Cherry Blossom", "#ffb3c6", "#ffe6f0", "#ff6f91"),
    Theme::new("Gardenia", "#a4c2f4", "#ecf3ff", "#6d9eeb"),
    Theme::new("Jasmine", "#f9cb9c", "#fff5e6", "#f6b26b"),
    Theme::new("Iris", "#674ea7", "#efe5ff", "#8e7cc3"),
    Theme::new("Poppy", "#e06666", "#ffe0e0", "#cc0000"),
    Theme::new("Daisy", "#ffd966", "#fff9e6", "#f1c232"),
    Theme::new("Marigold", "#f6b26b", "#fff0de", "#e69138"),
    Theme::new("Bluebell", "#6d9eeb", "#e5f1ff", "#3c78d8"),
    Theme::new("Tulip", "#e06666", "#ffe2e2", "#cc0000"),
    Theme::new("Wisteria", "#b4a7d6", "#f3ecff", "#8e7cc3"),
];

/// Look up a theme by name, ignoring case
pub fn find_theme(name: &str) -> Option<&'static Theme> {
    FLOWER_THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
}

/// Pick a theme uniformly at random
pub fn spin_theme<R: Rng + ?Sized>(rng: &mut R) -> &'static Theme {
    &FLOWER_THEMES[rng.gen_range(0..FLOWER_THEMES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog() {
        assert_eq!(FLOWER_THEMES.len(), 20);
        assert_eq!(FLOWER_THEMES[0].name, "Sakura");
        for theme in FLOWER_THEMES.iter() {
            assert!(Theme::rgb(theme.primary).is_some(), "{}", theme.name);
            assert!(Theme::rgb(theme.secondary).is_some(), "{}", theme.name);
            assert!(Theme::rgb(theme.accent).is_some(), "{}", theme.name);
        }
    }

    #[test]
    fn test_find_theme() {
        assert_eq!(find_theme("cherry blossom").unwrap().primary, "#ffb3c6");
        assert!(find_theme("Dandelion").is_none());
    }

    #[test]
    fn test_rgb() {
        assert_eq!(Theme::rgb("#ff9aae"), Some((0xff, 0x9a, 0xae)));
        assert_eq!(Theme::rgb("ff9aae"), None);
        assert_eq!(Theme::rgb("#zz9aae"), None);
    }

    #[test]
    fn test_spin_theme_stays_in_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let theme = spin_theme(&mut rng);
            assert!(FLOWER_THEMES.iter().any(|t| t == theme));
        }
    }
}
