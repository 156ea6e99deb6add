use crate::context::ThemeMode;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

static BUILTIN: OnceLock<StyleRegistry> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
}

/// A named visual treatment for the dashboard. The slug doubles as the route
/// segment and the `data-style` attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDefinition {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    pub colors: StyleColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPalette {
    pub revenue: &'static str,
    pub expenses: &'static str,
    pub profit: &'static str,
    pub positive: &'static str,
    pub negative: &'static str,
    pub grid: &'static str,
    pub surface: &'static str,
    pub categories: [&'static str; 6],
}

impl StyleDefinition {
    pub fn chart_palette(&self, mode: ThemeMode) -> ChartPalette {
        let dark = mode.is_dark();
        let pick = |light: &'static str, dark_value: &'static str| {
            if dark {
                dark_value
            } else {
                light
            }
        };

        ChartPalette {
            revenue: self.colors.primary,
            expenses: self.colors.secondary,
            profit: self.colors.accent,
            positive: pick("#16a34a", "#4ade80"),
            negative: pick("#dc2626", "#f87171"),
            grid: pick("#e2e8f0", "#334155"),
            surface: pick(self.colors.background, "#0f172a"),
            categories: [
                self.colors.primary,
                self.colors.secondary,
                self.colors.accent,
                pick("#64748b", "#94a3b8"),
                pick("#d97706", "#fbbf24"),
                pick("#7c3aed", "#a78bfa"),
            ],
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a style registry needs at least one definition")]
    Empty,
    #[error("duplicate style slug `{0}`")]
    DuplicateSlug(String),
    #[error("style slug `{0}` is not URL-safe")]
    InvalidSlug(String),
}

/// Ordered, immutable set of styles. Order is navigation order and the first
/// entry is the default.
#[derive(Debug)]
pub struct StyleRegistry {
    styles: Vec<StyleDefinition>,
    index: HashMap<&'static str, usize>,
}

impl StyleRegistry {
    pub fn new(styles: Vec<StyleDefinition>) -> Result<Self, RegistryError> {
        if styles.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = HashMap::with_capacity(styles.len());
        for (position, style) in styles.iter().enumerate() {
            if !is_url_safe(style.slug) {
                return Err(RegistryError::InvalidSlug(style.slug.to_string()));
            }
            if index.insert(style.slug, position).is_some() {
                return Err(RegistryError::DuplicateSlug(style.slug.to_string()));
            }
        }

        Ok(Self { styles, index })
    }

    pub fn builtin() -> &'static StyleRegistry {
        BUILTIN.get_or_init(|| {
            StyleRegistry::new(builtin_styles()).expect("built-in style table is valid")
        })
    }

    pub fn lookup(&self, slug: &str) -> Option<&StyleDefinition> {
        self.index.get(slug).map(|&position| &self.styles[position])
    }

    pub fn all(&self) -> &[StyleDefinition] {
        &self.styles
    }

    pub fn default_style(&self) -> &StyleDefinition {
        &self.styles[0]
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.index.get(slug).copied()
    }

    pub fn next(&self, slug: &str) -> &StyleDefinition {
        match self.position(slug) {
            Some(position) => &self.styles[(position + 1) % self.styles.len()],
            None => self.default_style(),
        }
    }

    pub fn previous(&self, slug: &str) -> &StyleDefinition {
        match self.position(slug) {
            Some(position) => {
                &self.styles[(position + self.styles.len() - 1) % self.styles.len()]
            }
            None => self.default_style(),
        }
    }
}

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-')
}

fn builtin_styles() -> Vec<StyleDefinition> {
    vec![
        StyleDefinition {
            slug: "minimal",
            name: "Minimal",
            description: "Quiet typography and generous whitespace that keep the numbers in front.",
            characteristics: &["Generous whitespace", "Thin dividers", "Monochrome accents"],
            colors: StyleColors {
                primary: "#111827",
                secondary: "#6b7280",
                accent: "#2563eb",
                background: "#ffffff",
            },
        },
        StyleDefinition {
            slug: "glassmorphism",
            name: "Glassmorphism",
            description: "Frosted translucent panels layered over a soft gradient backdrop.",
            characteristics: &["Translucent cards", "Background blur", "Soft gradients"],
            colors: StyleColors {
                primary: "#6366f1",
                secondary: "#ec4899",
                accent: "#06b6d4",
                background: "#eef2ff",
            },
        },
        StyleDefinition {
            slug: "neobrutalism",
            name: "Neo-Brutalism",
            description: "Hard shadows, thick outlines and loud flat color blocks.",
            characteristics: &["Thick borders", "Offset shadows", "Flat saturated fills"],
            colors: StyleColors {
                primary: "#000000",
                secondary: "#ff5c8a",
                accent: "#ffd400",
                background: "#fffbea",
            },
        },
        StyleDefinition {
            slug: "cyberpunk",
            name: "Cyberpunk",
            description: "Neon glows on deep night tones with a terminal edge.",
            characteristics: &["Neon highlights", "Glow effects", "Angular panels"],
            colors: StyleColors {
                primary: "#00f0ff",
                secondary: "#ff2a6d",
                accent: "#f5ff00",
                background: "#0d0221",
            },
        },
        StyleDefinition {
            slug: "corporate",
            name: "Corporate",
            description: "A conservative enterprise layout built around dense, scannable tables.",
            characteristics: &["Dense tables", "Muted blues", "Clear hierarchy"],
            colors: StyleColors {
                primary: "#1e3a8a",
                secondary: "#475569",
                accent: "#0ea5e9",
                background: "#f8fafc",
            },
        },
        StyleDefinition {
            slug: "retro",
            name: "Retro Terminal",
            description: "Phosphor green on black, in the spirit of early trading terminals.",
            characteristics: &["Monospace type", "Scanline texture", "Single-hue palette"],
            colors: StyleColors {
                primary: "#33ff66",
                secondary: "#1a9c3e",
                accent: "#ffb000",
                background: "#0a0f0a",
            },
        },
        StyleDefinition {
            slug: "nature",
            name: "Organic",
            description: "Earthy greens and rounded shapes for a calmer finance view.",
            characteristics: &["Rounded corners", "Earth tones", "Soft shadows"],
            colors: StyleColors {
                primary: "#166534",
                secondary: "#a16207",
                accent: "#65a30d",
                background: "#f7f5ef",
            },
        },
        StyleDefinition {
            slug: "luxury",
            name: "Luxury",
            description: "Gold details on charcoal with serif headings.",
            characteristics: &["Serif headings", "Gold accents", "High contrast"],
            colors: StyleColors {
                primary: "#c9a227",
                secondary: "#8c7851",
                accent: "#e5c07b",
                background: "#1c1917",
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(slug: &'static str) -> StyleDefinition {
        StyleDefinition {
            slug,
            name: "Sample",
            description: "",
            characteristics: &[],
            colors: StyleColors {
                primary: "#000000",
                secondary: "#111111",
                accent: "#222222",
                background: "#ffffff",
            },
        }
    }

    #[test]
    fn builtin_lookup_returns_matching_slug() {
        let registry = StyleRegistry::builtin();
        for style in registry.all() {
            let found = registry.lookup(style.slug).unwrap();
            assert_eq!(found.slug, style.slug);
        }
    }

    #[test]
    fn default_is_first_in_order() {
        let registry = StyleRegistry::builtin();
        assert_eq!(registry.default_style().slug, registry.all()[0].slug);
        assert_eq!(registry.default_style().slug, "minimal");
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let registry = StyleRegistry::builtin();
        assert!(registry.lookup("vaporwave").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("Minimal").is_none());
    }

    #[test]
    fn builtin_colors_are_hex() {
        for style in StyleRegistry::builtin().all() {
            for color in [
                style.colors.primary,
                style.colors.secondary,
                style.colors.accent,
                style.colors.background,
            ] {
                assert_eq!(color.len(), 7, "{} {color}", style.slug);
                assert!(color.starts_with('#'));
                assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn rejects_empty_duplicate_and_unsafe_sets() {
        assert_eq!(StyleRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
        assert_eq!(
            StyleRegistry::new(vec![sample("one"), sample("one")]).unwrap_err(),
            RegistryError::DuplicateSlug("one".into())
        );
        assert_eq!(
            StyleRegistry::new(vec![sample("has space")]).unwrap_err(),
            RegistryError::InvalidSlug("has space".into())
        );
        assert_eq!(
            StyleRegistry::new(vec![sample("")]).unwrap_err(),
            RegistryError::InvalidSlug(String::new())
        );
    }

    #[test]
    fn navigation_wraps_around() {
        let registry = StyleRegistry::new(vec![sample("a"), sample("b"), sample("c")]).unwrap();
        assert_eq!(registry.next("a").slug, "b");
        assert_eq!(registry.next("c").slug, "a");
        assert_eq!(registry.previous("a").slug, "c");
        assert_eq!(registry.previous("b").slug, "a");
        assert_eq!(registry.next("missing").slug, "a");
        assert_eq!(registry.position("c"), Some(2));
    }

    #[test]
    fn chart_palette_follows_style_and_mode() {
        let style = StyleRegistry::builtin().lookup("cyberpunk").unwrap();
        let light = style.chart_palette(ThemeMode::Light);
        let dark = style.chart_palette(ThemeMode::Dark);

        assert_eq!(light.revenue, style.colors.primary);
        assert_eq!(light.expenses, style.colors.secondary);
        assert_eq!(dark.profit, style.colors.accent);
        assert_eq!(light.surface, style.colors.background);
        assert_ne!(light.grid, dark.grid);
        assert_ne!(light.positive, dark.positive);
        assert_eq!(dark.categories[0], style.colors.primary);
    }
}
