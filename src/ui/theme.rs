use crate::context::{DocumentAttributes, ThemeMode};
use crate::styles::StyleRegistry;
use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle, Visuals};

/// Builds egui visuals from the document attributes.
pub fn apply_theme(ctx: &egui::Context, attributes: &DocumentAttributes, registry: &StyleRegistry) {
    let dark_mode = attributes
        .theme()
        .and_then(ThemeMode::from_stored)
        .is_some_and(ThemeMode::is_dark);
    let style = attributes.style().and_then(|slug| registry.lookup(slug));

    let accent = match style {
        Some(style) if dark_mode => parse_color(style.colors.accent),
        Some(style) => parse_color(style.colors.primary),
        None if dark_mode => Color32::from_rgb(96, 170, 255),
        None => Color32::from_rgb(45, 110, 230),
    };

    let mut visuals = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.hyperlink_color = accent;
    visuals.selection.bg_fill = accent.linear_multiply(if dark_mode { 0.65 } else { 0.8 });
    visuals.selection.stroke.color = accent;

    if let Some(style) = style {
        let background = parse_color(style.colors.background);
        if !dark_mode && is_light(background) {
            visuals.panel_fill = background;
            visuals.window_fill = background;
        }
    }

    ctx.set_theme(if dark_mode {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    });
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.tooltip_width = 360.0;

    style.text_styles.insert(
        TextStyle::Heading,
        FontId::new(22.0, FontFamily::Proportional),
    );
    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
    style.text_styles.insert(
        TextStyle::Monospace,
        FontId::new(14.0, FontFamily::Monospace),
    );
    style.text_styles.insert(
        TextStyle::Small,
        FontId::new(12.0, FontFamily::Proportional),
    );

    ctx.set_style(style);
}

pub fn parse_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

fn is_light(color: Color32) -> bool {
    let luminance =
        0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32;
    luminance > 160.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DocumentRoot, STYLE_ATTRIBUTE, THEME_ATTRIBUTE};

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#ff0000"), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_color("nonsense"), Color32::GRAY);
    }

    #[test]
    fn empty_document_gets_light_visuals() {
        let ctx = egui::Context::default();
        apply_theme(&ctx, &DocumentAttributes::new(), StyleRegistry::builtin());
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn attributes_select_mode_and_accent() {
        let registry = StyleRegistry::builtin();
        let cyberpunk = registry.lookup("cyberpunk").unwrap();
        let mut document = DocumentAttributes::new();
        document.set_attribute(THEME_ATTRIBUTE, "dark");
        document.set_attribute(STYLE_ATTRIBUTE, "cyberpunk");

        let ctx = egui::Context::default();
        apply_theme(&ctx, &document, registry);
        let visuals = ctx.style().visuals.clone();
        assert!(visuals.dark_mode);
        assert_eq!(visuals.hyperlink_color, parse_color(cyberpunk.colors.accent));
    }

    #[test]
    fn light_backgrounds_tint_panels() {
        let registry = StyleRegistry::builtin();
        let mut document = DocumentAttributes::new();
        document.set_attribute(THEME_ATTRIBUTE, "light");
        document.set_attribute(STYLE_ATTRIBUTE, "nature");

        let ctx = egui::Context::default();
        apply_theme(&ctx, &document, registry);
        assert_eq!(ctx.style().visuals.panel_fill, parse_color("#f7f5ef"));
    }
}
