use super::theme::parse_color;
use crate::context::{ContextError, RenderScope};
use crate::routes::Route;
use crate::styles::StyleRegistry;
use eframe::egui;

const SWATCH_SIZE: f32 = 20.0;

/// Lists every registered style as a card. Returns the dashboard route the
/// user picked this frame, if any.
pub fn render(
    ui: &mut egui::Ui,
    scope: &RenderScope<'_>,
    registry: &StyleRegistry,
) -> Result<Option<Route>, ContextError> {
    let mode = scope.theme()?;
    let mut selected = None;

    ui.heading("Finance dashboard gallery");
    ui.label(format!(
        "{} styles of the same dashboard · {mode} mode",
        registry.all().len()
    ));
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for style in registry.all() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        for color in [
                            style.colors.primary,
                            style.colors.secondary,
                            style.colors.accent,
                            style.colors.background,
                        ] {
                            let (rect, response) = ui.allocate_exact_size(
                                egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                                egui::Sense::hover(),
                            );
                            ui.painter().rect_filled(rect, 3.0, parse_color(color));
                            response.on_hover_text(color);
                        }

                        ui.vertical(|ui| {
                            ui.strong(style.name);
                            ui.label(style.description);
                            ui.label(
                                egui::RichText::new(style.characteristics.join(" · "))
                                    .small()
                                    .weak(),
                            );
                        });

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Open").clicked() {
                                selected = Some(Route::dashboard(style.slug));
                            }
                        });
                    });
                });
            }
        });

    Ok(selected)
}
