use crate::app::Section;
use crate::theme::Theme;
use eframe::egui::{self, RichText};

/// Hero/landing section. Returns the section a call-to-action button
/// navigated to, if any.
pub fn ui(ui: &mut egui::Ui, theme: &Theme) -> Option<Section> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.18);

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.add_space((ui.available_width() / 2.0 - 220.0).max(0.0));
            ui.label(
                RichText::new("Hello, I'm ")
                    .size(44.0)
                    .color(theme.text_primary),
            );
            ui.label(
                RichText::new("Sam Rivera")
                    .size(44.0)
                    .strong()
                    .color(theme.accent),
            );
        });

        ui.add_space(theme.spacing_8);
        ui.label(
            RichText::new("Engineering Student & Future Developer")
                .size(20.0)
                .color(theme.text_secondary),
        );
        ui.label(
            RichText::new("Building digital solutions one project at a time")
                .color(theme.text_muted),
        );

        ui.add_space(theme.spacing_24);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() / 2.0 - 150.0).max(0.0));
            if ui
                .button(RichText::new("View My Work").strong())
                .clicked()
            {
                next = Some(Section::Projects);
            }
            if ui.button("About Me").clicked() {
                next = Some(Section::About);
            }
        });
    });

    next
}
