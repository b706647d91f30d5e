use crate::theme::Theme;
use eframe::egui::{self, RichText};

const SKILLS: [&str; 10] = [
    "Rust",
    "TypeScript",
    "React",
    "Python",
    "SQL",
    "Git",
    "HTML/CSS",
    "Linux",
    "Database Design",
    "Problem Solving",
];

const INTERESTS: [(&str, &str); 4] = [
    (
        "Software Development",
        "Passionate about creating efficient and scalable applications",
    ),
    (
        "Continuous Learning",
        "Always eager to learn new technologies and methodologies",
    ),
    (
        "Problem Solving",
        "Love tackling complex challenges and finding innovative solutions",
    ),
    (
        "Open Source",
        "Contributing to the developer community and collaborative projects",
    ),
];

pub fn ui(ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme.spacing_24);
        ui.heading(RichText::new("About Me").size(32.0));
        ui.add_space(theme.spacing_16);
    });

    let column_width = (ui.available_width() - theme.spacing_16).max(0.0) / 2.0;
    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.set_width(column_width);
            journey_card(ui, theme);
            ui.add_space(theme.spacing_16);
            skills_card(ui, theme);
        });
        ui.add_space(theme.spacing_16);
        ui.vertical(|ui| {
            ui.set_width(column_width);
            interests_cards(ui, theme);
        });
    });
}

fn journey_card(ui: &mut egui::Ui, theme: &Theme) {
    theme.panel_frame().show(ui, |ui| {
        ui.label(RichText::new("My Journey").size(18.0).strong().color(theme.accent));
        ui.add_space(theme.spacing_8);
        ui.label(
            RichText::new(
                "I'm currently pursuing my engineering degree, building a strong \
                 foundation in technology and engineering principles.",
            )
            .color(theme.text_secondary),
        );
        ui.label(
            RichText::new(
                "My passion lies in software development and creating digital solutions \
                 that make a real impact. I believe in the power of technology to solve \
                 complex problems and improve people's lives.",
            )
            .color(theme.text_secondary),
        );
        ui.label(
            RichText::new(
                "When I'm not coding, you'll find me exploring new technologies, working \
                 on personal projects, or contributing to open-source initiatives.",
            )
            .color(theme.text_secondary),
        );
    });
}

fn skills_card(ui: &mut egui::Ui, theme: &Theme) {
    theme.panel_frame().show(ui, |ui| {
        ui.label(
            RichText::new("Technical Skills")
                .size(18.0)
                .strong()
                .color(theme.accent),
        );
        ui.add_space(theme.spacing_8);
        ui.horizontal_wrapped(|ui| {
            for skill in SKILLS {
                theme.chip_frame().show(ui, |ui| {
                    ui.label(RichText::new(skill).color(theme.accent).small());
                });
            }
        });
    });
}

fn interests_cards(ui: &mut egui::Ui, theme: &Theme) {
    for (title, description) in INTERESTS {
        theme.card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().color(theme.text_primary));
            ui.label(RichText::new(description).color(theme.text_muted));
        });
        ui.add_space(theme.spacing_8);
    }
}
