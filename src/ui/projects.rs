use crate::certificates::store::CertificateStore;
use crate::tasks::JobSpawner;
use crate::theme::Theme;
use crate::ui::certificate_keeper::CertificateKeeper;
use crate::ui::qr_tool::QrTool;
use eframe::egui::{self, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectId {
    QrGenerator,
    CertificateKeeper,
}

struct ProjectCard {
    id: ProjectId,
    title: &'static str,
    description: &'static str,
    technologies: [&'static str; 3],
}

const PROJECTS: [ProjectCard; 2] = [
    ProjectCard {
        id: ProjectId::QrGenerator,
        title: "QR Code Generator",
        description: "Generate QR codes for any text, URL, or data with customizable \
                      options and instant download.",
        technologies: ["egui", "qrcode", "image"],
    },
    ProjectCard {
        id: ProjectId::CertificateKeeper,
        title: "Certificate Keeper",
        description: "Organize and manage your certificates, achievements, and important \
                      documents in one place.",
        technologies: ["egui", "JSON storage", "File attachments"],
    },
];

#[derive(Default)]
pub struct ProjectsSection {
    active: Option<ProjectId>,
    pub qr: QrTool,
    pub keeper: CertificateKeeper,
}

impl ProjectsSection {
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        store: &mut CertificateStore,
        jobs: &JobSpawner,
    ) {
        match self.active {
            None => self.project_grid(ui, theme),
            Some(project) => self.active_project(ui, theme, store, jobs, project),
        }
    }

    fn project_grid(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme.spacing_24);
            ui.heading(RichText::new("My Projects").size(32.0));
            ui.label(
                RichText::new(
                    "Here are some of the projects I've built to solve real-world problems \
                     and showcase my technical skills.",
                )
                .color(theme.text_secondary),
            );
            ui.add_space(theme.spacing_16);
        });

        let column_width = (ui.available_width() - theme.spacing_16).max(0.0) / 2.0;
        ui.horizontal_top(|ui| {
            for (index, project) in PROJECTS.iter().enumerate() {
                if index > 0 {
                    ui.add_space(theme.spacing_16);
                }
                ui.vertical(|ui| {
                    ui.set_width(column_width);
                    if project_card(ui, theme, project) {
                        self.active = Some(project.id);
                    }
                });
            }
        });
    }

    fn active_project(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        store: &mut CertificateStore,
        jobs: &JobSpawner,
        project: ProjectId,
    ) {
        ui.horizontal(|ui| {
            if ui.button("< All Projects").clicked() {
                self.active = None;
            }
            let title = PROJECTS
                .iter()
                .find(|card| card.id == project)
                .map(|card| card.title)
                .unwrap_or("Project");
            ui.label(RichText::new(title).size(20.0).strong());
        });
        ui.separator();
        ui.add_space(theme.spacing_8);

        match project {
            ProjectId::QrGenerator => self.qr.ui(ui, theme, jobs),
            ProjectId::CertificateKeeper => self.keeper.ui(ui, theme, store, jobs),
        }
    }
}

fn project_card(ui: &mut egui::Ui, theme: &Theme, project: &ProjectCard) -> bool {
    let mut open = false;
    theme.panel_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(project.title).size(18.0).strong());
        ui.label(RichText::new(project.description).color(theme.text_secondary));
        ui.add_space(theme.spacing_8);
        ui.horizontal_wrapped(|ui| {
            for technology in project.technologies {
                theme.chip_frame().show(ui, |ui| {
                    ui.label(RichText::new(technology).color(theme.accent).small());
                });
            }
        });
        ui.add_space(theme.spacing_8);
        if ui
            .button(RichText::new("View Project").strong())
            .clicked()
        {
            open = true;
        }
    });
    open
}
