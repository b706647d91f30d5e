use crate::certificates::store::CertificateStore;
use crate::event::AppEvent;
use crate::tasks::JobSpawner;
use crate::theme::Theme;
use crate::ui::projects::ProjectsSection;
use crate::ui::{about, home};
use eframe::egui::{self, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Projects,
}

impl Section {
    const ALL: [Section; 3] = [Section::Home, Section::About, Section::Projects];

    fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Projects => "Projects",
        }
    }
}

pub struct VitrineApp {
    rx: Receiver<AppEvent>,
    jobs: JobSpawner,
    store: CertificateStore,
    section: Section,
    projects: ProjectsSection,
    theme: Theme,
    diagnostics_log: Vec<String>,
}

impl VitrineApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        jobs: JobSpawner,
        store: CertificateStore,
        load_warnings: Vec<String>,
    ) -> Self {
        let mut app = Self {
            rx,
            jobs,
            store,
            section: Section::Home,
            projects: ProjectsSection::default(),
            theme: Theme::default(),
            diagnostics_log: Vec::new(),
        };

        for warning in load_warnings {
            tracing::warn!("certificate store: {warning}");
            app.log_diagnostic(format!("store load warning: {warning}"));
        }

        app
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, ctx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, ctx: &egui::Context) {
        match event {
            AppEvent::AttachmentLoaded {
                generation,
                attachment,
            } => {
                let mime = attachment.mime;
                if self.projects.keeper.on_attachment_loaded(generation, attachment) {
                    self.log_diagnostic(format!("attachment read complete ({mime})"));
                } else {
                    self.log_diagnostic("dropped stale attachment read");
                }
            }
            AppEvent::AttachmentFailed {
                generation,
                message,
            } => {
                if self.projects.keeper.on_attachment_failed(generation, &message) {
                    tracing::warn!("attachment read failed: {message}");
                    self.log_diagnostic(format!("attachment read failed: {message}"));
                } else {
                    self.log_diagnostic("dropped stale attachment failure");
                }
            }
            AppEvent::QrEncoded { generation, image } => {
                let side = image.side_px;
                if self.projects.qr.on_encoded(generation, image, ctx) {
                    self.log_diagnostic(format!("QR encode complete ({side}px)"));
                } else {
                    self.log_diagnostic("dropped stale QR encode");
                }
            }
            AppEvent::QrFailed {
                generation,
                message,
            } => {
                if self.projects.qr.on_failed(generation, &message) {
                    tracing::warn!("QR encode failed: {message}");
                    self.log_diagnostic(format!("QR encode failed: {message}"));
                } else {
                    self.log_diagnostic("dropped stale QR failure");
                }
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Vitrine");
                ui.separator();
                for section in Section::ALL {
                    if ui
                        .selectable_label(self.section == section, section.label())
                        .clicked()
                    {
                        self.section = section;
                    }
                }
            });
        });
    }

    fn render_diagnostics_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("diagnostics_panel").show(ctx, |ui| {
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            if self.diagnostics_log.is_empty() {
                                ui.label(RichText::new("Nothing logged yet").small());
                            }
                            for entry in &self.diagnostics_log {
                                ui.label(RichText::new(entry).small());
                            }
                        });
                });
        });
    }

    fn render_active_section(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("active_section")
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.section {
                    Section::Home => {
                        if let Some(next) = home::ui(ui, &self.theme) {
                            self.section = next;
                        }
                    }
                    Section::About => about::ui(ui, &self.theme),
                    Section::Projects => {
                        self.projects.ui(ui, &self.theme, &mut self.store, &self.jobs);
                    }
                });
        });
    }
}

impl eframe::App for VitrineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.render_top_bar(ctx);
        self.render_diagnostics_panel(ctx);
        self.render_active_section(ctx);
    }
}
