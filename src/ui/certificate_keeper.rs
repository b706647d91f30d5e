use crate::attachment::{self, Attachment};
use crate::certificates::draft::{CertificateDraft, ValidationError};
use crate::certificates::store::CertificateStore;
use crate::certificates::{self, Category, CertificateRecord};
use crate::tasks::JobSpawner;
use crate::theme::Theme;
use eframe::egui::{self, Align2, Color32, RichText, Vec2};

const CARDS_PER_ROW: usize = 3;
const SUMMARY_DESCRIPTION_CHARS: usize = 140;

fn badge_color(category: Category) -> Color32 {
    match category {
        Category::Technical => Color32::from_rgb(0x3B, 0x82, 0xF6),
        Category::Academic => Color32::from_rgb(0x22, 0xC5, 0x5E),
        Category::Professional => Color32::from_rgb(0xA8, 0x55, 0xF7),
        Category::Achievement => Color32::from_rgb(0xEA, 0xB3, 0x08),
        Category::Other => Color32::from_rgb(0x6B, 0x72, 0x80),
    }
}

struct OverlayTexture {
    record_id: String,
    // None when the attachment could not be decoded as an image.
    texture: Option<egui::TextureHandle>,
}

enum CardAction {
    View(String),
    Delete(String),
}

#[derive(Default)]
pub struct CertificateKeeper {
    show_add_form: bool,
    draft: CertificateDraft,
    attach_generation: u64,
    attach_pending: bool,
    validation: Option<ValidationError>,
    notice: Option<String>,
    selected: Option<String>,
    overlay_texture: Option<OverlayTexture>,
}

impl CertificateKeeper {
    /// Applies a finished attachment read. Returns false when the result was
    /// stale (superseded by a newer selection, or the form was closed).
    pub fn on_attachment_loaded(&mut self, generation: u64, attachment: Attachment) -> bool {
        if generation != self.attach_generation {
            return false;
        }
        self.attach_pending = false;
        self.notice = Some(format!("Attached {}", attachment.mime));
        self.draft.file_data_uri = Some(attachment.data_uri);
        true
    }

    pub fn on_attachment_failed(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.attach_generation {
            return false;
        }
        self.attach_pending = false;
        self.notice = Some(format!("Could not attach file: {message}"));
        true
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        store: &mut CertificateStore,
        jobs: &JobSpawner,
    ) {
        self.header(ui, theme);

        if self.show_add_form {
            ui.add_space(theme.spacing_12);
            self.add_form(ui, theme, store, jobs);
        }

        ui.add_space(theme.spacing_16);
        if store.records().is_empty() {
            self.empty_placeholder(ui, theme);
        } else {
            self.gallery(ui, theme, store);
        }

        self.detail_overlay(ui, theme, store);
    }

    fn header(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Certificate Keeper").size(20.0).strong());
                ui.label(
                    RichText::new("Manage your achievements and certifications")
                        .color(theme.text_muted),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new("+ Add Certificate").strong())
                    .clicked()
                {
                    self.show_add_form = true;
                }
            });
        });
        if let Some(notice) = &self.notice {
            ui.label(RichText::new(notice).color(theme.text_muted).small());
        }
    }

    fn add_form(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        store: &mut CertificateStore,
        jobs: &JobSpawner,
    ) {
        theme.panel_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Add New Certificate").size(16.0).strong());
            ui.add_space(theme.spacing_8);

            let field_width = (ui.available_width() - theme.spacing_16).max(0.0) / 2.0;
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(field_width);
                    ui.label(RichText::new("Certificate Title *").color(theme.accent).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.title)
                            .desired_width(f32::INFINITY)
                            .hint_text("e.g., React Developer Certification"),
                    );
                    ui.label(RichText::new("Date Issued *").color(theme.accent).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.date)
                            .desired_width(f32::INFINITY)
                            .hint_text("YYYY-MM-DD"),
                    );
                });
                ui.add_space(theme.spacing_16);
                ui.vertical(|ui| {
                    ui.set_width(field_width);
                    ui.label(RichText::new("Issuer *").color(theme.accent).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.issuer)
                            .desired_width(f32::INFINITY)
                            .hint_text("e.g., Microsoft, Google, Coursera"),
                    );
                    ui.label(RichText::new("Category").color(theme.accent).small());
                    egui::ComboBox::from_id_salt("certificate_category")
                        .selected_text(self.draft.category.label())
                        .show_ui(ui, |ui| {
                            for category in Category::ALL {
                                ui.selectable_value(
                                    &mut self.draft.category,
                                    category,
                                    category.label(),
                                );
                            }
                        });
                });
            });

            ui.label(RichText::new("Description").color(theme.accent).small());
            ui.add(
                egui::TextEdit::multiline(&mut self.draft.description)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Brief description of the certificate or skills gained..."),
            );

            ui.label(
                RichText::new("Upload Certificate (Optional)")
                    .color(theme.accent)
                    .small(),
            );
            ui.horizontal(|ui| {
                if ui.button("Attach File...").clicked() {
                    self.pick_attachment(jobs, ui.ctx());
                }
                if self.attach_pending {
                    ui.label(RichText::new("Reading file...").color(theme.text_muted).small());
                } else if self.draft.file_data_uri.is_some() {
                    ui.label(RichText::new("File attached").color(theme.accent).small());
                    if ui.small_button("Remove").clicked() {
                        self.draft.file_data_uri = None;
                        // a still-running read must not resurrect the removed file
                        self.attach_generation += 1;
                    }
                }
            });

            if let Some(validation) = &self.validation {
                ui.label(RichText::new(validation.to_string()).color(theme.danger).small());
            }

            ui.add_space(theme.spacing_8);
            ui.horizontal(|ui| {
                if ui.button(RichText::new("Add Certificate").strong()).clicked() {
                    self.submit(store);
                }
                if ui.button("Cancel").clicked() {
                    self.close_form();
                }
            });
        });
    }

    fn submit(&mut self, store: &mut CertificateStore) {
        let id = certificates::next_record_id(store.records());
        match self.draft.commit(id) {
            Ok(record) => {
                if let Err(err) = store.add(record) {
                    tracing::warn!("failed to persist certificate: {err}");
                    self.notice = Some(format!("Saved in memory only: {err}"));
                }
                self.close_form();
            }
            Err(validation) => {
                self.validation = Some(validation);
            }
        }
    }

    fn close_form(&mut self) {
        self.show_add_form = false;
        self.draft = CertificateDraft::default();
        self.validation = None;
        self.attach_pending = false;
        self.attach_generation += 1;
    }

    fn pick_attachment(&mut self, jobs: &JobSpawner, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };
        self.attach_generation += 1;
        self.attach_pending = true;
        self.notice = None;
        jobs.read_attachment(self.attach_generation, path, ctx.clone());
    }

    fn empty_placeholder(&self, ui: &mut egui::Ui, theme: &Theme) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme.spacing_24 * 2.0);
            ui.label(
                RichText::new("No certificates added yet")
                    .size(16.0)
                    .color(theme.text_muted),
            );
            ui.label(
                RichText::new("Click \"+ Add Certificate\" to get started")
                    .color(theme.text_muted)
                    .small(),
            );
            ui.add_space(theme.spacing_24 * 2.0);
        });
    }

    fn gallery(&mut self, ui: &mut egui::Ui, theme: &Theme, store: &mut CertificateStore) {
        let mut action = None;
        for (row_index, row) in store.records().chunks(CARDS_PER_ROW).enumerate() {
            ui.push_id(row_index, |ui| {
                ui.columns(CARDS_PER_ROW, |columns| {
                    for (column, record) in columns.iter_mut().zip(row) {
                        if let Some(clicked) = summary_card(column, theme, record) {
                            action = Some(clicked);
                        }
                    }
                });
            });
            ui.add_space(theme.spacing_8);
        }

        match action {
            Some(CardAction::View(id)) => self.selected = Some(id),
            Some(CardAction::Delete(id)) => {
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                }
                if let Err(err) = store.remove(&id) {
                    tracing::warn!("failed to persist deletion: {err}");
                    self.notice = Some(format!("Deleted in memory only: {err}"));
                }
            }
            None => {}
        }
    }

    fn detail_overlay(&mut self, ui: &mut egui::Ui, theme: &Theme, store: &CertificateStore) {
        let Some(selected_id) = self.selected.clone() else {
            return;
        };
        let Some(record) = store
            .records()
            .iter()
            .find(|record| record.id == selected_id)
        else {
            self.selected = None;
            return;
        };

        let ctx = ui.ctx().clone();
        self.ensure_overlay_texture(&ctx, record);

        let mut open = true;
        egui::Window::new(RichText::new(record.title.clone()).strong())
            .id(egui::Id::new("certificate_detail"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .max_width(560.0)
            .show(&ctx, |ui| {
                ui.label(RichText::new(&record.issuer).size(16.0).color(theme.accent));
                ui.label(
                    RichText::new(format!(
                        "Issued on {}",
                        certificates::format_date(&record.date)
                    ))
                    .color(theme.text_muted),
                );
                theme.badge_frame(badge_color(record.category)).show(ui, |ui| {
                    ui.label(RichText::new(record.category.label()).small().color(Color32::WHITE));
                });

                if !record.description.is_empty() {
                    ui.add_space(theme.spacing_8);
                    ui.label(RichText::new("Description").strong());
                    ui.label(RichText::new(&record.description).color(theme.text_secondary));
                }

                if let Some(uri) = record.file_data_uri.as_deref() {
                    ui.add_space(theme.spacing_8);
                    ui.label(RichText::new("Certificate File").strong());
                    let texture = self
                        .overlay_texture
                        .as_ref()
                        .and_then(|cached| cached.texture.as_ref());
                    match texture {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).max_width(520.0));
                        }
                        None if attachment::is_pdf(uri) => {
                            ui.label(RichText::new("PDF file attached").color(theme.text_muted));
                        }
                        None => {
                            ui.label(RichText::new("File attached").color(theme.text_muted));
                        }
                    }
                }
            });

        if !open {
            self.selected = None;
        }
    }

    /// Decodes the selected record's attachment into a texture once per
    /// selection; the cache is keyed by record id.
    fn ensure_overlay_texture(&mut self, ctx: &egui::Context, record: &CertificateRecord) {
        if self
            .overlay_texture
            .as_ref()
            .is_some_and(|cached| cached.record_id == record.id)
        {
            return;
        }
        self.overlay_texture = Some(OverlayTexture {
            record_id: record.id.clone(),
            texture: decode_image_texture(ctx, record),
        });
    }
}

fn summary_card(ui: &mut egui::Ui, theme: &Theme, record: &CertificateRecord) -> Option<CardAction> {
    let mut action = None;
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            theme.badge_frame(badge_color(record.category)).show(ui, |ui| {
                ui.label(RichText::new(record.category.label()).small().color(Color32::WHITE));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Delete").clicked() {
                    action = Some(CardAction::Delete(record.id.clone()));
                }
                if ui.small_button("View").clicked() {
                    action = Some(CardAction::View(record.id.clone()));
                }
            });
        });

        ui.label(RichText::new(&record.title).strong());
        ui.label(RichText::new(&record.issuer).color(theme.accent));
        ui.label(
            RichText::new(certificates::format_date(&record.date))
                .color(theme.text_muted)
                .small(),
        );
        if !record.description.is_empty() {
            ui.label(
                RichText::new(truncate(&record.description, SUMMARY_DESCRIPTION_CHARS))
                    .color(theme.text_secondary)
                    .small(),
            );
        }
    });
    action
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push('\u{2026}');
    shortened
}

fn decode_image_texture(
    ctx: &egui::Context,
    record: &CertificateRecord,
) -> Option<egui::TextureHandle> {
    let uri = record.file_data_uri.as_deref()?;
    if !attachment::is_image(uri) {
        return None;
    }
    let bytes = attachment::decode(uri)?;
    let decoded = image::load_from_memory(&bytes).ok()?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Some(ctx.load_texture(
        format!("certificate_{}", record.id),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_slot(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "vitrine_certificate_keeper_{prefix}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    fn png_attachment() -> Attachment {
        Attachment {
            mime: "image/png",
            data_uri: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn submit_commits_a_valid_draft_and_closes_the_form() {
        let path = temp_slot("submit");
        let (mut store, _) = CertificateStore::load(path.clone());

        let mut keeper = CertificateKeeper::default();
        keeper.show_add_form = true;
        keeper.draft.title = "React Cert".to_string();
        keeper.draft.issuer = "Meta".to_string();
        keeper.draft.date = "2024-01-01".to_string();
        keeper.submit(&mut store);

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].title, "React Cert");
        assert!(!store.records()[0].id.is_empty());
        assert!(!keeper.show_add_form);
        assert_eq!(keeper.draft, CertificateDraft::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn submit_with_a_missing_required_field_leaves_the_store_empty() {
        let path = temp_slot("submit_invalid");
        let (mut store, _) = CertificateStore::load(path.clone());

        let mut keeper = CertificateKeeper::default();
        keeper.show_add_form = true;
        keeper.draft.issuer = "X".to_string();
        keeper.draft.date = "2024-01-01".to_string();
        keeper.submit(&mut store);

        assert!(store.records().is_empty());
        assert!(keeper.show_add_form, "form should stay open on failure");
        assert!(keeper.validation.is_some());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn stale_attachment_reads_are_dropped() {
        let mut keeper = CertificateKeeper::default();
        keeper.attach_generation = 3;
        keeper.attach_pending = true;

        assert!(!keeper.on_attachment_loaded(2, png_attachment()));
        assert!(keeper.draft.file_data_uri.is_none());
        assert!(keeper.attach_pending);

        assert!(keeper.on_attachment_loaded(3, png_attachment()));
        assert_eq!(
            keeper.draft.file_data_uri.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert!(!keeper.attach_pending);
    }

    #[test]
    fn closing_the_form_invalidates_in_flight_reads() {
        let mut keeper = CertificateKeeper::default();
        keeper.attach_generation = 1;
        keeper.attach_pending = true;
        keeper.close_form();

        assert!(!keeper.on_attachment_loaded(1, png_attachment()));
        assert!(keeper.draft.file_data_uri.is_none());
    }

    #[test]
    fn truncate_leaves_short_text_untouched() {
        assert_eq!(truncate("short", 140), "short");
    }

    #[test]
    fn truncate_appends_an_ellipsis_past_the_limit() {
        let long = "x".repeat(200);
        let shortened = truncate(&long, 140);
        assert_eq!(shortened.chars().count(), 141);
        assert!(shortened.ends_with('\u{2026}'));
    }

    #[test]
    fn every_category_has_a_badge_color() {
        let colors: Vec<Color32> = Category::ALL.iter().map(|c| badge_color(*c)).collect();
        for (index, color) in colors.iter().enumerate() {
            for other in &colors[index + 1..] {
                assert_ne!(color, other, "badge colors should be distinct");
            }
        }
    }
}
