use crate::qr::{self, ErrorCorrection, QrImage, QrRequest};
use crate::tasks::JobSpawner;
use crate::theme::Theme;
use clipboard_rs::common::{RustImage, RustImageData};
use clipboard_rs::{Clipboard, ClipboardContext};
use eframe::egui::{self, RichText};

struct QrView {
    texture: egui::TextureHandle,
    png: Vec<u8>,
}

pub struct QrTool {
    input: String,
    level: ErrorCorrection,
    size_px: u32,
    generation: u64,
    in_flight: bool,
    view: Option<QrView>,
    notice: Option<String>,
}

impl Default for QrTool {
    fn default() -> Self {
        Self {
            input: String::new(),
            level: ErrorCorrection::default(),
            size_px: qr::DEFAULT_SIZE_PX,
            generation: 0,
            in_flight: false,
            view: None,
            notice: None,
        }
    }
}

impl QrTool {
    /// Applies an encode completion. Returns false when the result was stale
    /// (a newer request superseded it) and was dropped.
    pub fn on_encoded(&mut self, generation: u64, image: QrImage, ctx: &egui::Context) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.side_px, image.side_px],
            &image.rgba,
        );
        let texture = ctx.load_texture("qr_code", color_image, egui::TextureOptions::NEAREST);
        self.view = Some(QrView {
            texture,
            png: image.png,
        });
        true
    }

    pub fn on_failed(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        self.view = None;
        self.notice = Some(format!("Could not generate QR code: {message}"));
        true
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, theme: &Theme, jobs: &JobSpawner) {
        let column_width = (ui.available_width() - theme.spacing_24).max(0.0) / 2.0;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(column_width);
                self.input_column(ui, theme, jobs);
            });
            ui.add_space(theme.spacing_24);
            ui.vertical(|ui| {
                ui.set_width(column_width);
                self.preview_column(ui, theme);
            });
        });
    }

    fn input_column(&mut self, ui: &mut egui::Ui, theme: &Theme, jobs: &JobSpawner) {
        ui.label(RichText::new("Enter Text or URL").color(theme.accent).small());
        ui.add(
            egui::TextEdit::multiline(&mut self.input)
                .desired_rows(4)
                .desired_width(f32::INFINITY)
                .hint_text("Enter text, URL, or any data to generate QR code..."),
        );

        ui.add_space(theme.spacing_8);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Error Correction").color(theme.accent).small());
                egui::ComboBox::from_id_salt("qr_error_correction")
                    .selected_text(self.level.label())
                    .show_ui(ui, |ui| {
                        for level in ErrorCorrection::ALL {
                            ui.selectable_value(&mut self.level, level, level.label());
                        }
                    });
            });
            ui.add_space(theme.spacing_16);
            ui.vertical(|ui| {
                ui.label(RichText::new("Size (px)").color(theme.accent).small());
                ui.add(
                    egui::Slider::new(&mut self.size_px, qr::MIN_SIZE_PX..=qr::MAX_SIZE_PX)
                        .step_by(f64::from(qr::SIZE_STEP_PX))
                        .suffix(" px"),
                );
            });
        });

        ui.add_space(theme.spacing_12);
        let can_generate = !self.input.trim().is_empty() && !self.in_flight;
        let generate_label = if self.in_flight {
            "Generating..."
        } else {
            "Generate QR Code"
        };
        if ui
            .add_enabled(can_generate, egui::Button::new(RichText::new(generate_label).strong()))
            .clicked()
        {
            self.begin_encode(jobs, ui.ctx());
        }

        if let Some(notice) = &self.notice {
            ui.add_space(theme.spacing_8);
            ui.label(RichText::new(notice).color(theme.text_muted).small());
        }
    }

    fn preview_column(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        theme.panel_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                match &self.view {
                    Some(view) => {
                        ui.add(
                            egui::Image::new(&view.texture)
                                .max_width(ui.available_width().min(qr::MAX_SIZE_PX as f32)),
                        );
                    }
                    None => {
                        ui.add_space(theme.spacing_24 * 3.0);
                        ui.label(
                            RichText::new("QR Code will appear here").color(theme.text_muted),
                        );
                        ui.add_space(theme.spacing_24 * 3.0);
                    }
                }
            });
        });

        if self.view.is_some() {
            ui.add_space(theme.spacing_8);
            ui.horizontal(|ui| {
                if ui.button("Download").clicked() {
                    self.download();
                }
                if ui.button("Copy").clicked() {
                    self.copy_to_clipboard();
                }
            });
        }
    }

    fn begin_encode(&mut self, jobs: &JobSpawner, ctx: &egui::Context) {
        if self.input.trim().is_empty() || self.in_flight {
            return;
        }
        self.generation += 1;
        self.in_flight = true;
        self.notice = None;
        jobs.encode_qr(
            self.generation,
            QrRequest {
                text: self.input.clone(),
                level: self.level,
                size_px: self.size_px,
            },
            ctx.clone(),
        );
    }

    fn download(&mut self) {
        let Some(view) = &self.view else { return };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("qrcode.png")
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, &view.png) {
            Ok(()) => self.notice = Some(format!("Saved {}", path.display())),
            Err(err) => {
                tracing::warn!("failed to save QR code to {}: {err}", path.display());
                self.notice = Some(format!("Could not save file: {err}"));
            }
        }
    }

    fn copy_to_clipboard(&mut self) {
        let Some(view) = &self.view else { return };
        match copy_png(&view.png) {
            Ok(()) => self.notice = Some("QR code copied to clipboard".to_string()),
            Err(err) => {
                tracing::warn!("failed to copy QR code to clipboard: {err}");
                self.notice = Some(format!("Could not copy to clipboard: {err}"));
            }
        }
    }
}

fn copy_png(png: &[u8]) -> Result<(), String> {
    let clipboard = ClipboardContext::new().map_err(|err| err.to_string())?;
    let image = RustImageData::from_bytes(png).map_err(|err| err.to_string())?;
    clipboard.set_image(image).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_sample() -> QrImage {
        qr::encode(&QrRequest {
            text: "https://example.com".to_string(),
            level: ErrorCorrection::Medium,
            size_px: 150,
        })
        .expect("sample encode should succeed")
    }

    #[test]
    fn stale_encode_results_are_dropped() {
        let ctx = egui::Context::default();
        let mut tool = QrTool::default();
        tool.generation = 2;
        tool.in_flight = true;

        assert!(!tool.on_encoded(1, encoded_sample(), &ctx));
        assert!(tool.view.is_none());
        assert!(tool.in_flight);

        assert!(tool.on_encoded(2, encoded_sample(), &ctx));
        assert!(tool.view.is_some());
        assert!(!tool.in_flight);
    }

    #[test]
    fn stale_encode_failures_are_dropped() {
        let mut tool = QrTool::default();
        tool.generation = 5;
        tool.in_flight = true;

        assert!(!tool.on_failed(4, "data too long"));
        assert!(tool.notice.is_none());

        assert!(tool.on_failed(5, "data too long"));
        assert!(tool.notice.is_some());
        assert!(!tool.in_flight);
    }
}
