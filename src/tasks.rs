use crate::attachment;
use crate::event::AppEvent;
use crate::qr::{self, QrRequest};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;
use tokio::runtime::Handle;

/// Fire-and-forget background work. Jobs report back over the app's event
/// channel and poke the egui context so the result is painted without
/// waiting for user input.
#[derive(Clone)]
pub struct JobSpawner {
    runtime_handle: Handle,
    tx: mpsc::Sender<AppEvent>,
}

impl JobSpawner {
    pub fn new(runtime_handle: Handle, tx: mpsc::Sender<AppEvent>) -> Self {
        Self { runtime_handle, tx }
    }

    pub fn read_attachment(&self, generation: u64, path: PathBuf, ctx: egui::Context) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            let result = tokio::task::spawn_blocking(move || attachment::load(&path)).await;
            let event = match result {
                Ok(Ok(attachment)) => AppEvent::AttachmentLoaded {
                    generation,
                    attachment,
                },
                Ok(Err(err)) => AppEvent::AttachmentFailed {
                    generation,
                    message: err.to_string(),
                },
                Err(join_err) => AppEvent::AttachmentFailed {
                    generation,
                    message: format!("attachment read task failed: {join_err}"),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    pub fn encode_qr(&self, generation: u64, request: QrRequest, ctx: egui::Context) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            let result = tokio::task::spawn_blocking(move || qr::encode(&request)).await;
            let event = match result {
                Ok(Ok(image)) => AppEvent::QrEncoded { generation, image },
                Ok(Err(err)) => AppEvent::QrFailed {
                    generation,
                    message: err.to_string(),
                },
                Err(join_err) => AppEvent::QrFailed {
                    generation,
                    message: format!("QR encode task failed: {join_err}"),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }
}
