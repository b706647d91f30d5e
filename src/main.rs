mod app;
mod attachment;
mod certificates;
mod event;
mod logging;
mod qr;
mod tasks;
mod theme;
mod ui;

use app::VitrineApp;
use certificates::store::{default_slot_path, CertificateStore};
use eframe::egui;
use std::sync::mpsc;
use tasks::JobSpawner;
use theme::Theme;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("vitrine-runtime")
        .build()?;

    let (tx, rx) = mpsc::channel();
    let jobs = JobSpawner::new(runtime.handle().clone(), tx);

    let (store, load_warnings) = CertificateStore::load(default_slot_path());
    let app = VitrineApp::new(rx, jobs, store, load_warnings);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Vitrine",
        native_options,
        Box::new(move |creation_context| {
            Theme::default().apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
