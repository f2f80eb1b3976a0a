mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod surface;
mod worker;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Radview"),
        ..Default::default()
    };

    eframe::run_native(
        "Radview",
        options,
        Box::new(|cc| Ok(Box::new(app::RadviewApp::new(&cc.egui_ctx)))),
    )
}
