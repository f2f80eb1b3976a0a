use std::path::Path;
use std::sync::mpsc;

use radview_core::io::series::load_series;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the loader worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("radview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadSeries { path, generation } => {
                handle_load_series(&path, generation, &tx, &ctx);
            }
        }
    }
}

fn handle_load_series(
    path: &Path,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    tracing::info!(path = %path.display(), "loading series");
    match load_series(path) {
        Ok(series) => send(
            tx,
            ctx,
            WorkerResult::SeriesLoaded {
                generation,
                series: Box::new(series),
            },
        ),
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::LoadFailed {
                generation,
                message: format!("Failed to open {}: {e}", path.display()),
            },
        ),
    }
}
