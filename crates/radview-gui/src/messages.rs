use std::path::PathBuf;

use radview_core::io::series::LoadedSeries;

/// Commands sent from the UI thread to the loader worker.
pub enum WorkerCommand {
    /// Open and fully decode a series file.
    LoadSeries { path: PathBuf, generation: u64 },
}

/// Results sent back to the UI thread.
pub enum WorkerResult {
    /// The series decoded. `generation` lets the UI drop completions
    /// that arrive after a newer load was requested.
    SeriesLoaded {
        generation: u64,
        series: Box<LoadedSeries>,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },
    /// A cine timer tick (sent from the timer thread).
    CineTick,
}
