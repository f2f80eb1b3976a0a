use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use radview_core::io::image_io::save_rendered_png;
use radview_core::io::series::load_series;
use radview_core::render::{default_window, render};
use radview_core::viewport::ViewportState;

#[derive(Args)]
pub struct ExportArgs {
    /// Input series or image file
    pub file: PathBuf,

    /// Frame index to export
    #[arg(long, default_value = "0")]
    pub frame: usize,

    /// Export every frame (frame index becomes a filename suffix)
    #[arg(long)]
    pub all: bool,

    /// Output PNG path (for --all, the stem of the numbered outputs)
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,

    /// Window width override (defaults to the frame's value range)
    #[arg(long)]
    pub window_width: Option<f32>,

    /// Window center override
    #[arg(long)]
    pub window_center: Option<f32>,
}

/// Viewport used for export: default orientation, with the window taken
/// from the overrides or derived from the frame itself.
fn export_viewport(
    frame: &radview_core::frame::Frame,
    args: &ExportArgs,
) -> ViewportState {
    let (width, center) = default_window(frame);
    let mut vp = ViewportState::default();
    vp.window_width = args.window_width.unwrap_or(width);
    vp.window_center = args.window_center.unwrap_or(center);
    vp
}

fn numbered_output(output: &PathBuf, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    output.with_file_name(format!("{stem}_{index:04}.png"))
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let series = load_series(&args.file)?;

    if args.all {
        let total = series.frames.len();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        pb.set_message("Exporting frames");

        for (i, frame) in series.frames.iter().enumerate() {
            let rendered = render(frame, &export_viewport(frame, args));
            save_rendered_png(&rendered, &numbered_output(&args.output, i))?;
            pb.set_position(i as u64 + 1);
        }
        pb.finish_with_message(format!("Exported {total} frames"));
        return Ok(());
    }

    let Some(frame) = series.frames.get(args.frame) else {
        bail!(
            "Frame {} out of range (series has {} frames)",
            args.frame,
            series.frames.len()
        );
    };
    let rendered = render(frame, &export_viewport(frame, args));
    save_rendered_png(&rendered, &args.output)?;
    println!("{} {}", style("Saved").green(), args.output.display());

    Ok(())
}
