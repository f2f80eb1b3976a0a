use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use radview_core::frame::PixelSpacing;
use radview_core::io::image_io::load_image_frame;
use radview_core::io::series::write_series;

#[derive(Args)]
pub struct PackArgs {
    /// Input image files, in frame order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output container path
    #[arg(short, long, default_value = "series.rvs")]
    pub output: PathBuf,

    /// Pixel spacing along rows, in mm (0 = unknown)
    #[arg(long, default_value = "0")]
    pub spacing_row: f32,

    /// Pixel spacing along columns, in mm (0 = unknown)
    #[arg(long, default_value = "0")]
    pub spacing_col: f32,

    /// Modality tag (up to 16 bytes)
    #[arg(long, default_value = "")]
    pub modality: String,

    /// Free-text description (up to 40 bytes)
    #[arg(long, default_value = "")]
    pub description: String,
}

pub fn run(args: &PackArgs) -> Result<()> {
    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Reading images");

    let mut frames = Vec::with_capacity(args.files.len());
    for (i, path) in args.files.iter().enumerate() {
        let (frame, _) = load_image_frame(path)?;
        frames.push(frame);
        pb.set_position(i as u64 + 1);
    }
    pb.finish_with_message(format!("Read {} images", frames.len()));

    let first = &frames[0];
    for (frame, path) in frames.iter().zip(&args.files).skip(1) {
        if frame.width() != first.width() || frame.height() != first.height() {
            bail!(
                "{} is {}x{}, expected {}x{}",
                path.display(),
                frame.width(),
                frame.height(),
                first.width(),
                first.height()
            );
        }
    }

    let spacing = PixelSpacing {
        row: args.spacing_row,
        col: args.spacing_col,
    };
    let spacing = spacing.is_valid().then_some(spacing);

    write_series(
        &args.output,
        &frames,
        spacing,
        &args.modality,
        &args.description,
    )?;

    println!(
        "{} {} ({} frames)",
        style("Wrote").green(),
        args.output.display(),
        frames.len()
    );
    Ok(())
}
