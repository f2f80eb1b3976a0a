use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use radview_core::io::series::SeriesReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input series (.rvs) file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = SeriesReader::open(&args.file)?;
    let info = reader.series_info(&args.file);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.frame_count);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);

    match info.pixel_spacing_mm {
        Some(spacing) => {
            println!("Spacing:     {:.4} x {:.4} mm/px", spacing.row, spacing.col)
        }
        None => println!("Spacing:     unknown"),
    }
    if let Some(ref modality) = info.modality {
        println!("Modality:    {}", modality);
    }
    if let Some(ref desc) = info.description {
        println!("Description: {}", desc);
    }

    let frame_bytes = reader.header.frame_byte_size();
    let total_mb = (frame_bytes * info.frame_count) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}
