//! Difference overlay command

use crate::DiffArgs;
use anyhow::{Context, Result};
use pairmask_ops::diff;

pub fn run(args: DiffArgs, verbose: u8) -> Result<()> {
    let img_a = super::load_image(&args.a)?;
    let img_b = super::load_image(&args.b)?;

    let overlay = diff::overlay(&img_a, &img_b, args.threshold).with_context(|| {
        format!("Failed to compare {} and {}", args.a.display(), args.b.display())
    })?;
    let marked = diff::count_marked(&overlay);

    println!("Comparing {} vs {}", args.a.display(), args.b.display());
    println!(
        "  Pixels differ:   {} ({:.2}%) at threshold {}",
        marked,
        super::percent(marked, overlay.pixel_count()),
        args.threshold
    );

    if let Some(ref output) = args.output {
        super::save_image_alpha(output, &overlay)?;
        if verbose > 0 {
            println!("Overlay saved to {}", output.display());
        }
    }
    Ok(())
}
