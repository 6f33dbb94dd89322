//! Region map command

use crate::RegionsArgs;
use anyhow::{Context, Result};
use pairmask_core::pixel::OPAQUE_WHITE;
use pairmask_ops::diff;

pub fn run(args: RegionsArgs, verbose: u8) -> Result<()> {
    let img_a = super::load_image(&args.a)?;
    let img_b = super::load_image(&args.b)?;

    let (w, h) = img_a.dimensions();
    let min_pixels = diff::min_region_pixels(args.min_region, w, h);
    let map = diff::region_map(&img_a, &img_b, min_pixels, args.tolerance).with_context(|| {
        format!("Failed to compare {} and {}", args.a.display(), args.b.display())
    })?;
    let kept = map.pixels().filter(|p| *p == OPAQUE_WHITE).count();

    println!(
        "Regions of at least {} px: {} px kept ({:.2}%)",
        min_pixels,
        kept,
        super::percent(kept, map.pixel_count())
    );

    if let Some(ref output) = args.output {
        super::save_image(output, &map)?;
        if verbose > 0 {
            println!("Region map saved to {}", output.display());
        }
    }
    Ok(())
}
