//! Mask composite command

use crate::MergeArgs;
use anyhow::{Context, Result};
use pairmask_ops::composite::composite;
use tracing::info;

pub fn run(args: MergeArgs, verbose: u8) -> Result<()> {
    let base = super::load_image(&args.base)?;
    let reference = super::load_image(&args.reference)?;
    base.ensure_same_size(&reference)
        .context("Base and ref dimensions don't match")?;

    let (w, h) = base.dimensions();
    let base_mask = super::load_mask(args.base_mask.as_deref(), w, h)?;
    let ref_mask = super::load_mask(args.ref_mask.as_deref(), w, h)?;

    let merged = composite(&base, &reference, &base_mask, &ref_mask, args.main)
        .context("Composite failed")?;
    super::save_image(&args.output, &merged)?;
    info!(main = %args.main, output = %args.output.display(), "Merged");

    if verbose > 0 {
        println!(
            "Merged {}x{} (main: {}, base mask: {}, ref mask: {}) -> {}",
            w,
            h,
            args.main,
            base_mask.count_active(),
            ref_mask.count_active(),
            args.output.display()
        );
    }
    Ok(())
}
