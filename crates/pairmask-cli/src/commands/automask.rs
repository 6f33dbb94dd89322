//! Dataset auto-mask command
//!
//! Loads one pending pair, rebuilds its mask from the differences between
//! the two sides, and optionally commits the result.

use crate::AutomaskArgs;
use anyhow::{Context, Result, anyhow};
use pairmask_io::DatasetLayout;
use pairmask_session::{AutoMaskParams, SessionConfig, Workspace};
use tracing::info;

pub fn run(args: AutomaskArgs, verbose: u8) -> Result<()> {
    let layout = DatasetLayout::new(&args.root);
    let mut config = SessionConfig::load_or_default(layout.config_file())
        .context("Failed to load pairmask.yaml")?;
    if let Some(main) = args.main {
        config.main_side = main;
    }
    if let Some(p) = args.min_region {
        config.min_region_percentage = p;
    }
    if let Some(t) = args.tolerance {
        config.color_tolerance = t;
    }
    if let Some(mode) = args.mode {
        config.transfer_mode = mode;
    }
    config.validate().context("Invalid settings")?;

    let mut ws = Workspace::open_with(layout, config)
        .with_context(|| format!("Failed to open dataset: {}", args.root.display()))?;

    if let Some(ref name) = args.pair {
        let key = name.to_lowercase();
        let index = ws
            .pairs()
            .iter()
            .position(|p| p.key == key)
            .ok_or_else(|| anyhow!("No pending pair named '{}'", name))?;
        ws.load_at(index)?;
        if ws.index() != index {
            return Err(anyhow!("Pair '{}' could not be loaded", name));
        }
    }
    let key = ws
        .current()
        .map(|p| p.key.clone())
        .ok_or_else(|| anyhow!("No pair loaded"))?;

    let params = AutoMaskParams::from(ws.session().config());
    let result = ws.session_mut().auto_mask(params, true)?;
    let derived = ws.session_mut().derived_settled()?;
    let merged = derived
        .merged
        .ok_or_else(|| anyhow!("Merge produced no image"))?;

    println!(
        "{}: {} px selected (regions >= {} px, mode {}, main {})",
        key,
        result.selected,
        result.min_region_pixels,
        params.mode,
        ws.session().main_side()
    );

    if let Some(ref output) = args.output {
        super::save_image(output, &merged)?;
        if verbose > 0 {
            println!("Merged image saved to {}", output.display());
        }
    }

    if args.commit {
        ws.select_caption(args.caption);
        ws.commit().with_context(|| format!("Failed to commit {}", key))?;
        let status = ws.save_status()?;
        info!(pair = %key, ?status, "Committed");
        println!("Committed {} ({:?})", key, status);
    }
    Ok(())
}
