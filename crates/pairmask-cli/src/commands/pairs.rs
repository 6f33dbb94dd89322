//! Pending pair listing

use crate::PairsArgs;
use anyhow::{Context, Result};
use pairmask_io::DatasetLayout;

pub fn run(args: PairsArgs, verbose: u8) -> Result<()> {
    let layout = DatasetLayout::new(&args.root);
    let pairs = layout
        .scan_pairs()
        .with_context(|| format!("Failed to scan dataset: {}", args.root.display()))?;

    for (i, pair) in pairs.iter().enumerate() {
        if verbose > 0 {
            println!(
                "{:>5}  {}  ({} | {})",
                i,
                pair.key,
                pair.base_file.display(),
                pair.ref_file.display()
            );
        } else {
            println!("{:>5}  {}", i, pair.key);
        }
    }
    println!("{} pending pair(s)", pairs.len());
    Ok(())
}
