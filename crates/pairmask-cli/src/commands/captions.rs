//! Caption preset listing

use crate::CaptionsArgs;
use anyhow::{Context, Result};
use pairmask_io::{CaptionSet, DatasetLayout};

pub fn run(args: CaptionsArgs, verbose: u8) -> Result<()> {
    let path = DatasetLayout::new(&args.root).captions_file();
    let captions = CaptionSet::load_or_init(&path)
        .with_context(|| format!("Failed to load captions: {}", path.display()))?;

    for (i, label) in captions.labels().enumerate() {
        println!("{:>3}  {}", i, label);
        if verbose > 0 && i > 0 {
            println!("     {}", captions.select(i));
        }
    }
    Ok(())
}
