//! pairmask - paired-image mask, merge and diff tool
//!
//! Batch front end for the before/after editing engine.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pairmask_core::MainSide;
use pairmask_ops::TransferMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pairmask")]
#[command(author, version, about = "Paired before/after image mask, merge and diff tool")]
#[command(long_about = "
Works on datasets laid out as <root>/base and <root>/ref, one image per side
with matching file names. Committed pairs go to <root>/final.

Examples:
  pairmask pairs data/                         # List pending pairs
  pairmask captions data/                      # List caption presets
  pairmask merge a.png b.png --ref-mask m.png -o out.png
  pairmask diff a.png b.png -t 10 -o overlay.png
  pairmask regions a.png b.png --min-region 0.5 -o regions.png
  pairmask automask data/ --commit --caption 2
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List pending pairs of a dataset
    #[command(visible_alias = "p")]
    Pairs(PairsArgs),

    /// List caption presets of a dataset
    Captions(CaptionsArgs),

    /// Composite two images through their masks
    #[command(visible_alias = "m")]
    Merge(MergeArgs),

    /// Highlight pixels that differ between two images
    #[command(visible_alias = "d")]
    Diff(DiffArgs),

    /// Region map of significant differences
    Regions(RegionsArgs),

    /// Auto-mask a dataset pair and optionally commit it
    #[command(visible_alias = "am")]
    Automask(AutomaskArgs),
}

#[derive(Args)]
struct PairsArgs {
    /// Dataset root
    root: PathBuf,
}

#[derive(Args)]
struct CaptionsArgs {
    /// Dataset root
    root: PathBuf,
}

#[derive(Args)]
struct MergeArgs {
    /// Base (before) image
    base: PathBuf,

    /// Ref (after) image
    reference: PathBuf,

    /// Base mask image (alpha > 0 is active)
    #[arg(long)]
    base_mask: Option<PathBuf>,

    /// Ref mask image (alpha > 0 is active)
    #[arg(long)]
    ref_mask: Option<PathBuf>,

    /// Main side: base or ref
    #[arg(short, long, default_value = "ref")]
    main: MainSide,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct DiffArgs {
    /// First image
    a: PathBuf,

    /// Second image
    b: PathBuf,

    /// Per-channel threshold (strictly greater counts as different)
    #[arg(short, long, default_value = "5")]
    threshold: u8,

    /// Output overlay (PNG with alpha)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RegionsArgs {
    /// First image
    a: PathBuf,

    /// Second image
    b: PathBuf,

    /// Minimum region size, percent of image area
    #[arg(long, default_value = "1.0")]
    min_region: f64,

    /// Per-channel colour tolerance
    #[arg(long, default_value = "0")]
    tolerance: u8,

    /// Output region map
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AutomaskArgs {
    /// Dataset root
    root: PathBuf,

    /// Pair file name (default: first pending pair)
    #[arg(short, long)]
    pair: Option<String>,

    /// Main side: base or ref (default from pairmask.yaml)
    #[arg(short, long)]
    main: Option<MainSide>,

    /// Minimum region size, percent of image area
    #[arg(long)]
    min_region: Option<f64>,

    /// Per-channel colour tolerance
    #[arg(long)]
    tolerance: Option<u8>,

    /// Region-map class to select: white, black, non-green
    #[arg(long)]
    mode: Option<TransferMode>,

    /// Write the merged image here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Commit the pair into final/
    #[arg(long)]
    commit: bool,

    /// Caption preset index for the commit (0 = none)
    #[arg(long, default_value = "0")]
    caption: usize,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Pairs(args) => commands::pairs::run(args, cli.verbose),
        Commands::Captions(args) => commands::captions::run(args, cli.verbose),
        Commands::Merge(args) => commands::merge::run(args, cli.verbose),
        Commands::Diff(args) => commands::diff::run(args, cli.verbose),
        Commands::Regions(args) => commands::regions::run(args, cli.verbose),
        Commands::Automask(args) => commands::automask::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_automask() {
        let cli = Cli::try_parse_from([
            "pairmask", "-vv", "automask", "data", "--main", "base", "--mode", "non-green",
            "--commit", "--caption", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Automask(a) => {
                assert_eq!(a.main, Some(MainSide::Base));
                assert_eq!(a.mode, Some(TransferMode::NonGreen));
                assert!(a.commit);
                assert_eq!(a.caption, 2);
            }
            _ => panic!("expected automask"),
        }
    }

    #[test]
    fn test_rejects_unknown_side() {
        assert!(Cli::try_parse_from(["pairmask", "merge", "a", "b", "-m", "left", "-o", "x"]).is_err());
    }
}
