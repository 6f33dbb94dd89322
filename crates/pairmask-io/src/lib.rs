//! # pairmask-io
//!
//! File-system side of paired-image mask editing.
//!
//! - [`codec`] - decode any supported image to BGRA, encode lossless PNG
//! - [`layout`] - dataset directories, pair scanning, per-pair paths
//! - [`caption`] - caption presets and per-pair caption sidecars
//! - [`commit`] - writing a finished pair, with rollback on failure
//!
//! # Dataset Layout
//!
//! ```text
//! <root>/
//!   base/            before images
//!   ref/             after images
//!   captions.txt     caption presets
//!   final/
//!     base/          committed base-side images
//!     ref/           committed ref-side images
//!     captions/      committed captions, one .txt per pair
//!   deleted/
//!     base/          discarded pairs
//!     ref/
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pairmask_io::{codec, layout::DatasetLayout};
//!
//! let layout = DatasetLayout::new("dataset");
//! layout.ensure_dirs()?;
//! for pair in layout.scan_pairs()? {
//!     let base = codec::read_bgra(&pair.base_file)?;
//!     println!("{} {}x{}", pair.key, base.width(), base.height());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod caption;
pub mod codec;
pub mod commit;
pub mod layout;

pub use caption::{CaptionEntry, CaptionSet};
pub use commit::{commit_pair, store_state, StoreState};
pub use error::{IoError, IoResult};
pub use layout::{DatasetLayout, PairEntry, PairPaths};
