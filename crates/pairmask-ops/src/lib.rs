//! # pairmask-ops
//!
//! Pixel operations over paired before/after images and their masks.
//!
//! # Modules
//!
//! - [`brush`] - Circular brush rasterization into a mask
//! - [`composite`] - Merge two images through their masks
//! - [`diff`] - Difference overlays, region maps, pixel equality
//! - [`regions`] - Connected-component area filtering
//! - [`transfer`] - Auto-mask colour-class transfer and inversion
//! - [`history`] - Bounded undo/redo of mask pairs
//! - [`gate`] - Mutual exclusion between merge builds and equality analysis
//!
//! # Example
//!
//! ```rust
//! use pairmask_core::{MainSide, MaskBuffer, PixelBuffer, pixel};
//! use pairmask_ops::{brush, composite};
//!
//! let base = PixelBuffer::filled(8, 8, pixel::OPAQUE_BLACK);
//! let reference = PixelBuffer::filled(8, 8, pixel::OPAQUE_WHITE);
//! let base_mask = MaskBuffer::new(8, 8);
//! let mut ref_mask = MaskBuffer::new(8, 8);
//!
//! brush::paint_stroke(&mut ref_mask, 4, 4, 2);
//! let merged = composite::composite(&base, &reference, &base_mask, &ref_mask, MainSide::Base).unwrap();
//! assert_eq!(merged.pixel(4, 4), Some(pixel::OPAQUE_WHITE));
//! assert_eq!(merged.pixel(0, 0), Some(pixel::OPAQUE_BLACK));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel compositing, overlays and
//!   equality scans via rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod brush;
pub mod composite;
pub mod diff;
pub mod gate;
pub mod history;
pub mod regions;
pub mod transfer;

pub use error::{OpsError, OpsResult};
pub use gate::{GatePass, MutationGate, Operation, Ticket};
pub use history::{History, DEFAULT_HISTORY_DEPTH};
pub use transfer::TransferMode;
