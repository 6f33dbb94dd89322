//! # pairmask-core
//!
//! Core types for paired-image mask editing.
//!
//! This crate provides the foundational types used throughout the pairmask workspace:
//!
//! - [`PixelBuffer`] - Owned 4-channel BGRA8 image buffer
//! - [`MaskBuffer`] - Two-state (active/inactive) selection overlay
//! - [`MaskPair`] - The base/ref mask pair recorded for undo/redo
//! - [`MainSide`] - Which source image is kept by default during compositing
//! - [`Rect`] - Dirty-region rectangles
//! - [`Viewport`] - Display-space to image-space mapping
//!
//! ## Pixel Layout
//!
//! Every buffer stores pixels row-major, top-to-bottom, with four interleaved
//! channels in **B, G, R, A** order. The row stride is always `width * 4`:
//!
//! ```text
//! Memory: [B G R A B G R A ...]  <- Row 0
//!         [B G R A B G R A ...]  <- Row 1
//! ```
//!
//! This matches the contract of the codec layer in `pairmask-io`, which
//! decodes into and encodes from exactly this layout.
//!
//! ## Crate Structure
//!
//! ```text
//! pairmask-core (this crate)
//!    ^
//!    |
//!    +-- pairmask-ops (brush, composite, diff, transfer, history, gate)
//!    +-- pairmask-io (codecs, dataset layout, commit)
//!    +-- pairmask-session (coordinator)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod mask;
pub mod pixel;
pub mod rect;
pub mod side;
pub mod viewport;

// Re-exports for convenience
pub use buffer::*;
pub use error::*;
pub use mask::*;
pub use pixel::{Bgra, CHANNELS, DEFAULT_DPI};
pub use rect::*;
pub use side::*;
pub use viewport::*;
