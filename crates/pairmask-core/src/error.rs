//! Error types for pairmask-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the pixel core:
//! - Buffer construction (length does not match dimensions)
//! - Bounds checking on single-pixel access
//! - Dimension mismatches between buffers that must share a size
//! - Operations requested before a working pair exists
//!
//! # Usage
//!
//! ```rust
//! use pairmask_core::{Error, PixelBuffer, Result};
//!
//! fn same_size(a: &PixelBuffer, b: &PixelBuffer) -> Result<()> {
//!     a.ensure_same_size(b)
//! }
//!
//! let a = PixelBuffer::new(4, 4);
//! let b = PixelBuffer::new(4, 5);
//! assert!(matches!(same_size(&a, &b), Err(Error::DimensionMismatch { .. })));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the pixel core.
///
/// # Categories
///
/// - **Contract violations**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`InvalidBufferLength`](Error::InvalidBufferLength). These are programmer
///   errors and are never retried.
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **State errors**: [`MissingBuffer`](Error::MissingBuffer)
#[derive(Debug, Error)]
pub enum Error {
    /// Two buffers that must share width/height do not.
    ///
    /// Raised by compositing, region mapping, mask transfer and equality
    /// checks. Callers recover by skipping the current pair, never by
    /// padding or cropping.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Raw byte length does not equal `width * height * 4`.
    #[error("invalid buffer length for {width}x{height}: expected {expected} bytes, got {got}")]
    InvalidBufferLength {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },

    /// Pixel coordinates are outside buffer bounds.
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// A required buffer (image pair, masks, merged output) is not initialized.
    ///
    /// Reflects the legitimate "no pair loaded" state.
    #[error("missing buffer: {0}")]
    MissingBuffer(&'static str),
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` for contract violations that must fail fast.
    #[inline]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::InvalidBufferLength { .. }
        )
    }
}
