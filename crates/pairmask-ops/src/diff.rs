//! Pixel difference detection.
//!
//! - [`overlay`] - green highlight wherever two images differ past a threshold
//! - [`region_map`] - thresholded differences with small regions removed
//! - [`pixels_equal`] - exact equality, used for the save-status check
//!
//! Thresholds are strict: a channel delta equal to the threshold counts as
//! similar.
//!
//! # Example
//!
//! ```rust
//! use pairmask_core::{PixelBuffer, pixel};
//! use pairmask_ops::diff;
//!
//! let a = PixelBuffer::filled(10, 10, pixel::OPAQUE_BLACK);
//! let mut b = a.clone();
//! b.set_pixel(3, 3, pixel::OPAQUE_WHITE).unwrap();
//!
//! let ov = diff::overlay(&a, &b, 5).unwrap();
//! assert_eq!(diff::count_marked(&ov), 1);
//!
//! let map = diff::region_map(&a, &b, 2, 0).unwrap();
//! assert!(map.pixels().all(|p| p == pixel::OPAQUE_BLACK));
//! ```

use crate::regions;
use crate::OpsResult;
use pairmask_core::pixel::{self, A, CHANNELS, DIFF_HIGHLIGHT, OPAQUE_BLACK, OPAQUE_WHITE};
use pairmask_core::PixelBuffer;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

/// Default per-channel threshold for overlays.
pub const DEFAULT_THRESHOLD: u8 = 5;

/// Builds a difference overlay of `a` against `b`.
///
/// Marked pixels are opaque green, all others fully transparent. The set of
/// marked positions does not depend on argument order. The result carries
/// `a`'s DPI.
pub fn overlay(a: &PixelBuffer, b: &PixelBuffer, threshold: u8) -> OpsResult<PixelBuffer> {
    a.ensure_same_size(b)?;
    trace!(width = a.width(), height = a.height(), threshold, "diff::overlay");

    let mut out = a.blank_like();
    if out.is_empty() {
        return Ok(out);
    }
    let stride = out.stride();
    let (src_a, src_b) = (a.as_bytes(), b.as_bytes());

    let mark_row = |(y, row): (usize, &mut [u8])| {
        let start = y * stride;
        for (i, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let o = start + i * CHANNELS;
            if pixel::exceeds_threshold(&src_a[o..], &src_b[o..], threshold) {
                pixel::write(px, DIFF_HIGHLIGHT);
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(mark_row);

    #[cfg(not(feature = "parallel"))]
    out.as_bytes_mut()
        .chunks_mut(stride)
        .enumerate()
        .for_each(mark_row);

    Ok(out)
}

/// Number of opaque (marked) pixels in an overlay.
pub fn count_marked(overlay: &PixelBuffer) -> usize {
    overlay.pixels().filter(|p| p[A] > 0).count()
}

/// Builds a region map of `a` against `b`.
///
/// Pixels differing by more than `tolerance` on any channel are grouped into
/// 4-connected regions; regions smaller than `min_region_pixels` are dropped.
/// Surviving pixels are opaque white, everything else opaque black.
pub fn region_map(
    a: &PixelBuffer,
    b: &PixelBuffer,
    min_region_pixels: usize,
    tolerance: u8,
) -> OpsResult<PixelBuffer> {
    a.ensure_same_size(b)?;

    let (width, height) = (a.width() as usize, a.height() as usize);
    let mut different = regions::classify(a, b, tolerance);
    let stats = regions::suppress_small(&mut different, width, height, min_region_pixels);
    debug!(
        width,
        height,
        min_region_pixels,
        tolerance,
        components = stats.components,
        kept = stats.kept,
        "Region map built"
    );

    let mut out = a.blank_like();
    for (px, &keep) in out.pixels_mut().zip(&different) {
        pixel::write(px, if keep { OPAQUE_WHITE } else { OPAQUE_BLACK });
    }
    Ok(out)
}

/// Minimum region size for a percentage of the image area:
/// `round(percentage * width * height / 100)`.
///
/// Negative or NaN percentages give zero.
pub fn min_region_pixels(percentage: f64, width: u32, height: u32) -> usize {
    (percentage * width as f64 * height as f64 / 100.0).round() as usize
}

/// Exact pixel equality of two buffers.
///
/// # Errors
///
/// Returns a dimension mismatch when sizes differ.
pub fn pixels_equal(a: &PixelBuffer, b: &PixelBuffer) -> OpsResult<bool> {
    a.ensure_same_size(b)?;
    if a.is_empty() {
        return Ok(true);
    }
    let stride = a.stride();

    #[cfg(feature = "parallel")]
    let equal = a
        .as_bytes()
        .par_chunks(stride)
        .zip(b.as_bytes().par_chunks(stride))
        .all(|(ra, rb)| ra == rb);

    #[cfg(not(feature = "parallel"))]
    let equal = a.as_bytes() == b.as_bytes();

    trace!(equal, "diff::pixels_equal");
    Ok(equal)
}
