//! Connected-component area filtering.
//!
//! Pixels classified as "different" are grouped into 4-connected components
//! with a breadth-first flood fill. Each pixel enters the queue at most once.
//! Components smaller than the requested minimum are reclassified as
//! background.

use std::collections::VecDeque;

use pairmask_core::pixel::{self, CHANNELS};
use pairmask_core::PixelBuffer;
use tracing::trace;

/// Summary of one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionStats {
    /// Components found before filtering
    pub components: usize,
    /// Components that met the minimum size
    pub kept: usize,
    /// Pixels still classified as different after filtering
    pub kept_pixels: usize,
}

/// Marks each pixel whose BGRA delta exceeds `tolerance` on any channel.
///
/// Both buffers must have the same dimensions.
pub fn classify(a: &PixelBuffer, b: &PixelBuffer, tolerance: u8) -> Vec<bool> {
    a.as_bytes()
        .chunks_exact(CHANNELS)
        .zip(b.as_bytes().chunks_exact(CHANNELS))
        .map(|(pa, pb)| pixel::exceeds_threshold(pa, pb, tolerance))
        .collect()
}

/// Clears every 4-connected component of `different` with fewer than
/// `min_pixels` members.
///
/// `different` is a row-major `width x height` grid.
pub fn suppress_small(
    different: &mut [bool],
    width: usize,
    height: usize,
    min_pixels: usize,
) -> RegionStats {
    debug_assert_eq!(different.len(), width * height);

    let mut stats = RegionStats::default();
    let mut visited = vec![false; different.len()];
    let mut queue = VecDeque::new();
    let mut members = Vec::new();

    for start in 0..different.len() {
        if !different[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);
        members.clear();

        while let Some(i) = queue.pop_front() {
            members.push(i);
            let (x, y) = (i % width, i / width);

            let mut visit = |n: usize| {
                if different[n] && !visited[n] {
                    visited[n] = true;
                    queue.push_back(n);
                }
            };
            if x > 0 {
                visit(i - 1);
            }
            if x + 1 < width {
                visit(i + 1);
            }
            if y > 0 {
                visit(i - width);
            }
            if y + 1 < height {
                visit(i + width);
            }
        }

        stats.components += 1;
        if members.len() < min_pixels {
            trace!(size = members.len(), min_pixels, "suppressing component");
            for &i in &members {
                different[i] = false;
            }
        } else {
            stats.kept += 1;
            stats.kept_pixels += members.len();
        }
    }
    stats
}
