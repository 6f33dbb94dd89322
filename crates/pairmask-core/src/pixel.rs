//! BGRA8 pixel values and the fixed colours used by the pixel core.
//!
//! A pixel is a `[u8; 4]` in **B, G, R, A** order. The constants below are
//! the only colours the derived buffers ever contain:
//!
//! | Constant              | B   | G   | R   | A   | Used by                 |
//! |-----------------------|-----|-----|-----|-----|-------------------------|
//! | [`MASK_ACTIVE`]       | 0   | 0   | 255 | 255 | mask buffers            |
//! | [`MASK_INACTIVE`]     | 0   | 0   | 0   | 0   | mask buffers            |
//! | [`DIFF_HIGHLIGHT`]    | 0   | 255 | 0   | 255 | difference overlays     |
//! | [`TRANSPARENT`]       | 0   | 0   | 0   | 0   | difference overlays     |
//! | [`OPAQUE_WHITE`]      | 255 | 255 | 255 | 255 | region maps             |
//! | [`OPAQUE_BLACK`]      | 0   | 0   | 0   | 255 | region maps             |

/// A single pixel in B, G, R, A order.
pub type Bgra = [u8; 4];

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Index of the blue channel.
pub const B: usize = 0;
/// Index of the green channel.
pub const G: usize = 1;
/// Index of the red channel.
pub const R: usize = 2;
/// Index of the alpha channel.
pub const A: usize = 3;

/// DPI every decoded buffer is normalized to.
pub const DEFAULT_DPI: f32 = 96.0;

/// Active mask pixel: opaque pure red.
pub const MASK_ACTIVE: Bgra = [0, 0, 255, 255];

/// Inactive mask pixel: fully transparent.
pub const MASK_INACTIVE: Bgra = [0, 0, 0, 0];

/// Difference overlay highlight: opaque bright green.
pub const DIFF_HIGHLIGHT: Bgra = [0, 255, 0, 255];

/// Fully transparent black.
pub const TRANSPARENT: Bgra = [0, 0, 0, 0];

/// Opaque white, a surviving region-map pixel.
pub const OPAQUE_WHITE: Bgra = [255, 255, 255, 255];

/// Opaque black, region-map background.
pub const OPAQUE_BLACK: Bgra = [0, 0, 0, 255];

/// Reads the pixel starting at `chunk[0]`.
///
/// `chunk` must hold at least four bytes.
#[inline]
pub fn read(chunk: &[u8]) -> Bgra {
    [chunk[B], chunk[G], chunk[R], chunk[A]]
}

/// Writes `px` into the first four bytes of `chunk`.
#[inline]
pub fn write(chunk: &mut [u8], px: Bgra) {
    chunk[..CHANNELS].copy_from_slice(&px);
}

/// Returns `true` if any of the four channel deltas is strictly greater
/// than `threshold`.
///
/// Equal-to-threshold deltas count as "similar".
///
/// # Example
///
/// ```rust
/// use pairmask_core::pixel::exceeds_threshold;
///
/// assert!(!exceeds_threshold(&[10, 10, 10, 255], &[15, 10, 10, 255], 5));
/// assert!(exceeds_threshold(&[10, 10, 10, 255], &[16, 10, 10, 255], 5));
/// ```
#[inline]
pub fn exceeds_threshold(a: &[u8], b: &[u8], threshold: u8) -> bool {
    a[..CHANNELS]
        .iter()
        .zip(&b[..CHANNELS])
        .any(|(&ca, &cb)| ca.abs_diff(cb) > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let mut buf = [0u8; 8];
        write(&mut buf[4..], MASK_ACTIVE);
        assert_eq!(read(&buf[4..]), MASK_ACTIVE);
        assert_eq!(read(&buf), TRANSPARENT);
    }

    #[test]
    fn test_threshold_is_strict() {
        let a = [0, 0, 0, 0];
        let b = [0, 0, 0, 5];
        assert!(!exceeds_threshold(&a, &b, 5));
        assert!(exceeds_threshold(&a, &b, 4));
    }

    #[test]
    fn test_threshold_alpha_counts() {
        assert!(exceeds_threshold(&MASK_ACTIVE, &[0, 0, 255, 0], 0));
    }

    #[test]
    fn test_threshold_symmetric() {
        let a = [200, 3, 90, 255];
        let b = [10, 250, 90, 128];
        for t in [0u8, 50, 127, 190, 255] {
            assert_eq!(exceeds_threshold(&a, &b, t), exceeds_threshold(&b, &a, t));
        }
    }
}
