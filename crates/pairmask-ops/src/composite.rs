//! Merging a pair through its masks.
//!
//! The merged image takes every pixel from the main side except where the
//! other side's mask is active and the main side's mask is not:
//!
//! | main mask | other mask | output      |
//! |-----------|------------|-------------|
//! | inactive  | inactive   | main        |
//! | inactive  | active     | **other**   |
//! | active    | inactive   | main        |
//! | active    | active     | main        |
//!
//! Output alpha is always 255 and the DPI is taken from the base image.
//!
//! # Example
//!
//! ```rust
//! use pairmask_ops::composite::takes_other;
//!
//! assert!(takes_other(false, true));
//! assert!(!takes_other(true, true));
//! ```

use crate::OpsResult;
use pairmask_core::pixel::{A, CHANNELS};
use pairmask_core::{MainSide, MaskBuffer, PixelBuffer};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Per-pixel selection rule: `true` when the other side's colour is used.
#[inline]
pub const fn takes_other(main_active: bool, other_active: bool) -> bool {
    other_active && !main_active
}

/// Composites `base` and `reference` through their masks.
///
/// # Errors
///
/// Returns a dimension mismatch if any of the four inputs differ in size.
pub fn composite(
    base: &PixelBuffer,
    reference: &PixelBuffer,
    base_mask: &MaskBuffer,
    ref_mask: &MaskBuffer,
    main: MainSide,
) -> OpsResult<PixelBuffer> {
    base.ensure_same_size(reference)?;
    base_mask.ensure_same_size(base)?;
    ref_mask.ensure_same_size(base)?;

    let (width, height) = base.dimensions();
    debug!(width, height, %main, "Compositing pair");

    let mut out = base.blank_like();
    if out.is_empty() {
        return Ok(out);
    }

    let (main_img, other_img) = main.select(base.as_bytes(), reference.as_bytes());
    let (main_mask, other_mask) = main.select(base_mask.as_bytes(), ref_mask.as_bytes());
    let stride = out.stride();

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let start = y * stride;
        for (i, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let o = start + i * CHANNELS;
            let src = if takes_other(main_mask[o + A] > 0, other_mask[o + A] > 0) {
                other_img
            } else {
                main_img
            };
            px[..A].copy_from_slice(&src[o..o + A]);
            px[A] = 255;
        }
    };

    #[cfg(feature = "parallel")]
    out.as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(fill_row);

    #[cfg(not(feature = "parallel"))]
    out.as_bytes_mut()
        .chunks_mut(stride)
        .enumerate()
        .for_each(fill_row);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmask_core::pixel;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_buffer(rng: &mut StdRng, w: u32, h: u32) -> PixelBuffer {
        let data = (0..w * h * 4).map(|_| rng.r#gen::<u8>()).collect();
        PixelBuffer::from_bgra(w, h, data).unwrap()
    }

    fn random_mask(rng: &mut StdRng, w: u32, h: u32) -> MaskBuffer {
        let mut m = MaskBuffer::new(w, h);
        for i in 0..(w * h) as usize {
            if rng.gen_bool(0.5) {
                m.activate_at(i);
            }
        }
        m
    }

    #[test]
    fn test_tie_break_randomized() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let (w, h) = (23, 17);
        for main in [MainSide::Base, MainSide::Ref] {
            let base = random_buffer(&mut rng, w, h);
            let reference = random_buffer(&mut rng, w, h);
            let bm = random_mask(&mut rng, w, h);
            let rm = random_mask(&mut rng, w, h);
            let out = composite(&base, &reference, &bm, &rm, main).unwrap();

            let (main_img, other_img) = main.select(&base, &reference);
            let (main_mask, other_mask) = main.select(&bm, &rm);
            for y in 0..h {
                for x in 0..w {
                    let expected = if other_mask.is_active(x, y) && !main_mask.is_active(x, y) {
                        other_img.pixel(x, y).unwrap()
                    } else {
                        main_img.pixel(x, y).unwrap()
                    };
                    let got = out.pixel(x, y).unwrap();
                    assert_eq!(&got[..3], &expected[..3], "({x}, {y}) main={main}");
                    assert_eq!(got[3], 255);
                }
            }
        }
    }

    #[test]
    fn test_all_active_and_all_inactive_give_main() {
        let base = PixelBuffer::filled(6, 4, [10, 20, 30, 40]);
        let reference = PixelBuffer::filled(6, 4, [200, 100, 50, 0]);
        let blank = MaskBuffer::new(6, 4);
        let mut full = MaskBuffer::new(6, 4);
        full.invert();

        for (bm, rm) in [(&blank, &blank), (&full, &full)] {
            let out = composite(&base, &reference, bm, rm, MainSide::Base).unwrap();
            assert!(out.pixels().all(|p| p == [10, 20, 30, 255]));
            let out = composite(&base, &reference, bm, rm, MainSide::Ref).unwrap();
            assert!(out.pixels().all(|p| p == [200, 100, 50, 255]));
        }
    }

    #[test]
    fn test_checkerboard_other_mask() {
        let base = PixelBuffer::filled(4, 4, pixel::OPAQUE_BLACK);
        let reference = PixelBuffer::filled(4, 4, pixel::OPAQUE_WHITE);
        let bm = MaskBuffer::new(4, 4);
        let mut rm = MaskBuffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                if (x + y) % 2 == 0 {
                    rm.activate(x, y);
                }
            }
        }
        let out = composite(&base, &reference, &bm, &rm, MainSide::Base).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let expected = if (x + y) % 2 == 0 { pixel::OPAQUE_WHITE } else { pixel::OPAQUE_BLACK };
                assert_eq!(out.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn test_one_pixel_scenario() {
        let base = PixelBuffer::filled(4, 4, [1, 1, 1, 255]);
        let reference = PixelBuffer::filled(4, 4, [9, 9, 9, 255]);
        let bm = MaskBuffer::new(4, 4);
        let mut rm = MaskBuffer::new(4, 4);
        rm.activate(1, 1);

        let out = composite(&base, &reference, &bm, &rm, MainSide::Base).unwrap();
        assert_eq!(out.pixel(1, 1), Some([9, 9, 9, 255]));
        let others = out.pixels().filter(|p| *p == [1, 1, 1, 255]).count();
        assert_eq!(others, 15);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = PixelBuffer::new(4, 4);
        let b = PixelBuffer::new(4, 3);
        let m = MaskBuffer::new(4, 4);
        let err = composite(&a, &b, &m, &m, MainSide::Ref).unwrap_err();
        assert!(err.is_dimension_mismatch());

        let small = MaskBuffer::new(2, 2);
        assert!(composite(&a, &a, &m, &small, MainSide::Ref).is_err());
    }
}
