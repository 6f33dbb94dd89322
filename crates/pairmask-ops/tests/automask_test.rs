//! Auto-mask and brush pipelines through the public pairmask-ops API.

use pairmask_core::{pixel, MainSide, MaskPair, PixelBuffer};
use pairmask_ops::{brush, composite, diff, transfer, History, TransferMode};

/// Black base; ref adds a 3x3 white block at (2, 2) and a stray pixel at (8, 8).
fn pair() -> (PixelBuffer, PixelBuffer) {
    let base = PixelBuffer::filled(10, 10, pixel::OPAQUE_BLACK);
    let mut reference = base.clone();
    for y in 2..5 {
        for x in 2..5 {
            reference.set_pixel(x, y, pixel::OPAQUE_WHITE).unwrap();
        }
    }
    reference.set_pixel(8, 8, pixel::OPAQUE_WHITE).unwrap();
    (base, reference)
}

fn automask(mode: TransferMode) -> (PixelBuffer, usize) {
    let (base, reference) = pair();
    let min_region = diff::min_region_pixels(5.0, 10, 10);
    let map = diff::region_map(&reference, &base, min_region, 0).unwrap();

    let mut masks = MaskPair::blank(10, 10);
    let selected = transfer::transfer(&map, &mut masks.base, mode).unwrap();
    let merged =
        composite::composite(&base, &reference, &masks.base, &masks.reference, MainSide::Ref)
            .unwrap();
    (merged, selected)
}

// ============================================================================
// Auto-mask
// ============================================================================

#[test]
fn test_white_mode_reverts_large_change() {
    let (merged, selected) = automask(TransferMode::White);
    assert_eq!(selected, 9);
    assert_eq!(merged.pixel(3, 3), Some(pixel::OPAQUE_BLACK));
    assert_eq!(merged.pixel(8, 8), Some(pixel::OPAQUE_WHITE));
}

#[test]
fn test_black_mode_keeps_only_large_change() {
    let (merged, selected) = automask(TransferMode::Black);
    assert_eq!(selected, 91);
    assert_eq!(merged.pixel(3, 3), Some(pixel::OPAQUE_WHITE));
    assert_eq!(merged.pixel(8, 8), Some(pixel::OPAQUE_BLACK));
    let white = merged.pixels().filter(|p| *p == pixel::OPAQUE_WHITE).count();
    assert_eq!(white, 9);
}

#[test]
fn test_non_green_selects_unchanged_pixels() {
    let (base, reference) = pair();
    let overlay = diff::overlay(&base, &reference, 5).unwrap();
    assert_eq!(diff::count_marked(&overlay), 10);

    let mut masks = MaskPair::blank(10, 10);
    let selected = transfer::transfer(&overlay, &mut masks.reference, TransferMode::NonGreen).unwrap();
    assert_eq!(selected, 90);
    assert!(!masks.reference.is_active(8, 8));
}

// ============================================================================
// Brush with history
// ============================================================================

#[test]
fn test_strokes_undo_in_order() {
    let (base, reference) = pair();
    let mut history = History::new(4);
    let mut masks = MaskPair::blank(10, 10);

    brush::paint_stroke(&mut masks.reference, 3, 3, 2).unwrap();
    history.record_if_changed(&masks);
    let first = masks.clone();
    brush::paint_stroke(&mut masks.reference, 8, 8, 1).unwrap();
    history.record_if_changed(&masks);

    let merged =
        composite::composite(&base, &reference, &masks.base, &masks.reference, MainSide::Base)
            .unwrap();
    assert_eq!(merged.pixel(3, 3), Some(pixel::OPAQUE_WHITE));
    assert_eq!(merged.pixel(8, 8), Some(pixel::OPAQUE_WHITE));

    assert_eq!(history.undo(10, 10), first);
    assert_eq!(history.undo(10, 10), MaskPair::blank(10, 10));
    assert_eq!(history.redo(), Some(first));
}
