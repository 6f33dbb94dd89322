//! Circular brush rasterization.
//!
//! A stroke sample activates every mask pixel inside a disc. The disc is
//! tested against the half-open bounding square
//! `[cx - r, cx + r) x [cy - r, cy + r)`, so the row and column at
//! `c + r` are never touched and a radius of zero paints nothing.
//!
//! ```rust
//! use pairmask_core::MaskBuffer;
//! use pairmask_ops::brush::paint_stroke;
//!
//! let mut mask = MaskBuffer::new(10, 10);
//! let dirty = paint_stroke(&mut mask, 5, 5, 1).unwrap();
//! assert_eq!(mask.count_active(), 3);
//! assert!(mask.is_active(4, 5) && mask.is_active(5, 4) && mask.is_active(5, 5));
//! assert_eq!((dirty.x, dirty.y, dirty.width, dirty.height), (4, 4, 2, 2));
//! ```

use pairmask_core::{MaskBuffer, Rect};
use tracing::trace;

/// Paints one brush sample centred at `(cx, cy)` with the given radius.
///
/// The centre may lie outside the mask; the disc is clipped. Returns the
/// clipped bounding rectangle that was scanned, or `None` when it is empty.
pub fn paint_stroke(mask: &mut MaskBuffer, cx: i32, cy: i32, radius: u32) -> Option<Rect> {
    let r = radius as i64;
    let (cx, cy) = (cx as i64, cy as i64);
    let dirty = Rect::clipped(cx - r, cy - r, cx + r, cy + r, mask.width(), mask.height())?;
    trace!(cx, cy, radius, %dirty, "paint_stroke");

    // squared distances of a u32 radius need more than 64 bits
    let r2 = (r as i128) * (r as i128);
    for y in dirty.y..dirty.bottom() {
        let dy = (y as i64 - cy) as i128;
        for x in dirty.x..dirty.right() {
            let dx = (x as i64 - cx) as i128;
            if dx * dx + dy * dy <= r2 {
                mask.activate(x, y);
            }
        }
    }
    Some(dirty)
}
