//! Two-state selection masks.
//!
//! A [`MaskBuffer`] is a [`PixelBuffer`] in which every pixel is either
//! [`MASK_ACTIVE`] or [`MASK_INACTIVE`]. The wrapper only hands out
//! operations that keep it that way; raw bytes are read-only.
//!
//! A [`MaskPair`] holds one mask per side and is the unit recorded by the
//! undo/redo history.
//!
//! # Usage
//!
//! ```rust
//! use pairmask_core::{MaskBuffer, MaskPair, MainSide};
//!
//! let mut pair = MaskPair::blank(8, 8);
//! pair.side_mut(MainSide::Base).activate(3, 3);
//! assert_eq!(pair.base.count_active(), 1);
//! assert_eq!(pair.reference.count_active(), 0);
//! ```

use crate::buffer::PixelBuffer;
use crate::pixel::{self, A, MASK_ACTIVE, MASK_INACTIVE};
use crate::side::MainSide;
use crate::Result;

/// Per-pixel active/inactive selection for one side of a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    buf: PixelBuffer,
}

impl MaskBuffer {
    /// Creates an all-inactive mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: PixelBuffer::new(width, height),
        }
    }

    /// Builds a mask from arbitrary pixels: alpha > 0 becomes active,
    /// everything else inactive.
    pub fn from_alpha(src: &PixelBuffer) -> Self {
        let mut buf = src.blank_like();
        for (dst, px) in buf.pixels_mut().zip(src.pixels()) {
            if px[A] > 0 {
                pixel::write(dst, MASK_ACTIVE);
            }
        }
        Self { buf }
    }

    /// Mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buf.dimensions()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.buf.pixel_count()
    }

    /// Underlying BGRA pixels.
    #[inline]
    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buf
    }

    /// Raw BGRA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Consumes the mask, returning its pixels.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buf
    }

    /// Whether `(x, y)` is active. Out-of-bounds reads as inactive.
    #[inline]
    pub fn is_active(&self, x: u32, y: u32) -> bool {
        self.buf.offset(x, y).is_some_and(|o| self.buf.as_bytes()[o + A] > 0)
    }

    /// Whether the pixel at linear index `i` is active.
    #[inline]
    pub fn is_active_at(&self, i: usize) -> bool {
        self.buf.as_bytes()[i * pixel::CHANNELS + A] > 0
    }

    /// Activates `(x, y)`; out-of-bounds writes are ignored.
    #[inline]
    pub fn activate(&mut self, x: u32, y: u32) {
        if let Some(o) = self.buf.offset(x, y) {
            pixel::write(&mut self.buf.as_bytes_mut()[o..], MASK_ACTIVE);
        }
    }

    /// Activates the pixel at linear index `i`.
    #[inline]
    pub fn activate_at(&mut self, i: usize) {
        let o = i * pixel::CHANNELS;
        pixel::write(&mut self.buf.as_bytes_mut()[o..], MASK_ACTIVE);
    }

    /// Deactivates `(x, y)`; out-of-bounds writes are ignored.
    #[inline]
    pub fn deactivate(&mut self, x: u32, y: u32) {
        if let Some(o) = self.buf.offset(x, y) {
            pixel::write(&mut self.buf.as_bytes_mut()[o..], MASK_INACTIVE);
        }
    }

    /// Flips every pixel between active and inactive.
    pub fn invert(&mut self) {
        for px in self.buf.pixels_mut() {
            let next = if px[A] > 0 { MASK_INACTIVE } else { MASK_ACTIVE };
            pixel::write(px, next);
        }
    }

    /// Deactivates every pixel.
    pub fn clear(&mut self) {
        self.buf.fill(MASK_INACTIVE);
    }

    /// Number of active pixels.
    pub fn count_active(&self) -> usize {
        self.buf.pixels().filter(|px| px[A] > 0).count()
    }

    /// Returns `true` if no pixel is active.
    pub fn is_blank(&self) -> bool {
        self.buf.pixels().all(|px| px[A] == 0)
    }

    /// Fails unless `other` has the same dimensions.
    pub fn ensure_same_size(&self, other: &PixelBuffer) -> Result<()> {
        self.buf.ensure_same_size(other)
    }
}

/// The two masks of a pair, recorded together in history snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskPair {
    /// Mask over the base image
    pub base: MaskBuffer,
    /// Mask over the ref image
    pub reference: MaskBuffer,
}

impl MaskPair {
    /// Two inactive masks of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            base: MaskBuffer::new(width, height),
            reference: MaskBuffer::new(width, height),
        }
    }

    /// `(width, height)` of the base mask.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    /// Mask for `side`.
    #[inline]
    pub fn side(&self, side: MainSide) -> &MaskBuffer {
        match side {
            MainSide::Base => &self.base,
            MainSide::Ref => &self.reference,
        }
    }

    /// Mutable mask for `side`.
    #[inline]
    pub fn side_mut(&mut self, side: MainSide) -> &mut MaskBuffer {
        match side {
            MainSide::Base => &mut self.base,
            MainSide::Ref => &mut self.reference,
        }
    }

    /// Deactivates both masks.
    pub fn clear(&mut self) {
        self.base.clear();
        self.reference.clear();
    }
}
