//! Owned BGRA8 pixel buffer.
//!
//! [`PixelBuffer`] is the canonical in-memory image of the workspace. Source
//! images, masks, merged output and diff overlays all use it.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, 4 bytes per pixel in
//! B, G, R, A order. The stride is always `width * 4`; there is no padding.
//! All access is bounds-checked indexing into the owned `Vec<u8>`.
//!
//! # Usage
//!
//! ```rust
//! use pairmask_core::{PixelBuffer, pixel};
//!
//! let mut buf = PixelBuffer::new(4, 4);
//! buf.set_pixel(1, 2, pixel::OPAQUE_WHITE).unwrap();
//! assert_eq!(buf.pixel(1, 2), Some(pixel::OPAQUE_WHITE));
//! assert_eq!(buf.pixel(4, 0), None);
//! ```
//!
//! # Used By
//!
//! - [`crate::mask::MaskBuffer`] - wraps a buffer and enforces the two-state invariant
//! - `pairmask-ops` - every pixel algorithm
//! - `pairmask-io` - decode/encode

use crate::pixel::{self, Bgra, CHANNELS, DEFAULT_DPI};
use crate::{Error, Result};

/// Owned 4-channel BGRA8 image buffer.
///
/// Cloning performs a deep copy of the pixel bytes, which is what snapshots
/// rely on.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    dpi: (f32, f32),
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer of the given size with every byte zero
    /// (fully transparent black).
    ///
    /// # Example
    ///
    /// ```rust
    /// use pairmask_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(1920, 1080);
    /// assert_eq!(buf.stride(), 1920 * 4);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, pixel::TRANSPARENT)
    }

    /// Creates a buffer where every pixel equals `px`.
    pub fn filled(width: u32, height: u32, px: Bgra) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            dpi: (DEFAULT_DPI, DEFAULT_DPI),
            data,
        }
    }

    /// Wraps existing BGRA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBufferLength`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_bgra(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidBufferLength {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            dpi: (DEFAULT_DPI, DEFAULT_DPI),
            data,
        })
    }

    /// Creates an empty buffer with the same dimensions and DPI as `self`.
    pub fn blank_like(&self) -> Self {
        Self::new(self.width, self.height).with_dpi(self.dpi)
    }

    /// Sets the DPI carried alongside the pixels.
    pub fn with_dpi(mut self, dpi: (f32, f32)) -> Self {
        self.dpi = dpi;
        self
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Horizontal and vertical DPI.
    #[inline]
    pub fn dpi(&self) -> (f32, f32) {
        self.dpi
    }

    /// Bytes per row, always `width * 4`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw BGRA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw BGRA bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.stride() + x as usize * CHANNELS)
        } else {
            None
        }
    }

    /// Reads pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgra> {
        self.offset(x, y).map(|o| pixel::read(&self.data[o..]))
    }

    /// Writes pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Bgra) -> Result<()> {
        let o = self
            .offset(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))?;
        pixel::write(&mut self.data[o..], px);
        Ok(())
    }

    /// Iterates over pixels as 4-byte slices in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterates mutably over pixels as 4-byte slices in row-major order.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Iterates over rows.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        // stride 0 would panic in chunks_exact
        self.data.chunks_exact(self.stride().max(CHANNELS))
    }

    /// Fills every pixel with `px`.
    pub fn fill(&mut self, px: Bgra) {
        for chunk in self.pixels_mut() {
            pixel::write(chunk, px);
        }
    }

    /// Returns `true` if both buffers have the same width and height.
    #[inline]
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Fails with [`Error::DimensionMismatch`] unless both buffers share
    /// width and height.
    pub fn ensure_same_size(&self, other: &PixelBuffer) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ))
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dpi", &self.dpi)
            .field("bytes", &self.data.len())
            .finish()
    }
}
