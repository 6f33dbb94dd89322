//! Image decode and encode via the `image` crate.
//!
//! Everything read is converted to 8-bit BGRA at 96 DPI. Committed images
//! are written as lossless 3-channel PNG with alpha dropped, so both sides
//! of a committed pair share one pixel format.
//!
//! # Example
//!
//! ```ignore
//! use pairmask_io::codec;
//!
//! let img = codec::read_bgra("base/0001.jpg")?;
//! codec::write_rgb("final/ref/0001.png", &img)?;
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use pairmask_core::pixel::{B, CHANNELS, G, R};
use pairmask_core::{MaskBuffer, PixelBuffer};
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Reads an image file of any supported format as BGRA8.
pub fn read_bgra<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| IoError::Decode(format!("{}: {e}", path.display())))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(CHANNELS) {
        px.swap(R, B);
    }
    debug!(path = %path.display(), width, height, "Decoded image");
    Ok(PixelBuffer::from_bgra(width, height, data)?)
}

/// Reads only the dimensions of an image file.
pub fn dimensions<P: AsRef<Path>>(path: P) -> IoResult<(u32, u32)> {
    let path = path.as_ref();
    ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| IoError::Decode(format!("{}: {e}", path.display())))
}

/// Reads an image as a mask: any pixel with alpha > 0 becomes active.
pub fn read_mask<P: AsRef<Path>>(path: P) -> IoResult<MaskBuffer> {
    Ok(MaskBuffer::from_alpha(&read_bgra(path)?))
}

/// Writes `buf` as a 3-channel PNG, dropping alpha.
pub fn write_rgb<P: AsRef<Path>>(path: P, buf: &PixelBuffer) -> IoResult<()> {
    let mut rgb = Vec::with_capacity(buf.pixel_count() * 3);
    for px in buf.pixels() {
        rgb.extend_from_slice(&[px[R], px[G], px[B]]);
    }
    encode_png(path.as_ref(), &rgb, buf.dimensions(), ExtendedColorType::Rgb8)
}

/// Writes `buf` as a 4-channel PNG, keeping alpha.
pub fn write_bgra<P: AsRef<Path>>(path: P, buf: &PixelBuffer) -> IoResult<()> {
    let mut rgba = buf.as_bytes().to_vec();
    for px in rgba.chunks_exact_mut(CHANNELS) {
        px.swap(R, B);
    }
    encode_png(path.as_ref(), &rgba, buf.dimensions(), ExtendedColorType::Rgba8)
}

fn encode_png(
    path: &Path,
    data: &[u8],
    (width, height): (u32, u32),
    color: ExtendedColorType,
) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    PngEncoder::new(writer)
        .write_image(data, width, height, color)
        .map_err(|e| IoError::Encode(format!("{}: {e}", path.display())))?;
    trace!(path = %path.display(), width, height, "Encoded PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmask_core::pixel;

    #[test]
    fn test_rgba_png_keeps_channel_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("px.png");
        let mut buf = PixelBuffer::new(2, 1);
        buf.set_pixel(0, 0, [10, 20, 30, 255]).unwrap();
        buf.set_pixel(1, 0, pixel::MASK_ACTIVE).unwrap();

        write_bgra(&path, &buf).unwrap();
        let back = read_bgra(&path).unwrap();
        assert_eq!(back.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(back.pixel(1, 0), Some(pixel::MASK_ACTIVE));
        assert_eq!(back.dpi(), (96.0, 96.0));
    }

    #[test]
    fn test_rgb_png_is_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.png");
        let buf = PixelBuffer::filled(3, 2, [1, 2, 3, 0]);
        write_rgb(&path, &buf).unwrap();

        let back = read_bgra(&path).unwrap();
        assert!(back.pixels().all(|p| p == [1, 2, 3, 255]));
        assert_eq!(dimensions(&path).unwrap(), (3, 2));
        let raw = image::open(&path).unwrap();
        assert_eq!(raw.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_read_mask_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(1, 1, [0, 255, 0, 9]).unwrap();
        write_bgra(&path, &buf).unwrap();

        let mask = read_mask(&path).unwrap();
        assert_eq!(mask.count_active(), 1);
        assert_eq!(mask.as_buffer().pixel(1, 1), Some(pixel::MASK_ACTIVE));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_bgra(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(read_bgra(&path).is_err());
    }
}
