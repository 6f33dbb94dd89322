//! CLI command implementations

pub mod automask;
pub mod captions;
pub mod diff;
pub mod merge;
pub mod pairs;
pub mod regions;

use anyhow::{Context, Result, bail};
use pairmask_core::{MaskBuffer, PixelBuffer};
use pairmask_io::codec;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    codec::read_bgra(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Load a mask image, or a blank mask when no path is given.
pub fn load_mask(path: Option<&Path>, width: u32, height: u32) -> Result<MaskBuffer> {
    match path {
        Some(p) => {
            let mask = codec::read_mask(p)
                .with_context(|| format!("Failed to load mask: {}", p.display()))?;
            if mask.dimensions() != (width, height) {
                bail!(
                    "Mask size {}x{} does not match image {}x{}: {}",
                    mask.width(),
                    mask.height(),
                    width,
                    height,
                    p.display()
                );
            }
            Ok(mask)
        }
        None => Ok(MaskBuffer::new(width, height)),
    }
}

/// Save image to path as RGB PNG
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    codec::write_rgb(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save image to path as RGBA PNG
pub fn save_image_alpha(path: &Path, image: &PixelBuffer) -> Result<()> {
    codec::write_bgra(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Percentage of `part` in `whole`, 0 for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_missing_mask_is_blank() {
        let mask = load_mask(None, 3, 2).unwrap();
        assert_eq!(mask.dimensions(), (3, 2));
        assert!(mask.is_blank());
    }
}
