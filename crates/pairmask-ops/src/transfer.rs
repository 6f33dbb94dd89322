//! Turning a derived buffer into mask selections.
//!
//! Auto-masking classifies each pixel of a region map or overlay into an
//! exact colour class and activates the matching mask pixels. Transfer is
//! additive: unselected destination pixels keep their state.
//!
//! | Mode                        | selects                                  |
//! |-----------------------------|------------------------------------------|
//! | [`TransferMode::White`]     | exactly `(255, 255, 255, 255)`           |
//! | [`TransferMode::Black`]     | exactly `(0, 0, 0, 255)`                 |
//! | [`TransferMode::NonGreen`]  | anything but `(B0, G255, R0, A255)`      |

use std::fmt;
use std::str::FromStr;

use crate::{OpsError, OpsResult};
use pairmask_core::pixel::{self, Bgra, DIFF_HIGHLIGHT, OPAQUE_BLACK, OPAQUE_WHITE};
use pairmask_core::{MaskBuffer, PixelBuffer};
use tracing::debug;

/// Colour class that selects mask pixels during transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferMode {
    /// Surviving region-map pixels.
    #[default]
    White,
    /// Region-map background.
    Black,
    /// Everything an overlay did not highlight.
    NonGreen,
}

impl TransferMode {
    /// Whether `px` belongs to this mode's colour class.
    #[inline]
    pub fn selects(self, px: Bgra) -> bool {
        match self {
            Self::White => px == OPAQUE_WHITE,
            Self::Black => px == OPAQUE_BLACK,
            Self::NonGreen => px != DIFF_HIGHLIGHT,
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
            Self::NonGreen => "non-green",
        })
    }
}

impl FromStr for TransferMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            "non-green" | "nongreen" | "non_green" => Ok(Self::NonGreen),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown transfer mode '{other}'"
            ))),
        }
    }
}

/// Activates every `dest` pixel whose `source` pixel is selected by `mode`.
///
/// Returns the number of selected pixels.
///
/// # Errors
///
/// Returns a dimension mismatch when `source` and `dest` differ in size.
pub fn transfer(source: &PixelBuffer, dest: &mut MaskBuffer, mode: TransferMode) -> OpsResult<usize> {
    dest.ensure_same_size(source)?;

    let mut selected = 0;
    for (i, px) in source.pixels().enumerate() {
        if mode.selects(pixel::read(px)) {
            dest.activate_at(i);
            selected += 1;
        }
    }
    debug!(%mode, selected, "Mask transfer");
    Ok(selected)
}

/// Swaps active and inactive for every pixel of `mask`.
pub fn invert(mask: &mut MaskBuffer) {
    mask.invert();
    debug!(active = mask.count_active(), "Mask inverted");
}
