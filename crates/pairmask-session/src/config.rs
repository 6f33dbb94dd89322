//! Session configuration.
//!
//! Read from `pairmask.yaml` in the dataset root when present. Every key is
//! optional:
//!
//! ```yaml
//! brush_diameter: 30          # display pixels, at most 2000
//! diff_threshold: 5           # overlay per-channel threshold
//! min_region_percentage: 1.0  # auto-mask region size, % of image area
//! color_tolerance: 0          # auto-mask per-channel tolerance
//! history_depth: 30           # undo/redo states per stack
//! main_side: ref              # base | ref
//! transfer_mode: white        # white | black | non-green (see below)
//! ```

use std::path::Path;

use pairmask_core::MainSide;
use pairmask_ops::history::DEFAULT_HISTORY_DEPTH;
use pairmask_ops::diff::DEFAULT_THRESHOLD;
use pairmask_ops::TransferMode;
use serde::Deserialize;
use tracing::debug;

use crate::{SessionError, SessionResult};

/// Largest accepted brush diameter, in display pixels.
pub const MAX_BRUSH_DIAMETER: f64 = 2000.0;

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Brush diameter in display pixels.
    pub brush_diameter: f64,
    /// Per-channel threshold for difference overlays.
    pub diff_threshold: u8,
    /// Minimum auto-mask region size as a percentage of the image area.
    pub min_region_percentage: f64,
    /// Per-channel tolerance when classifying auto-mask differences.
    pub color_tolerance: u8,
    /// Undo/redo states kept per stack.
    pub history_depth: usize,
    /// Side kept by default when a pair is loaded.
    pub main_side: MainSide,
    /// Colour class auto-masking transfers into the non-main mask.
    ///
    /// With the default [`TransferMode::White`] the surviving difference
    /// regions are selected, so the merge shows the other side wherever the
    /// images changed significantly. [`TransferMode::Black`] selects the
    /// unchanged background instead: the merge then keeps the main side only
    /// inside the large changes. Set `transfer_mode: black` to get that
    /// behaviour.
    pub transfer_mode: TransferMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            brush_diameter: 30.0,
            diff_threshold: DEFAULT_THRESHOLD,
            min_region_percentage: 1.0,
            color_tolerance: 0,
            history_depth: DEFAULT_HISTORY_DEPTH,
            main_side: MainSide::Ref,
            transfer_mode: TransferMode::White,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        if path.is_file() {
            let config = Self::from_file(path)?;
            debug!(path = %path.display(), ?config, "Loaded session config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> SessionResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> SessionResult<Self> {
        let defaults = Self::default();
        let config = Self {
            brush_diameter: raw.brush_diameter.unwrap_or(defaults.brush_diameter),
            diff_threshold: raw.diff_threshold.unwrap_or(defaults.diff_threshold),
            min_region_percentage: raw
                .min_region_percentage
                .unwrap_or(defaults.min_region_percentage),
            color_tolerance: raw.color_tolerance.unwrap_or(defaults.color_tolerance),
            history_depth: raw.history_depth.unwrap_or(defaults.history_depth),
            main_side: match raw.main_side {
                Some(s) => s.parse().map_err(SessionError::Config)?,
                None => defaults.main_side,
            },
            transfer_mode: match raw.transfer_mode {
                Some(s) => s.parse()?,
                None => defaults.transfer_mode,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no session can work with.
    pub fn validate(&self) -> SessionResult<()> {
        if !(0.0..=MAX_BRUSH_DIAMETER).contains(&self.brush_diameter) {
            return Err(SessionError::Config(format!(
                "brush_diameter must be within 0..={MAX_BRUSH_DIAMETER}, got {}",
                self.brush_diameter
            )));
        }
        if !(0.0..=100.0).contains(&self.min_region_percentage) {
            return Err(SessionError::Config(format!(
                "min_region_percentage must be within 0..=100, got {}",
                self.min_region_percentage
            )));
        }
        if self.history_depth == 0 {
            return Err(SessionError::Config("history_depth must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    brush_diameter: Option<f64>,
    diff_threshold: Option<u8>,
    min_region_percentage: Option<f64>,
    color_tolerance: Option<u8>,
    history_depth: Option<usize>,
    main_side: Option<String>,
    transfer_mode: Option<String>,
}
