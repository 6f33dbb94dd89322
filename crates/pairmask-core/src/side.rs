//! Which source image is kept by default.

use std::fmt;
use std::str::FromStr;

/// The side whose pixels win wherever the masks do not say otherwise.
///
/// The other side only shows through where its mask is active and the main
/// side's mask is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MainSide {
    /// The "before" image.
    Base,
    /// The "after" image.
    #[default]
    Ref,
}

impl MainSide {
    /// The opposite side.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Base => Self::Ref,
            Self::Ref => Self::Base,
        }
    }

    /// Flips to the opposite side in place.
    #[inline]
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    /// Orders a `(base, reference)` pair as `(main, other)`.
    ///
    /// ```rust
    /// use pairmask_core::MainSide;
    ///
    /// assert_eq!(MainSide::Ref.select("b", "r"), ("r", "b"));
    /// assert_eq!(MainSide::Base.select("b", "r"), ("b", "r"));
    /// ```
    #[inline]
    pub fn select<T>(self, base: T, reference: T) -> (T, T) {
        match self {
            Self::Base => (base, reference),
            Self::Ref => (reference, base),
        }
    }

    /// Directory name used for this side in a dataset.
    #[inline]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Ref => "ref",
        }
    }
}

impl fmt::Display for MainSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for MainSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" | "before" => Ok(Self::Base),
            "ref" | "reference" | "after" => Ok(Self::Ref),
            other => Err(format!("unknown side '{other}', expected 'base' or 'ref'")),
        }
    }
}
