//! Dirty-region rectangles.
//!
//! Brush strokes report the image-space rectangle they touched so a caller
//! can refresh only that part of a display. Coordinates follow the image
//! convention: origin at the **top-left**, X to the right, Y downward.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  dirty   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pairmask_core::Rect;
//!
//! let a = Rect::new(10, 20, 100, 50);
//! let b = Rect::new(50, 40, 100, 50);
//! assert_eq!(a.union(&b), Rect::new(10, 20, 140, 70));
//! ```

/// Axis-aligned rectangle with inclusive origin and exclusive right/bottom edges.
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle from origin and size.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the half-open rectangle `[x0, x1) x [y0, y1)` from signed
    /// bounds, clipped to `width x height`.
    ///
    /// Returns `None` when nothing remains after clipping.
    ///
    /// ```rust
    /// use pairmask_core::Rect;
    ///
    /// let r = Rect::clipped(-5, -5, 3, 3, 10, 10).unwrap();
    /// assert_eq!(r, Rect::new(0, 0, 3, 3));
    /// assert!(Rect::clipped(12, 0, 20, 4, 10, 10).is_none());
    /// ```
    pub fn clipped(x0: i64, y0: i64, x1: i64, y1: i64, width: u32, height: u32) -> Option<Rect> {
        let left = x0.max(0);
        let top = y0.max(0);
        let right = x1.min(width as i64);
        let bottom = y1.min(height as i64);
        if left < right && top < bottom {
            Some(Rect::new(
                left as u32,
                top as u32,
                (right - left) as u32,
                (bottom - top) as u32,
            ))
        } else {
            None
        }
    }

    /// First column not in the rectangle.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// First row not in the rectangle.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bounding box of both rectangles. An empty operand is ignored.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_and_bottom() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!((r.right(), r.bottom()), (110, 70));
        assert!(Rect::new(3, 3, 0, 5).is_empty());
    }

    #[test]
    fn test_union_ignores_empty() {
        let a = Rect::new(4, 4, 2, 2);
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
    }

    #[test]
    fn test_clipped_partial() {
        let r = Rect::clipped(8, 8, 14, 14, 10, 10).unwrap();
        assert_eq!(r, Rect::new(8, 8, 2, 2));
        assert!(Rect::clipped(3, 3, 3, 9, 10, 10).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "Rect(1, 2, 3x4)");
    }
}
