//! Display-space to image-space mapping.
//!
//! Images are shown scaled to fit their container while keeping their
//! aspect ratio. When the container is relatively wider than the image the
//! picture is pillarboxed (bars left and right); otherwise it is letterboxed
//! (bars top and bottom). Pointer positions must undo that fit before they
//! can address pixels.
//!
//! ```text
//!  container wider than image          container taller than image
//! ┌──┬────────────┬──┐                ┌──────────────┐
//! │  │            │  │                ├──────────────┤ offset_y
//! │  │   image    │  │                │    image     │
//! │  │            │  │                ├──────────────┤
//! └──┴────────────┴──┘                └──────────────┘
//!  offset_x
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pairmask_core::Viewport;
//!
//! // 200x100 container showing a 100x100 image: 50px bars left and right
//! let vp = Viewport::new(200.0, 100.0);
//! assert_eq!(vp.to_image(100.0, 50.0, 100, 100), (50, 50));
//! assert_eq!(vp.to_image(10.0, 50.0, 100, 100), (0, 50));
//! assert_eq!(vp.brush_radius(30.0, 100, 100), 15);
//! ```

/// Size of the on-screen area an image is fitted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Container width in display units
    pub display_width: f64,
    /// Container height in display units
    pub display_height: f64,
}

impl Viewport {
    /// Creates a viewport of the given display size.
    #[inline]
    pub const fn new(display_width: f64, display_height: f64) -> Self {
        Self {
            display_width,
            display_height,
        }
    }

    /// Returns `true` if the container cannot show anything.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.display_width > 0.0 && self.display_height > 0.0)
    }

    /// Maps a display-space point to an image pixel.
    ///
    /// The result is clamped to `[0, W-1] x [0, H-1]` and truncated toward
    /// zero. A degenerate viewport or empty image maps everything to (0, 0).
    pub fn to_image(&self, x: f64, y: f64, image_width: u32, image_height: u32) -> (i32, i32) {
        if self.is_degenerate() || image_width == 0 || image_height == 0 {
            return (0, 0);
        }
        let iw = image_width as f64;
        let ih = image_height as f64;
        let image_aspect = iw / ih;
        let container_aspect = self.display_width / self.display_height;

        let mut render_w = self.display_width;
        let mut render_h = self.display_height;
        let (mut offset_x, mut offset_y) = (0.0, 0.0);
        if container_aspect > image_aspect {
            render_w = iw * (self.display_height / ih);
            offset_x = (self.display_width - render_w) / 2.0;
        } else {
            render_h = ih * (self.display_width / iw);
            offset_y = (self.display_height - render_h) / 2.0;
        }

        let ix = ((x - offset_x) * (iw / render_w)).clamp(0.0, iw - 1.0);
        let iy = ((y - offset_y) * (ih / render_h)).clamp(0.0, ih - 1.0);
        (ix as i32, iy as i32)
    }

    /// Converts a display-space brush diameter to an image-space radius.
    ///
    /// `trunc(diameter / 2 * max(W / display_w, H / display_h))`
    pub fn brush_radius(&self, diameter: f64, image_width: u32, image_height: u32) -> u32 {
        if self.is_degenerate() || diameter <= 0.0 {
            return 0;
        }
        let scale = (image_width as f64 / self.display_width)
            .max(image_height as f64 / self.display_height);
        (diameter / 2.0 * scale) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_top_bottom() {
        // 100x200 container, 100x100 image: 50px bars top and bottom
        let vp = Viewport::new(100.0, 200.0);
        assert_eq!(vp.to_image(50.0, 100.0, 100, 100), (50, 50));
        assert_eq!(vp.to_image(50.0, 10.0, 100, 100), (50, 0));
        assert_eq!(vp.to_image(50.0, 190.0, 100, 100), (50, 99));
    }

    #[test]
    fn test_scaled_down_display() {
        // 4000x2000 image in a 400x200 container
        let vp = Viewport::new(400.0, 200.0);
        assert_eq!(vp.to_image(100.0, 50.0, 4000, 2000), (1000, 500));
        assert_eq!(vp.brush_radius(30.0, 4000, 2000), 150);
    }

    #[test]
    fn test_clamped_to_last_pixel() {
        let vp = Viewport::new(100.0, 100.0);
        assert_eq!(vp.to_image(1e6, -1e6, 10, 10), (9, 0));
    }

    #[test]
    fn test_degenerate() {
        let vp = Viewport::new(0.0, 100.0);
        assert_eq!(vp.to_image(5.0, 5.0, 10, 10), (0, 0));
        assert_eq!(vp.brush_radius(30.0, 10, 10), 0);
    }

    #[test]
    fn test_radius_truncates() {
        let vp = Viewport::new(100.0, 100.0);
        assert_eq!(vp.brush_radius(3.0, 100, 100), 1);
        assert_eq!(vp.brush_radius(1.0, 100, 100), 0);
    }
}
