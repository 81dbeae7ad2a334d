//! Geometry argument types for drawing operations.

use crate::error::{ContextError, ContextResult};

/// A point in user space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in user space given by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Convert to a tiny-skia rect. Returns `None` for empty or negative extents.
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        if self.w <= 0.0 || self.h <= 0.0 {
            return None;
        }
        tiny_skia::Rect::from_xywh(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

/// An integer rectangle, used to select a source area of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RectI {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Check that the rectangle is non-empty and lies inside a `width` x `height` image.
    pub(crate) fn check_within(self, width: u32, height: u32) -> ContextResult<()> {
        let inside = self.x >= 0
            && self.y >= 0
            && self.w > 0
            && self.h > 0
            && (self.x as i64 + self.w as i64) <= width as i64
            && (self.y as i64 + self.h as i64) <= height as i64;
        if inside {
            Ok(())
        } else {
            Err(ContextError::InvalidGeometry(format!(
                "area {:?} is not inside a {}x{} image",
                self, width, height
            )))
        }
    }

    pub(crate) fn to_skia(self) -> Option<tiny_skia::IntRect> {
        tiny_skia::IntRect::from_xywh(self.x, self.y, self.w as u32, self.h as u32)
    }
}

/// Destination of an image blit: a point (unscaled) or a rectangle (scaled to fit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlitDest {
    Point(Point),
    Rect(Rect),
}

impl From<Point> for BlitDest {
    fn from(pt: Point) -> Self {
        BlitDest::Point(pt)
    }
}

impl From<Rect> for BlitDest {
    fn from(rect: Rect) -> Self {
        BlitDest::Rect(rect)
    }
}

/// Reject geometry containing NaN or infinite values.
pub(crate) fn ensure_finite(what: &str, values: &[f64]) -> ContextResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ContextError::InvalidGeometry(format!(
            "{} has non-finite coordinates: {:?}",
            what, values
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_to_skia_rejects_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).to_skia().is_none());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).to_skia().is_none());
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).to_skia().unwrap();
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (1.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn test_rect_i_check_within() {
        assert!(RectI::new(0, 0, 10, 10).check_within(10, 10).is_ok());
        assert!(RectI::new(5, 5, 6, 1).check_within(10, 10).is_err());
        assert!(RectI::new(-1, 0, 2, 2).check_within(10, 10).is_err());
        assert!(RectI::new(0, 0, 0, 2).check_within(10, 10).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("rect", &[0.0, 1.0]).is_ok());
        assert!(matches!(
            ensure_finite("rect", &[0.0, f64::NAN]),
            Err(ContextError::InvalidGeometry(_))
        ));
    }
}
