//! Image patterns for fill and stroke styles.

use crate::error::ContextResult;
use crate::geometry::RectI;
use crate::image::Image;
use crate::matrix::Matrix2D;
use crate::style::ExtendMode;
use std::rc::Rc;
use tiny_skia::{Pixmap, Shader};

/// Image pattern.
///
/// The pattern captures the image pixels (optionally cropped to `area`) when it
/// is created; later drawing into the source image does not change it.
#[derive(Debug, Clone)]
pub struct Pattern {
    pixmap: Rc<Pixmap>,
    area: Option<RectI>,
    extend_mode: ExtendMode,
    transform: Matrix2D,
}

impl Pattern {
    /// Create a pattern from an image. `area` selects a sub-rectangle of the
    /// image and must be non-empty and lie inside it.
    pub fn new(image: &Image, area: Option<RectI>, extend_mode: ExtendMode) -> ContextResult<Self> {
        let pixmap = match area {
            None => image.snapshot(),
            Some(area) => {
                area.check_within(image.width(), image.height())?;
                let cropped = area
                    .to_skia()
                    .and_then(|rect| image.pixmap().clone_rect(rect));
                match cropped {
                    Some(pixmap) => Rc::new(pixmap),
                    None => {
                        return Err(crate::ContextError::InvalidGeometry(format!(
                            "cannot crop pattern area {:?}",
                            area
                        )))
                    }
                }
            }
        };

        Ok(Self {
            pixmap,
            area,
            extend_mode,
            transform: Matrix2D::IDENTITY,
        })
    }

    /// Set the pattern transform matrix.
    pub fn set_transform(&mut self, transform: Matrix2D) {
        self.transform = transform;
    }

    /// Get the pattern transform matrix.
    pub fn transform(&self) -> Matrix2D {
        self.transform
    }

    pub fn reset_transform(&mut self) {
        self.transform = Matrix2D::IDENTITY;
    }

    pub fn extend_mode(&self) -> ExtendMode {
        self.extend_mode
    }

    pub fn set_extend_mode(&mut self, mode: ExtendMode) {
        self.extend_mode = mode;
    }

    pub fn area(&self) -> Option<RectI> {
        self.area
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Shader in user space; the paint transform is applied by the rasterizer.
    pub(crate) fn shader(&self, opacity: f32) -> Shader<'_> {
        tiny_skia::Pattern::new(
            self.pixmap.as_ref().as_ref(),
            self.extend_mode.into(),
            tiny_skia::FilterQuality::Bilinear,
            opacity,
            self.transform.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageFormat;
    use crate::ContextError;

    #[test]
    fn test_area_crops_pixels() {
        let image = Image::new(8, 6, ImageFormat::Prgb32).unwrap();
        let pattern = Pattern::new(&image, Some(RectI::new(2, 1, 4, 3)), ExtendMode::Repeat).unwrap();
        assert_eq!((pattern.width(), pattern.height()), (4, 3));
        assert_eq!(pattern.area(), Some(RectI::new(2, 1, 4, 3)));
    }

    #[test]
    fn test_area_outside_image_is_rejected() {
        let image = Image::new(8, 6, ImageFormat::Prgb32).unwrap();
        assert!(matches!(
            Pattern::new(&image, Some(RectI::new(6, 0, 4, 3)), ExtendMode::Pad),
            Err(ContextError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_pattern_is_a_snapshot() {
        let image = Image::new(2, 2, ImageFormat::Prgb32).unwrap();
        let pattern = Pattern::new(&image, None, ExtendMode::Pad).unwrap();
        image.pixmap_mut().fill(tiny_skia::Color::WHITE);
        assert_eq!(pattern.pixmap.pixel(0, 0).map(|p| p.alpha()), Some(0));
    }

    #[test]
    fn test_clone_shares_pixels_but_not_transform() {
        let image = Image::new(2, 2, ImageFormat::Prgb32).unwrap();
        let a = Pattern::new(&image, None, ExtendMode::Pad).unwrap();
        let mut b = a.clone();
        b.set_transform(Matrix2D::translation(3.0, 4.0));
        assert!(Rc::ptr_eq(&a.pixmap, &b.pixmap));
        assert!(a.transform().is_identity());
        assert!(!b.transform().is_identity());
    }
}
