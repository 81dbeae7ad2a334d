//! Raster images used as drawing targets, blit sources and pattern sources.

use crate::color::Rgba32;
use crate::error::{ContextError, ContextResult};
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;
use tiny_skia::Pixmap;

/// Largest width or height accepted for an image.
pub const MAX_IMAGE_SIZE: u32 = 32767;

/// Pixel format of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// 32-bit premultiplied RGBA.
    #[default]
    Prgb32,
    /// 32-bit RGB with the alpha channel held at 255.
    Xrgb32,
}

#[derive(Debug)]
struct ImageData {
    format: ImageFormat,
    pixmap: RefCell<Pixmap>,
}

/// A shared handle to pixel storage.
///
/// Cloning an `Image` yields another handle to the same pixels, so a context
/// drawing into an image and the caller holding it observe the same data.
#[derive(Debug, Clone)]
pub struct Image {
    inner: Rc<ImageData>,
}

impl Image {
    /// Create a new image. `Prgb32` images start fully transparent, `Xrgb32`
    /// images start opaque black.
    pub fn new(width: u32, height: u32, format: ImageFormat) -> ContextResult<Self> {
        check_dimensions(width, height)?;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ContextError::InvalidDimensions { width, height })?;
        if format == ImageFormat::Xrgb32 {
            pixmap.fill(tiny_skia::Color::BLACK);
        }
        log::debug!(target: "canvas", "new image {}x{} {:?}", width, height, format);
        Ok(Self::from_pixmap(pixmap, format))
    }

    /// Create an image from non-premultiplied RGBA bytes (4 bytes per pixel, row-major).
    pub fn from_rgba8(
        width: u32,
        height: u32,
        data: &[u8],
        format: ImageFormat,
    ) -> ContextResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ContextError::InvalidValue(format!(
                "expected {} bytes of RGBA data for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ContextError::InvalidDimensions { width, height })?;
        premultiply_into(data, pixmap.data_mut());
        let image = Self::from_pixmap(pixmap, format);
        image.force_opaque_if_needed();
        Ok(image)
    }

    /// Decode a PNG image.
    pub fn from_png(data: &[u8]) -> ContextResult<Self> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => bytes.to_vec(),
            png::ColorType::Rgb => bytes
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => bytes
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(ContextError::InvalidFormat(
                    "indexed PNG was not expanded".to_string(),
                ))
            }
        };

        Self::from_rgba8(info.width, info.height, &rgba, ImageFormat::Prgb32)
    }

    /// Read a PNG image from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> ContextResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!(target: "canvas", "read image {}", path.as_ref().display());
        Self::from_png(&data)
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap, format: ImageFormat) -> Self {
        Self {
            inner: Rc::new(ImageData {
                format,
                pixmap: RefCell::new(pixmap),
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.inner.pixmap.borrow().width()
    }

    pub fn height(&self) -> u32 {
        self.inner.pixmap.borrow().height()
    }

    pub fn format(&self) -> ImageFormat {
        self.inner.format
    }

    /// Whether two handles refer to the same pixel storage.
    pub fn is_same(&self, other: &Image) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Non-premultiplied RGBA bytes of the whole image.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let pixmap = self.inner.pixmap.borrow();
        let mut data = vec![0u8; pixmap.data().len()];
        demultiply_into(pixmap.data(), &mut data);
        data
    }

    /// The non-premultiplied color at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba32> {
        let pixmap = self.inner.pixmap.borrow();
        if x >= pixmap.width() || y >= pixmap.height() {
            return None;
        }
        let c = pixmap.pixel(x, y)?.demultiply();
        Some(Rgba32::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Encode the image as PNG.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> ContextResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);
        let (width, height) = (self.width(), self.height());

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.to_rgba8())?;
        }
        Ok(buf)
    }

    /// Encode the image as PNG and write it to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> ContextResult<()> {
        let png_data = self.to_png(None)?;
        std::fs::write(path.as_ref(), png_data)?;
        log::debug!(target: "canvas", "wrote image {}", path.as_ref().display());
        Ok(())
    }

    /// Copy of the current pixels, detached from later writes.
    pub(crate) fn snapshot(&self) -> Rc<Pixmap> {
        Rc::new(self.inner.pixmap.borrow().clone())
    }

    pub(crate) fn pixmap(&self) -> Ref<'_, Pixmap> {
        self.inner.pixmap.borrow()
    }

    pub(crate) fn pixmap_mut(&self) -> RefMut<'_, Pixmap> {
        self.inner.pixmap.borrow_mut()
    }

    /// Hold the alpha channel of `Xrgb32` images at 255.
    pub(crate) fn force_opaque_if_needed(&self) {
        if self.inner.format != ImageFormat::Xrgb32 {
            return;
        }
        let mut pixmap = self.inner.pixmap.borrow_mut();
        for px in pixmap.data_mut().chunks_exact_mut(4) {
            px[3] = 255;
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> ContextResult<()> {
    if width == 0 || height == 0 || width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
        return Err(ContextError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Convert straight RGBA to premultiplied RGBA.
fn premultiply_into(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let a = s[3];
        // Formula: (color * alpha + 127) / 255 for proper rounding
        let (r, g, b) = match a {
            255 => (s[0], s[1], s[2]),
            0 => (0, 0, 0),
            _ => {
                let a16 = a as u16;
                (
                    ((s[0] as u16 * a16 + 127) / 255) as u8,
                    ((s[1] as u16 * a16 + 127) / 255) as u8,
                    ((s[2] as u16 * a16 + 127) / 255) as u8,
                )
            }
        };
        d.copy_from_slice(&[r, g, b, a]);
    }
}

/// Convert premultiplied RGBA to straight RGBA.
fn demultiply_into(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let a = s[3];
        match a {
            0 => d.copy_from_slice(&[0, 0, 0, 0]),
            255 => d.copy_from_slice(s),
            _ => {
                let alpha_f = a as f32 / 255.0;
                d[0] = (s[0] as f32 / alpha_f).round().min(255.0) as u8;
                d[1] = (s[1] as f32 / alpha_f).round().min(255.0) as u8;
                d[2] = (s[2] as f32 / alpha_f).round().min(255.0) as u8;
                d[3] = a;
            }
        }
    }
}
