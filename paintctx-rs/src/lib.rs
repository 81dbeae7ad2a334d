//! Stateful 2D drawing context built on tiny-skia and cosmic-text.
//!
//! A [`Context`] binds to a target [`Image`], keeps a stack of graphics
//! state (transform, clip, styles, alpha) and queues paint operations that
//! are rasterized onto the image by [`Context::flush`]. It uses:
//! - `tiny-skia` for path filling, stroking and compositing
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for font loading
//!
//! # Example
//!
//! ```rust
//! use paintctx_rs::{Context, Image, ImageFormat, Rect, Rgba32};
//!
//! let image = Image::new(64, 64, ImageFormat::Prgb32)?;
//! let mut ctx = Context::with_image(&image);
//! ctx.set_fill_style(Rgba32::new(255, 0, 0, 255))?;
//! ctx.fill_rect(Rect::new(8.0, 8.0, 32.0, 32.0))?;
//! ctx.end()?;
//! let png_data = image.to_png(None)?;
//! # assert!(!png_data.is_empty());
//! # Ok::<(), paintctx_rs::ContextError>(())
//! ```

mod color;
mod context;
mod error;
mod font;
mod font_config;
mod geometry;
mod gradient;
mod image;
mod matrix;
mod paint_op;
mod path;
mod pattern;
mod state;
mod style;

// Re-export public API
pub use color::{ColorComponent, Rgba32};
pub use context::{
    Context, ContextBuilder, ContextOptions, ContextScope, StateCookie, DEFAULT_FLUSH_THRESHOLD,
    FLUSH_THRESHOLD_ENV,
};
pub use error::{ContextError, ContextResult};
pub use font::{Font, FontFace};
pub use font_config::FontConfig;
pub use geometry::{BlitDest, Point, Rect, RectI};
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use image::{Image, ImageFormat, MAX_IMAGE_SIZE};
pub use matrix::Matrix2D;
pub use path::Path;
pub use pattern::Pattern;
pub use state::{GraphicsState, StrokeOptions};
pub use style::{
    CompOp, ExtendMode, FillRule, StrokeCap, StrokeCapPosition, StrokeJoin, Style,
};
