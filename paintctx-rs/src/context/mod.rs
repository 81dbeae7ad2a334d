//! Drawing context implementation.

mod drawing;
mod image_ops;
mod scope;
mod text_rendering;
mod transform;

pub use scope::{ContextScope, StateCookie};

use crate::error::{ContextError, ContextResult};
use crate::font_config::FontConfig;
use crate::image::Image;
use crate::paint_op::PaintOp;
use crate::state::{checked_alpha, checked_dash_array, checked_finite, GraphicsState, StrokeOptions};
use crate::style::{CompOp, FillRule, StrokeCap, StrokeCapPosition, StrokeJoin, Style};
use cosmic_text::{FontSystem, SwashCache};
use std::collections::HashSet;
use std::rc::Rc;

/// Number of queued operations that triggers an automatic flush.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 256;

/// Environment variable overriding [`ContextOptions::flush_threshold`].
pub const FLUSH_THRESHOLD_ENV: &str = "PAINTCTX_FLUSH_THRESHOLD";

/// Context configuration.
#[derive(Clone, Debug)]
pub struct ContextOptions {
    /// Queue length at which pending operations are flushed automatically.
    /// `0` disables automatic flushing.
    pub flush_threshold: usize,
    /// Fonts available as fallback when rendering text.
    pub font_config: FontConfig,
}

impl Default for ContextOptions {
    fn default() -> Self {
        let flush_threshold = match std::env::var(FLUSH_THRESHOLD_ENV) {
            Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "ignoring invalid {}={:?}, using {}",
                    FLUSH_THRESHOLD_ENV,
                    value,
                    DEFAULT_FLUSH_THRESHOLD
                );
                DEFAULT_FLUSH_THRESHOLD
            }),
            Err(_) => DEFAULT_FLUSH_THRESHOLD,
        };
        Self {
            flush_threshold,
            font_config: FontConfig::default(),
        }
    }
}

/// Builder for creating a Context with custom options.
#[derive(Default)]
pub struct ContextBuilder {
    options: ContextOptions,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the automatic flush threshold.
    pub fn flush_threshold(mut self, threshold: usize) -> Self {
        self.options.flush_threshold = threshold;
        self
    }

    /// Set the font configuration used for fallback fonts.
    pub fn font_config(mut self, config: FontConfig) -> Self {
        self.options.font_config = config;
        self
    }

    /// Build a detached context.
    pub fn build(self) -> Context {
        Context::detached(self.options)
    }

    /// Build a context attached to `image`.
    pub fn build_with_image(self, image: &Image) -> Context {
        Context::with_options(image, self.options)
    }
}

/// Stateful drawing context.
///
/// A context is either detached or attached to a target [`Image`]. Paint
/// calls are queued and rasterized onto the target by [`Context::flush`],
/// which also runs automatically when the queue reaches the configured
/// threshold and when the context is ended or dropped.
pub struct Context {
    /// Target image, `None` while detached.
    target: Option<Image>,
    /// Current graphics state.
    pub(crate) state: GraphicsState,
    /// Stack of saved graphics states.
    state_stack: Vec<GraphicsState>,
    /// Paint operations waiting for the next flush.
    pending: Vec<PaintOp>,
    options: ContextOptions,
    /// Font system for text rendering, created on first use.
    pub(crate) font_system: Option<FontSystem>,
    /// Swash cache for glyph outlines.
    pub(crate) swash_cache: SwashCache,
    /// Font faces already loaded into the font system.
    pub(crate) registered_faces: HashSet<u64>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a detached context with default options.
    pub fn new() -> Self {
        Self::detached(ContextOptions::default())
    }

    /// Create a context attached to `image`.
    pub fn with_image(image: &Image) -> Self {
        Self::with_options(image, ContextOptions::default())
    }

    /// Create a context attached to `image` with custom options.
    pub fn with_options(image: &Image, options: ContextOptions) -> Self {
        let mut ctx = Self::detached(options);
        log::debug!(target: "canvas", "begin {}x{}", image.width(), image.height());
        ctx.target = Some(image.clone());
        ctx
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    fn detached(options: ContextOptions) -> Self {
        Self {
            target: None,
            state: GraphicsState::default(),
            state_stack: Vec::new(),
            pending: Vec::new(),
            options,
            font_system: None,
            swash_cache: SwashCache::new(),
            registered_faces: HashSet::new(),
        }
    }

    /// Attach to `image`. An existing binding is ended first.
    pub fn begin(&mut self, image: &Image) -> ContextResult<()> {
        self.end()?;
        log::debug!(target: "canvas", "begin {}x{}", image.width(), image.height());
        self.target = Some(image.clone());
        Ok(())
    }

    /// Flush pending operations and detach from the target.
    ///
    /// Calling `end` on a detached context does nothing. The binding is
    /// released and the graphics state reset even when the flush fails.
    pub fn end(&mut self) -> ContextResult<()> {
        if self.target.is_none() {
            return Ok(());
        }
        log::debug!(target: "canvas", "end");
        let result = self.flush();
        self.pending.clear();
        self.target = None;
        self.state = GraphicsState::default();
        self.state_stack.clear();
        result
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// The target image, if attached.
    pub fn target(&self) -> Option<&Image> {
        self.target.as_ref()
    }

    /// Width and height of the target image.
    pub fn target_size(&self) -> ContextResult<(u32, u32)> {
        let target = self.target.as_ref().ok_or(ContextError::InvalidState)?;
        Ok((target.width(), target.height()))
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub(crate) fn ensure_attached(&self) -> ContextResult<()> {
        if self.target.is_some() {
            Ok(())
        } else {
            Err(ContextError::InvalidState)
        }
    }

    // --- Paint queue ---

    /// Rasterize all pending operations onto the target, in submission order.
    pub fn flush(&mut self) -> ContextResult<()> {
        let target = self.target.as_ref().ok_or(ContextError::InvalidState)?;
        if self.pending.is_empty() {
            return Ok(());
        }
        log::debug!(target: "canvas", "flush {} ops", self.pending.len());
        {
            let mut pixmap = target.pixmap_mut();
            for op in self.pending.drain(..) {
                op.execute(&mut pixmap);
            }
        }
        target.force_opaque_if_needed();
        Ok(())
    }

    /// Number of queued paint operations.
    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[PaintOp] {
        &self.pending
    }

    pub(crate) fn submit(&mut self, op: PaintOp) -> ContextResult<()> {
        self.pending.push(op);
        let threshold = self.options.flush_threshold;
        if threshold > 0 && self.pending.len() >= threshold {
            self.flush()?;
        }
        Ok(())
    }

    // --- State stack ---

    /// Push a copy of the current graphics state.
    pub fn save(&mut self) -> ContextResult<StateCookie> {
        self.ensure_attached()?;
        log::debug!(target: "canvas", "save");
        let cookie = StateCookie::new(self.state_stack.len());
        self.state_stack.push(self.state.clone());
        Ok(cookie)
    }

    /// Pop the most recently saved graphics state.
    pub fn restore(&mut self) -> ContextResult<()> {
        self.ensure_attached()?;
        log::debug!(target: "canvas", "restore");
        let state = self
            .state_stack
            .pop()
            .ok_or(ContextError::NoStatesToRestore)?;
        self.state = state;
        Ok(())
    }

    /// Restore the state saved when `cookie` was returned, discarding any
    /// states saved after it.
    pub fn restore_to(&mut self, cookie: StateCookie) -> ContextResult<()> {
        self.ensure_attached()?;
        log::debug!(target: "canvas", "restore_to {}", cookie.depth());
        if self.state_stack.len() <= cookie.depth() {
            return Err(ContextError::NoStatesToRestore);
        }
        self.state_stack.truncate(cookie.depth() + 1);
        self.restore()
    }

    /// Number of saved states.
    pub fn saved_states(&self) -> usize {
        self.state_stack.len()
    }

    /// The current graphics state.
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Clip of the most recently saved state.
    pub(crate) fn saved_clip(&self) -> Option<Rc<tiny_skia::Mask>> {
        self.state_stack.last().and_then(|state| state.clip.clone())
    }

    // --- Paint state ---

    pub fn comp_op(&self) -> CompOp {
        self.state.comp_op
    }

    pub fn set_comp_op(&mut self, op: CompOp) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.comp_op = op;
        Ok(())
    }

    pub fn global_alpha(&self) -> f64 {
        self.state.global_alpha
    }

    pub fn set_global_alpha(&mut self, alpha: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.global_alpha = checked_alpha(alpha)?;
        Ok(())
    }

    pub fn fill_alpha(&self) -> f64 {
        self.state.fill_alpha
    }

    pub fn set_fill_alpha(&mut self, alpha: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.fill_alpha = checked_alpha(alpha)?;
        Ok(())
    }

    pub fn stroke_alpha(&self) -> f64 {
        self.state.stroke_alpha
    }

    pub fn set_stroke_alpha(&mut self, alpha: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke_alpha = checked_alpha(alpha)?;
        Ok(())
    }

    pub fn fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.fill_rule = rule;
        Ok(())
    }

    pub fn fill_style(&self) -> &Style {
        &self.state.fill_style
    }

    /// Set the fill style to a color, gradient or pattern.
    pub fn set_fill_style(&mut self, style: impl Into<Style>) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.fill_style = style.into();
        Ok(())
    }

    pub fn stroke_style(&self) -> &Style {
        &self.state.stroke_style
    }

    /// Set the stroke style to a color, gradient or pattern.
    pub fn set_stroke_style(&mut self, style: impl Into<Style>) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke_style = style.into();
        Ok(())
    }

    // --- Stroke options ---

    pub fn stroke_options(&self) -> &StrokeOptions {
        &self.state.stroke
    }

    pub fn stroke_width(&self) -> f64 {
        self.state.stroke.width
    }

    pub fn set_stroke_width(&mut self, width: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.width = checked_finite("stroke width", width)?;
        Ok(())
    }

    pub fn stroke_miter_limit(&self) -> f64 {
        self.state.stroke.miter_limit
    }

    pub fn set_stroke_miter_limit(&mut self, limit: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.miter_limit = checked_finite("miter limit", limit)?;
        Ok(())
    }

    pub fn stroke_join(&self) -> StrokeJoin {
        self.state.stroke.join
    }

    pub fn set_stroke_join(&mut self, join: StrokeJoin) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.join = join;
        Ok(())
    }

    pub fn stroke_cap(&self, position: StrokeCapPosition) -> StrokeCap {
        self.state.stroke.cap(position)
    }

    /// Set the cap at one end of strokes.
    pub fn set_stroke_cap(&mut self, position: StrokeCapPosition, cap: StrokeCap) -> ContextResult<()> {
        self.ensure_attached()?;
        match position {
            StrokeCapPosition::Start => self.state.stroke.start_cap = cap,
            StrokeCapPosition::End => self.state.stroke.end_cap = cap,
        }
        Ok(())
    }

    /// Set the cap at both ends of strokes.
    pub fn set_stroke_caps(&mut self, cap: StrokeCap) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.start_cap = cap;
        self.state.stroke.end_cap = cap;
        Ok(())
    }

    pub fn stroke_dash_offset(&self) -> f64 {
        self.state.stroke.dash_offset
    }

    pub fn set_stroke_dash_offset(&mut self, offset: f64) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.dash_offset = checked_finite("dash offset", offset)?;
        Ok(())
    }

    pub fn stroke_dash_array(&self) -> &[f64] {
        &self.state.stroke.dash_array
    }

    /// Set the dash pattern. An empty slice draws solid strokes.
    pub fn set_stroke_dash_array(&mut self, segments: &[f64]) -> ContextResult<()> {
        self.ensure_attached()?;
        self.state.stroke.dash_array = checked_dash_array(segments)?;
        Ok(())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if let Err(err) = self.end() {
            log::warn!("failed to flush context on drop: {}", err);
        }
    }
}
