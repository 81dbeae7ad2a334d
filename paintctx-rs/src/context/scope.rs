//! Scoped save/restore for Context.

use super::Context;
use crate::error::ContextResult;
use std::ops::{Deref, DerefMut};

/// Marks a position on the state stack, returned by [`Context::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCookie {
    depth: usize,
}

impl StateCookie {
    pub(crate) fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Stack depth before the save that produced this cookie.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Guard that saves the graphics state on creation and restores it on drop.
///
/// The guard derefs to the context, so drawing goes through it:
///
/// ```
/// use paintctx_rs::{Context, Image, ImageFormat};
///
/// let image = Image::new(16, 16, ImageFormat::Prgb32).unwrap();
/// let mut ctx = Context::with_image(&image);
/// {
///     let mut scope = ctx.scope().unwrap();
///     scope.translate(4.0, 4.0).unwrap();
/// }
/// assert!(ctx.user_transform().is_identity());
/// ```
pub struct ContextScope<'a> {
    ctx: &'a mut Context,
    cookie: StateCookie,
}

impl Deref for ContextScope<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.ctx
    }
}

impl DerefMut for ContextScope<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for ContextScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.ctx.restore_to(self.cookie) {
            log::warn!("failed to restore scoped state: {}", err);
        }
    }
}

impl Context {
    /// Save the state and return a guard that restores it when dropped.
    pub fn scope(&mut self) -> ContextResult<ContextScope<'_>> {
        let cookie = self.save()?;
        Ok(ContextScope { ctx: self, cookie })
    }

    /// Run `f` between a save and a restore. The state is restored whether
    /// `f` returns `Ok`, returns `Err` or panics.
    pub fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Context) -> ContextResult<T>,
    ) -> ContextResult<T> {
        let mut scope = self.scope()?;
        f(&mut *scope)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageFormat};
    use crate::{Context, ContextError};

    #[test]
    fn test_scope_restores_on_drop() {
        let image = Image::new(4, 4, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&image);
        {
            let mut scope = ctx.scope().unwrap();
            scope.set_stroke_width(9.0).unwrap();
            assert_eq!(scope.saved_states(), 1);
        }
        assert_eq!(ctx.stroke_width(), 1.0);
        assert_eq!(ctx.saved_states(), 0);
    }

    #[test]
    fn test_scoped_restores_on_error() {
        let image = Image::new(4, 4, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&image);
        let result: Result<(), ContextError> = ctx.scoped(|ctx| {
            ctx.set_global_alpha(0.25)?;
            ctx.set_stroke_width(f64::NAN)
        });
        assert!(result.is_err());
        assert_eq!(ctx.global_alpha(), 1.0);
    }

    #[test]
    fn test_inner_unbalanced_save_is_discarded() {
        let image = Image::new(4, 4, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&image);
        ctx.scoped(|ctx| {
            ctx.save()?;
            ctx.save()?;
            ctx.set_fill_alpha(0.5)
        })
        .unwrap();
        assert_eq!(ctx.saved_states(), 0);
        assert_eq!(ctx.fill_alpha(), 1.0);
    }

    #[test]
    fn test_scope_on_detached_context_fails() {
        let mut ctx = Context::new();
        assert!(matches!(ctx.scope(), Err(ContextError::InvalidState)));
    }
}
