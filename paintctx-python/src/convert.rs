//! Argument conversions that resolve overloaded Python arguments by type.

use crate::error::IntoPyResult;
use crate::types::{PyGradient, PyMatrix2D, PyPattern, PyPoint, PyRect, PyRectI};
use paintctx_rs::{BlitDest, ColorComponent, Matrix2D, Point, Rect, RectI, Rgba32, Style};
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyFloat, PyInt, PyString};

/// A color given as a 3/4-component sequence or a CSS color string.
///
/// Integer components are in `0..=255` and float components in `0.0..=1.0`.
/// Any iterable works, including numpy arrays; numpy integer scalars are read
/// through `__index__`.
pub struct ColorArg(pub Rgba32);

impl<'py> FromPyObject<'py> for ColorArg {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyString>() {
            let css: String = ob.extract()?;
            return Rgba32::parse_css(&css).into_py_result().map(ColorArg);
        }

        let components = ob
            .try_iter()?
            .map(|item| extract_component(&item?))
            .collect::<PyResult<Vec<_>>>()?;
        Rgba32::from_components(&components)
            .into_py_result()
            .map(ColorArg)
    }
}

fn extract_component(item: &Bound<'_, PyAny>) -> PyResult<ColorComponent> {
    if item.is_instance_of::<PyInt>() {
        return Ok(ColorComponent::Int(item.extract()?));
    }
    if item.is_instance_of::<PyFloat>() {
        return Ok(ColorComponent::Float(item.extract()?));
    }
    match item.extract::<i64>() {
        Ok(v) => Ok(ColorComponent::Int(v)),
        Err(_) => Ok(ColorComponent::Float(item.extract()?)),
    }
}

#[derive(FromPyObject)]
pub enum StyleArg {
    Gradient(PyGradient),
    Pattern(PyPattern),
    Color(ColorArg),
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Gradient(g) => Style::Gradient(g.inner),
            StyleArg::Pattern(p) => Style::Pattern(p.inner),
            StyleArg::Color(c) => Style::Color(c.0),
        }
    }
}

/// Resolve the `color=`, `gradient=` and `pattern=` keywords of the style
/// setters. A positional argument arrives as `color` and may be any style.
pub fn resolve_style(
    color: Option<StyleArg>,
    gradient: Option<PyGradient>,
    pattern: Option<PyPattern>,
) -> PyResult<Style> {
    match (color, gradient, pattern) {
        (Some(style), None, None) => Ok(style.into()),
        (None, Some(g), None) => Ok(Style::Gradient(g.inner)),
        (None, None, Some(p)) => Ok(Style::Pattern(p.inner)),
        _ => Err(PyTypeError::new_err(
            "expected exactly one of color, gradient or pattern",
        )),
    }
}

#[derive(FromPyObject)]
pub enum PointArg {
    Point(PyPoint),
    Tuple((f64, f64)),
}

impl From<PointArg> for Point {
    fn from(arg: PointArg) -> Self {
        match arg {
            PointArg::Point(pt) => pt.into(),
            PointArg::Tuple((x, y)) => Point::new(x, y),
        }
    }
}

#[derive(FromPyObject)]
pub enum RectArg {
    Rect(PyRect),
    Tuple((f64, f64, f64, f64)),
}

impl From<RectArg> for Rect {
    fn from(arg: RectArg) -> Self {
        match arg {
            RectArg::Rect(r) => r.into(),
            RectArg::Tuple((x, y, w, h)) => Rect::new(x, y, w, h),
        }
    }
}

#[derive(FromPyObject)]
pub enum RectIArg {
    Rect(PyRectI),
    Tuple((i32, i32, i32, i32)),
}

impl From<RectIArg> for RectI {
    fn from(arg: RectIArg) -> Self {
        match arg {
            RectIArg::Rect(r) => r.into(),
            RectIArg::Tuple((x, y, w, h)) => RectI::new(x, y, w, h),
        }
    }
}

/// Blit destination: a point (2-tuple or `Point`) or a rectangle (4-tuple or `Rect`).
#[derive(FromPyObject)]
pub enum BlitDestArg {
    Point(PointArg),
    Rect(RectArg),
}

impl From<BlitDestArg> for BlitDest {
    fn from(arg: BlitDestArg) -> Self {
        match arg {
            BlitDestArg::Point(pt) => BlitDest::Point(pt.into()),
            BlitDestArg::Rect(r) => BlitDest::Rect(r.into()),
        }
    }
}

/// Resolve the `pt=` and `rect=` keywords of `blit_image`. A positional
/// destination arrives as `pt` and may be a point or a rectangle.
pub fn resolve_blit_dest(pt: Option<BlitDestArg>, rect: Option<RectArg>) -> PyResult<BlitDest> {
    match (pt, rect) {
        (Some(dest), None) => Ok(dest.into()),
        (None, Some(rect)) => Ok(BlitDest::Rect(rect.into())),
        (Some(_), Some(_)) => Err(PyTypeError::new_err(
            "blit_image() takes either pt or rect, not both",
        )),
        (None, None) => Err(PyTypeError::new_err(
            "blit_image() missing destination argument 'pt' or 'rect'",
        )),
    }
}

#[derive(FromPyObject)]
pub enum MatrixArg {
    Matrix(PyMatrix2D),
    Tuple((f64, f64, f64, f64, f64, f64)),
}

impl From<MatrixArg> for Matrix2D {
    fn from(arg: MatrixArg) -> Self {
        match arg {
            MatrixArg::Matrix(m) => m.into(),
            MatrixArg::Tuple((m00, m01, m10, m11, m20, m21)) => {
                Matrix2D::new(m00, m01, m10, m11, m20, m21)
            }
        }
    }
}
