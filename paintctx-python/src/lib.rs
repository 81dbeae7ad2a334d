use pyo3::prelude::*;

mod context;
mod convert;
mod error;
mod types;

use context::PyContext;
use types::{
    PyCompOp, PyExtendMode, PyFillRule, PyFont, PyFontFace, PyGradient, PyImage, PyImageFormat,
    PyMatrix2D, PyPath, PyPattern, PyPoint, PyRect, PyRectI, PyStrokeCap, PyStrokeCapPosition,
    PyStrokeJoin,
};

/// 2D drawing context backed by tiny-skia.
#[pymodule]
fn paintctx(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Honour RUST_LOG; a host that already installed a logger keeps it
    let _ = env_logger::try_init();

    m.add_class::<PyContext>()?;
    m.add_class::<PyImage>()?;
    m.add_class::<PyPath>()?;
    m.add_class::<PyFontFace>()?;
    m.add_class::<PyFont>()?;
    m.add_class::<PyGradient>()?;
    m.add_class::<PyPattern>()?;
    m.add_class::<PyMatrix2D>()?;
    m.add_class::<PyPoint>()?;
    m.add_class::<PyRect>()?;
    m.add_class::<PyRectI>()?;

    m.add_class::<PyCompOp>()?;
    m.add_class::<PyFillRule>()?;
    m.add_class::<PyStrokeCap>()?;
    m.add_class::<PyStrokeCapPosition>()?;
    m.add_class::<PyStrokeJoin>()?;
    m.add_class::<PyExtendMode>()?;
    m.add_class::<PyImageFormat>()?;
    Ok(())
}
