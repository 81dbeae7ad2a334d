//! Python wrappers for the value and resource types of paintctx-rs.

use crate::convert::{ColorArg, RectArg, RectIArg};
use crate::error::IntoPyResult;
use paintctx_rs::{
    CompOp, ExtendMode, FillRule, Font, FontFace, Gradient, GradientKind, Image, ImageFormat,
    Matrix2D, Path, Pattern, Point, Rect, RectI, StrokeCap, StrokeCapPosition, StrokeJoin,
};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

/// Declare a Python enum mirroring a Rust enum, with conversions both ways.
macro_rules! py_enum {
    ($py:ident => $rs:ident as $name:literal { $($variant:ident = $py_name:literal),+ $(,)? }) => {
        #[pyclass(eq, eq_int, name = $name)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $py {
            $(
                #[pyo3(name = $py_name)]
                $variant,
            )+
        }

        impl From<$py> for $rs {
            fn from(value: $py) -> Self {
                match value {
                    $($py::$variant => $rs::$variant,)+
                }
            }
        }

        impl From<$rs> for $py {
            fn from(value: $rs) -> Self {
                match value {
                    $($rs::$variant => $py::$variant,)+
                }
            }
        }
    };
}

py_enum!(PyCompOp => CompOp as "CompOp" {
    SrcOver = "COMP_OP_SRC_OVER",
    SrcCopy = "COMP_OP_SRC_COPY",
    SrcIn = "COMP_OP_SRC_IN",
    SrcOut = "COMP_OP_SRC_OUT",
    SrcAtop = "COMP_OP_SRC_ATOP",
    DstOver = "COMP_OP_DST_OVER",
    DstCopy = "COMP_OP_DST_COPY",
    DstIn = "COMP_OP_DST_IN",
    DstOut = "COMP_OP_DST_OUT",
    DstAtop = "COMP_OP_DST_ATOP",
    Xor = "COMP_OP_XOR",
    Clear = "COMP_OP_CLEAR",
    Plus = "COMP_OP_PLUS",
    Modulate = "COMP_OP_MODULATE",
    Multiply = "COMP_OP_MULTIPLY",
    Screen = "COMP_OP_SCREEN",
    Overlay = "COMP_OP_OVERLAY",
    Darken = "COMP_OP_DARKEN",
    Lighten = "COMP_OP_LIGHTEN",
    ColorDodge = "COMP_OP_COLOR_DODGE",
    ColorBurn = "COMP_OP_COLOR_BURN",
    HardLight = "COMP_OP_HARD_LIGHT",
    SoftLight = "COMP_OP_SOFT_LIGHT",
    Difference = "COMP_OP_DIFFERENCE",
    Exclusion = "COMP_OP_EXCLUSION",
});

py_enum!(PyFillRule => FillRule as "FillRule" {
    NonZero = "FILL_RULE_NON_ZERO",
    EvenOdd = "FILL_RULE_EVEN_ODD",
});

py_enum!(PyStrokeCap => StrokeCap as "StrokeCap" {
    Butt = "CAP_BUTT",
    Square = "CAP_SQUARE",
    Round = "CAP_ROUND",
    RoundRev = "CAP_ROUND_REV",
    Triangle = "CAP_TRIANGLE",
    TriangleRev = "CAP_TRIANGLE_REV",
});

py_enum!(PyStrokeCapPosition => StrokeCapPosition as "StrokeCapPosition" {
    Start = "CAP_POSITION_START",
    End = "CAP_POSITION_END",
});

py_enum!(PyStrokeJoin => StrokeJoin as "StrokeJoin" {
    MiterClip = "JOIN_MITER_CLIP",
    MiterBevel = "JOIN_MITER_BEVEL",
    MiterRound = "JOIN_MITER_ROUND",
    Bevel = "JOIN_BEVEL",
    Round = "JOIN_ROUND",
});

py_enum!(PyExtendMode => ExtendMode as "ExtendMode" {
    Pad = "EXTEND_MODE_PAD",
    Repeat = "EXTEND_MODE_REPEAT",
    Reflect = "EXTEND_MODE_REFLECT",
});

py_enum!(PyImageFormat => ImageFormat as "ImageFormat" {
    Prgb32 = "FORMAT_PRGB32",
    Xrgb32 = "FORMAT_XRGB32",
});

#[pyclass(name = "Point", eq)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyPoint {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl PyPoint {
    #[new]
    #[pyo3(signature = (x=0.0, y=0.0))]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Point({}, {})", self.x, self.y)
    }
}

impl From<PyPoint> for Point {
    fn from(pt: PyPoint) -> Self {
        Point::new(pt.x, pt.y)
    }
}

#[pyclass(name = "Rect", eq)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyRect {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub w: f64,
    #[pyo3(get, set)]
    pub h: f64,
}

#[pymethods]
impl PyRect {
    #[new]
    #[pyo3(signature = (x=0.0, y=0.0, w=0.0, h=0.0))]
    fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn __repr__(&self) -> String {
        format!("Rect({}, {}, {}, {})", self.x, self.y, self.w, self.h)
    }
}

impl From<PyRect> for Rect {
    fn from(r: PyRect) -> Self {
        Rect::new(r.x, r.y, r.w, r.h)
    }
}

#[pyclass(name = "RectI", eq)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyRectI {
    #[pyo3(get, set)]
    pub x: i32,
    #[pyo3(get, set)]
    pub y: i32,
    #[pyo3(get, set)]
    pub w: i32,
    #[pyo3(get, set)]
    pub h: i32,
}

#[pymethods]
impl PyRectI {
    #[new]
    #[pyo3(signature = (x=0, y=0, w=0, h=0))]
    fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    fn __repr__(&self) -> String {
        format!("RectI({}, {}, {}, {})", self.x, self.y, self.w, self.h)
    }
}

impl From<PyRectI> for RectI {
    fn from(r: PyRectI) -> Self {
        RectI::new(r.x, r.y, r.w, r.h)
    }
}

#[pyclass(name = "Matrix2D", eq)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyMatrix2D {
    #[pyo3(get, set)]
    pub m00: f64,
    #[pyo3(get, set)]
    pub m01: f64,
    #[pyo3(get, set)]
    pub m10: f64,
    #[pyo3(get, set)]
    pub m11: f64,
    #[pyo3(get, set)]
    pub m20: f64,
    #[pyo3(get, set)]
    pub m21: f64,
}

#[pymethods]
impl PyMatrix2D {
    #[new]
    #[pyo3(signature = (m00=1.0, m01=0.0, m10=0.0, m11=1.0, m20=0.0, m21=0.0))]
    fn new(m00: f64, m01: f64, m10: f64, m11: f64, m20: f64, m21: f64) -> Self {
        Matrix2D::new(m00, m01, m10, m11, m20, m21).into()
    }

    #[staticmethod]
    fn identity() -> Self {
        Matrix2D::IDENTITY.into()
    }

    #[staticmethod]
    fn translation(x: f64, y: f64) -> Self {
        Matrix2D::translation(x, y).into()
    }

    #[staticmethod]
    fn scaling(x: f64, y: f64) -> Self {
        Matrix2D::scaling(x, y).into()
    }

    #[staticmethod]
    fn rotation(angle: f64) -> Self {
        Matrix2D::rotation(angle).into()
    }

    #[staticmethod]
    fn skewing(x: f64, y: f64) -> Self {
        Matrix2D::skewing(x, y).into()
    }

    /// Matrix that applies `self` and then `other`.
    fn then(&self, other: PyMatrix2D) -> Self {
        Matrix2D::from(*self).then(&other.into()).into()
    }

    fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        let pt = Matrix2D::from(*self).map_point(Point::new(x, y));
        (pt.x, pt.y)
    }

    fn __repr__(&self) -> String {
        format!(
            "Matrix2D({}, {}, {}, {}, {}, {})",
            self.m00, self.m01, self.m10, self.m11, self.m20, self.m21
        )
    }
}

impl From<PyMatrix2D> for Matrix2D {
    fn from(m: PyMatrix2D) -> Self {
        Matrix2D::new(m.m00, m.m01, m.m10, m.m11, m.m20, m.m21)
    }
}

impl From<Matrix2D> for PyMatrix2D {
    fn from(m: Matrix2D) -> Self {
        Self {
            m00: m.m00,
            m01: m.m01,
            m10: m.m10,
            m11: m.m11,
            m20: m.m20,
            m21: m.m21,
        }
    }
}

/// Pixel buffer shared between Python, contexts and patterns.
///
/// `Image(width, height)` allocates a new buffer. `Image(array)` copies an
/// `(height, width, 4)` uint8 RGBA array and keeps a reference to it: a
/// context drawing into the image copies the pixels back into the array on
/// `flush()`, `end()` and when it is garbage collected.
#[pyclass(name = "Image", unsendable)]
pub struct PyImage {
    pub inner: Image,
    array: Option<Py<PyAny>>,
}

impl PyImage {
    fn wrap(inner: Image) -> Self {
        Self { inner, array: None }
    }

    /// Copy the pixels back into the array the image was created from.
    pub(crate) fn sync_array(&self, py: Python<'_>) -> PyResult<()> {
        let Some(array) = &self.array else {
            return Ok(());
        };
        let pixels = self.to_numpy(py)?;
        array.bind(py).set_item(py.Ellipsis(), pixels)
    }
}

#[pymethods]
impl PyImage {
    #[new]
    #[pyo3(signature = (width, height=None, format=PyImageFormat::Prgb32))]
    fn new(width: &Bound<'_, PyAny>, height: Option<u32>, format: PyImageFormat) -> PyResult<Self> {
        match height {
            Some(height) => {
                let width: u32 = width.extract()?;
                let inner = Image::new(width, height, format.into()).into_py_result()?;
                Ok(Self::wrap(inner))
            }
            None if width.hasattr("shape")? => Self::from_array(width, format),
            None => Err(PyTypeError::new_err(
                "Image() takes width and height, or a (height, width, 4) uint8 array",
            )),
        }
    }

    /// Create an image from a `(height, width, 4)` uint8 RGBA array.
    ///
    /// Accepts numpy arrays and any object with `shape`, `dtype` and
    /// `tobytes()`.
    #[staticmethod]
    #[pyo3(signature = (array, format=PyImageFormat::Prgb32))]
    fn from_array(array: &Bound<'_, PyAny>, format: PyImageFormat) -> PyResult<Self> {
        let shape: Vec<usize> = array.getattr("shape")?.extract()?;
        let [height, width, 4] = shape[..] else {
            return Err(PyValueError::new_err(format!(
                "expected an array of shape (height, width, 4), got {:?}",
                shape
            )));
        };
        let dtype: String = array.getattr("dtype")?.str()?.extract()?;
        if dtype != "uint8" {
            return Err(PyValueError::new_err(format!(
                "expected a uint8 array, got {}",
                dtype
            )));
        }
        let to_u32 = |v: usize| {
            u32::try_from(v).map_err(|_| PyValueError::new_err("array is too large"))
        };
        let bytes = array.call_method0("tobytes")?;
        let data = bytes.downcast::<PyBytes>()?.as_bytes();
        let inner = Image::from_rgba8(to_u32(width)?, to_u32(height)?, data, format.into())
            .into_py_result()?;
        Ok(Self {
            inner,
            array: Some(array.clone().unbind()),
        })
    }

    /// Create an image from non-premultiplied RGBA bytes.
    #[staticmethod]
    #[pyo3(signature = (width, height, data, format=PyImageFormat::Prgb32))]
    fn from_rgba8(width: u32, height: u32, data: &[u8], format: PyImageFormat) -> PyResult<Self> {
        let inner = Image::from_rgba8(width, height, data, format.into()).into_py_result()?;
        Ok(Self::wrap(inner))
    }

    #[staticmethod]
    fn from_png(data: &[u8]) -> PyResult<Self> {
        let inner = Image::from_png(data).into_py_result()?;
        Ok(Self::wrap(inner))
    }

    #[staticmethod]
    fn read_from_file(path: std::path::PathBuf) -> PyResult<Self> {
        let inner = Image::read_from_file(path).into_py_result()?;
        Ok(Self::wrap(inner))
    }

    #[getter]
    fn width(&self) -> u32 {
        self.inner.width()
    }

    #[getter]
    fn height(&self) -> u32 {
        self.inner.height()
    }

    #[getter]
    fn format(&self) -> PyImageFormat {
        self.inner.format().into()
    }

    /// Pixel at `(x, y)` as an `(r, g, b, a)` tuple, or `None` outside the image.
    fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.inner
            .pixel(x, y)
            .map(|c| (c.r(), c.g(), c.b(), c.a()))
    }

    fn to_rgba8<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new(py, &self.inner.to_rgba8())
    }

    /// Non-premultiplied pixels as a new `(height, width, 4)` uint8 numpy array.
    fn to_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let numpy = py.import("numpy")?;
        let kwargs = PyDict::new(py);
        kwargs.set_item("dtype", "uint8")?;
        let shape = (self.inner.height(), self.inner.width(), 4u32);
        numpy
            .call_method("frombuffer", (self.to_rgba8(py),), Some(&kwargs))?
            .call_method1("reshape", (shape,))?
            .call_method0("copy")
    }

    #[pyo3(signature = (dtype=None, copy=None))]
    fn __array__<'py>(
        &self,
        py: Python<'py>,
        dtype: Option<&Bound<'py, PyAny>>,
        copy: Option<bool>,
    ) -> PyResult<Bound<'py, PyAny>> {
        if copy == Some(false) {
            return Err(PyValueError::new_err(
                "Image pixels cannot be exposed without a copy",
            ));
        }
        let array = self.to_numpy(py)?;
        match dtype {
            Some(dtype) if !dtype.is_none() => array.call_method1("astype", (dtype,)),
            _ => Ok(array),
        }
    }

    #[pyo3(signature = (ppi=None))]
    fn to_png<'py>(&self, py: Python<'py>, ppi: Option<f32>) -> PyResult<Bound<'py, PyBytes>> {
        let data = self.inner.to_png(ppi).into_py_result()?;
        Ok(PyBytes::new(py, &data))
    }

    fn write_to_file(&self, path: std::path::PathBuf) -> PyResult<()> {
        self.inner.write_to_file(path).into_py_result()
    }

    fn __repr__(&self) -> String {
        format!(
            "Image({}x{}, {:?})",
            self.inner.width(),
            self.inner.height(),
            self.inner.format()
        )
    }
}

#[pyclass(name = "Path")]
#[derive(Clone, Default)]
pub struct PyPath {
    pub inner: Path,
}

#[pymethods]
impl PyPath {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Parse SVG path data such as `"M 0 0 L 10 10 Z"`.
    #[staticmethod]
    fn from_svg(data: &str) -> PyResult<Self> {
        let inner = Path::from_svg_path_data(data).into_py_result()?;
        Ok(Self { inner })
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.inner.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inner.quad_to(x1, y1, x2, y2);
    }

    fn quadric_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inner.quad_to(x1, y1, x2, y2);
    }

    fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.inner.cubic_to(x1, y1, x2, y2, x3, y3);
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn add_rect(&mut self, rect: RectArg) {
        self.inner.add_rect(rect.into());
    }

    fn add_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.inner.add_circle(Point::new(cx, cy), r);
    }

    fn add_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.inner.add_ellipse(Point::new(cx, cy), rx, ry);
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[pyclass(name = "FontFace")]
#[derive(Clone)]
pub struct PyFontFace {
    pub inner: FontFace,
}

#[pymethods]
impl PyFontFace {
    #[staticmethod]
    fn from_file(path: std::path::PathBuf) -> PyResult<Self> {
        let inner = FontFace::from_file(path).into_py_result()?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn create_from_file(path: std::path::PathBuf) -> PyResult<Self> {
        Self::from_file(path)
    }

    #[staticmethod]
    fn from_data(data: &[u8]) -> PyResult<Self> {
        let inner = FontFace::from_data(data.to_vec()).into_py_result()?;
        Ok(Self { inner })
    }

    #[getter]
    fn family(&self) -> &str {
        self.inner.family()
    }

    #[getter]
    fn weight(&self) -> u16 {
        self.inner.weight()
    }

    #[getter]
    fn is_italic(&self) -> bool {
        self.inner.is_italic()
    }

    fn __repr__(&self) -> String {
        format!("FontFace({:?})", self.inner.family())
    }
}

#[pyclass(name = "Font")]
#[derive(Clone)]
pub struct PyFont {
    pub inner: Font,
}

#[pymethods]
impl PyFont {
    #[new]
    fn new(face: PyRef<'_, PyFontFace>, size: f32) -> PyResult<Self> {
        let inner = Font::new(&face.inner, size).into_py_result()?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn create_new(face: PyRef<'_, PyFontFace>, size: f32) -> PyResult<Self> {
        Self::new(face, size)
    }

    #[getter]
    fn face(&self) -> PyFontFace {
        PyFontFace {
            inner: self.inner.face().clone(),
        }
    }

    #[getter]
    fn size(&self) -> f32 {
        self.inner.size()
    }
}

#[pyclass(name = "Gradient")]
#[derive(Clone)]
pub struct PyGradient {
    pub inner: Gradient,
}

#[pymethods]
impl PyGradient {
    #[staticmethod]
    fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            inner: Gradient::linear(x0, y0, x1, y1),
        }
    }

    #[staticmethod]
    fn radial(cx: f64, cy: f64, fx: f64, fy: f64, r: f64) -> Self {
        Self {
            inner: Gradient::radial(cx, cy, fx, fy, r),
        }
    }

    fn add_stop(&mut self, offset: f64, color: ColorArg) -> PyResult<()> {
        self.inner.add_stop(offset, color.0).into_py_result()
    }

    fn reset_stops(&mut self) {
        self.inner.reset_stops();
    }

    #[getter]
    fn stop_count(&self) -> usize {
        self.inner.stops().len()
    }

    #[getter]
    fn extend_mode(&self) -> PyExtendMode {
        self.inner.extend_mode().into()
    }

    #[setter]
    fn set_extend_mode(&mut self, mode: PyExtendMode) {
        self.inner.set_extend_mode(mode.into());
    }

    #[getter]
    fn is_radial(&self) -> bool {
        matches!(self.inner.kind(), GradientKind::Radial { .. })
    }
}

#[pyclass(name = "Pattern", unsendable)]
#[derive(Clone)]
pub struct PyPattern {
    pub inner: Pattern,
}

#[pymethods]
impl PyPattern {
    #[new]
    #[pyo3(signature = (image, area=None, extend_mode=PyExtendMode::Repeat))]
    fn new(
        image: PyRef<'_, PyImage>,
        area: Option<RectIArg>,
        extend_mode: PyExtendMode,
    ) -> PyResult<Self> {
        let inner = Pattern::new(&image.inner, area.map(Into::into), extend_mode.into())
            .into_py_result()?;
        Ok(Self { inner })
    }

    fn set_transform(&mut self, matrix: PyMatrix2D) {
        self.inner.set_transform(matrix.into());
    }

    fn reset_transform(&mut self) {
        self.inner.reset_transform();
    }

    fn get_transform(&self) -> PyMatrix2D {
        self.inner.transform().into()
    }

    #[getter]
    fn extend_mode(&self) -> PyExtendMode {
        self.inner.extend_mode().into()
    }

    #[setter]
    fn set_extend_mode(&mut self, mode: PyExtendMode) {
        self.inner.set_extend_mode(mode.into());
    }

    #[getter]
    fn width(&self) -> u32 {
        self.inner.width()
    }

    #[getter]
    fn height(&self) -> u32 {
        self.inner.height()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{global, has_numpy, run_script};
    use pyo3::exceptions::{PyTypeError, PyValueError};
    use pyo3::prelude::*;
    use rstest::rstest;

    type Rgba = (u8, u8, u8, u8);

    #[test]
    fn test_pixel_outside_image_is_none() {
        Python::with_gil(|py| {
            let globals = run_script(
                py,
                r#"
img = paintctx.Image(width=2, height=2)
inside = img.pixel(1, 1)
past_row = img.pixel(2, 0)
past_end = img.pixel(0, 2)
"#,
            )
            .unwrap();
            assert_eq!(global::<Option<Rgba>>(&globals, "inside"), Some((0, 0, 0, 0)));
            assert_eq!(global::<Option<Rgba>>(&globals, "past_row"), None);
            assert_eq!(global::<Option<Rgba>>(&globals, "past_end"), None);
        });
    }

    #[test]
    fn test_image_from_array_like() {
        Python::with_gil(|py| {
            let globals = run_script(
                py,
                r#"
import functools, types
data = bytes([10, 20, 30, 255] * 5 + [200, 100, 50, 255])
array = types.SimpleNamespace(
    shape=(2, 3, 4), dtype="uint8", tobytes=functools.partial(bytes, data)
)
img = paintctx.Image(array)
size = (img.width, img.height)
first = img.pixel(0, 0)
last = img.pixel(2, 1)
"#,
            )
            .unwrap();
            assert_eq!(global::<(u32, u32)>(&globals, "size"), (3, 2));
            assert_eq!(global::<Rgba>(&globals, "first"), (10, 20, 30, 255));
            assert_eq!(global::<Rgba>(&globals, "last"), (200, 100, 50, 255));
        });
    }

    #[rstest]
    #[case("types.SimpleNamespace(shape=(2, 3), dtype='uint8', tobytes=bytes)")]
    #[case("types.SimpleNamespace(shape=(2, 3, 3), dtype='uint8', tobytes=bytes)")]
    #[case("types.SimpleNamespace(shape=(2, 3, 4), dtype='float32', tobytes=bytes)")]
    fn test_bad_arrays_raise_value_error(#[case] array: &str) {
        Python::with_gil(|py| {
            let code = format!("import types\npaintctx.Image({})\n", array);
            let err = run_script(py, &code).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py), "{}", err);
        });
    }

    #[test]
    fn test_width_without_height_raises_type_error() {
        Python::with_gil(|py| {
            let err = run_script(py, "paintctx.Image(16)\n").unwrap_err();
            assert!(err.is_instance_of::<PyTypeError>(py), "{}", err);
        });
    }

    #[test]
    fn test_drawing_is_copied_back_into_numpy_array() {
        Python::with_gil(|py| {
            if !has_numpy(py) {
                return;
            }
            let globals = run_script(
                py,
                r#"
import numpy as np
array = np.zeros((3, 5, 4), dtype=np.uint8)
img = paintctx.Image(array)
ctx = paintctx.Context(img)
ctx.set_fill_style((255, 0, 0))
ctx.fill_rect((0, 0, 2, 3))
untouched = tuple(int(v) for v in array[1, 0])
ctx.flush()
left = tuple(int(v) for v in array[1, 0])
right = tuple(int(v) for v in array[1, 4])

ctx.set_fill_style((0, 0, 255))
ctx.fill_rect((4, 0, 1, 3))
del ctx
dropped = tuple(int(v) for v in array[2, 4])

shape = img.to_numpy().shape
converted = tuple(int(v) for v in np.asarray(img)[0, 0])
"#,
            )
            .unwrap();
            assert_eq!(global::<Rgba>(&globals, "untouched"), (0, 0, 0, 0));
            assert_eq!(global::<Rgba>(&globals, "left"), (255, 0, 0, 255));
            assert_eq!(global::<Rgba>(&globals, "right"), (0, 0, 0, 0));
            assert_eq!(global::<Rgba>(&globals, "dropped"), (0, 0, 255, 255));
            assert_eq!(global::<(usize, usize, usize)>(&globals, "shape"), (3, 5, 4));
            assert_eq!(global::<Rgba>(&globals, "converted"), (255, 0, 0, 255));
        });
    }
}
