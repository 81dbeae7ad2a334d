use paintctx_rs::{ContextError, ContextResult};
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::PyErr;

/// Translate a context error into the matching built-in Python exception.
pub fn to_py_err(err: ContextError) -> PyErr {
    let message = err.to_string();
    match err {
        ContextError::InvalidState | ContextError::NoStatesToRestore => {
            PyRuntimeError::new_err(message)
        }
        ContextError::Io(_) => PyOSError::new_err(message),
        ContextError::InvalidDimensions { .. }
        | ContextError::InvalidValue(_)
        | ContextError::InvalidGeometry(_)
        | ContextError::InvalidFormat(_)
        | ContextError::ColorParseError(_)
        | ContextError::PathError(_)
        | ContextError::FontError(_)
        | ContextError::PngError(_) => PyValueError::new_err(message),
    }
}

pub trait IntoPyResult<T> {
    fn into_py_result(self) -> pyo3::PyResult<T>;
}

impl<T> IntoPyResult<T> for ContextResult<T> {
    fn into_py_result(self) -> pyo3::PyResult<T> {
        self.map_err(to_py_err)
    }
}
