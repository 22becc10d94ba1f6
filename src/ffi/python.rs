// In: src/ffi/python.rs

//! The `#[pyfunction]` wrappers exposed by the `palung_codec` Python module.
//!
//! Each wrapper marshals pyarrow/builtin objects across the boundary,
//! releases the GIL for the actual codec work, and converts `PalungError`
//! into the Python exception type callers of the module match on (see
//! `error.rs`). Foreign in-memory representations (numpy fixed-width text,
//! pandas object columns) must be converted to arrow by the caller before
//! crossing this boundary; a text value that is not valid Unicode (e.g. an
//! unpaired surrogate) cannot cross the pyarrow conversion at all, which is
//! where that failure mode surfaces.

use arrow::array::{make_array, Array, ArrayData, BinaryArray, LargeBinaryArray};
use arrow::pyarrow::{FromPyArrow, ToPyArrow};
use log::LevelFilter;
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyList};
use std::fs::OpenOptions;
use std::sync::Once;

use crate::config::CodecConfig;
use crate::error::PalungError;

//==================================================================================
// I. Text Transcoder
//==================================================================================

/// Encodes a pyarrow text array into a pyarrow binary array of UTF-8 bytes.
#[pyfunction]
#[pyo3(name = "array_encode_utf8")]
pub fn array_encode_utf8_py(py: Python, array_py: &PyAny) -> PyResult<PyObject> {
    let array_data = ArrayData::from_pyarrow(array_py)?;
    let rust_array = make_array(array_data);
    let encoded =
        py.allow_threads(move || crate::bridge::encode_utf8_array(rust_array.as_ref()))?;
    encoded.to_data().to_pyarrow(py)
}

/// Decodes a pyarrow binary array of UTF-8 bytes into a pyarrow text array.
#[pyfunction]
#[pyo3(name = "array_decode_utf8")]
pub fn array_decode_utf8_py(py: Python, array_py: &PyAny) -> PyResult<PyObject> {
    let array_data = ArrayData::from_pyarrow(array_py)?;
    let rust_array = make_array(array_data);
    let decoded =
        py.allow_threads(move || crate::bridge::decode_utf8_array(rust_array.as_ref()))?;
    decoded.to_data().to_pyarrow(py)
}

//==================================================================================
// II. Byte-Array Packer
//==================================================================================

/// Packs a list of `bytes` objects into the length-prefixed wire buffer.
///
/// The argument must be a concrete `list`; a tuple, a generator, or a bare
/// `bytes` object (one flat buffer where a sequence was required) raises
/// `TypeError`, as does any element that is not `bytes`.
#[pyfunction]
#[pyo3(name = "pack_byte_array")]
pub fn pack_byte_array_py<'py>(py: Python<'py>, items: &'py PyList) -> PyResult<&'py PyBytes> {
    let mut elements: Vec<&[u8]> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let bytes: &PyBytes = item.downcast().map_err(|_| {
            PyErr::new::<PyTypeError, _>(format!(
                "pack_byte_array requires a list of bytes; element {} is {}",
                index,
                item.get_type().name().unwrap_or("<unknown>")
            ))
        })?;
        elements.push(bytes.as_bytes());
    }

    // BinaryArray::from copies the payload, so the GIL can be released.
    let array = BinaryArray::from(elements);
    let packed = py.allow_threads(move || crate::bridge::pack_byte_array(&array))?;
    Ok(PyBytes::new(py, &packed))
}

/// Unpacks a length-prefixed wire buffer into a list of `bytes` objects.
#[pyfunction]
#[pyo3(name = "unpack_byte_array")]
#[pyo3(signature = (data, count, max_element_len = None))]
pub fn unpack_byte_array_py(
    py: Python,
    data: &[u8],
    count: usize,
    max_element_len: Option<u32>,
) -> PyResult<PyObject> {
    let config = CodecConfig {
        max_element_len,
        ..CodecConfig::default()
    };
    let unpacked =
        py.allow_threads(|| crate::bridge::unpack_byte_array_with_config(data, count, &config))?;

    let list = PyList::empty(py);
    if let Some(array) = unpacked.as_any().downcast_ref::<BinaryArray>() {
        for i in 0..array.len() {
            list.append(PyBytes::new(py, array.value(i)))?;
        }
    } else if let Some(array) = unpacked.as_any().downcast_ref::<LargeBinaryArray>() {
        for i in 0..array.len() {
            list.append(PyBytes::new(py, array.value(i)))?;
        }
    } else {
        return Err(PalungError::InternalError(
            "unpack produced an unexpected array type".to_string(),
        )
        .into());
    }
    Ok(list.into())
}

//==================================================================================
// III. Logging
//==================================================================================

static INIT_LOGGER: Once = Once::new();

#[pyfunction]
#[pyo3(name = "enable_verbose_logging")]
#[pyo3(signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(filename)
                .expect("Could not open log file in append mode");
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
}
