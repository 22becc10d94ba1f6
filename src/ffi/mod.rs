// In: src/ffi/mod.rs

//! Python FFI surface of the codec (feature `python`).

pub mod python;

pub use python::{
    array_decode_utf8_py, array_encode_utf8_py, enable_verbose_logging_py, pack_byte_array_py,
    unpack_byte_array_py,
};
