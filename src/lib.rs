//! This file is the root of the `palung_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring the top-level modules of the library (`bridge`, `kernels`,
//!     `config`, `error`) so the Rust compiler knows they exist.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (feature `python`).

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;

#[cfg(feature = "python")]
mod ffi;

pub use error::PalungError;

//==================================================================================
// 2. Python Module Definition
//==================================================================================

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `palung_codec` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn palung_codec(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::array_encode_utf8_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::array_decode_utf8_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::pack_byte_array_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::unpack_byte_array_py, m)?)?;

    // --- Turn on logging for debugging column-chunk codec calls ---
    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    Ok(())
}
