// In: src/bridge/stateless_api.rs

//! Stateless facade over the codec kernels.
//!
//! Every function here accepts untyped input, performs the runtime kind
//! check exactly once, and dispatches to the matching generic kernel. The
//! accepted input shape is deliberately narrow: variable-length text or
//! binary arrays only. Dictionary-encoded (interned) text, view layouts,
//! fixed-width layouts, and flat primitive buffers are rejected up front
//! rather than silently coerced, and arrays carrying nulls are refused —
//! null handling belongs to the column-chunk assembly layer above.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BinaryArray, LargeBinaryArray, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use log::debug;

use crate::config::{CodecConfig, OffsetWidth};
use crate::error::PalungError;
use crate::kernels::byte_array::{self, LENGTH_PREFIX_BYTES};
use crate::kernels::utf8;

//==================================================================================
// 1. Private Helpers
//==================================================================================

fn downcast<T: 'static>(array: &dyn Array) -> Result<&T, PalungError> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        PalungError::InternalError(
            "array data type tag does not match its concrete representation".to_string(),
        )
    })
}

fn reject_nulls(array: &dyn Array, operation: &str) -> Result<(), PalungError> {
    if array.null_count() > 0 {
        return Err(PalungError::UnsupportedType(format!(
            "array has {} null values; strip or fill nulls before {}",
            array.null_count(),
            operation
        )));
    }
    Ok(())
}

/// Shared rejection messages, so encode and decode describe foreign text
/// representations the same way.
fn unsupported(expected: &str, actual: &DataType) -> PalungError {
    match actual {
        DataType::Dictionary(_, value)
            if matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            PalungError::UnsupportedType(
                "dictionary-encoded (interned) text cannot share the codec's buffer layout; \
                 decode it to a plain text array first"
                    .to_string(),
            )
        }
        other => PalungError::UnsupportedType(format!("expected {}, got {:?}", expected, other)),
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Re-expresses an array of text values as an array of UTF-8 byte strings.
///
/// Accepts `Utf8` and `LargeUtf8` arrays only; everything else fails with
/// an eager type error and no work done.
pub fn encode_utf8_array(array: &dyn Array) -> Result<ArrayRef, PalungError> {
    debug!(
        "encode_utf8_array: {} elements of {:?}",
        array.len(),
        array.data_type()
    );
    match array.data_type() {
        DataType::Utf8 => {
            reject_nulls(array, "encoding")?;
            Ok(Arc::new(utf8::encode(downcast::<StringArray>(array)?)))
        }
        DataType::LargeUtf8 => {
            reject_nulls(array, "encoding")?;
            Ok(Arc::new(utf8::encode(downcast::<LargeStringArray>(array)?)))
        }
        other => Err(unsupported("a variable-length text array", other)),
    }
}

/// Decodes an array of UTF-8 byte strings back into an array of text values.
///
/// Accepts `Binary` and `LargeBinary` arrays only. The first element that is
/// not valid UTF-8 aborts the call with its index and byte offset.
pub fn decode_utf8_array(array: &dyn Array) -> Result<ArrayRef, PalungError> {
    debug!(
        "decode_utf8_array: {} elements of {:?}",
        array.len(),
        array.data_type()
    );
    match array.data_type() {
        DataType::Binary => Ok(Arc::new(utf8::decode(downcast::<BinaryArray>(array)?)?)),
        DataType::LargeBinary => Ok(Arc::new(utf8::decode(downcast::<LargeBinaryArray>(
            array,
        )?)?)),
        other => Err(unsupported("a variable-length binary array", other)),
    }
}

/// Packs an array of byte strings into the length-prefixed wire buffer.
///
/// Accepts `Binary` and `LargeBinary` arrays only. A `UInt8` array is
/// called out specifically: it is one flat buffer, not a sequence of byte
/// strings, and packing it element-wise is never what the caller meant.
pub fn pack_byte_array(array: &dyn Array) -> Result<Vec<u8>, PalungError> {
    debug!(
        "pack_byte_array: {} elements of {:?}",
        array.len(),
        array.data_type()
    );
    match array.data_type() {
        DataType::Binary => byte_array::pack(downcast::<BinaryArray>(array)?),
        DataType::LargeBinary => byte_array::pack(downcast::<LargeBinaryArray>(array)?),
        DataType::UInt8 => Err(PalungError::UnsupportedType(
            "got a flat byte buffer (UInt8 array) where a sequence of byte strings was required"
                .to_string(),
        )),
        other => Err(unsupported("a variable-length binary array", other)),
    }
}

/// Unpacks a length-prefixed wire buffer into a binary array of exactly
/// `expected_count` elements, using the default configuration.
pub fn unpack_byte_array(buffer: &[u8], expected_count: usize) -> Result<ArrayRef, PalungError> {
    // Since this is the convenience entry point, there is no user-provided
    // config; unpack with the defaults.
    unpack_byte_array_with_config(buffer, expected_count, &CodecConfig::default())
}

/// Unpacks a length-prefixed wire buffer under an explicit [`CodecConfig`].
///
/// The config decides the offset width of the produced array (`Auto` widens
/// only when the payload cannot fit 32-bit offsets) and may cap the length
/// any single record is allowed to declare.
pub fn unpack_byte_array_with_config(
    buffer: &[u8],
    expected_count: usize,
    config: &CodecConfig,
) -> Result<ArrayRef, PalungError> {
    let wide = match config.offset_width {
        OffsetWidth::Narrow => false,
        OffsetWidth::Wide => true,
        OffsetWidth::Auto => {
            buffer
                .len()
                .saturating_sub(expected_count.saturating_mul(LENGTH_PREFIX_BYTES))
                > i32::MAX as usize
        }
    };
    debug!(
        "unpack_byte_array: {} records from {} bytes (wide offsets: {})",
        expected_count,
        buffer.len(),
        wide
    );
    if wide {
        let array = byte_array::unpack::<i64>(buffer, expected_count, config.max_element_len)?;
        Ok(Arc::new(array))
    } else {
        let array = byte_array::unpack::<i32>(buffer, expected_count, config.max_element_len)?;
        Ok(Arc::new(array))
    }
}
