//! This module contains the pure, stateless, and performant kernels for bulk
//! UTF-8 transcoding between text arrays and binary arrays.
//!
//! Arrow text arrays already store their payload as contiguous UTF-8 bytes,
//! so encoding is a zero-copy reinterpretation of the array's buffers. This
//! is exactly why only the variable-length text representation is accepted
//! by the bridge: fixed-width and dictionary-encoded (interned) layouts
//! cannot share their buffers with a binary array. Decoding validates every
//! element and reuses the input buffers whenever the input occupies them
//! exactly, falling back to a single pre-sized copy for sliced inputs.

use arrow::array::{
    Array, GenericBinaryArray, GenericStringArray, GenericStringBuilder, OffsetSizeTrait,
};

use crate::error::PalungError;

//==================================================================================
// 1. Public API
//==================================================================================

/// Re-expresses a text array as a binary array of its UTF-8 bytes.
///
/// The output shares the input's offsets and values buffers; element `i` of
/// the result is byte-for-byte the UTF-8 encoding of input element `i`.
/// Infallible at this level: Arrow text is valid UTF-8 by construction, so
/// there is no unencodable code point to report. Null slots, if any, are
/// carried through unchanged.
pub fn encode<O: OffsetSizeTrait>(input: &GenericStringArray<O>) -> GenericBinaryArray<O> {
    GenericBinaryArray::new(
        input.offsets().clone(),
        input.values().clone(),
        input.nulls().cloned(),
    )
}

/// Decodes a binary array into a text array, validating each element as
/// UTF-8.
///
/// Elements are validated in order and the first invalid one aborts the
/// whole call with [`PalungError::Utf8Decode`], carrying the element index
/// and the byte offset of the first invalid byte within that element. No
/// partially decoded array is ever returned. Element boundaries are
/// honored: a multi-byte sequence split across two elements fails even
/// though the concatenated buffer would be valid UTF-8.
///
/// Null handling belongs to the caller; an input with null slots is
/// rejected, since the bytes underneath a null slot carry no meaning.
pub fn decode<O: OffsetSizeTrait>(
    input: &GenericBinaryArray<O>,
) -> Result<GenericStringArray<O>, PalungError> {
    if input.null_count() > 0 {
        return Err(PalungError::UnsupportedType(format!(
            "binary array has {} null values; strip or fill nulls before decoding",
            input.null_count()
        )));
    }

    for index in 0..input.len() {
        if let Err(e) = std::str::from_utf8(input.value(index)) {
            return Err(PalungError::Utf8Decode {
                index,
                offset: e.valid_up_to(),
            });
        }
    }

    // The window covered by the offsets. When it spans the whole values
    // buffer the validated bytes ARE the buffer, and it can be shared.
    let offsets = input.value_offsets();
    let first = offsets.first().map(|o| o.as_usize()).unwrap_or(0);
    let last = offsets.last().map(|o| o.as_usize()).unwrap_or(0);

    if first == 0 && last == input.values().len() {
        let array = GenericStringArray::try_new(
            input.offsets().clone(),
            input.values().clone(),
            None,
        )?;
        return Ok(array);
    }

    // Sliced input: the values buffer holds bytes outside the validated
    // window, so rebuild into a fresh, exactly-sized array.
    let mut builder = GenericStringBuilder::<O>::with_capacity(input.len(), last - first);
    for index in 0..input.len() {
        let text = std::str::from_utf8(input.value(index)).map_err(|e| {
            PalungError::InternalError(format!(
                "element {} failed re-validation after passing the first pass: {}",
                index, e
            ))
        })?;
        builder.append_value(text);
    }
    Ok(builder.finish())
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BinaryArray, LargeStringArray, StringArray};

    fn sample_strings() -> Vec<&'static str> {
        vec!["abc", "a\0c", "héhé", "プログラミング"]
    }

    #[test]
    fn test_encode_matches_per_element_utf8() {
        let strings = sample_strings();
        let array = StringArray::from(strings.clone());

        let encoded = encode(&array);

        assert_eq!(encoded.len(), strings.len());
        for (i, s) in strings.iter().enumerate() {
            assert_eq!(encoded.value(i), s.as_bytes());
        }
    }

    #[test]
    fn test_encode_is_zero_copy() {
        let array = StringArray::from(sample_strings());
        let encoded = encode(&array);

        assert_eq!(encoded.values().as_ptr(), array.values().as_ptr());
    }

    #[test]
    fn test_roundtrip_narrow_and_wide_offsets() {
        let strings = sample_strings();

        let narrow = StringArray::from(strings.clone());
        let decoded = decode(&encode(&narrow)).unwrap();
        assert_eq!(decoded, narrow);

        let wide = LargeStringArray::from(strings);
        let decoded = decode(&encode(&wide)).unwrap();
        assert_eq!(decoded, wide);
    }

    #[test]
    fn test_roundtrip_empty_array() {
        let array = StringArray::from(Vec::<&str>::new());
        let decoded = decode(&encode(&array)).unwrap();
        assert_eq!(decoded.len(), 0);
    }

    #[test]
    fn test_decode_is_zero_copy_for_unsliced_input() {
        let binary = BinaryArray::from(vec![&b"foo"[..], b"bar"]);
        let decoded = decode(&binary).unwrap();

        assert_eq!(decoded.values().as_ptr(), binary.values().as_ptr());
    }

    #[test]
    fn test_decode_invalid_sequence_reports_index_and_offset() {
        let binary = BinaryArray::from(vec![&b"abc"[..], b"\x00\xff"]);

        let result = decode(&binary);

        assert!(matches!(
            result,
            Err(PalungError::Utf8Decode { index: 1, offset: 1 })
        ));
    }

    #[test]
    fn test_decode_rejects_multibyte_split_across_elements() {
        // "é" is C3 A9; splitting it across two elements must fail even
        // though the concatenated buffer decodes cleanly.
        let binary = BinaryArray::from(vec![&b"h\xc3"[..], b"\xa9h"]);

        let result = decode(&binary);

        assert!(matches!(
            result,
            Err(PalungError::Utf8Decode { index: 0, offset: 1 })
        ));
    }

    #[test]
    fn test_decode_sliced_input_copies_correctly() {
        let binary = BinaryArray::from(vec![&b"aa"[..], b"caf\xc3\xa9", b"zz"]);
        let sliced = binary.slice(1, 1);

        let decoded = decode(&sliced).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.value(0), "café");
    }

    #[test]
    fn test_decode_rejects_nulls() {
        let binary = BinaryArray::from(vec![Some(&b"ok"[..]), None]);

        let result = decode(&binary);

        assert!(matches!(result, Err(PalungError::UnsupportedType(_))));
    }

    #[test]
    fn test_encode_preserves_embedded_zero_bytes() {
        let array = StringArray::from(vec!["a\0c"]);
        let encoded = encode(&array);
        assert_eq!(encoded.value(0), b"a\x00c");
    }
}
