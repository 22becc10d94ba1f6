//! This module contains the pure, stateless, and performant kernels for
//! packing and unpacking binary arrays to and from the on-disk layout used
//! for variable-length byte arrays.
//!
//! The wire layout is `u32_le(length) ++ raw_bytes[length]` per record,
//! records concatenated with no separators, terminator, or padding. Packing
//! pre-sizes the output exactly and fills it in one pass; unpacking walks
//! the buffer once and requires it to contain exactly the expected number
//! of records with nothing left over.

use arrow::array::{Array, GenericBinaryArray, OffsetSizeTrait};
use arrow::buffer::{Buffer, OffsetBuffer, ScalarBuffer};

use crate::error::PalungError;

/// Width of the little-endian length prefix in front of every record.
pub const LENGTH_PREFIX_BYTES: usize = 4;

//==================================================================================
// 1. Public API
//==================================================================================

/// Serializes a binary array into a single length-prefixed buffer.
///
/// The output is freshly allocated, sized exactly to
/// `sum(4 + element_len)`, and never aliases the input's buffers. An empty
/// array packs to an empty buffer. An element longer than `u32::MAX`
/// (reachable only with 64-bit offsets) fails with
/// [`PalungError::LengthOverflow`] rather than truncating its length field.
pub fn pack<O: OffsetSizeTrait>(input: &GenericBinaryArray<O>) -> Result<Vec<u8>, PalungError> {
    if input.null_count() > 0 {
        return Err(PalungError::UnsupportedType(format!(
            "binary array has {} null values; strip or fill nulls before packing",
            input.null_count()
        )));
    }

    let payload: usize = (0..input.len()).map(|i| input.value(i).len()).sum();
    let mut output = Vec::with_capacity(input.len() * LENGTH_PREFIX_BYTES + payload);

    for index in 0..input.len() {
        let bytes = input.value(index);
        let length = u32::try_from(bytes.len()).map_err(|_| PalungError::LengthOverflow {
            index,
            length: bytes.len(),
        })?;
        output.extend_from_slice(&length.to_le_bytes());
        output.extend_from_slice(bytes);
    }

    Ok(output)
}

/// Deserializes a length-prefixed buffer into a binary array of exactly
/// `expected_count` elements.
///
/// Success requires both that `expected_count` records were read and that
/// the last record ends exactly at the end of the buffer. Any structural
/// mismatch — a length prefix or payload that would read past the end,
/// trailing bytes after the last record, or a length field above
/// `max_element_len` when a limit is set — fails with
/// [`PalungError::CorruptData`] before any array is returned. Payload bytes
/// are copied into fresh buffers; the output never aliases `buffer`.
pub fn unpack<O: OffsetSizeTrait>(
    buffer: &[u8],
    expected_count: usize,
    max_element_len: Option<u32>,
) -> Result<GenericBinaryArray<O>, PalungError> {
    // A buffer holds at most len/4 records, so never trust `expected_count`
    // alone when reserving; a hostile count must fail, not allocate.
    let plausible_records = buffer.len() / LENGTH_PREFIX_BYTES;
    let mut offsets: Vec<O> = Vec::with_capacity(expected_count.min(plausible_records) + 1);
    offsets.push(O::usize_as(0));

    // Upper bound on the payload: whatever the length prefixes leave over.
    let payload_upper = buffer
        .len()
        .saturating_sub(expected_count.saturating_mul(LENGTH_PREFIX_BYTES));
    let mut values: Vec<u8> = Vec::with_capacity(payload_upper);

    let mut pos = 0usize;
    for record in 0..expected_count {
        if buffer.len() - pos < LENGTH_PREFIX_BYTES {
            return Err(PalungError::CorruptData(format!(
                "record {} needs a {}-byte length prefix but only {} bytes remain",
                record,
                LENGTH_PREFIX_BYTES,
                buffer.len() - pos
            )));
        }
        let prefix: [u8; LENGTH_PREFIX_BYTES] =
            buffer[pos..pos + LENGTH_PREFIX_BYTES].try_into().unwrap();
        let length = u32::from_le_bytes(prefix);
        pos += LENGTH_PREFIX_BYTES;

        if let Some(max) = max_element_len {
            if length > max {
                return Err(PalungError::CorruptData(format!(
                    "record {} declares {} bytes, above the configured maximum of {}",
                    record, length, max
                )));
            }
        }

        let length = length as usize;
        if buffer.len() - pos < length {
            return Err(PalungError::CorruptData(format!(
                "record {} declares {} payload bytes but only {} remain",
                record,
                length,
                buffer.len() - pos
            )));
        }

        values.extend_from_slice(&buffer[pos..pos + length]);
        pos += length;

        let end = O::from_usize(values.len()).ok_or_else(|| {
            PalungError::UnsupportedType(format!(
                "unpacked payload of {} bytes does not fit the requested offset width",
                values.len()
            ))
        })?;
        offsets.push(end);
    }

    if pos != buffer.len() {
        return Err(PalungError::CorruptData(format!(
            "{} trailing bytes after the last of {} records",
            buffer.len() - pos,
            expected_count
        )));
    }

    let offsets = OffsetBuffer::new(ScalarBuffer::from(offsets));
    Ok(GenericBinaryArray::try_new(
        offsets,
        Buffer::from_vec(values),
        None,
    )?)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BinaryArray, LargeBinaryArray};

    /// Reference packing, written directly from the wire-layout definition.
    fn reference_pack(elements: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for e in elements {
            out.extend_from_slice(&(e.len() as u32).to_le_bytes());
            out.extend_from_slice(e);
        }
        out
    }

    #[test]
    fn test_pack_matches_reference_layout() {
        let long = [b"bar\x00".repeat(256), b"z".to_vec()].concat();
        let elements: Vec<&[u8]> = vec![b"foo", &long];
        let array = BinaryArray::from(elements.clone());

        let packed = pack(&array).unwrap();

        assert_eq!(packed, reference_pack(&elements));
        assert_eq!(packed.len(), (4 + 3) + (4 + 1025));
        // Spot-check the second record's prefix directly.
        assert_eq!(&packed[7..11], 1025u32.to_le_bytes().as_slice());
    }

    #[test]
    fn test_pack_empty_array_is_empty_buffer() {
        let array = BinaryArray::from(Vec::<&[u8]>::new());
        assert_eq!(pack(&array).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unpack_empty_buffer_zero_count() {
        let array = unpack::<i32>(&[], 0, None).unwrap();
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn test_roundtrip_preserves_elements_and_order() {
        let elements: Vec<&[u8]> = vec![b"foo", b"a\x00c", b"", b"z"];
        let array = BinaryArray::from(elements.clone());

        let packed = pack(&array).unwrap();
        let unpacked = unpack::<i32>(&packed, elements.len(), None).unwrap();

        assert_eq!(unpacked, array);
    }

    #[test]
    fn test_roundtrip_wide_offsets() {
        let elements: Vec<&[u8]> = vec![b"one", b"two"];
        let array = LargeBinaryArray::from(elements.clone());

        let packed = pack(&array).unwrap();
        let unpacked = unpack::<i64>(&packed, elements.len(), None).unwrap();

        assert_eq!(unpacked, array);
    }

    #[test]
    fn test_unpack_output_does_not_alias_input() {
        let array = BinaryArray::from(vec![&b"foo"[..]]);
        let packed = pack(&array).unwrap();

        let unpacked = unpack::<i32>(&packed, 1, None).unwrap();

        let packed_range = packed.as_ptr() as usize..packed.as_ptr() as usize + packed.len();
        assert!(!packed_range.contains(&(unpacked.values().as_ptr() as usize)));
    }

    #[test]
    fn test_unpack_rejects_every_structural_mismatch() {
        let array = BinaryArray::from(vec![&b"foo"[..], b"bar"]);
        let packed = pack(&array).unwrap();
        assert_eq!(packed.len(), 10);

        let corrupt = |buffer: &[u8], count: usize| {
            let result = unpack::<i32>(buffer, count, None);
            assert!(
                matches!(result, Err(PalungError::CorruptData(_))),
                "expected CorruptData for count {} over {} bytes",
                count,
                buffer.len()
            );
        };

        // Right buffer, wrong counts.
        corrupt(&packed, 1);
        corrupt(&packed, 3);
        // Trailing garbage.
        corrupt(&[&packed[..], b"\x00"].concat(), 2);
        corrupt(&[&packed[..], b"\x01\x02\x03\x04"].concat(), 2);
        // Truncated payload.
        corrupt(&packed[..packed.len() - 1], 2);
    }

    #[test]
    fn test_unpack_rejects_length_field_past_end() {
        let mut buffer = 10u32.to_le_bytes().to_vec();
        buffer.extend_from_slice(b"abc");

        let result = unpack::<i32>(&buffer, 1, None);

        assert!(matches!(result, Err(PalungError::CorruptData(_))));
    }

    #[test]
    fn test_unpack_enforces_max_element_len() {
        let array = BinaryArray::from(vec![&b"foo"[..], b"bar"]);
        let packed = pack(&array).unwrap();

        assert!(unpack::<i32>(&packed, 2, Some(3)).is_ok());
        let result = unpack::<i32>(&packed, 2, Some(2));
        assert!(matches!(result, Err(PalungError::CorruptData(_))));
    }

    #[test]
    fn test_pack_rejects_nulls() {
        let array = BinaryArray::from(vec![Some(&b"ok"[..]), None]);

        let result = pack(&array);

        assert!(matches!(result, Err(PalungError::UnsupportedType(_))));
    }
}
