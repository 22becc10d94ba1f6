// In: src/config.rs

//! The single source of truth for codec configuration.
//!
//! This module defines the `CodecConfig` struct, created once at the
//! application boundary (e.g. from a Python keyword argument or a config
//! file) and passed down by reference. Configuration only affects the
//! unpack side: which offset width the output container uses, and how
//! early a hostile length field is rejected. It never changes the bytes
//! a successful operation produces.

use serde::{Deserialize, Serialize};

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Selects the offset width of the binary array materialized by unpack.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OffsetWidth {
    /// **Default:** 32-bit offsets unless the declared payload cannot fit
    /// them, in which case 64-bit offsets are used.
    #[default]
    Auto,

    /// Always 32-bit offsets (`BinaryArray`). Unpacking a payload larger
    /// than `i32::MAX` bytes fails.
    Narrow,

    /// Always 64-bit offsets (`LargeBinaryArray`).
    Wide,
}

/// Unpack-side policy for the byte-array codec.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Offset width of the array produced by `unpack_byte_array`.
    #[serde(default)]
    pub offset_width: OffsetWidth,

    /// Upper bound accepted for a single record's length field. A record
    /// declaring a longer payload is rejected as corrupt before any of it
    /// is materialized. `None` leaves the buffer length as the only bound.
    #[serde(default)]
    pub max_element_len: Option<u32>,
}

//==================================================================================
// II. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.offset_width, OffsetWidth::Auto);
        assert_eq!(config.max_element_len, None);
    }

    #[test]
    fn test_config_deserializes_snake_case() {
        let config: CodecConfig =
            serde_json::from_str(r#"{"offset_width": "wide", "max_element_len": 1024}"#).unwrap();
        assert_eq!(config.offset_width, OffsetWidth::Wide);
        assert_eq!(config.max_element_len, Some(1024));
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }
}
