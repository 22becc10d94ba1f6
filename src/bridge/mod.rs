// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing dynamic-typed API of the palung
// codec. It is the one place where untyped data (`&dyn Array` from FFI or
// from a column-chunk reader) is kind-checked and dispatched onto the pure,
// concretely typed kernels. Nothing below the bridge ever inspects a
// `DataType` tag.
//
// Data Flow (column write):
//
//   1. [Caller / FFI]                 -> `&dyn Array` of text
//         |
//   2. [encode_utf8_array]           -> kind check, dispatch to
//         |                             `kernels::utf8::encode` (zero-copy)
//   3. [pack_byte_array]             -> kind check, dispatch to
//                                       `kernels::byte_array::pack`
//                                    -> `Vec<u8>` wire buffer
//
// Data Flow (column read):
//
//   1. [Caller / FFI]                -> `&[u8]` wire buffer + element count
//         |
//   2. [unpack_byte_array]           -> `kernels::byte_array::unpack`
//         |                             (offset width per `CodecConfig`)
//   3. [decode_utf8_array]           -> kind check, dispatch to
//                                       `kernels::utf8::decode`
//                                    -> `ArrayRef` of text
//
// The two kernel modules never call each other; the pairing above lives
// entirely in the caller.
// ====================================================================================

pub mod stateless_api;

// --- Low-Level Stateless API (for FFI and testing) ---
pub use stateless_api::{
    decode_utf8_array, encode_utf8_array, pack_byte_array, unpack_byte_array,
    unpack_byte_array_with_config,
};
