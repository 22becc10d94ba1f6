//! This module is the collection of pure, stateless codec kernels.
//!
//! Each kernel is a generic, panic-free function over concretely typed Arrow
//! containers. Kernels never perform runtime kind checks on dynamic arrays
//! (that is the bridge's job) and never call each other; composition happens
//! in the caller.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Packing/unpacking of binary arrays to the length-prefixed wire layout.
pub mod byte_array;

/// Bulk UTF-8 transcoding between text arrays and binary arrays.
pub mod utf8;
