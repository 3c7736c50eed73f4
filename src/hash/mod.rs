//! Hash functions used by the key derivation code.
//!
//! Currently only BLAKE2b, which Argon2 uses for its initial hash and for
//! the variable-length H' construction.

pub mod blake2b;

pub use blake2b::core::{BLAKE2B_OUTBYTES, blake2b, blake2b_long};
