//! BLAKE2b (RFC 7693) helpers.
//!
//! The compression function itself comes from the `blake2` crate; this
//! module only adds the two entry points Argon2 needs:
//!
//! - `blake2b`: a plain BLAKE2b digest of 1 to 64 bytes over a list of
//!   input slices, so callers never have to concatenate secrets into a
//!   temporary buffer.
//! - `blake2b_long`: the variable-length hash H' (RFC 9106 §3.3), which
//!   chains 64-byte digests to produce outputs longer than 64 bytes.

pub mod core;
